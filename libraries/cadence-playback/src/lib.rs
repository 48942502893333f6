//! Cadence - Playback Core
//!
//! Platform-agnostic playback state machine and queue engine for the
//! Cadence player.
//!
//! This crate provides:
//! - Validated, name-sorted track catalog
//! - Queue engine (sequential rotation + shuffle with pinned head)
//! - Loop modes (off, loop all, loop one) with a three-state cycle
//! - Transport state machine (play, pause, seek, restart, clamped ticks)
//! - End-of-track boundary decisions
//! - Event notification for presentation layers
//!
//! # Architecture
//!
//! `cadence-playback` never touches audio:
//! - No decoding or mixing
//! - No timers of its own
//! - No rendering
//!
//! Whatever plays the audio implements [`PlaybackClock`] and feeds
//! `tick(delta)` back into the [`Player`] while it runs.
//!
//! # Example: Basic Playback
//!
//! ```rust
//! use cadence_playback::{Catalog, ManualClock, PlaybackConfig, Player, Track};
//!
//! let catalog = Catalog::load(vec![
//!     Track::new("feather", "Feather", "Sabrina Carpenter", 185.0),
//!     Track::new("vampire", "Vampire", "Olivia Rodrigo", 219.0),
//! ])
//! .unwrap();
//!
//! let clock = ManualClock::new();
//! let mut player = Player::new(catalog, PlaybackConfig::default(), Box::new(clock.clone()));
//!
//! player.select_track("vampire").unwrap();
//! assert!(clock.is_running());
//!
//! player.tick(1.0).unwrap();
//! assert_eq!(player.transport().elapsed(), 1.0);
//! ```
//!
//! # Example: Loop Modes
//!
//! ```rust
//! use cadence_playback::{Catalog, ManualClock, PlaybackConfig, Player, Track, BoundaryAction};
//!
//! let catalog = Catalog::load(vec![Track::new("s1", "S1", "Artist", 10.0)]).unwrap();
//! let mut player = Player::new(catalog, PlaybackConfig::default(), Box::new(ManualClock::new()));
//!
//! // off -> loop all -> loop one
//! player.cycle_loop();
//! player.cycle_loop();
//! assert!(player.modes().is_loop_one());
//!
//! player.play();
//! assert_eq!(player.tick(10.0).unwrap(), Some(BoundaryAction::RepeatTrack));
//! assert_eq!(player.transport().elapsed(), 0.0);
//! ```
//!
//! # Example: Platform Integration
//!
//! ```rust,no_run
//! use cadence_playback::{PlaybackClock, Track};
//!
//! // Implement PlaybackClock for your platform
//! struct AudioElementClock {
//!     // ... handle to the platform player
//! }
//!
//! impl PlaybackClock for AudioElementClock {
//!     fn start(&mut self) { /* begin playback and ticking */ }
//!     fn stop(&mut self) { /* pause */ }
//!     fn seek_to(&mut self, seconds: f64) { /* move the media position */ }
//!     fn load(&mut self, track: &Track) { /* swap source to track.audio_path */ }
//! }
//! ```

pub mod boundary;
mod catalog;
mod clock;
mod error;
mod events;
mod modes;
mod player;
mod queue;
mod shuffle;
mod transport;
pub mod types;

#[cfg(feature = "wasm")]
pub mod wasm;

// Public exports
pub use boundary::BoundaryAction;
pub use catalog::Catalog;
pub use clock::{ClockDriver, ClockLog, ManualClock, PlaybackClock};
pub use error::{PlaybackError, Result};
pub use events::{Intent, Message, Outcome, PlayerEvent};
pub use modes::Modes;
pub use player::{Player, PlayerSnapshot};
pub use queue::Queue;
pub use shuffle::shuffle_tracks;
pub use transport::{Tick, Transport};
pub use types::{format_time, progress_percent, PlaybackConfig, RepeatMode, Track, TransportState};
