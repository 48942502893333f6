//! Player events and intents
//!
//! Outbound: [`PlayerEvent`], emitted on every committed change and handed
//! to subscribers or drained by the host.
//! Inbound: [`Intent`] (what the presentation layer may ask for) and
//! [`Message`] (intents plus clock and loader signals), processed one at a
//! time by the player's single owner.

use crate::boundary::BoundaryAction;
use crate::modes::Modes;
use crate::types::TransportState;
use serde::{Deserialize, Serialize};

/// Events emitted by the player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum PlayerEvent {
    /// Transport switched between playing and paused
    StateChanged {
        /// The new transport state
        state: TransportState,
    },

    /// Current track changed (selection, skip, or natural advance)
    TrackChanged {
        /// ID of the new current track
        track_id: String,
        /// ID of the previous track
        previous_track_id: Option<String>,
    },

    /// Queue rebuilt from a new selection
    QueueChanged {
        /// Queue length (always the catalog size)
        length: usize,
        /// Cursor after the rebuild
        current_index: usize,
    },

    /// Shuffle or loop flags changed
    ModesChanged {
        /// The new modes
        modes: Modes,
    },

    /// Elapsed time moved by a tick, seek, or restart
    PositionUpdate {
        /// Seconds into the track
        elapsed: f64,
        /// Track length in seconds
        total: f64,
    },

    /// Track reached its end during playback
    TrackFinished {
        /// ID of the finished track
        track_id: String,
        /// What the boundary controller decided
        action: BoundaryAction,
    },

    /// Loader or clock could not play the current track
    TrackUnavailable {
        /// ID of the affected track
        track_id: String,
        /// Reason reported by the collaborator
        reason: String,
    },
}

/// Requests dispatched by the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Intent {
    /// Rebuild the queue around this track and play it
    SelectTrack { id: String },
    TogglePlayPause,
    Play,
    Pause,
    SkipNext,
    SkipPrevious,
    CycleLoop,
    ToggleShuffle,
    /// Scrub to a position in seconds
    Seek { seconds: f64 },
}

/// Everything the player's owner feeds it
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// User action
    Intent(Intent),
    /// Clock advanced by this many seconds
    Tick(f64),
    /// Collaborator failed to play the current track
    TrackUnavailable(String),
}

impl From<Intent> for Message {
    fn from(intent: Intent) -> Self {
        Message::Intent(intent)
    }
}

/// Successful transition result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Committed state changed
    Changed,
    /// Nothing to do (e.g. selecting the current track)
    NoOp,
}

impl Outcome {
    pub fn is_noop(self) -> bool {
        self == Outcome::NoOp
    }
}
