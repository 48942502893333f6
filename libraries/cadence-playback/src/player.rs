//! Player - core orchestration
//!
//! Owns the catalog, queue, modes, transport and clock, and applies every
//! user intent and clock tick as one synchronous transition. Either a
//! transition commits completely or it fails before touching state.

use crate::{
    boundary::{self, BoundaryAction},
    catalog::Catalog,
    clock::{ClockDriver, PlaybackClock},
    error::Result,
    events::{Intent, Message, Outcome, PlayerEvent},
    modes::Modes,
    queue::Queue,
    transport::{Tick, Transport},
    types::{progress_percent, PlaybackConfig, RepeatMode, Track, TransportState},
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use tracing::{debug, info, warn};

type Observer = Box<dyn FnMut(&PlayerEvent)>;

/// Read-only view of the committed state for presentation layers
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSnapshot {
    pub current_track: Track,
    pub queue: Vec<String>,
    pub current_index: usize,
    pub modes: Modes,
    pub state: TransportState,
    pub elapsed: f64,
    pub progress_percent: f64,
}

/// Central playback store
///
/// Everything is driven through `&mut self`; callers in multi-threaded
/// hosts wrap the player in a single owning task and send it [`Message`]s.
pub struct Player {
    // Library
    catalog: Catalog,
    queue: Queue,

    // State
    modes: Modes,
    transport: Transport,
    clock: ClockDriver,

    // Settings
    restart_threshold_secs: f64,
    rng: StdRng,

    // Change notification
    pending_events: Vec<PlayerEvent>,
    observers: Vec<Observer>,
}

impl Player {
    /// Create a paused player positioned on the first catalog track
    pub fn new(catalog: Catalog, config: PlaybackConfig, clock: Box<dyn PlaybackClock>) -> Self {
        let queue = Queue::new(&catalog);
        let rng = match config.shuffle_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut clock = ClockDriver::new(clock);
        clock.load(queue.current());

        Self {
            catalog,
            queue,
            modes: Modes::new(config.shuffle, config.repeat),
            transport: Transport::new(),
            clock,
            restart_threshold_secs: config.restart_threshold_secs,
            rng,
            pending_events: Vec::new(),
            observers: Vec::new(),
        }
    }

    // ===== Dispatch =====

    /// Apply a presentation-layer intent
    pub fn dispatch(&mut self, intent: Intent) -> Result<Outcome> {
        match intent {
            Intent::SelectTrack { id } => self.select_track(&id),
            Intent::TogglePlayPause => Ok(self.toggle_play_pause()),
            Intent::Play => Ok(self.play()),
            Intent::Pause => Ok(self.pause()),
            Intent::SkipNext => Ok(self.skip_next()),
            Intent::SkipPrevious => Ok(self.skip_previous()),
            Intent::CycleLoop => Ok(self.cycle_loop()),
            Intent::ToggleShuffle => Ok(self.toggle_shuffle()),
            Intent::Seek { seconds } => self.seek(seconds),
        }
    }

    /// Apply any inbound message
    pub fn handle(&mut self, message: Message) -> Result<Outcome> {
        match message {
            Message::Intent(intent) => self.dispatch(intent),
            Message::Tick(delta) => {
                let before = self.transport.elapsed();
                let action = self.tick(delta)?;
                if action.is_some() || self.transport.elapsed() != before {
                    Ok(Outcome::Changed)
                } else {
                    Ok(Outcome::NoOp)
                }
            }
            Message::TrackUnavailable(reason) => Ok(self.track_unavailable(&reason)),
        }
    }

    // ===== Selection =====

    /// Rebuild the queue around `id` and start playing it
    ///
    /// Selecting the track that is already current is a no-op.
    pub fn select_track(&mut self, id: &str) -> Result<Outcome> {
        if self.queue.current().id == id {
            debug!(track_id = id, "track already current");
            return Ok(Outcome::NoOp);
        }

        let queue = Queue::select_track(&self.catalog, id, self.modes.shuffle(), &mut self.rng)?;
        let previous = self.queue.current().id.clone();

        self.queue = queue;
        self.transport.restart();
        self.emit(PlayerEvent::QueueChanged {
            length: self.queue.len(),
            current_index: self.queue.current_index(),
        });
        self.track_changed(previous);
        self.set_playing(true);

        Ok(Outcome::Changed)
    }

    // ===== Playback Control =====

    /// Flip between playing and paused
    pub fn toggle_play_pause(&mut self) -> Outcome {
        if self.transport.is_playing() {
            self.pause()
        } else {
            self.play()
        }
    }

    /// Start or resume playback
    ///
    /// A track parked at its end (queue finished without loop) starts over.
    /// A position seeked to the end is kept; the next tick ends the track.
    pub fn play(&mut self) -> Outcome {
        if self.transport.is_playing() {
            return Outcome::NoOp;
        }

        if self.transport.at_boundary() {
            self.restart_current();
        }
        self.set_playing(true);
        Outcome::Changed
    }

    /// Pause playback
    pub fn pause(&mut self) -> Outcome {
        if self.set_playing(false) {
            Outcome::Changed
        } else {
            Outcome::NoOp
        }
    }

    /// Skip to the next queue entry, wrapping at the end
    ///
    /// Uses the same cursor advance as a natural track end. Play/pause state
    /// is kept.
    pub fn skip_next(&mut self) -> Outcome {
        let previous = self.queue.current().id.clone();
        self.queue.advance();
        self.transport.restart();
        self.track_changed(previous);
        Outcome::Changed
    }

    /// Restart the current track, or step back when near its start
    ///
    /// Past `restart_threshold_secs` the current track restarts; otherwise
    /// the cursor retreats (wrapping) and the previous entry starts from zero.
    pub fn skip_previous(&mut self) -> Outcome {
        if self.transport.elapsed() > self.restart_threshold_secs {
            self.restart_current();
            return Outcome::Changed;
        }

        let previous = self.queue.current().id.clone();
        self.queue.retreat();
        self.transport.restart();
        self.track_changed(previous);
        Outcome::Changed
    }

    // ===== Seek =====

    /// Scrub to `seconds`, clamped into the current track
    ///
    /// Never triggers end-of-track handling, even at the very end.
    pub fn seek(&mut self, seconds: f64) -> Result<Outcome> {
        let total = self.queue.current().total_duration;
        let position = self.transport.seek(seconds, total).map_err(|e| {
            warn!(error = %e, seconds, "seek rejected");
            e
        })?;
        self.clock.seek_to(position);
        self.emit(PlayerEvent::PositionUpdate {
            elapsed: position,
            total,
        });
        Ok(Outcome::Changed)
    }

    // ===== Clock =====

    /// Advance playback by `delta` seconds
    ///
    /// Returns the boundary action when this tick reached the end of the
    /// track. At most one boundary is handled per crossing.
    pub fn tick(&mut self, delta: f64) -> Result<Option<BoundaryAction>> {
        let total = self.queue.current().total_duration;
        let tick = self.transport.tick(delta, total).map_err(|e| {
            warn!(error = %e, delta, "tick rejected");
            e
        })?;

        match tick {
            Tick::Ignored => Ok(None),
            Tick::Progressed => {
                self.emit(PlayerEvent::PositionUpdate {
                    elapsed: self.transport.elapsed(),
                    total,
                });
                Ok(None)
            }
            Tick::Boundary => {
                self.emit(PlayerEvent::PositionUpdate {
                    elapsed: total,
                    total,
                });
                Ok(Some(self.handle_boundary()))
            }
        }
    }

    /// Current track could not be played
    ///
    /// Treated as an end of track without advancing: playback pauses and the
    /// queue stays put.
    pub fn track_unavailable(&mut self, reason: &str) -> Outcome {
        let track_id = self.queue.current().id.clone();
        warn!(track_id = %track_id, reason, "track unavailable");

        self.emit(PlayerEvent::TrackUnavailable {
            track_id,
            reason: reason.to_string(),
        });
        self.set_playing(false);
        Outcome::Changed
    }

    fn handle_boundary(&mut self) -> BoundaryAction {
        let action = boundary::decide(self.queue.is_last(), &self.modes);
        let finished = self.queue.current().id.clone();
        debug!(track_id = %finished, ?action, "track finished");

        self.emit(PlayerEvent::TrackFinished {
            track_id: finished.clone(),
            action,
        });

        match action {
            BoundaryAction::Advance => {
                self.queue.advance();
                self.transport.restart();
                self.track_changed(finished);
                self.set_playing(true);
            }
            BoundaryAction::Stop => {
                self.set_playing(false);
            }
            BoundaryAction::RepeatTrack => {
                self.restart_current();
                self.set_playing(true);
            }
        }

        action
    }

    // ===== Shuffle & Loop =====

    /// Step loop modes: off, loop all, loop one
    pub fn cycle_loop(&mut self) -> Outcome {
        self.modes.cycle_loop();
        self.modes_changed();
        Outcome::Changed
    }

    pub fn set_loop(&mut self, on: bool) -> Outcome {
        self.update_modes(|modes| modes.set_loop(on))
    }

    pub fn set_loop_one(&mut self, on: bool) -> Outcome {
        self.update_modes(|modes| modes.set_loop_one(on))
    }

    pub fn set_repeat(&mut self, repeat: RepeatMode) -> Outcome {
        self.update_modes(|modes| modes.set_repeat(repeat))
    }

    /// Flip shuffle; takes effect on the next track selection
    pub fn toggle_shuffle(&mut self) -> Outcome {
        self.modes.toggle_shuffle();
        self.modes_changed();
        Outcome::Changed
    }

    pub fn set_shuffle(&mut self, on: bool) -> Outcome {
        self.update_modes(|modes| modes.set_shuffle(on))
    }

    fn update_modes(&mut self, apply: impl FnOnce(&mut Modes)) -> Outcome {
        let before = self.modes;
        apply(&mut self.modes);
        if self.modes == before {
            Outcome::NoOp
        } else {
            self.modes_changed();
            Outcome::Changed
        }
    }

    fn modes_changed(&mut self) {
        debug!(
            shuffle = self.modes.shuffle(),
            repeat = ?self.modes.repeat(),
            "modes changed"
        );
        self.emit(PlayerEvent::ModesChanged { modes: self.modes });
    }

    // ===== State Queries =====

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn queue(&self) -> &Queue {
        &self.queue
    }

    pub fn modes(&self) -> Modes {
        self.modes
    }

    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    pub fn current_track(&self) -> &Track {
        self.queue.current()
    }

    pub fn is_playing(&self) -> bool {
        self.transport.is_playing()
    }

    /// Current track followed by everything after it in the queue
    pub fn remaining(&self) -> impl Iterator<Item = &Track> + '_ {
        self.queue.peek_remaining()
    }

    /// Progress through the current track, 0-100
    pub fn progress_percent(&self) -> f64 {
        progress_percent(
            self.transport.elapsed(),
            self.queue.current().total_duration,
        )
    }

    /// Copy of the committed state
    pub fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            current_track: self.queue.current().clone(),
            queue: self.queue.ids(),
            current_index: self.queue.current_index(),
            modes: self.modes,
            state: self.transport.state(),
            elapsed: self.transport.elapsed(),
            progress_percent: self.progress_percent(),
        }
    }

    // ===== Events =====

    /// Call `observer` with every event from now on
    pub fn subscribe(&mut self, observer: impl FnMut(&PlayerEvent) + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Take all events emitted since the last drain
    pub fn drain_events(&mut self) -> Vec<PlayerEvent> {
        std::mem::take(&mut self.pending_events)
    }

    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    fn emit(&mut self, event: PlayerEvent) {
        for observer in &mut self.observers {
            observer(&event);
        }
        self.pending_events.push(event);
    }

    // ===== Internal Transitions =====

    /// Mirror play/pause onto transport and clock; true when state changed
    fn set_playing(&mut self, playing: bool) -> bool {
        let changed = if playing {
            self.transport.play()
        } else {
            self.transport.pause()
        };
        self.clock.set_running(playing);

        if changed {
            let state = self.transport.state();
            debug!(?state, "transport state changed");
            self.emit(PlayerEvent::StateChanged { state });
        }
        changed
    }

    /// Rewind the current track in place
    fn restart_current(&mut self) {
        self.transport.restart();
        self.clock.seek_to(0.0);
        self.emit(PlayerEvent::PositionUpdate {
            elapsed: 0.0,
            total: self.queue.current().total_duration,
        });
    }

    /// Load the new current track into the clock and announce it
    fn track_changed(&mut self, previous_track_id: String) {
        self.clock.load(self.queue.current());

        let track = self.queue.current();
        let track_id = track.id.clone();
        let total = track.total_duration;
        info!(
            track_id = %track_id,
            name = %track.name,
            index = self.queue.current_index(),
            "now playing"
        );

        self.emit(PlayerEvent::TrackChanged {
            track_id,
            previous_track_id: Some(previous_track_id),
        });
        self.emit(PlayerEvent::PositionUpdate {
            elapsed: 0.0,
            total,
        });
    }
}
