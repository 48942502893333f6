//! Timer-backed playback clock
//!
//! The run loop owns a `tokio::time::Interval` and only delivers ticks while
//! this clock reports running. There is no audio device; loads and seeks are
//! logged so a session can be followed on stderr.

use cadence_playback::{PlaybackClock, Track};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct TimerClock {
    running: Rc<Cell<bool>>,
    loaded: Rc<RefCell<Option<Track>>>,
}

impl TimerClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the run loop should be delivering ticks
    pub fn is_running(&self) -> bool {
        self.running.get()
    }

    /// Track loaded since the last call, if any
    pub fn take_loaded(&self) -> Option<Track> {
        self.loaded.borrow_mut().take()
    }
}

impl PlaybackClock for TimerClock {
    fn start(&mut self) {
        debug!("timer started");
        self.running.set(true);
    }

    fn stop(&mut self) {
        debug!("timer stopped");
        self.running.set(false);
    }

    fn seek_to(&mut self, seconds: f64) {
        debug!(seconds, "timer seek");
    }

    fn load(&mut self, track: &Track) {
        debug!(track_id = %track.id, audio_path = %track.audio_path, "track loaded");
        *self.loaded.borrow_mut() = Some(track.clone());
    }
}
