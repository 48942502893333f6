//! Playback clock seam
//!
//! Abstracts whatever actually plays audio and keeps time: an HTML audio
//! element, a timer, a test double. The player never decodes audio; it tells
//! the clock what to load, when to run, and where to seek, and receives
//! `tick(delta)` messages back from the host while the clock runs.

use crate::types::Track;
use std::cell::RefCell;
use std::rc::Rc;

/// Opaque ticking primitive driven by the player
///
/// Implementors deliver `Player::tick(delta)` while started. Calls arrive
/// from the player's single owner; no `Send` bound so browser handles can
/// implement it.
pub trait PlaybackClock {
    /// Start (or resume) ticking
    fn start(&mut self);

    /// Stop ticking, keeping the position
    fn stop(&mut self);

    /// Move the underlying media to `seconds`
    fn seek_to(&mut self, seconds: f64);

    /// Point the clock at a new current track
    ///
    /// Called on every track change; the position restarts at zero.
    fn load(&mut self, track: &Track);
}

/// Forwards start/stop to a clock only on an actual state change
///
/// Starting a running clock, or stopping a stopped one, is a no-op.
pub struct ClockDriver {
    clock: Box<dyn PlaybackClock>,
    running: bool,
}

impl ClockDriver {
    pub fn new(clock: Box<dyn PlaybackClock>) -> Self {
        Self {
            clock,
            running: false,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Mirror a transport play/pause state onto the clock
    pub fn set_running(&mut self, running: bool) {
        if running == self.running {
            return;
        }
        self.running = running;
        if running {
            self.clock.start();
        } else {
            self.clock.stop();
        }
    }

    pub fn seek_to(&mut self, seconds: f64) {
        self.clock.seek_to(seconds);
    }

    pub fn load(&mut self, track: &Track) {
        self.clock.load(track);
    }
}

impl std::fmt::Debug for ClockDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClockDriver")
            .field("running", &self.running)
            .finish_non_exhaustive()
    }
}

/// Calls received by a [`ManualClock`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClockLog {
    pub starts: usize,
    pub stops: usize,
    pub running: bool,
    pub seeks: Vec<f64>,
    pub loaded: Vec<String>,
}

/// Clock for hosts that deliver ticks themselves
///
/// Records every call; clones share the same log, so a host (or test) can
/// keep a handle after boxing one into the player.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    log: Rc<RefCell<ClockLog>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything recorded so far
    pub fn log(&self) -> ClockLog {
        self.log.borrow().clone()
    }

    pub fn is_running(&self) -> bool {
        self.log.borrow().running
    }
}

impl PlaybackClock for ManualClock {
    fn start(&mut self) {
        let mut log = self.log.borrow_mut();
        log.starts += 1;
        log.running = true;
    }

    fn stop(&mut self) {
        let mut log = self.log.borrow_mut();
        log.stops += 1;
        log.running = false;
    }

    fn seek_to(&mut self, seconds: f64) {
        self.log.borrow_mut().seeks.push(seconds);
    }

    fn load(&mut self, track: &Track) {
        self.log.borrow_mut().loaded.push(track.id.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn driver_start_stop_is_idempotent() {
        let clock = ManualClock::new();
        let mut driver = ClockDriver::new(Box::new(clock.clone()));

        driver.set_running(true);
        driver.set_running(true);
        assert_eq!(clock.log().starts, 1);
        assert!(clock.is_running());

        driver.set_running(false);
        driver.set_running(false);
        assert_eq!(clock.log().stops, 1);
        assert!(!clock.is_running());
    }

    #[test]
    fn stop_on_fresh_driver_is_noop() {
        let clock = ManualClock::new();
        let mut driver = ClockDriver::new(Box::new(clock.clone()));
        driver.set_running(false);
        assert_eq!(clock.log(), ClockLog::default());
    }

    #[test]
    fn seek_and_load_are_forwarded() {
        let clock = ManualClock::new();
        let mut driver = ClockDriver::new(Box::new(clock.clone()));

        driver.load(&Track::new("a", "A", "Artist", 10.0));
        driver.seek_to(4.5);

        let log = clock.log();
        assert_eq!(log.loaded, vec!["a"]);
        assert_eq!(log.seeks, vec![4.5]);
    }
}
