//! Shuffle and loop modes
//!
//! `loop` and `loop-one` are views over a single [`RepeatMode`], so the
//! setters below cannot leave both enabled.

use crate::types::RepeatMode;
use serde::{Deserialize, Serialize};

/// Mode flags read by the boundary controller at decision time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Modes {
    shuffle: bool,
    repeat: RepeatMode,
}

impl Modes {
    pub fn new(shuffle: bool, repeat: RepeatMode) -> Self {
        Self { shuffle, repeat }
    }

    pub fn shuffle(&self) -> bool {
        self.shuffle
    }

    pub fn repeat(&self) -> RepeatMode {
        self.repeat
    }

    /// Replay the whole queue at its end
    pub fn is_loop(&self) -> bool {
        self.repeat == RepeatMode::All
    }

    /// Replay the current track indefinitely
    pub fn is_loop_one(&self) -> bool {
        self.repeat == RepeatMode::One
    }

    pub fn set_shuffle(&mut self, on: bool) {
        self.shuffle = on;
    }

    pub fn toggle_shuffle(&mut self) {
        self.shuffle = !self.shuffle;
    }

    /// Cycle `Off -> All -> One -> Off`
    pub fn cycle_loop(&mut self) {
        self.repeat = match self.repeat {
            RepeatMode::Off => RepeatMode::All,
            RepeatMode::All => RepeatMode::One,
            RepeatMode::One => RepeatMode::Off,
        };
    }

    /// Enabling clears loop-one; disabling leaves loop-one alone
    pub fn set_loop(&mut self, on: bool) {
        if on {
            self.repeat = RepeatMode::All;
        } else if self.repeat == RepeatMode::All {
            self.repeat = RepeatMode::Off;
        }
    }

    /// Enabling clears loop; disabling leaves loop alone
    pub fn set_loop_one(&mut self, on: bool) {
        if on {
            self.repeat = RepeatMode::One;
        } else if self.repeat == RepeatMode::One {
            self.repeat = RepeatMode::Off;
        }
    }

    pub fn set_repeat(&mut self, repeat: RepeatMode) {
        self.repeat = repeat;
    }
}
