//! Transport state machine
//!
//! Holds play/pause state and elapsed time for the current track. The
//! track's duration is passed into each call rather than stored, so a queue
//! change never leaves a stale length behind.

use crate::error::{PlaybackError, Result};
use crate::types::TransportState;

/// Result of a clock tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Paused, or already parked at the boundary
    Ignored,

    /// Elapsed time moved forward, still before the end
    Progressed,

    /// Elapsed time reached the end and was clamped; fires once per crossing
    Boundary,
}

/// Play/pause state plus elapsed time
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Transport {
    state: TransportState,

    /// Seconds into the current track, `0 <= elapsed <= duration`
    elapsed: f64,

    /// Set when a boundary was reported, cleared once elapsed moves back
    at_boundary: bool,
}

impl Transport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> TransportState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == TransportState::Playing
    }

    /// Seconds into the current track
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Parked at the end after a reported boundary
    ///
    /// Cleared by `restart` and `seek`, so a seek to the end does not count.
    pub fn at_boundary(&self) -> bool {
        self.at_boundary
    }

    /// Enter `Playing`; returns false when already playing
    pub fn play(&mut self) -> bool {
        let changed = self.state != TransportState::Playing;
        self.state = TransportState::Playing;
        changed
    }

    /// Enter `Paused`; returns false when already paused
    pub fn pause(&mut self) -> bool {
        let changed = self.state != TransportState::Paused;
        self.state = TransportState::Paused;
        changed
    }

    /// Rewind to zero, play/pause state unchanged
    pub fn restart(&mut self) {
        self.elapsed = 0.0;
        self.at_boundary = false;
    }

    /// Advance elapsed time by `delta` seconds while playing
    ///
    /// Reaching `duration` clamps to exactly `duration` and reports
    /// [`Tick::Boundary`]; overshoot never produces a second boundary.
    pub fn tick(&mut self, delta: f64, duration: f64) -> Result<Tick> {
        check_duration(duration)?;
        if !delta.is_finite() || delta < 0.0 {
            return Err(PlaybackError::invariant(format!(
                "tick delta must be a finite non-negative number, got {}",
                delta
            )));
        }

        if !self.is_playing() || self.at_boundary {
            return Ok(Tick::Ignored);
        }

        let next = self.elapsed + delta;
        if next >= duration {
            self.elapsed = duration;
            self.at_boundary = true;
            Ok(Tick::Boundary)
        } else {
            self.elapsed = next;
            Ok(Tick::Progressed)
        }
    }

    /// Jump to `position`, clamped into `[0, duration]`
    ///
    /// Never reports a boundary, even at `duration`; the next tick does.
    /// Returns the committed position.
    pub fn seek(&mut self, position: f64, duration: f64) -> Result<f64> {
        check_duration(duration)?;
        let position = if position.is_nan() {
            0.0
        } else {
            position.clamp(0.0, duration)
        };
        self.elapsed = position;
        self.at_boundary = false;
        Ok(position)
    }
}

fn check_duration(duration: f64) -> Result<()> {
    if duration.is_finite() && duration > 0.0 {
        Ok(())
    } else {
        Err(PlaybackError::invariant(format!(
            "track duration must be positive, got {}",
            duration
        )))
    }
}
