//! End-of-track decision
//!
//! Evaluated once per boundary event, in this order:
//!
//! | # | condition                       | action        |
//! |---|---------------------------------|---------------|
//! | 1 | not last, not loop-one          | `Advance`     |
//! | 2 | last, loop                      | `Advance`     |
//! | 3 | last, neither loop nor loop-one | `Stop`        |
//! | 4 | loop-one                        | `RepeatTrack` |

use crate::modes::Modes;
use serde::{Deserialize, Serialize};

/// What the player does when the current track ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BoundaryAction {
    /// Move the queue cursor forward (wrapping on the last track), restart, keep playing
    Advance,

    /// Pause at the end of the queue
    Stop,

    /// Restart the same track, queue untouched
    RepeatTrack,
}

/// Pick the boundary action for the current queue position and modes
pub fn decide(is_last: bool, modes: &Modes) -> BoundaryAction {
    let loop_all = modes.is_loop();
    let loop_one = modes.is_loop_one();

    if (!is_last && !loop_one) || (is_last && loop_all) {
        BoundaryAction::Advance
    } else if is_last && !loop_all && !loop_one {
        BoundaryAction::Stop
    } else {
        BoundaryAction::RepeatTrack
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RepeatMode;

    fn modes(repeat: RepeatMode) -> Modes {
        Modes::new(false, repeat)
    }

    #[test]
    fn middle_of_queue_advances() {
        assert_eq!(decide(false, &modes(RepeatMode::Off)), BoundaryAction::Advance);
        assert_eq!(decide(false, &modes(RepeatMode::All)), BoundaryAction::Advance);
    }

    #[test]
    fn last_track_with_loop_advances() {
        assert_eq!(decide(true, &modes(RepeatMode::All)), BoundaryAction::Advance);
    }

    #[test]
    fn last_track_without_loop_stops() {
        assert_eq!(decide(true, &modes(RepeatMode::Off)), BoundaryAction::Stop);
    }

    #[test]
    fn loop_one_repeats_anywhere() {
        assert_eq!(decide(false, &modes(RepeatMode::One)), BoundaryAction::RepeatTrack);
        assert_eq!(decide(true, &modes(RepeatMode::One)), BoundaryAction::RepeatTrack);
    }

    #[test]
    fn shuffle_does_not_affect_decision() {
        let shuffled = Modes::new(true, RepeatMode::Off);
        assert_eq!(decide(false, &shuffled), BoundaryAction::Advance);
        assert_eq!(decide(true, &shuffled), BoundaryAction::Stop);
    }

    #[test]
    fn actions_serialize_camel_case() {
        assert_eq!(
            serde_json::to_string(&BoundaryAction::RepeatTrack).unwrap(),
            r#""repeatTrack""#
        );
        assert_eq!(
            serde_json::to_string(&BoundaryAction::Advance).unwrap(),
            r#""advance""#
        );
    }
}
