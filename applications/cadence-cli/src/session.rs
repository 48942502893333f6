//! Interactive session state
//!
//! Owns the player and its timer clock, applies commands and ticks one at a
//! time, and buffers the lines to print. The run loop in `main` only moves
//! input in and output out.

use crate::clock::TimerClock;
use crate::commands::{Command, HELP};
use crate::config::CliConfig;
use crate::error::Result;
use crate::render;
use cadence_playback::{Catalog, Message, Player};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Session {
    player: Player,
    clock: TimerClock,

    // Settings
    audio_root: Option<PathBuf>,
    tick_interval: Duration,
    json: bool,

    output: Vec<String>,
}

impl Session {
    /// Build a paused session; `json` switches output to one JSON object per line
    pub fn new(catalog: Catalog, config: &CliConfig, json: bool) -> Self {
        let clock = TimerClock::new();
        let player = Player::new(catalog, config.playback.clone(), Box::new(clock.clone()));

        let mut session = Self {
            player,
            clock,
            audio_root: config.audio_root.clone(),
            tick_interval: Duration::from_millis(config.playback.tick_interval_ms),
            json,
            output: Vec::new(),
        };
        session.after_message();
        session
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    /// Whether ticks should currently be delivered
    pub fn is_running(&self) -> bool {
        self.clock.is_running()
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    /// Apply one parsed command
    pub fn execute(&mut self, command: Command) -> Result<Flow> {
        match command {
            Command::Intent(intent) => {
                debug!(?intent, "dispatching");
                let result = self.player.dispatch(intent);
                self.after_message();
                result?;
            }
            Command::Status => self.print_status(),
            Command::Queue => {
                let lines = render::queue_lines(&self.player);
                self.output.extend(lines);
            }
            Command::Catalog => {
                let lines = render::catalog_lines(self.player.catalog());
                self.output.extend(lines);
            }
            Command::Help => self.output.extend(HELP.lines().map(str::to_string)),
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    /// Deliver one timer tick
    pub fn tick(&mut self) -> Result<()> {
        let delta = self.tick_interval.as_secs_f64();
        let result = self.player.handle(Message::Tick(delta));
        self.after_message();
        result?;
        Ok(())
    }

    /// Lines produced since the last call
    pub fn take_output(&mut self) -> Vec<String> {
        std::mem::take(&mut self.output)
    }

    fn print_status(&mut self) {
        let snapshot = self.player.snapshot();
        let line = if self.json {
            serde_json::to_string(&snapshot).unwrap_or_default()
        } else {
            render::status_line(&snapshot)
        };
        self.output.push(line);
    }

    /// Report missing audio for a freshly loaded track, then render events
    fn after_message(&mut self) {
        if let Some(track) = self.clock.take_loaded() {
            if let Some(root) = &self.audio_root {
                let path = root.join(&track.audio_path);
                if track.audio_path.is_empty() || !path.is_file() {
                    warn!(track_id = %track.id, path = %path.display(), "audio file missing");
                    let reason = format!("missing audio file {}", path.display());
                    self.player.track_unavailable(&reason);
                }
            }
        }

        for event in self.player.drain_events() {
            let line = if self.json {
                serde_json::to_string(&event).ok()
            } else {
                render::event_line(&event, self.player.catalog())
            };
            self.output.extend(line);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::parse;
    use cadence_playback::Track;

    fn session(json: bool) -> Session {
        let catalog = Catalog::load(vec![
            Track::new("a", "Alpha", "Artist", 3.0),
            Track::new("b", "Bravo", "Artist", 5.0),
        ])
        .unwrap();
        Session::new(catalog, &CliConfig::default(), json)
    }

    fn run(session: &mut Session, line: &str) -> Flow {
        let command = parse(line).unwrap().unwrap();
        session.execute(command).unwrap()
    }

    #[test]
    fn select_then_tick_through_track() {
        let mut session = session(false);
        assert!(session.take_output().is_empty());

        run(&mut session, "select b");
        assert!(session.is_running());
        assert_eq!(
            session.take_output(),
            vec!["now playing: Bravo - Artist [0:05]", "playing"]
        );

        for _ in 0..5 {
            session.tick().unwrap();
        }
        // Rotated queue is [b, a]
        assert_eq!(session.player().current_track().id, "a");
        assert_eq!(session.take_output(), vec!["now playing: Alpha - Artist [0:03]"]);
    }

    #[test]
    fn quit_stops_loop() {
        let mut session = session(false);
        assert_eq!(run(&mut session, "quit"), Flow::Quit);
        assert_eq!(run(&mut session, "help"), Flow::Continue);
    }

    #[test]
    fn failed_intent_still_flushes() {
        let mut session = session(false);
        let result = session.execute(parse("select zzz").unwrap().unwrap());
        assert!(result.is_err());
        assert!(session.take_output().is_empty());
    }

    #[test]
    fn json_output_is_one_object_per_line() {
        let mut session = session(true);
        run(&mut session, "loop");
        run(&mut session, "status");

        let lines = session.take_output();
        assert_eq!(lines.len(), 2);
        let event: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
        assert_eq!(event["type"], "modesChanged");
        let snapshot: serde_json::Value = serde_json::from_str(&lines[1]).unwrap();
        assert_eq!(snapshot["modes"]["repeat"], "all");
    }
}
