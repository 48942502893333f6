//! Line commands read from stdin
//!
//! Each non-empty line is one command. Playback commands map onto player
//! intents; the rest are handled by the session itself.

use crate::error::{CliError, Result};
use cadence_playback::Intent;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Forward to the player
    Intent(Intent),
    /// Print the current track and position
    Status,
    /// Print the current queue
    Queue,
    /// Print the catalog
    Catalog,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  select <id>     play a track (queue rebuilt around it)
  play | pause    start or stop playback
  toggle          flip play/pause
  next | prev     skip forward or back
  seek <t>        jump to seconds or m:ss
  loop            cycle loop mode (off, all, one)
  shuffle         toggle shuffle (applies on next select)
  status          show the current track
  queue           show the queue
  list            show the catalog
  quit            exit";

/// Parse one input line; blank lines yield `None`
pub fn parse(line: &str) -> Result<Option<Command>> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(None);
    };
    let rest: Vec<&str> = words.collect();
    let name = head.to_lowercase();

    let command = match name.as_str() {
        "select" | "s" => {
            let id = single_arg(&name, &rest)?;
            Command::Intent(Intent::SelectTrack { id: id.to_string() })
        }
        "play" => Command::Intent(Intent::Play),
        "pause" => Command::Intent(Intent::Pause),
        "toggle" | "t" => Command::Intent(Intent::TogglePlayPause),
        "next" | "n" => Command::Intent(Intent::SkipNext),
        "prev" | "previous" | "p" => Command::Intent(Intent::SkipPrevious),
        "loop" | "l" => Command::Intent(Intent::CycleLoop),
        "shuffle" | "sh" => Command::Intent(Intent::ToggleShuffle),
        "seek" => {
            let arg = single_arg(&name, &rest)?;
            let seconds = parse_position(arg)
                .ok_or_else(|| CliError::invalid(&name, format!("bad position '{arg}'")))?;
            Command::Intent(Intent::Seek { seconds })
        }
        "status" | "st" => Command::Status,
        "queue" | "q" => Command::Queue,
        "list" | "ls" => Command::Catalog,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        _ => return Err(CliError::UnknownCommand(head.to_string())),
    };

    Ok(Some(command))
}

fn single_arg<'a>(command: &str, rest: &[&'a str]) -> Result<&'a str> {
    match rest {
        [arg] => Ok(*arg),
        [] => Err(CliError::invalid(command, "missing argument")),
        _ => Err(CliError::invalid(command, "expected one argument")),
    }
}

/// Seconds (`83`, `83.5`) or `m:ss` (`1:23`)
fn parse_position(text: &str) -> Option<f64> {
    match text.split_once(':') {
        Some((minutes, seconds)) => {
            let minutes: u64 = minutes.parse().ok()?;
            let seconds: f64 = seconds.parse().ok()?;
            if !(0.0..60.0).contains(&seconds) {
                return None;
            }
            Some(minutes as f64 * 60.0 + seconds)
        }
        None => {
            let seconds: f64 = text.parse().ok()?;
            seconds.is_finite().then_some(seconds)
        }
    }
}
