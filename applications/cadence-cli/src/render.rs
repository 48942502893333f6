//! Text rendering of player state and events

use cadence_playback::{
    format_time, BoundaryAction, Catalog, Modes, Player, PlayerEvent, PlayerSnapshot, RepeatMode,
    TransportState,
};

pub fn status_line(snapshot: &PlayerSnapshot) -> String {
    let track = &snapshot.current_track;
    format!(
        "[{}] {} - {}  {} / {} ({:.0}%)  {}",
        state_label(snapshot.state),
        track.name,
        track.artist,
        format_time(snapshot.elapsed),
        format_time(track.total_duration),
        snapshot.progress_percent,
        modes_label(snapshot.modes),
    )
}

/// One line per queue entry, current entry marked with `>`
pub fn queue_lines(player: &Player) -> Vec<String> {
    let current = player.queue().current_index();
    player
        .queue()
        .tracks()
        .enumerate()
        .map(|(i, track)| {
            let marker = if i == current { '>' } else { ' ' };
            format!(
                "{marker} {:>2}. {} - {} [{}]",
                i + 1,
                track.name,
                track.artist,
                format_time(track.total_duration)
            )
        })
        .collect()
}

pub fn catalog_lines(catalog: &Catalog) -> Vec<String> {
    catalog
        .iter()
        .map(|track| {
            format!(
                "{:<16} {} - {} [{}]",
                track.id,
                track.name,
                track.artist,
                format_time(track.total_duration)
            )
        })
        .collect()
}

/// Human-readable line for an event; `None` for events not worth printing
pub fn event_line(event: &PlayerEvent, catalog: &Catalog) -> Option<String> {
    match event {
        PlayerEvent::TrackChanged { track_id, .. } => {
            let line = match catalog.get(track_id) {
                Some(track) => format!(
                    "now playing: {} - {} [{}]",
                    track.name,
                    track.artist,
                    format_time(track.total_duration)
                ),
                None => format!("now playing: {track_id}"),
            };
            Some(line)
        }
        PlayerEvent::StateChanged { state } => Some(state_label(*state).to_string()),
        PlayerEvent::ModesChanged { modes } => Some(modes_label(*modes)),
        PlayerEvent::TrackFinished {
            action: BoundaryAction::Stop,
            ..
        } => Some("end of queue".to_string()),
        PlayerEvent::TrackUnavailable { track_id, reason } => {
            Some(format!("unavailable: {track_id} ({reason})"))
        }
        PlayerEvent::TrackFinished { .. }
        | PlayerEvent::QueueChanged { .. }
        | PlayerEvent::PositionUpdate { .. } => None,
    }
}

fn state_label(state: TransportState) -> &'static str {
    match state {
        TransportState::Playing => "playing",
        TransportState::Paused => "paused",
    }
}

fn modes_label(modes: Modes) -> String {
    let repeat = match modes.repeat() {
        RepeatMode::Off => "off",
        RepeatMode::All => "all",
        RepeatMode::One => "one",
    };
    let shuffle = if modes.shuffle() { "on" } else { "off" };
    format!("shuffle:{shuffle} loop:{repeat}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use cadence_playback::{ManualClock, PlaybackConfig, Track};

    fn player() -> Player {
        let catalog = Catalog::load(vec![
            Track::new("feather", "Feather", "Sabrina Carpenter", 185.0),
            Track::new("vampire", "Vampire", "Olivia Rodrigo", 219.0),
        ])
        .unwrap();
        Player::new(catalog, PlaybackConfig::default(), Box::new(ManualClock::new()))
    }

    #[test]
    fn status_shows_position_and_modes() {
        let mut player = player();
        player.select_track("vampire").unwrap();
        player.tick(73.0).unwrap();
        player.cycle_loop();

        assert_eq!(
            status_line(&player.snapshot()),
            "[playing] Vampire - Olivia Rodrigo  1:13 / 3:39 (33%)  shuffle:off loop:all"
        );
    }

    #[test]
    fn queue_marks_current_entry() {
        let mut player = player();
        player.skip_next();

        let lines = queue_lines(&player);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("   1. Feather"));
        assert!(lines[1].starts_with(">  2. Vampire"));
    }

    #[test]
    fn quiet_events_are_skipped() {
        let player = player();
        let event = PlayerEvent::PositionUpdate {
            elapsed: 1.0,
            total: 2.0,
        };
        assert_eq!(event_line(&event, player.catalog()), None);

        let event = PlayerEvent::TrackChanged {
            track_id: "feather".to_string(),
            previous_track_id: None,
        };
        assert_eq!(
            event_line(&event, player.catalog()).as_deref(),
            Some("now playing: Feather - Sabrina Carpenter [3:05]")
        );
    }
}
