//! End-of-track scenarios
//!
//! Drives a two-track player to the end of a track under each loop mode and
//! checks where the queue, transport and clock land.

use cadence_playback::{
    BoundaryAction, Catalog, ManualClock, PlaybackConfig, Player, PlayerEvent, RepeatMode, Track,
    TransportState,
};

// ===== Test Helpers =====

fn two_track_player(repeat: RepeatMode) -> (Player, ManualClock) {
    let catalog = Catalog::load(vec![
        Track::new("s1", "S1", "Artist", 10.0),
        Track::new("s2", "S2", "Artist", 20.0),
    ])
    .unwrap();
    let clock = ManualClock::new();
    let config = PlaybackConfig {
        repeat,
        shuffle_seed: Some(1),
        ..Default::default()
    };
    let player = Player::new(catalog, config, Box::new(clock.clone()));
    (player, clock)
}

/// Position the cursor on S2 (the last entry) and start playing
fn on_last_track(player: &mut Player) {
    player.skip_next();
    player.play();
    assert_eq!(player.queue().current_index(), 1);
    assert!(player.queue().is_last());
}

// ===== Scenarios =====

#[test]
fn natural_end_advances_to_next_track() {
    let (mut player, clock) = two_track_player(RepeatMode::Off);
    player.play();

    let action = player.tick(10.0).unwrap();

    assert_eq!(action, Some(BoundaryAction::Advance));
    assert_eq!(player.current_track().id, "s2");
    assert_eq!(player.queue().current_index(), 1);
    assert_eq!(player.transport().elapsed(), 0.0);
    assert!(player.is_playing());
    assert!(clock.is_running());
    assert_eq!(clock.log().loaded, vec!["s1", "s2"]);
}

#[test]
fn loop_all_wraps_from_last_track() {
    let (mut player, _clock) = two_track_player(RepeatMode::All);
    on_last_track(&mut player);

    let action = player.tick(20.0).unwrap();

    assert_eq!(action, Some(BoundaryAction::Advance));
    assert_eq!(player.queue().current_index(), 0);
    assert_eq!(player.current_track().id, "s1");
    assert_eq!(player.transport().elapsed(), 0.0);
    assert!(player.is_playing());
}

#[test]
fn end_of_queue_without_loop_stops() {
    let (mut player, clock) = two_track_player(RepeatMode::Off);
    on_last_track(&mut player);

    let action = player.tick(20.0).unwrap();

    assert_eq!(action, Some(BoundaryAction::Stop));
    assert_eq!(player.transport().state(), TransportState::Paused);
    assert_eq!(player.queue().current_index(), 1);
    assert_eq!(player.transport().elapsed(), 20.0);
    assert!(!clock.is_running());
}

#[test]
fn loop_one_repeats_current_track() {
    let (mut player, clock) = two_track_player(RepeatMode::One);
    player.play();

    let action = player.tick(10.0).unwrap();

    assert_eq!(action, Some(BoundaryAction::RepeatTrack));
    assert_eq!(player.queue().current_index(), 0);
    assert_eq!(player.transport().elapsed(), 0.0);
    assert!(player.is_playing());
    assert_eq!(clock.log().seeks, vec![0.0]);
    assert_eq!(clock.log().loaded, vec!["s1"]);
}

#[test]
fn loop_one_on_last_track_repeats() {
    let (mut player, _clock) = two_track_player(RepeatMode::One);
    on_last_track(&mut player);

    assert_eq!(player.tick(20.0).unwrap(), Some(BoundaryAction::RepeatTrack));
    assert_eq!(player.current_track().id, "s2");
}

// ===== Edge Cases =====

#[test]
fn seek_to_end_does_not_trigger_boundary() {
    let (mut player, _clock) = two_track_player(RepeatMode::Off);
    player.play();
    player.drain_events();

    player.seek(10.0).unwrap();

    assert_eq!(player.current_track().id, "s1");
    assert_eq!(player.transport().elapsed(), 10.0);
    assert!(player.is_playing());
    let events = player.drain_events();
    assert!(!events
        .iter()
        .any(|e| matches!(e, PlayerEvent::TrackFinished { .. })));

    // The next tick is what ends the track
    assert_eq!(player.tick(0.5).unwrap(), Some(BoundaryAction::Advance));
    assert_eq!(player.current_track().id, "s2");
}

#[test]
fn paused_seek_to_end_survives_play() {
    let (mut player, _clock) = two_track_player(RepeatMode::Off);

    player.seek(10.0).unwrap();
    player.play();
    assert_eq!(player.transport().elapsed(), 10.0);

    assert_eq!(player.tick(1.0).unwrap(), Some(BoundaryAction::Advance));
    assert_eq!(player.current_track().id, "s2");
    assert_eq!(player.transport().elapsed(), 0.0);
    assert!(player.is_playing());
}

#[test]
fn play_after_stop_at_queue_end_restarts_track() {
    let (mut player, clock) = two_track_player(RepeatMode::Off);
    on_last_track(&mut player);
    assert_eq!(player.tick(20.0).unwrap(), Some(BoundaryAction::Stop));
    assert!(player.transport().at_boundary());

    player.play();

    assert_eq!(player.current_track().id, "s2");
    assert_eq!(player.transport().elapsed(), 0.0);
    assert!(!player.transport().at_boundary());
    assert_eq!(clock.log().seeks, vec![0.0]);
    assert_eq!(player.tick(1.0).unwrap(), None);
    assert_eq!(player.transport().elapsed(), 1.0);
}

#[test]
fn overshooting_tick_fires_one_boundary() {
    let (mut player, _clock) = two_track_player(RepeatMode::Off);
    player.play();
    player.drain_events();

    // Far past both tracks; only S1 ends
    assert_eq!(player.tick(1000.0).unwrap(), Some(BoundaryAction::Advance));
    assert_eq!(player.current_track().id, "s2");
    assert_eq!(player.transport().elapsed(), 0.0);

    let finished = player
        .drain_events()
        .into_iter()
        .filter(|e| matches!(e, PlayerEvent::TrackFinished { .. }))
        .count();
    assert_eq!(finished, 1);
}

#[test]
fn stopped_track_ignores_further_ticks() {
    let (mut player, _clock) = two_track_player(RepeatMode::Off);
    on_last_track(&mut player);
    player.tick(25.0).unwrap();
    player.drain_events();

    assert_eq!(player.tick(1.0).unwrap(), None);
    assert_eq!(player.transport().elapsed(), 20.0);
    assert!(!player.has_pending_events());
}

#[test]
fn paused_ticks_do_not_move_time() {
    let (mut player, _clock) = two_track_player(RepeatMode::Off);

    assert_eq!(player.tick(5.0).unwrap(), None);
    assert_eq!(player.transport().elapsed(), 0.0);
}

#[test]
fn boundary_events_arrive_in_order() {
    let (mut player, _clock) = two_track_player(RepeatMode::Off);
    player.play();
    player.tick(9.0).unwrap();
    player.drain_events();

    player.tick(1.0).unwrap();
    let events = player.drain_events();

    assert_eq!(
        events,
        vec![
            PlayerEvent::PositionUpdate {
                elapsed: 10.0,
                total: 10.0
            },
            PlayerEvent::TrackFinished {
                track_id: "s1".to_string(),
                action: BoundaryAction::Advance
            },
            PlayerEvent::TrackChanged {
                track_id: "s2".to_string(),
                previous_track_id: Some("s1".to_string())
            },
            PlayerEvent::PositionUpdate {
                elapsed: 0.0,
                total: 20.0
            },
        ]
    );
}
