//! Navigation scenarios through the playback manager
//!
//! Playlist position and history position are tracked independently; these
//! tests drive both through real command sequences and check they never
//! disagree about the current track.


use cadence_playback::{Command, PlaybackEvent, PlayerState};
use test_helpers::*;

#[test]
fn set_playlist_then_next_starts_at_first_entry() {
    let (mut manager, _decoder) = manager_with(&[1, 2, 3]);

    manager.handle_command(Command::Next);

    assert_eq!(manager.current_track_id(), Some(id(1)));
    assert_eq!(manager.current_index(), Some(0));
    assert!(manager.history().is_empty());
    assert_in_sync(&manager);
}

#[test]
fn previous_is_structural_and_backward_replays() {
    let (mut manager, _decoder) = manager_with(&[1, 2, 3]);

    manager.next();
    manager.next();
    assert_eq!(manager.current_track_id(), Some(id(2)));
    assert_eq!(manager.history().entries(), &[id(1)]);

    manager.next();
    assert_eq!(manager.current_track_id(), Some(id(3)));
    assert_eq!(manager.history().entries(), &[id(1), id(2)]);

    manager.previous();
    assert_eq!(manager.current_track_id(), Some(id(2)));
    assert_eq!(manager.history().entries(), &[id(1), id(2), id(3)]);
    assert_eq!(manager.history().cursor(), None);

    manager.backward();
    assert_eq!(manager.current_track_id(), Some(id(3)));
    assert_eq!(manager.current_index(), Some(2));
    assert!(manager.history().is_replaying());
    assert_in_sync(&manager);

    manager.forward();
    assert_eq!(manager.current_track_id(), Some(id(2)));
    assert_eq!(manager.current_index(), Some(1));
    assert_eq!(manager.history().entries(), &[id(1), id(2), id(3)]);
    assert_eq!(manager.history().cursor(), None);
    assert_in_sync(&manager);
}

#[test]
fn set_playlist_mid_replay_clears_history_and_prunes_catalog() {
    let (mut manager, _decoder) = manager_with(&[1, 2, 3]);
    manager.next();
    manager.next();
    manager.next();
    manager.backward();
    assert!(manager.history().is_replaying());
    assert_eq!(manager.current_track_id(), Some(id(2)));

    manager.set_playlist(tracks(&[10, 11]));

    assert!(manager.history().is_empty());
    assert_eq!(manager.history().cursor(), None);
    assert_eq!(manager.catalog().len(), 3);
    assert!(manager.catalog().contains(id(2)));
    assert!(!manager.catalog().contains(id(1)));
    assert!(!manager.catalog().contains(id(3)));

    // Current track is kept but not in the playlist: next starts from the top
    assert_eq!(manager.current_index(), None);
    manager.next();
    assert_eq!(manager.current_track_id(), Some(id(10)));
    assert_eq!(manager.history().entries(), &[id(2)]);
}

#[test]
fn set_playlist_keeps_state_and_rederives_cursor() {
    let (mut manager, decoder) = manager_with(&[1, 2, 3]);
    manager.next();
    manager.next();
    finish_prepare(&mut manager, &decoder);
    assert_eq!(manager.state(), PlayerState::Started);

    manager.set_playlist(tracks(&[5, 2, 6]));

    assert_eq!(manager.state(), PlayerState::Started);
    assert_eq!(manager.current_track_id(), Some(id(2)));
    assert_eq!(manager.current_index(), Some(1));
    assert!(manager
        .drain_events()
        .contains(&PlaybackEvent::PlaylistChanged { length: 3 }));
}

#[test]
fn structural_move_after_replay_discards_forward_branch() {
    let (mut manager, _decoder) = manager_with(&[1, 2, 3, 4, 5]);
    for _ in 0..4 {
        manager.next();
    }
    assert_eq!(manager.history().entries(), &[id(1), id(2), id(3)]);

    manager.backward();
    manager.backward();
    assert_eq!(manager.current_track_id(), Some(id(2)));

    manager.next();

    assert_eq!(manager.current_track_id(), Some(id(3)));
    assert_eq!(manager.history().entries(), &[id(1), id(2)]);
    assert_eq!(manager.history().cursor(), None);
    assert_in_sync(&manager);
}

#[test]
fn backward_without_history_is_noop() {
    let (mut manager, decoder) = manager_with(&[1, 2]);
    manager.next();
    let calls = decoder.calls().len();

    manager.backward();

    assert_eq!(manager.current_track_id(), Some(id(1)));
    assert_eq!(decoder.calls().len(), calls);
}

#[test]
fn forward_without_redo_advances_playlist() {
    let (mut manager, _decoder) = manager_with(&[1, 2, 3]);
    manager.next();

    manager.forward();

    assert_eq!(manager.current_track_id(), Some(id(2)));
    assert_eq!(manager.history().entries(), &[id(1)]);
}

#[test]
fn navigation_on_empty_playlist_is_noop() {
    let (mut manager, decoder) = manager_with(&[]);

    manager.next();
    manager.previous();
    manager.forward();
    manager.backward();

    assert_eq!(manager.state(), PlayerState::Idle);
    assert!(manager.current_track_id().is_none());
    assert!(decoder.calls().is_empty());
    assert!(!manager.has_pending_events());
}

#[test]
fn play_selected_track_registers_and_logs() {
    let (mut manager, _decoder) = manager_with(&[1, 2, 3]);
    manager.next();
    manager.next();

    manager.handle_command(Command::PlayTrack(track(42)));

    assert_eq!(manager.current_track_id(), Some(id(42)));
    assert_eq!(manager.current_track().map(|t| t.name.as_str()), Some("Track 42"));
    // Out-of-playlist jump leaves the playlist cursor where it was
    assert_eq!(manager.current_index(), Some(1));
    assert_eq!(manager.history().entries(), &[id(1), id(2)]);

    manager.next();
    assert_eq!(manager.current_track_id(), Some(id(3)));
}

#[test]
fn add_track_extends_playlist() {
    let (mut manager, _decoder) = manager_with(&[1]);
    manager.next();
    assert!(!manager.has_next());

    manager.handle_command(Command::AddTrack(track(2)));

    assert!(manager.has_next());
    assert_eq!(
        manager.drain_events().last(),
        Some(&PlaybackEvent::PlaylistChanged { length: 2 })
    );
    manager.next();
    assert_eq!(manager.current_track_id(), Some(id(2)));
    assert!(manager.has_previous());
}

#[test]
fn adding_current_track_resyncs_cursor() {
    let (mut manager, _decoder) = manager_with(&[1]);
    manager.next();
    manager.set_playlist(tracks(&[2]));
    assert_eq!(manager.current_index(), None);

    manager.handle_command(Command::AddTrack(track(1)));

    assert_eq!(manager.current_index(), Some(1));
    assert!(!manager.has_next());
    assert!(manager.has_previous());
    assert_in_sync(&manager);

    manager.next();
    assert_eq!(manager.current_track_id(), Some(id(1)));

    manager.previous();
    assert_eq!(manager.current_track_id(), Some(id(2)));
    assert_in_sync(&manager);
}

#[test]
fn duplicate_entries_follow_nearest_occurrence() {
    let (mut manager, _decoder) = manager_with(&[1, 2, 1, 3]);
    manager.next();
    manager.next();
    manager.next();
    assert_eq!(manager.current_index(), Some(2));

    manager.next();
    assert_eq!(manager.current_index(), Some(3));

    manager.backward();
    assert_eq!(manager.current_track_id(), Some(id(1)));
    assert_eq!(manager.current_index(), Some(2));
    assert_in_sync(&manager);
}

#[test]
fn replay_round_trip_keeps_full_history() {
    let config = cadence_playback::PlaybackConfig {
        history_size: 3,
        ..Default::default()
    };
    let (mut manager, _decoder) = manager_with_config(&[1, 2, 3, 4, 5], config);
    for _ in 0..5 {
        manager.next();
    }
    assert_eq!(manager.history().entries(), &[id(2), id(3), id(4)]);

    manager.backward();
    assert_eq!(manager.current_track_id(), Some(id(4)));
    manager.forward();

    assert_eq!(manager.current_track_id(), Some(id(5)));
    assert_eq!(manager.history().entries(), &[id(2), id(3), id(4)]);
    assert_eq!(manager.history().cursor(), None);
    assert_in_sync(&manager);
}

#[test]
fn history_is_bounded() {
    let ids: Vec<u64> = (1..=10).collect();
    let config = cadence_playback::PlaybackConfig {
        history_size: 3,
        ..Default::default()
    };
    let (mut manager, _decoder) = manager_with_config(&ids, config);

    for _ in 0..10 {
        manager.next();
    }

    assert_eq!(manager.history().len(), 3);
    assert_eq!(manager.history().entries(), &[id(7), id(8), id(9)]);
}
