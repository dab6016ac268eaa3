//! Integration tests for a full session
//!
//! Walk through what a listener does: browse the catalog, build a queue,
//! like songs, make playlists, and let tracks play out.

use resonance_core::{PlaylistId, TrackId};
use resonance_library::{Catalog, Session};
use resonance_playback::{
    LoadToken, MediaError, MediaEvent, MediaEventKind, MediaOutput, PlaybackConfig,
    PlaybackEvent, PlayerStatus,
};
use std::cell::RefCell;
use std::rc::Rc;

/// Output that records the current binding for the test to answer with
#[derive(Clone, Default)]
struct RecordingOutput {
    token: Rc<RefCell<Option<LoadToken>>>,
    uris: Rc<RefCell<Vec<String>>>,
}

impl RecordingOutput {
    fn event(&self, kind: MediaEventKind) -> MediaEvent {
        let token = self.token.borrow().clone().expect("nothing bound");
        MediaEvent::new(token, kind)
    }
}

impl MediaOutput for RecordingOutput {
    fn load(&mut self, token: &LoadToken, uri: &str) {
        *self.token.borrow_mut() = Some(token.clone());
        self.uris.borrow_mut().push(uri.to_string());
    }

    fn clear(&mut self) {
        *self.token.borrow_mut() = None;
    }

    fn play(&mut self) -> Result<(), MediaError> {
        Ok(())
    }

    fn pause(&mut self) {}

    fn set_volume(&mut self, _level: f32) {}

    fn volume(&self) -> f32 {
        1.0
    }

    fn position(&self) -> f64 {
        0.0
    }

    fn set_position(&mut self, _secs: f64) {}
}

fn start() -> (RecordingOutput, Session<RecordingOutput>) {
    let output = RecordingOutput::default();
    let mut session = Session::new(Catalog::sample(), output.clone(), PlaybackConfig::default());
    session.seed_queue_from_catalog();
    (output, session)
}

#[test]
fn favorites_keeps_one_copy_of_a_track() {
    let (_, mut session) = start();
    let playlist = session.create_playlist("Favorites").unwrap();
    let track = session.catalog().get(&TrackId::new("1")).unwrap().clone();

    assert!(session.add_to_playlist(&playlist, &track));
    assert!(!session.add_to_playlist(&playlist, &track));

    let favorites = session.playlists().get(&playlist).unwrap();
    assert_eq!(favorites.name, "Favorites");
    assert_eq!(favorites.len(), 1);
}

#[test]
fn adding_to_unknown_playlist_changes_nothing() {
    let (_, mut session) = start();
    session.create_playlist("Favorites").unwrap();
    let track = session.catalog().get(&TrackId::new("2")).unwrap().clone();

    assert!(!session.add_to_playlist(&PlaylistId::new("missing"), &track));
    assert!(session
        .try_add_to_playlist(&PlaylistId::new("missing"), &track)
        .unwrap_err()
        .is_not_found());
    assert!(session.playlists().iter().all(|p| p.is_empty()));
}

#[test]
fn toggling_like_twice_is_identity() {
    let (_, mut session) = start();
    let id = TrackId::new("3");

    assert!(!session.is_liked(&id));
    assert!(session.toggle_like_by_id(&id).unwrap());
    assert_eq!(session.liked_tracks().len(), 1);
    assert!(!session.toggle_like_by_id(&id).unwrap());
    assert!(!session.is_liked(&id));
    assert!(session.liked_tracks().is_empty());
}

#[test]
fn queue_plays_through_and_wraps() {
    let (output, mut session) = start();
    session.play_track_by_id(&TrackId::new("1")).unwrap();

    for expected in ["2", "3", "1"] {
        session.handle_media_event(output.event(MediaEventKind::Ended));
        assert_eq!(session.state().current_track_id, Some(TrackId::new(expected)));
        assert!(session.state().is_playing);
    }

    assert_eq!(
        output.uris.borrow().as_slice(),
        [
            "/assets/audio/tum-hi-ho.mp3",
            "/assets/audio/chaiyya-chaiyya.mp3",
            "/assets/audio/amplifier.mp3",
            "/assets/audio/tum-hi-ho.mp3",
        ]
    );
}

#[test]
fn removing_current_track_from_queue_keeps_it_playing() {
    let (_, mut session) = start();
    session.play_track_by_id(&TrackId::new("2")).unwrap();

    assert!(session.remove_from_queue(&TrackId::new("2")));
    assert!(session.state().is_playing);

    // Outside the queue, next starts from the front
    assert!(session.next_track());
    assert_eq!(session.state().current_track_id, Some(TrackId::new("1")));
}

#[test]
fn empty_queue_blocks_navigation() {
    let (_, mut session) = start();
    session.play_track_by_id(&TrackId::new("1")).unwrap();
    session.clear_queue();

    assert!(!session.next_track());
    assert!(!session.prev_track());
    assert_eq!(session.state().current_track_id, Some(TrackId::new("1")));
}

#[test]
fn listening_session_reports_events_in_order() {
    let (output, mut session) = start();
    session.drain_events();

    session.play_track_by_id(&TrackId::new("1")).unwrap();
    session.handle_media_event(output.event(MediaEventKind::MetadataLoaded { duration_secs: 261.0 }));
    session.seek_to(300.0);
    session.pause();

    let events = session.drain_events();
    assert!(matches!(
        events.first(),
        Some(PlaybackEvent::TrackChanged { track_id, previous_track_id: None }) if track_id.as_str() == "1"
    ));
    assert!(events.contains(&PlaybackEvent::StateChanged { status: PlayerStatus::Playing }));
    assert!(events.contains(&PlaybackEvent::PositionChanged {
        position_secs: 261.0,
        duration_secs: 261.0,
    }));
    assert_eq!(
        events.last(),
        Some(&PlaybackEvent::StateChanged { status: PlayerStatus::Paused })
    );
}
