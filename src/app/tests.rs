use std::time::{Duration, Instant};

use super::*;
use crate::library::{AudioExtensions, Entry, ListError};
use crate::nav::Navigator;
use crate::transport::mock::{Call, RecordingDevice};
use crate::transport::{DeviceEvent, PlaybackError, PlaybackState, RepeatMode, Transport};

fn file(dir: &str, name: &str) -> Entry {
    Entry {
        name: name.into(),
        path: format!("{dir}/{name}"),
        is_directory: false,
        is_file: true,
        is_symlink: false,
    }
}

fn folder(dir: &str, name: &str) -> Entry {
    Entry {
        is_directory: true,
        is_file: false,
        ..file(dir, name)
    }
}

fn app_with(device: RecordingDevice) -> App<RecordingDevice> {
    let nav = Navigator::new("/music", AudioExtensions::default());
    let transport = Transport::new(device, 0.5, RepeatMode::NoRepeat);
    App::new(nav, transport)
}

/// App showing `/music` with one folder and two tracks.
fn started() -> App<RecordingDevice> {
    let mut app = app_with(RecordingDevice::default());
    let req = app.start();
    app.apply_listing(
        req.token,
        Ok(vec![
            folder("/music", "Rock"),
            file("/music", "a.mp3"),
            file("/music", "notes.txt"),
            file("/music", "b.flac"),
        ]),
    );
    app
}

#[test]
fn rows_list_directories_before_tracks_without_parent_at_home() {
    let app = started();
    assert_eq!(
        app.rows(),
        vec![Row::Directory(0), Row::Track(0), Row::Track(1)]
    );
}

#[test]
fn rows_offer_parent_below_home() {
    let mut app = started();
    app.selected = 0;
    let req = app.activate_selected().unwrap();
    assert_eq!(req.path, "/music/Rock");
    app.apply_listing(req.token, Ok(vec![file("/music/Rock", "c.ogg")]));

    assert_eq!(app.nav.current(), "/music/Rock");
    assert_eq!(app.rows(), vec![Row::Parent, Row::Track(0)]);
}

#[test]
fn move_selection_stops_at_ends() {
    let mut app = started();
    app.move_selection(-3);
    assert_eq!(app.selected, 0);
    app.move_selection(10);
    assert_eq!(app.selected, 2);
    app.select_first();
    assert_eq!(app.selected, 0);
    app.select_last();
    assert_eq!(app.selected, 2);
}

#[test]
fn activating_a_track_plays_it() {
    let mut app = started();
    app.selected = 2;
    assert!(app.activate_selected().is_none());

    let state = app.transport.state();
    assert_eq!(state.status, PlaybackState::Playing);
    assert_eq!(state.current_track.as_ref().unwrap().name, "b.flac");
}

#[test]
fn failed_track_load_is_reported() {
    let mut app = app_with(RecordingDevice::rejecting("a.mp3"));
    let req = app.start();
    app.apply_listing(req.token, Ok(vec![file("/music", "a.mp3")]));

    app.play_track(0);

    let notice = app.notices().last().unwrap();
    assert_eq!(notice.level, NoticeLevel::Error);
    assert_eq!(notice.title, "Play track error");
    assert!(app.transport.state().current_track.is_none());
}

#[test]
fn failed_descend_keeps_directory_and_reports() {
    let mut app = started();
    app.selected = 2;
    let req = app.open("/music/Missing");
    app.apply_listing(
        req.token,
        Err(ListError::NotFound {
            path: "/music/Missing".into(),
        }),
    );

    assert_eq!(app.nav.current(), "/music");
    assert_eq!(app.nav.playlist().len(), 2);
    assert_eq!(app.selected, 2);
    assert_eq!(app.notices().last().unwrap().title, "Open directory error");
}

#[test]
fn failed_ascend_is_reported_as_parent_error() {
    let mut app = started();
    let req = app.open("/music/Rock");
    app.apply_listing(req.token, Ok(vec![]));

    let up = app.go_up().unwrap();
    assert_eq!(up.path, "/music");
    app.apply_listing(
        up.token,
        Err(ListError::Unreadable {
            path: "/music".into(),
            reason: "permission denied".into(),
        }),
    );

    assert_eq!(app.nav.current(), "/music/Rock");
    assert_eq!(app.notices().last().unwrap().title, "Parent directory error");
}

#[test]
fn go_up_at_home_does_nothing() {
    let mut app = started();
    assert!(app.go_up().is_none());
    assert!(!app.nav.is_loading());
}

#[test]
fn stale_listing_is_ignored() {
    let mut app = started();
    let slow = app.open("/music/Rock");
    let fast = app.open("/music/Jazz");
    app.apply_listing(fast.token, Ok(vec![file("/music/Jazz", "j.mp3")]));
    app.apply_listing(slow.token, Ok(vec![file("/music/Rock", "r.mp3")]));

    assert_eq!(app.nav.current(), "/music/Jazz");
    assert_eq!(app.nav.playlist().get(0).unwrap().name, "j.mp3");
    assert_eq!(app.notices().count(), 0);
}

#[test]
fn navigation_keeps_playing_track() {
    let mut app = started();
    app.play_track(0);
    let req = app.open("/music/Rock");
    app.apply_listing(req.token, Ok(vec![file("/music/Rock", "c.ogg")]));

    let state = app.transport.state();
    assert_eq!(state.status, PlaybackState::Playing);
    assert_eq!(state.current_track.as_ref().unwrap().name, "a.mp3");
}

#[test]
fn device_end_advances_over_current_playlist() {
    let mut app = started();
    app.play_track(1);
    app.toggle_repeat();

    let generation = app.transport.generation();
    app.handle_device_event(generation, DeviceEvent::Ended);

    let state = app.transport.state();
    assert_eq!(state.current_track.as_ref().unwrap().name, "a.mp3");
    assert_eq!(state.repeat_mode, RepeatMode::RepeatAll);
}

#[test]
fn end_of_replaced_track_does_not_skip_new_one() {
    let mut app = started();
    app.play_track(0);
    let old = app.transport.generation();
    app.next_track();

    app.handle_device_event(old, DeviceEvent::Ended);

    let state = app.transport.state();
    assert_eq!(state.status, PlaybackState::Playing);
    assert_eq!(state.current_track.as_ref().unwrap().name, "b.flac");
}

#[test]
fn late_load_failure_is_reported() {
    let mut app = started();
    app.play_track(0);
    let generation = app.transport.generation();

    app.handle_device_event(
        generation,
        DeviceEvent::Failed(PlaybackError::Decode {
            path: "/music/a.mp3".into(),
            reason: "bad header".into(),
        }),
    );

    let notice = app.notices().last().unwrap();
    assert_eq!(notice.title, "Play track error");
    let state = app.transport.state();
    assert_eq!(state.status, PlaybackState::Stopped);
    assert!(state.current_track.is_none());
}

#[test]
fn transport_wrappers_reach_the_device() {
    let mut app = started();
    app.play_track(0);
    let generation = app.transport.generation();
    app.handle_device_event(generation, DeviceEvent::DurationKnown(100.0));

    app.seek_by(5.0);
    assert_eq!(app.transport.device().last(), Some(&Call::SetCurrentTime(5.0)));
    app.nudge_volume(0.25);
    assert_eq!(app.transport.device().last(), Some(&Call::SetVolume(0.75)));
    app.next_track();
    assert_eq!(
        app.transport.state().current_track.as_ref().unwrap().name,
        "b.flac"
    );
    app.previous_track();
    app.toggle_play_pause();
    assert_eq!(app.transport.state().status, PlaybackState::Paused);
    app.stop();
    assert_eq!(app.transport.state().status, PlaybackState::Stopped);
}

#[test]
fn picker_confirm_opens_typed_path() {
    let mut app = started();
    app.open_picker();
    assert_eq!(app.picker.as_deref(), Some("/music"));

    for _ in 0.."/music".len() {
        app.picker_pop();
    }
    for c in "/tmp/x ".chars() {
        app.picker_push(c);
    }
    let req = app.confirm_picker().unwrap();

    assert_eq!(req.path, "/tmp/x");
    assert!(app.picker.is_none());
    assert_eq!(app.nav.pending_path(), Some("/tmp/x"));
}

#[test]
fn picker_cancel_or_blank_yields_nothing() {
    let mut app = started();
    app.open_picker();
    app.cancel_picker();
    assert!(app.confirm_picker().is_none());

    app.picker = Some("   ".into());
    assert!(app.confirm_picker().is_none());
    assert!(!app.nav.is_loading());
}

#[test]
fn toggle_view_flips_between_list_and_grid() {
    let mut app = started();
    assert_eq!(app.view, ViewMode::List);
    app.toggle_view();
    assert_eq!(app.view, ViewMode::Grid);
    app.toggle_view();
    assert_eq!(app.view, ViewMode::List);
}

#[test]
fn notices_are_bounded_and_expire() {
    let mut app = started();
    for i in 0..8 {
        app.notify_error("Open directory error", format!("failure {i}"));
    }
    let details: Vec<_> = app.notices().map(|n| n.detail.clone()).collect();
    assert_eq!(details.len(), 5);
    assert_eq!(details[0], "failure 3");

    app.expire_notices(Instant::now() + Duration::from_secs(10), Duration::from_secs(4));
    assert_eq!(app.notices().count(), 0);
}
