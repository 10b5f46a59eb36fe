//! Media Sync Tests
//!
//! Tests for:
//! - MediaClockSync: drift tolerance, hard correction, invalid media times
//! - Play/pause mirroring and host-tick advance
//! - End-of-media detection (once per session)
//! - VirtualMedia clock behavior

use showreel::animation::{MasterTimeline, TimelineState};
use showreel::config::SyncSettings;
use showreel::media::{MediaClock, MediaClockSync, SyncOutcome, VirtualMedia};

const EPSILON: f32 = 1e-5;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn sync() -> MediaClockSync {
    MediaClockSync::new(SyncSettings { epsilon: 0.1 })
}

fn playing_media(duration: f32, at: f32) -> VirtualMedia {
    let mut media = VirtualMedia::new(duration);
    media.set_current_time(at);
    media.play();
    media
}

// ============================================================================
// Drift correction
// ============================================================================

#[test]
fn drift_within_epsilon_is_left_alone() {
    let sync = sync();
    let mut timeline = MasterTimeline::new(1);
    timeline.seek(5.0);

    assert_eq!(sync.resync(&mut timeline, 5.05), SyncOutcome::InSync);
    assert!(approx(timeline.cursor(), 5.0));
}

#[test]
fn drift_exactly_epsilon_is_in_sync() {
    let sync = MediaClockSync::new(SyncSettings { epsilon: 0.5 });
    let mut timeline = MasterTimeline::new(1);
    timeline.seek(2.0);
    assert_eq!(sync.resync(&mut timeline, 2.5), SyncOutcome::InSync);
}

#[test]
fn drift_beyond_epsilon_hard_seeks() {
    let sync = sync();
    let mut timeline = MasterTimeline::new(1);
    timeline.seek(5.0);

    let outcome = sync.resync(&mut timeline, 5.3);
    assert_eq!(outcome, SyncOutcome::Corrected { from: 5.0, to: 5.3 });
    assert_eq!(timeline.cursor(), 5.3);
}

#[test]
fn backward_media_seek_is_followed() {
    let sync = sync();
    let mut timeline = MasterTimeline::new(1);
    timeline.seek(12.0);

    sync.resync(&mut timeline, 3.0);
    assert_eq!(timeline.cursor(), 3.0);
}

#[test]
fn invalid_media_time_is_skipped() {
    let sync = sync();
    let mut timeline = MasterTimeline::new(1);
    timeline.seek(4.0);

    for bad in [f32::NAN, f32::INFINITY, -1.0] {
        assert_eq!(sync.resync(&mut timeline, bad), SyncOutcome::Skipped);
        assert!(approx(timeline.cursor(), 4.0));
    }
}

#[test]
fn default_epsilon_is_a_tenth_of_a_second() {
    assert!(approx(MediaClockSync::default().epsilon(), 0.1));
}

// ============================================================================
// Tick: mirroring & advance
// ============================================================================

#[test]
fn tick_without_timeline_is_idle() {
    let mut sync = sync();
    let media = playing_media(30.0, 1.0);
    assert_eq!(sync.tick(None, &media, 0.016), SyncOutcome::Idle);
}

#[test]
fn tick_mirrors_media_play_state() {
    let mut sync = sync();
    let mut timeline = MasterTimeline::new(1);
    let mut media = playing_media(30.0, 0.0);

    sync.tick(Some(&mut timeline), &media, 0.0);
    assert!(!timeline.is_paused());

    media.pause();
    sync.tick(Some(&mut timeline), &media, 0.0);
    assert!(timeline.is_paused());
}

#[test]
fn tick_advances_with_host_dt_while_playing() {
    let mut sync = sync();
    let mut timeline = MasterTimeline::new(1);
    let mut media = playing_media(30.0, 0.0);

    for _ in 0..10 {
        media.advance(0.05);
        let outcome = sync.tick(Some(&mut timeline), &media, 0.05);
        assert_eq!(outcome, SyncOutcome::InSync);
    }
    assert!((timeline.cursor() - 0.5).abs() < 1e-3);
}

#[test]
fn tick_does_not_advance_while_paused() {
    let mut sync = sync();
    let mut timeline = MasterTimeline::new(1);
    let media = VirtualMedia::new(30.0);

    sync.tick(Some(&mut timeline), &media, 0.5);
    assert!(approx(timeline.cursor(), 0.0));
}

#[test]
fn stalled_media_drags_cursor_back() {
    let mut sync = sync();
    let mut timeline = MasterTimeline::new(1);
    let media = playing_media(30.0, 2.0);
    timeline.seek(2.0);

    // Media is buffering: its time stays put while the host keeps ticking.
    let mut corrected = false;
    for _ in 0..20 {
        if let SyncOutcome::Corrected { to, .. } = sync.tick(Some(&mut timeline), &media, 0.016) {
            assert_eq!(to, 2.0);
            corrected = true;
        }
    }
    assert!(corrected);
    assert!((timeline.cursor() - 2.0).abs() <= 0.1 + EPSILON);
}

#[test]
fn toggle_playback_mirrors_in_the_same_call() {
    let sync = sync();
    let mut timeline = MasterTimeline::new(1);
    let mut media = VirtualMedia::new(30.0);

    assert!(sync.toggle_playback(&mut media, Some(&mut timeline)));
    assert!(!media.is_paused());
    assert!(!timeline.is_paused());

    assert!(!sync.toggle_playback(&mut media, Some(&mut timeline)));
    assert!(media.is_paused());
    assert!(timeline.is_paused());
}

// ============================================================================
// End of media
// ============================================================================

#[test]
fn ended_is_reported_once_and_freezes_timeline() {
    let mut sync = sync();
    let mut timeline = MasterTimeline::new(1);
    let mut media = playing_media(1.0, 0.9);
    media.advance(0.2);
    assert!(media.is_ended());

    assert_eq!(sync.tick(Some(&mut timeline), &media, 0.016), SyncOutcome::Ended);
    assert_eq!(timeline.state(), TimelineState::Frozen);
    assert!(sync.is_finished());

    for _ in 0..3 {
        assert_eq!(sync.tick(Some(&mut timeline), &media, 0.016), SyncOutcome::Finished);
    }
}

#[test]
fn finished_sync_never_seeks() {
    let mut sync = sync();
    let mut timeline = MasterTimeline::new(1);
    let media = playing_media(30.0, 10.0);
    sync.finish();

    assert_eq!(sync.tick(Some(&mut timeline), &media, 0.016), SyncOutcome::Finished);
    assert!(approx(timeline.cursor(), 0.0));
}

#[test]
fn toggle_after_finish_does_nothing() {
    let mut sync = sync();
    let mut media = VirtualMedia::new(30.0);
    sync.finish();
    assert!(!sync.toggle_playback(&mut media, None));
    assert!(media.is_paused());
}

// ============================================================================
// VirtualMedia
// ============================================================================

#[test]
fn virtual_media_stops_at_duration() {
    let mut media = playing_media(2.0, 1.5);
    media.advance(1.0);
    assert!(media.is_ended());
    assert!(media.is_paused());
    assert!(approx(media.current_time(), 2.0));

    media.play();
    assert!(media.is_paused());
}

#[test]
fn virtual_media_seek_clears_ended() {
    let mut media = playing_media(2.0, 1.5);
    media.advance(1.0);
    media.set_current_time(0.5);
    assert!(!media.is_ended());
    media.play();
    assert!(!media.is_paused());
}
