//! Presentation Tests
//!
//! End-to-end runs of the presentation context with a virtual media clock
//! and a recording camera rig:
//! - Loading in any order, late arrivals, failed loads
//! - Media-locked playback, seeks, play/pause
//! - Panel edits before and after the end of narration
//! - Closing transition and pointer interaction

use glam::{Vec2, Vec3};

use showreel::animation::TargetProperty;
use showreel::config::{CameraPose, PresentationConfig};
use showreel::interaction::{CursorIcon, InteractionState, PointerEvent, Viewport};
use showreel::media::{MediaClock, SyncOutcome, VirtualMedia};
use showreel::roster::{AssetNode, EntityId};
use showreel::scene::{BoundingBox, Camera, RecordingRig};
use showreel::{EntityEdit, Presentation, ShowreelError};

type Show = Presentation<VirtualMedia, RecordingRig>;

const DT: f32 = 1.0 / 60.0;
const NARRATION: f32 = 17.0;

fn body() -> AssetNode {
    AssetNode::mesh("body", BoundingBox::from_size(Vec3::ONE))
}

fn host_rig() -> RecordingRig {
    RecordingRig::new(CameraPose {
        position: Vec3::new(0.0, 2.0, 8.0),
        target: Vec3::ZERO,
        fov_degrees: 75.0,
    })
}

fn show() -> Show {
    Presentation::new(PresentationConfig::default(), VirtualMedia::new(NARRATION), host_rig()).unwrap()
}

fn complete_loads(show: &Show, slots: &[usize]) {
    for &slot in slots {
        show.load_queue().completer(slot).complete(Ok(body()));
    }
}

fn loaded_show() -> Show {
    let mut show = show();
    complete_loads(&show, &[0, 1, 2, 3, 4, 5]);
    show.drain_loads();
    show
}

/// Plays media and host ticks together for `seconds`.
fn run(show: &mut Show, seconds: f32) -> Vec<SyncOutcome> {
    let mut outcomes = Vec::new();
    let mut elapsed = 0.0;
    while elapsed < seconds {
        show.media_mut().advance(DT);
        outcomes.push(show.tick(DT));
        elapsed += DT;
    }
    outcomes
}

fn run_to_interactive(show: &mut Show) {
    show.start().unwrap();
    run(show, NARRATION + 0.1);
    assert_eq!(show.state(), InteractionState::Transitioning);
    run(show, 3.0);
    assert_eq!(show.state(), InteractionState::Interactive);
}

/// Device pixel position of an entity's center under the current camera.
fn pixel_of(show: &Show, id: EntityId) -> Vec2 {
    let viewport = Viewport::default();
    let camera = Camera::from_pose(&show.rig().pose, viewport.aspect());
    let position = show.roster().get(id).unwrap().pose.position;
    let ndc = camera.view_projection_matrix().project_point3(position);
    Vec2::new(
        (ndc.x + 1.0) / 2.0 * viewport.width,
        (1.0 - ndc.y) / 2.0 * viewport.height,
    )
}

// ============================================================================
// Loading
// ============================================================================

#[test]
fn invalid_config_is_rejected_up_front() {
    let mut config = PresentationConfig::default();
    config.sync.epsilon = -1.0;
    let result = Presentation::new(config, VirtualMedia::new(NARRATION), host_rig());
    assert!(matches!(result, Err(ShowreelError::InvalidConfig(_))));
}

#[test]
fn host_camera_keeps_orbit_during_narration() {
    let show = show();
    assert!(show.rig().orbit_enabled);
    assert!(show.rig().moves.is_empty());
}

#[test]
fn loads_in_any_order_produce_the_same_roster() {
    let mut shuffled = show();
    complete_loads(&shuffled, &[3, 5, 0, 2, 4, 1]);
    assert_eq!(shuffled.drain_loads(), 6);

    let in_order = loaded_show();
    let ids = |s: &Show| s.roster().iter().map(|e| e.id).collect::<Vec<_>>();
    assert_eq!(ids(&shuffled), ids(&in_order));
    assert!(shuffled.load_progress().is_complete());
}

#[test]
fn repeated_completion_for_a_slot_is_discarded() {
    let mut show = loaded_show();
    let nodes = show.scene().node_count();
    let root = show.roster().get(EntityId(1)).unwrap().root;

    complete_loads(&show, &[0]);
    assert_eq!(show.drain_loads(), 0);

    assert_eq!(show.scene().node_count(), nodes);
    assert_eq!(show.scene().root_nodes.len(), 6);
    assert_eq!(show.roster().get(EntityId(1)).unwrap().root, root);
    assert_eq!(show.load_progress().percent(), 100);
}

#[test]
fn failed_load_leaves_the_rest_running() {
    let mut show = show();
    complete_loads(&show, &[0, 1, 2, 4, 5]);
    show.load_queue()
        .completer(3)
        .complete(Err(ShowreelError::AssetLoad {
            path: "/models/oriane-3d.glb".to_string(),
            reason: "network".to_string(),
        }));
    assert_eq!(show.drain_loads(), 5);
    assert!(show.roster().get(EntityId(4)).is_none());
    assert_eq!(show.load_progress().failed, 1);

    show.start().unwrap();
    let timeline = show.timeline().unwrap();
    assert_eq!(timeline.tracks().len(), 10);
    assert!(timeline.tracks().iter().all(|t| t.entity != EntityId(4)));
}

#[test]
fn late_arrival_rebuilds_running_timeline() {
    let mut show = show();
    complete_loads(&show, &[0, 1]);
    show.drain_loads();
    show.start().unwrap();
    run(&mut show, 1.0);
    assert_eq!(show.timeline_generation(), 1);

    complete_loads(&show, &[5]);
    run(&mut show, DT);
    assert_eq!(show.timeline_generation(), 2);

    let timeline = show.timeline().unwrap();
    assert_eq!(timeline.tracks().len(), 6);
    // The fresh timeline picks up at the media time and keeps playing.
    assert!((timeline.cursor() - show.media().current_time()).abs() <= 0.1);
    assert!(!timeline.is_paused());
}

#[test]
fn entities_wait_invisible_until_their_time() {
    let mut show = loaded_show();
    show.start().unwrap();
    run(&mut show, 1.0);
    assert!(show.roster().iter().all(|e| e.pose.scale == 0.0));
}

// ============================================================================
// Media-locked playback
// ============================================================================

#[test]
fn entity_is_on_stage_during_its_window() {
    let mut show = loaded_show();
    show.start().unwrap();
    run(&mut show, 5.0);

    let first = show.roster().get(EntityId(1)).unwrap();
    assert!((first.pose.scale - 2.5).abs() < 1e-3);
    assert!(first.label.visible);
    assert_eq!(show.spotlight().active, Some(EntityId(1)));
    assert!(show.spotlight().labels_visible);
    assert!(show.roster().get(EntityId(2)).unwrap().pose.scale == 0.0);
}

#[test]
fn media_seek_is_followed_within_one_tick() {
    let mut show = loaded_show();
    show.start().unwrap();
    run(&mut show, 1.0);

    show.media_mut().set_current_time(11.0);
    let outcome = show.tick(DT);
    assert!(matches!(outcome, SyncOutcome::Corrected { to, .. } if to == 11.0));
    assert_eq!(show.timeline().unwrap().cursor(), 11.0);

    run(&mut show, 0.5);
    let oriane = show.roster().get(EntityId(4)).unwrap();
    assert!(oriane.pose.scale > 0.0);
    assert!(show.roster().get(EntityId(1)).unwrap().pose.scale == 0.0);
}

#[test]
fn pausing_media_pauses_the_timeline() {
    let mut show = loaded_show();
    show.start().unwrap();
    run(&mut show, 1.0);

    assert!(!show.toggle_playback());
    assert!(show.timeline().unwrap().is_paused());
    let cursor = show.timeline().unwrap().cursor();
    run(&mut show, 1.0);
    assert_eq!(show.timeline().unwrap().cursor(), cursor);

    assert!(show.toggle_playback());
    assert!(!show.timeline().unwrap().is_paused());
}

#[test]
fn only_one_timeline_is_ever_live() {
    let mut show = loaded_show();
    show.start().unwrap();
    for step in 0..5 {
        show.edit_entity(EntityId(2), EntityEdit::TimeStart(6.0 + step as f32)).unwrap();
        run(&mut show, 0.2);
    }
    assert_eq!(show.timeline_generation(), 6);
    assert!(show.timeline().unwrap().is_live());
}

// ============================================================================
// Panel edits
// ============================================================================

#[test]
fn timing_edit_moves_keyframes() {
    let mut show = loaded_show();
    show.start().unwrap();
    show.edit_entity(EntityId(3), EntityEdit::TimeStart(9.5)).unwrap();
    show.edit_entity(EntityId(3), EntityEdit::Duration(3.0)).unwrap();

    let times: Vec<f32> = show
        .timeline()
        .unwrap()
        .keyframes()
        .filter(|(id, k)| *id == EntityId(3) && k.property == TargetProperty::Scale)
        .map(|(_, k)| k.time)
        .collect();
    assert_eq!(times, vec![9.5, 12.5]);
    assert_eq!(show.config().entities[2].time_start, 9.5);
    assert_eq!(show.timeline_generation(), 3);
}

#[test]
fn invalid_edit_changes_nothing() {
    let mut show = loaded_show();
    show.start().unwrap();

    let result = show.edit_entity(EntityId(2), EntityEdit::Duration(0.0));
    assert!(matches!(result, Err(ShowreelError::InvalidConfig(_))));
    assert_eq!(show.config().entities[1].duration, 2.0);
    assert_eq!(show.timeline_generation(), 1);

    let result = show.edit_entity(EntityId(2), EntityEdit::Scale(-1.0));
    assert!(matches!(result, Err(ShowreelError::InvalidConfig(_))));
}

#[test]
fn unknown_entity_edit_is_an_error() {
    let mut show = loaded_show();
    let result = show.edit_entity(EntityId(99), EntityEdit::RotationY(1.0));
    assert!(matches!(result, Err(ShowreelError::UnknownEntity(EntityId(99)))));
}

#[test]
fn spatial_edits_apply_without_rebuild() {
    let mut show = loaded_show();
    show.start().unwrap();
    let position = Vec3::new(-1.0, 0.5, 0.0);
    show.edit_entity(EntityId(1), EntityEdit::Position(position)).unwrap();
    show.edit_entity(EntityId(1), EntityEdit::RotationY(0.25)).unwrap();

    let entity = show.roster().get(EntityId(1)).unwrap();
    assert_eq!(entity.pose.position, position);
    assert_eq!(entity.pose.rotation_y, 0.25);
    assert_eq!(show.timeline_generation(), 1);
}

#[test]
fn scale_edit_reaches_timeline_on_next_rebuild() {
    let mut show = loaded_show();
    show.start().unwrap();
    show.edit_entity(EntityId(1), EntityEdit::Scale(3.0)).unwrap();

    let appear_target = |show: &Show| {
        show.timeline()
            .unwrap()
            .keyframes()
            .find(|(id, k)| *id == EntityId(1) && k.property == TargetProperty::Scale)
            .map(|(_, k)| k.to)
    };
    assert_eq!(appear_target(&show), Some(2.5));

    show.edit_entity(EntityId(1), EntityEdit::TimeStart(4.0)).unwrap();
    assert_eq!(appear_target(&show), Some(3.0));
}

#[test]
fn edits_before_load_are_kept_for_later() {
    let mut show = show();
    show.edit_entity(EntityId(2), EntityEdit::TimeStart(7.0)).unwrap();
    complete_loads(&show, &[1]);
    show.drain_loads();
    assert_eq!(show.roster().get(EntityId(2)).unwrap().time_start, 7.0);
}

// ============================================================================
// End of narration
// ============================================================================

#[test]
fn narration_end_starts_transition_exactly_once() {
    let mut show = loaded_show();
    show.start().unwrap();
    let outcomes = run(&mut show, NARRATION + 0.5);

    let ended = outcomes.iter().filter(|o| **o == SyncOutcome::Ended).count();
    assert_eq!(ended, 1);
    assert_eq!(outcomes.last(), Some(&SyncOutcome::Finished));
    assert_eq!(show.state(), InteractionState::Transitioning);
    assert!(!show.timeline().unwrap().is_live());

    assert!(!show.rig().orbit_enabled);
    assert_eq!(show.rig().moves.len(), 1);

    // A second end signal changes nothing.
    let pending = show.pending_tweens();
    assert!(!show.media_ended());
    assert_eq!(show.pending_tweens(), pending);
    assert_eq!(show.rig().moves.len(), 1);
}

#[test]
fn timing_edits_are_refused_after_narration() {
    let mut show = loaded_show();
    show.start().unwrap();
    run(&mut show, NARRATION + 0.1);
    let generation = show.timeline_generation();

    let result = show.edit_entity(EntityId(1), EntityEdit::TimeStart(1.0));
    assert!(matches!(result, Err(ShowreelError::TimelineFrozen)));
    assert_eq!(show.timeline_generation(), generation);
    assert!(matches!(show.start(), Err(ShowreelError::TimelineFrozen)));

    // Spatial edits still land.
    show.edit_entity(EntityId(1), EntityEdit::RotationY(1.0)).unwrap();
}

#[test]
fn explicit_end_signal_matches_media_end() {
    let mut show = loaded_show();
    show.start().unwrap();
    run(&mut show, 3.0);

    assert!(show.media_ended());
    assert_eq!(show.state(), InteractionState::Transitioning);
    assert_eq!(show.tick(DT), SyncOutcome::Finished);
}

#[test]
fn closing_caption_fades_in() {
    let mut show = loaded_show();
    run_to_interactive(&mut show);
    assert!((show.caption().opacity - 1.0).abs() < 1e-4);
    assert!(show.caption().visible);
    assert_eq!(show.pending_tweens(), 0);
    assert!(!show.spotlight().labels_visible);
    assert!(show.roster().iter().all(|e| !e.label.visible));
}

// ============================================================================
// Pointer interaction
// ============================================================================

#[test]
fn pointer_is_ignored_while_guided() {
    let mut show = loaded_show();
    show.start().unwrap();
    run(&mut show, 5.0);

    let at = pixel_of(&show, EntityId(1));
    show.pointer_event(PointerEvent::Moved { x: at.x, y: at.y });
    show.tick(DT);
    show.pointer_event(PointerEvent::Pressed { x: at.x, y: at.y });

    assert_eq!(show.pointer().hovered, None);
    assert!(!show.pointer().dragging);
    assert_eq!(show.cursor_icon(), CursorIcon::Default);
}

#[test]
fn hover_then_drag_rotates_entity() {
    let mut show = loaded_show();
    run_to_interactive(&mut show);

    let at = pixel_of(&show, EntityId(5));
    show.pointer_event(PointerEvent::Moved { x: at.x, y: at.y });
    show.tick(DT);
    assert_eq!(show.pointer().hovered, Some(EntityId(5)));
    assert_eq!(show.cursor_icon(), CursorIcon::Grab);

    let before = show.roster().get(EntityId(5)).unwrap().pose.rotation_y;
    show.pointer_event(PointerEvent::Pressed { x: at.x, y: at.y });
    assert_eq!(show.cursor_icon(), CursorIcon::Grabbing);
    show.pointer_event(PointerEvent::Moved { x: at.x + 40.0, y: at.y });
    show.tick(DT);

    let after = show.roster().get(EntityId(5)).unwrap().pose.rotation_y;
    assert!((after - before - 0.2).abs() < 1e-4);

    show.pointer_event(PointerEvent::Released);
    assert!(!show.pointer().dragging);
    show.pointer_event(PointerEvent::Moved { x: at.x + 400.0, y: at.y });
    assert_eq!(show.roster().get(EntityId(5)).unwrap().pose.rotation_y, after);
}
