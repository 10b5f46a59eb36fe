//! Interaction Module
//!
//! The one-way state machine that hands the presentation from scripted
//! animation to the pointer:
//!
//! ```text
//! Guided ──ended──▶ Transitioning ──settled──▶ Interactive
//! ```
//!
//! - **Guided**: timeline and media sync run, orbit control is on, the
//!   pointer is ignored.
//! - **Transitioning**: entered once. Orbit control goes off, the camera
//!   moves to its closing pose and every entity tweens into the final row.
//! - **Interactive**: terminal. Hover and drag-to-rotate run every tick.

pub mod pointer;

pub use pointer::{CursorIcon, PointerEvent, PointerState, Viewport};

use crate::animation::{Easing, MasterTimeline, TrackValue, Tween, TweenGroupId, Tweener};
use crate::config::{CameraPose, InteractionSettings};
use crate::layout::LayoutEngine;
use crate::roster::{EntityId, Roster};
use crate::scene::{Camera, CameraMove, CameraRig, Scene};
use crate::stage::TweenTarget;

const CAMERA_MOVE_DURATION: f32 = 2.0;
const POSITION_DURATION: f32 = 1.5;
const SCALE_DURATION: f32 = 1.0;
const ROTATION_DURATION: f32 = 1.0;
const LABEL_FADE_DURATION: f32 = 0.5;
const CAPTION_DURATION: f32 = 1.3;
const CAPTION_RISE: f32 = 20.0;
/// Per-slot start offset of the scale and rotation tweens.
const STAGGER: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum InteractionState {
    Guided,
    Transitioning,
    Interactive,
}

/// Drives [`InteractionState`] and owns the pointer state.
#[derive(Debug, Clone)]
pub struct InteractionController {
    state: InteractionState,
    pointer: PointerState,
    settings: InteractionSettings,
    layout: LayoutEngine,
    closing_pose: CameraPose,
    settle_elapsed: f32,
    transition_group: Option<TweenGroupId>,
}

impl InteractionController {
    #[must_use]
    pub fn new(settings: InteractionSettings, layout: LayoutEngine, closing_pose: CameraPose) -> Self {
        Self {
            state: InteractionState::Guided,
            pointer: PointerState::default(),
            settings,
            layout,
            closing_pose,
            settle_elapsed: 0.0,
            transition_group: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn state(&self) -> InteractionState {
        self.state
    }

    #[inline]
    #[must_use]
    pub fn pointer(&self) -> &PointerState {
        &self.pointer
    }

    /// Cursor shape to show; always the default arrow until interactive.
    #[must_use]
    pub fn cursor_icon(&self) -> CursorIcon {
        if self.state == InteractionState::Interactive {
            self.pointer.cursor_icon()
        } else {
            CursorIcon::Default
        }
    }

    /// Enters `Transitioning` and issues every closing tween.
    ///
    /// Only acts from `Guided`; any later call is a no-op returning `false`.
    pub fn begin_transition(
        &mut self,
        roster: &Roster,
        tweener: &mut Tweener,
        rig: &mut dyn CameraRig,
    ) -> bool {
        if self.state != InteractionState::Guided {
            log::debug!("Ignoring end of narration in {:?}", self.state);
            return false;
        }
        self.state = InteractionState::Transitioning;
        log::info!("Interaction: Guided -> Transitioning ({} entities)", roster.len());

        rig.set_orbit_enabled(false);
        rig.move_to(CameraMove {
            position: self.closing_pose.position,
            target: self.closing_pose.target,
            duration: CAMERA_MOVE_DURATION,
            easing: Easing::Power2InOut,
        });

        let group = tweener.begin_group();
        let positions = self.layout.arrange(roster.len());

        for (slot, (entity, rest)) in roster.iter().zip(positions).enumerate() {
            let stagger = slot as f32 * STAGGER;

            tweener.add(
                group,
                Tween::to(TweenTarget::Scale(entity.id), TrackValue::Scalar(1.0), SCALE_DURATION)
                    .with_delay(stagger)
                    .with_easing(Easing::ElasticOut {
                        amplitude: 1.0,
                        period: 0.5,
                    }),
            );
            tweener.add(
                group,
                Tween::to(TweenTarget::RotationY(entity.id), TrackValue::Scalar(0.0), ROTATION_DURATION)
                    .with_delay(stagger),
            );
            tweener.add(
                group,
                Tween::to(TweenTarget::Position(entity.id), TrackValue::Vector3(rest), POSITION_DURATION)
                    .with_easing(Easing::Power3Out),
            );
            tweener.add(
                group,
                Tween::to(TweenTarget::LabelOpacity(entity.id), TrackValue::Scalar(0.0), LABEL_FADE_DURATION),
            );
        }

        tweener.add(
            group,
            Tween::from_to(
                TweenTarget::CaptionOffsetY,
                TrackValue::Scalar(CAPTION_RISE),
                TrackValue::Scalar(0.0),
                CAPTION_DURATION,
            )
            .with_easing(Easing::Power3InOut),
        );
        tweener.add(
            group,
            Tween::from_to(
                TweenTarget::CaptionOpacity,
                TrackValue::Scalar(0.0),
                TrackValue::Scalar(1.0),
                CAPTION_DURATION,
            )
            .with_easing(Easing::Power3InOut),
        );

        self.transition_group = Some(group);
        self.settle_elapsed = 0.0;
        true
    }

    /// Advances the settle timer. Enters `Interactive` once the settle delay
    /// has passed and the closing tweens have all completed.
    ///
    /// Returns `true` on the tick that activates interaction.
    pub fn update(&mut self, dt: f32, tweener: &Tweener) -> bool {
        if self.state != InteractionState::Transitioning {
            return false;
        }
        self.settle_elapsed += dt;

        let tweens_done = self
            .transition_group
            .is_none_or(|group| tweener.is_group_complete(group));
        if self.settle_elapsed >= self.settings.settle_delay && tweens_done {
            self.state = InteractionState::Interactive;
            log::info!(
                "Interaction: Transitioning -> Interactive after {:.2}s",
                self.settle_elapsed
            );
            return true;
        }
        false
    }

    /// Picks the entity under the pointer. Only runs while interactive.
    ///
    /// The hovered entity is frozen while a drag is in progress, so the drag
    /// stays on the entity it started on.
    pub fn hit_test(&mut self, scene: &Scene, roster: &Roster, camera: &Camera) {
        if self.state != InteractionState::Interactive || self.pointer.dragging {
            return;
        }

        let roots: Vec<_> = roster.iter().map(|e| e.root).collect();
        let ray = camera.ray_from_ndc(self.pointer.ndc);
        let hit = scene
            .raycast(&ray, &roots)
            .and_then(|hit| hit.owner)
            .filter(|id| roster.get(*id).is_some());

        match hit {
            Some(id) => {
                if self.pointer.hovered != Some(id) {
                    log::debug!("Hovering entity {id}");
                }
                self.pointer.hovered = Some(id);
            }
            None => self.pointer.hovered = None,
        }
    }

    /// Records the pointer position for the next hit test.
    pub fn pointer_moved_to(&mut self, ndc: glam::Vec2) {
        self.pointer.ndc = ndc;
    }

    /// Starts a drag if an entity is hovered. Pauses, never rebuilds, the
    /// timeline if one is still around.
    pub fn pointer_pressed(&mut self, pointer_x: f32, timeline: Option<&mut MasterTimeline>) -> bool {
        if self.state != InteractionState::Interactive || self.pointer.hovered.is_none() {
            return false;
        }
        self.pointer.dragging = true;
        self.pointer.last_pointer_x = pointer_x;
        if let Some(timeline) = timeline {
            timeline.pause();
        }
        true
    }

    /// Rotates the entity hovered at press time by the horizontal delta.
    /// The angle is not clamped or wrapped.
    pub fn pointer_dragged(&mut self, pointer_x: f32, roster: &mut Roster) -> Option<EntityId> {
        if !self.pointer.dragging {
            return None;
        }
        let id = self.pointer.hovered?;
        let delta = pointer_x - self.pointer.last_pointer_x;
        self.pointer.last_pointer_x = pointer_x;

        let entity = roster.get_mut(id)?;
        entity.pose.rotation_y += delta * self.settings.drag_sensitivity;
        Some(id)
    }

    /// Ends any drag, whatever is under the pointer. Resumes nothing.
    pub fn pointer_released(&mut self) {
        self.pointer.dragging = false;
    }
}
