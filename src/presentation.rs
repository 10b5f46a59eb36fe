//! Presentation context.
//!
//! [`Presentation`] is the single object that owns every piece of mutable
//! state: scene, roster, the live timeline, media sync, the interaction
//! state machine and the closing tweens. The host constructs it once and
//! drives it with [`Presentation::tick`] once per display refresh, plus
//! pointer events and panel edits as they happen. Everything runs on that
//! one logical thread.

use glam::Vec3;

use crate::animation::{MasterTimeline, TimelineScheduler, Tweener};
use crate::config::{self, PresentationConfig};
use crate::errors::{Result, ShowreelError};
use crate::focus::Spotlight;
use crate::interaction::{
    CursorIcon, InteractionController, InteractionState, PointerEvent, PointerState, Viewport,
};
use crate::layout::LayoutEngine;
use crate::media::{MediaClock, MediaClockSync, SyncOutcome};
use crate::roster::{Entity, EntityId, LoadProgress, LoadQueue, Roster};
use crate::scene::{Camera, CameraRig, Scene};
use crate::stage::{Caption, Stage};

/// A change coming from the tuning panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EntityEdit {
    TimeStart(f32),
    Duration(f32),
    Position(Vec3),
    Scale(f32),
    RotationY(f32),
}

impl EntityEdit {
    /// Whether the edit changes scheduling and so needs a rebuild.
    #[must_use]
    pub fn is_timing(&self) -> bool {
        matches!(self, EntityEdit::TimeStart(_) | EntityEdit::Duration(_))
    }
}

pub struct Presentation<M: MediaClock, R: CameraRig> {
    config: PresentationConfig,
    scene: Scene,
    roster: Roster,
    loads: LoadQueue,
    scheduler: TimelineScheduler,
    sync: MediaClockSync,
    controller: InteractionController,
    tweener: Tweener,
    spotlight: Spotlight,
    caption: Caption,
    viewport: Viewport,
    media: M,
    rig: R,
    started: bool,
}

impl<M: MediaClock, R: CameraRig> Presentation<M, R> {
    pub fn new(config: PresentationConfig, media: M, mut rig: R) -> Result<Self> {
        config.validate()?;
        rig.set_orbit_enabled(true);

        let layout = LayoutEngine::new(config.layout);
        Ok(Self {
            scene: Scene::new(),
            roster: Roster::new(),
            loads: LoadQueue::new(config.entities.len()),
            scheduler: TimelineScheduler::new(),
            sync: MediaClockSync::new(config.sync),
            controller: InteractionController::new(config.interaction, layout, config.camera),
            tweener: Tweener::new(),
            spotlight: Spotlight::new(),
            caption: Caption::default(),
            viewport: Viewport::default(),
            media,
            rig,
            started: false,
            config,
        })
    }

    // ========================================================================
    // Loading
    // ========================================================================

    /// Where the host's loader delivers completed assets.
    #[must_use]
    pub fn load_queue(&self) -> &LoadQueue {
        &self.loads
    }

    #[must_use]
    pub fn load_progress(&self) -> LoadProgress {
        self.loads.progress()
    }

    /// Turns every completed load into an entity. Failed loads are logged
    /// and skipped. Returns how many entities joined.
    pub fn drain_loads(&mut self) -> usize {
        let mut joined = 0;
        for completion in self.loads.drain() {
            let Some(entity_config) = self.config.entities.get(completion.order_index) else {
                log::warn!("Load completed for unknown slot {}", completion.order_index);
                continue;
            };
            match completion.result {
                Ok(asset) => {
                    let root = self.scene.instantiate(&asset, entity_config.id);
                    let entity = Entity::from_config(entity_config, completion.order_index, root);
                    self.scene.apply_pose(root, &entity.pose);
                    log::debug!(
                        "Loaded '{}' ({} nodes) into slot {}",
                        entity.display_name,
                        asset.node_count(),
                        entity.order_index
                    );
                    self.roster.insert(entity);
                    joined += 1;
                }
                Err(err) => {
                    log::warn!("Skipping '{}': {err}", entity_config.name);
                }
            }
        }

        let progress = self.loads.progress();
        if joined > 0 || progress.failed > 0 {
            log::debug!("Loading {}%", progress.percent());
        }
        if joined > 0 && progress.is_complete() {
            log::info!(
                "Loading complete: {} loaded, {} failed",
                progress.loaded,
                progress.failed
            );
        }

        // Late arrivals join a running show.
        if joined > 0 && self.started && self.controller.state() == InteractionState::Guided {
            self.rebuild_timeline();
        }
        joined
    }

    // ========================================================================
    // Playback
    // ========================================================================

    /// Builds the timeline and starts narration.
    pub fn start(&mut self) -> Result<()> {
        if self.controller.state() != InteractionState::Guided {
            return Err(ShowreelError::TimelineFrozen);
        }
        self.started = true;
        self.media.play();
        self.rebuild_timeline();
        log::info!("Presentation started with {} entities", self.roster.len());
        Ok(())
    }

    /// Play/pause on the media, mirrored on the timeline. Returns whether
    /// playback is running afterwards.
    pub fn toggle_playback(&mut self) -> bool {
        self.sync
            .toggle_playback(&mut self.media, self.scheduler.active_mut())
    }

    /// Replaces the timeline and aligns it with the media: cursor at media
    /// time, playing only if the media plays.
    fn rebuild_timeline(&mut self) {
        let media_time = self.media.current_time();
        let media_playing = !self.media.is_paused();

        let timeline = self.scheduler.rebuild(&self.roster);
        if media_time.is_finite() && media_time >= 0.0 {
            timeline.seek(media_time);
        }
        if media_playing {
            timeline.play();
        }
        timeline.render(&mut self.roster);
    }

    // ========================================================================
    // Panel edits
    // ========================================================================

    /// Applies a tuning panel edit.
    ///
    /// Timing edits rebuild the timeline and are refused once narration has
    /// ended. Spatial edits mutate the entity directly.
    pub fn edit_entity(&mut self, id: EntityId, edit: EntityEdit) -> Result<()> {
        let slot = self
            .config
            .entities
            .iter()
            .position(|e| e.id == id)
            .ok_or(ShowreelError::UnknownEntity(id))?;

        if edit.is_timing() && self.controller.state() != InteractionState::Guided {
            log::warn!("Timing edit for {id} refused: timeline is frozen");
            return Err(ShowreelError::TimelineFrozen);
        }

        let entry = &mut self.config.entities[slot];
        match edit {
            EntityEdit::TimeStart(time_start) => {
                config::validate_timing(id, time_start, entry.duration)?;
                entry.time_start = time_start;
            }
            EntityEdit::Duration(duration) => {
                config::validate_timing(id, entry.time_start, duration)?;
                entry.duration = duration;
            }
            EntityEdit::Position(position) => entry.position = position,
            EntityEdit::Scale(scale) => {
                config::validate_scale(id, scale)?;
                entry.scale = scale;
            }
            EntityEdit::RotationY(rotation_y) => entry.rotation_y = rotation_y,
        }

        // Not loaded yet: the edit lives in the config until it is.
        let Some(entity) = self.roster.get_mut(id) else {
            return Ok(());
        };
        match edit {
            EntityEdit::TimeStart(time_start) => entity.time_start = time_start,
            EntityEdit::Duration(duration) => entity.duration = duration,
            EntityEdit::Position(position) => {
                entity.position = position;
                entity.pose.position = position;
            }
            EntityEdit::Scale(scale) => entity.scale = scale,
            EntityEdit::RotationY(rotation_y) => {
                entity.rotation_y = rotation_y;
                entity.pose.rotation_y = rotation_y;
            }
        }

        if edit.is_timing() && self.scheduler.active().is_some() {
            self.rebuild_timeline();
        }
        Ok(())
    }

    // ========================================================================
    // Input
    // ========================================================================

    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport = Viewport::new(width, height);
    }

    pub fn pointer_event(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Moved { x, y } => {
                self.controller.pointer_moved_to(self.viewport.normalize(x, y));
                self.controller.pointer_dragged(x, &mut self.roster);
            }
            PointerEvent::Pressed { x, y } => {
                self.controller.pointer_moved_to(self.viewport.normalize(x, y));
                self.controller
                    .pointer_pressed(x, self.scheduler.active_mut());
            }
            PointerEvent::Released => self.controller.pointer_released(),
        }
    }

    // ========================================================================
    // Frame
    // ========================================================================

    /// Handles an explicit end-of-media signal. Also reached from
    /// [`tick`](Self::tick) when the media reports it has ended.
    pub fn media_ended(&mut self) -> bool {
        self.sync.finish();
        self.scheduler.freeze();
        self.controller
            .begin_transition(&self.roster, &mut self.tweener, &mut self.rig)
    }

    /// One display refresh.
    pub fn tick(&mut self, dt: f32) -> SyncOutcome {
        self.drain_loads();

        let outcome = self
            .sync
            .tick(self.scheduler.active_mut(), &self.media, dt);
        if outcome == SyncOutcome::Ended {
            self.media_ended();
        }

        if self.controller.state() == InteractionState::Guided
            && let Some(timeline) = self.scheduler.active()
        {
            timeline.render(&mut self.roster);
        }

        let mut stage = Stage {
            roster: &mut self.roster,
            caption: &mut self.caption,
        };
        self.tweener.update(dt, &mut stage);
        self.controller.update(dt, &self.tweener);

        for entity in self.roster.iter() {
            self.scene.apply_pose(entity.root, &entity.pose);
        }
        self.scene.update_world_matrices();

        if self.controller.state() == InteractionState::Interactive {
            let camera = Camera::from_pose(&self.rig.pose(), self.viewport.aspect());
            self.controller.hit_test(&self.scene, &self.roster, &camera);
        }

        self.spotlight
            .update(self.controller.state(), self.media.current_time(), &self.roster);
        outcome
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[must_use]
    pub fn config(&self) -> &PresentationConfig {
        &self.config
    }

    #[must_use]
    pub fn state(&self) -> InteractionState {
        self.controller.state()
    }

    #[must_use]
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    #[must_use]
    pub fn timeline(&self) -> Option<&MasterTimeline> {
        self.scheduler.active()
    }

    #[must_use]
    pub fn timeline_generation(&self) -> u64 {
        self.scheduler.generation()
    }

    #[must_use]
    pub fn pointer(&self) -> &PointerState {
        self.controller.pointer()
    }

    #[must_use]
    pub fn cursor_icon(&self) -> CursorIcon {
        self.controller.cursor_icon()
    }

    #[must_use]
    pub fn caption(&self) -> &Caption {
        &self.caption
    }

    #[must_use]
    pub fn spotlight(&self) -> &Spotlight {
        &self.spotlight
    }

    #[must_use]
    pub fn pending_tweens(&self) -> usize {
        self.tweener.active_count()
    }

    #[must_use]
    pub fn media(&self) -> &M {
        &self.media
    }

    pub fn media_mut(&mut self) -> &mut M {
        &mut self.media
    }

    #[must_use]
    pub fn rig(&self) -> &R {
        &self.rig
    }
}
