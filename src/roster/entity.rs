use std::fmt;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::config::EntityConfig;
use crate::scene::NodeHandle;

/// Configured identity of a roster member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub u32);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Overlay caption attached to an entity (name and role).
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub title: String,
    pub subtitle: String,
    pub opacity: f32,
    /// Horizontal slide offset in overlay pixels.
    pub offset_x: f32,
    /// Hidden exactly when fully transparent.
    pub visible: bool,
}

impl Label {
    #[must_use]
    pub fn new(title: impl Into<String>, subtitle: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            subtitle: subtitle.into(),
            opacity: 0.0,
            offset_x: 0.0,
            visible: false,
        }
    }

    pub fn set_opacity(&mut self, opacity: f32) {
        self.opacity = opacity;
        self.visible = opacity > 0.0;
    }
}

/// The live, animated transform of an entity's visual root.
///
/// Kept apart from the configured values so that timeline output, transition
/// tweens and drag rotation never overwrite configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    pub scale: f32,
    pub rotation_y: f32,
}

/// A loaded presentation item.
#[derive(Debug, Clone)]
pub struct Entity {
    pub id: EntityId,
    /// Position in the configured roster. Decides timeline and layout order.
    pub order_index: usize,
    pub display_name: String,
    pub role: String,
    pub asset_path: String,
    /// Root of the owned visual subtree.
    pub root: NodeHandle,

    // === Configured values ===
    pub time_start: f32,
    pub duration: f32,
    pub position: Vec3,
    pub scale: f32,
    pub rotation_y: f32,

    // === Live values ===
    pub pose: Pose,
    pub label: Label,
}

impl Entity {
    /// Builds the record for a freshly loaded asset. The entity starts
    /// invisible (zero scale) at its configured placement.
    #[must_use]
    pub fn from_config(config: &EntityConfig, order_index: usize, root: NodeHandle) -> Self {
        Self {
            id: config.id,
            order_index,
            display_name: config.name.clone(),
            role: config.role.clone(),
            asset_path: config.path.clone(),
            root,
            time_start: config.time_start,
            duration: config.duration,
            position: config.position,
            scale: config.scale,
            rotation_y: config.rotation_y,
            pose: Pose {
                position: config.position,
                scale: 0.0,
                rotation_y: config.rotation_y,
            },
            label: Label::new(config.name.clone(), config.role.clone()),
        }
    }

    /// Time at which the entity leaves the stage.
    #[inline]
    #[must_use]
    pub fn time_end(&self) -> f32 {
        self.time_start + self.duration
    }

    /// Whether `time` falls inside the on-stage window, both ends inclusive.
    #[inline]
    #[must_use]
    pub fn is_on_stage_at(&self, time: f32) -> bool {
        time >= self.time_start && time <= self.time_end()
    }
}
