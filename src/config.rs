//! Presentation configuration.
//!
//! Everything tunable lives in [`PresentationConfig`]: the entity roster and
//! the fixed constants of sync, layout, interaction and camera. Every section
//! is `#[serde(default)]`, so a JSON file only needs to name what it changes.

use std::path::Path;

use glam::Vec3;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, ShowreelError};
use crate::roster::EntityId;

/// One configured roster member, in the shape the tuning panel edits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityConfig {
    pub id: EntityId,
    pub path: String,
    pub name: String,
    pub role: String,
    /// Appearance time on the media clock, seconds.
    pub time_start: f32,
    /// On-screen duration, seconds.
    pub duration: f32,
    pub position: Vec3,
    pub scale: f32,
    pub rotation_y: f32,
}

/// Media clock lock tolerance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncSettings {
    /// Drift below or equal to this is treated as frame jitter, seconds.
    pub epsilon: f32,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self { epsilon: 0.1 }
    }
}

/// Final resting row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    pub spacing: f32,
    pub rest_y: f32,
    pub rest_z: f32,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            spacing: 1.5,
            rest_y: -1.0,
            rest_z: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionSettings {
    /// Radians of yaw per device pixel of horizontal drag.
    pub drag_sensitivity: f32,
    /// Minimum time between the end of narration and pointer activation, seconds.
    pub settle_delay: f32,
}

impl Default for InteractionSettings {
    fn default() -> Self {
        Self {
            drag_sensitivity: 0.005,
            settle_delay: 2.0,
        }
    }
}

/// Fixed camera pose taken at the end of narration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraPose {
    pub position: Vec3,
    pub target: Vec3,
    pub fov_degrees: f32,
}

impl Default for CameraPose {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 1.0, 4.0),
            target: Vec3::ZERO,
            fov_degrees: 75.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PresentationConfig {
    pub entities: Vec<EntityConfig>,
    pub sync: SyncSettings,
    pub layout: LayoutSettings,
    pub interaction: InteractionSettings,
    pub camera: CameraPose,
}

impl Default for PresentationConfig {
    fn default() -> Self {
        Self {
            entities: default_roster(),
            sync: SyncSettings::default(),
            layout: LayoutSettings::default(),
            interaction: InteractionSettings::default(),
            camera: CameraPose::default(),
        }
    }
}

impl PresentationConfig {
    /// Parses and validates a JSON configuration.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Checks every invariant the scheduler relies on.
    pub fn validate(&self) -> Result<()> {
        let mut seen = FxHashSet::default();
        for entity in &self.entities {
            if !seen.insert(entity.id) {
                return Err(ShowreelError::InvalidConfig(format!(
                    "duplicate entity id {}",
                    entity.id
                )));
            }
            validate_timing(entity.id, entity.time_start, entity.duration)?;
            validate_scale(entity.id, entity.scale)?;
        }

        if !(self.sync.epsilon.is_finite() && self.sync.epsilon >= 0.0) {
            return Err(ShowreelError::InvalidConfig(format!(
                "sync epsilon must be a non-negative number, got {}",
                self.sync.epsilon
            )));
        }
        if !(self.interaction.settle_delay.is_finite() && self.interaction.settle_delay >= 0.0) {
            return Err(ShowreelError::InvalidConfig(format!(
                "settle delay must be a non-negative number, got {}",
                self.interaction.settle_delay
            )));
        }
        Ok(())
    }
}

pub(crate) fn validate_timing(id: EntityId, time_start: f32, duration: f32) -> Result<()> {
    if !(time_start.is_finite() && time_start >= 0.0) {
        return Err(ShowreelError::InvalidConfig(format!(
            "entity {id}: time_start must be >= 0, got {time_start}"
        )));
    }
    if !(duration.is_finite() && duration > 0.0) {
        return Err(ShowreelError::InvalidConfig(format!(
            "entity {id}: duration must be > 0, got {duration}"
        )));
    }
    Ok(())
}

pub(crate) fn validate_scale(id: EntityId, scale: f32) -> Result<()> {
    if !(scale.is_finite() && scale > 0.0) {
        return Err(ShowreelError::InvalidConfig(format!(
            "entity {id}: scale must be > 0, got {scale}"
        )));
    }
    Ok(())
}

fn member(
    id: u32,
    slug: &str,
    name: &str,
    role: &str,
    time_start: f32,
    position: Vec3,
    scale: f32,
    rotation_y: f32,
) -> EntityConfig {
    EntityConfig {
        id: EntityId(id),
        path: format!("/models/{slug}-3d.glb"),
        name: name.to_string(),
        role: role.to_string(),
        time_start,
        duration: 2.0,
        position,
        scale,
        rotation_y,
    }
}

/// The stock six-member team roster, two seconds each from t = 4 s.
#[must_use]
pub fn default_roster() -> Vec<EntityConfig> {
    vec![
        member(1, "matheo", "Mathéo Pons", "Rageux tout pipou", 4.0, Vec3::new(1.1, 1.6, 0.0), 2.5, 5.6),
        member(2, "benjamin", "Benjamin Planson", "Comique sans pitié", 6.0, Vec3::ZERO, 6.5, 0.0),
        member(3, "lyman", "Lyman Abid", "Développeur de mêmes", 8.0, Vec3::new(1.6, 0.0, 0.0), 4.0, 5.4),
        member(4, "oriane", "Oriane Barreau", "Alternante Vegan", 10.0, Vec3::new(2.2, 0.0, 0.0), 5.5, 5.2),
        member(5, "shupu", "Shupu Liu", "Calculateur CSS", 12.0, Vec3::new(-3.5, 0.0, 0.0), 5.0, 1.1),
        member(6, "jihad", "Jihad Oujadi", "Dev front qui prefere les backs", 14.0, Vec3::new(1.6, 0.0, 0.0), 3.5, 5.4),
    ]
}
