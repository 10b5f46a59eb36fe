//! Tween target binding.
//!
//! Free-running tweens name their targets symbolically ([`TweenTarget`]);
//! a [`Stage`] resolves those names against the roster and the closing
//! caption for one update.

use crate::animation::TrackValue;
use crate::roster::{EntityId, Roster};

/// The closing caption shown once narration ends.
#[derive(Debug, Clone, PartialEq)]
pub struct Caption {
    pub opacity: f32,
    /// Vertical slide offset in overlay pixels.
    pub offset_y: f32,
    pub visible: bool,
}

impl Default for Caption {
    fn default() -> Self {
        Self {
            opacity: 0.0,
            offset_y: 0.0,
            visible: false,
        }
    }
}

impl Caption {
    pub fn set_opacity(&mut self, opacity: f32) {
        self.opacity = opacity;
        self.visible = opacity > 0.0;
    }
}

/// A property a free-running tween can drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TweenTarget {
    Position(EntityId),
    Scale(EntityId),
    RotationY(EntityId),
    LabelOpacity(EntityId),
    CaptionOpacity,
    CaptionOffsetY,
}

/// Mutable view of everything tweens may touch during one update.
pub struct Stage<'a> {
    pub roster: &'a mut Roster,
    pub caption: &'a mut Caption,
}

impl Stage<'_> {
    /// Current value of a target, or `None` if it no longer resolves.
    #[must_use]
    pub fn read(&self, target: TweenTarget) -> Option<TrackValue> {
        let value = match target {
            TweenTarget::Position(id) => TrackValue::Vector3(self.roster.get(id)?.pose.position),
            TweenTarget::Scale(id) => TrackValue::Scalar(self.roster.get(id)?.pose.scale),
            TweenTarget::RotationY(id) => TrackValue::Scalar(self.roster.get(id)?.pose.rotation_y),
            TweenTarget::LabelOpacity(id) => TrackValue::Scalar(self.roster.get(id)?.label.opacity),
            TweenTarget::CaptionOpacity => TrackValue::Scalar(self.caption.opacity),
            TweenTarget::CaptionOffsetY => TrackValue::Scalar(self.caption.offset_y),
        };
        Some(value)
    }

    /// Writes a value. Kind mismatches and stale entity ids are ignored.
    pub fn write(&mut self, target: TweenTarget, value: TrackValue) {
        match (target, value) {
            (TweenTarget::Position(id), TrackValue::Vector3(v)) => {
                if let Some(entity) = self.roster.get_mut(id) {
                    entity.pose.position = v;
                }
            }
            (TweenTarget::Scale(id), TrackValue::Scalar(v)) => {
                if let Some(entity) = self.roster.get_mut(id) {
                    entity.pose.scale = v;
                }
            }
            (TweenTarget::RotationY(id), TrackValue::Scalar(v)) => {
                if let Some(entity) = self.roster.get_mut(id) {
                    entity.pose.rotation_y = v;
                }
            }
            (TweenTarget::LabelOpacity(id), TrackValue::Scalar(v)) => {
                if let Some(entity) = self.roster.get_mut(id) {
                    entity.label.set_opacity(v);
                }
            }
            (TweenTarget::CaptionOpacity, TrackValue::Scalar(v)) => self.caption.set_opacity(v),
            (TweenTarget::CaptionOffsetY, TrackValue::Scalar(v)) => self.caption.offset_y = v,
            _ => log::warn!("Tween value kind does not match target {target:?}"),
        }
    }
}
