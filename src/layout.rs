//! Final resting arrangement.

use glam::Vec3;

use crate::config::LayoutSettings;

/// Lays entities out on a single row centered on the origin.
///
/// Pure: the same count always yields the same positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutEngine {
    pub spacing: f32,
    pub rest_y: f32,
    pub rest_z: f32,
}

impl LayoutEngine {
    #[must_use]
    pub fn new(settings: LayoutSettings) -> Self {
        Self {
            spacing: settings.spacing,
            rest_y: settings.rest_y,
            rest_z: settings.rest_z,
        }
    }

    /// Resting position of slot `index` out of `count`.
    #[must_use]
    pub fn position_of(&self, index: usize, count: usize) -> Vec3 {
        let total_width = count.saturating_sub(1) as f32 * self.spacing;
        Vec3::new(
            index as f32 * self.spacing - total_width / 2.0,
            self.rest_y,
            self.rest_z,
        )
    }

    /// Resting positions for `count` entities ordered by `order_index`.
    #[must_use]
    pub fn arrange(&self, count: usize) -> Vec<Vec3> {
        (0..count).map(|i| self.position_of(i, count)).collect()
    }
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self::new(LayoutSettings::default())
    }
}
