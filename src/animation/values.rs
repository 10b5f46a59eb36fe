use glam::Vec3;

use crate::animation::easing::Easing;

/// A value that can be tweened between two endpoints.
pub trait Interpolatable: Copy + Clone + Sized {
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self;

    /// Interpolates with eased progress. `t` is raw progress in `[0, 1]`.
    fn interpolate_eased(start: Self, end: Self, t: f32, easing: Easing) -> Self {
        Self::interpolate_linear(start, end, easing.apply(t))
    }
}

impl Interpolatable for f32 {
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self {
        start + (end - start) * t
    }
}

impl Interpolatable for Vec3 {
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self {
        // Unclamped: overshooting curves extrapolate past the endpoints.
        start + (end - start) * t
    }
}

/// Type-erased tween endpoint, used by free-running tweens that mix scalar
/// and vector targets in one group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrackValue {
    Scalar(f32),
    Vector3(Vec3),
}

impl TrackValue {
    /// Eased interpolation. Mismatched kinds snap to `end`.
    #[must_use]
    pub fn interpolate(start: Self, end: Self, t: f32, easing: Easing) -> Self {
        match (start, end) {
            (TrackValue::Scalar(a), TrackValue::Scalar(b)) => {
                TrackValue::Scalar(f32::interpolate_eased(a, b, t, easing))
            }
            (TrackValue::Vector3(a), TrackValue::Vector3(b)) => {
                TrackValue::Vector3(Vec3::interpolate_eased(a, b, t, easing))
            }
            _ => end,
        }
    }
}
