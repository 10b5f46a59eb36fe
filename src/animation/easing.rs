use std::f32::consts::TAU;

/// The fixed set of timing curves the presentation uses.
///
/// Every curve maps progress `t ∈ [0, 1]` to eased progress with
/// `ease(0) == 0` and `ease(1) == 1` exactly. Back and elastic curves
/// overshoot in between.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Easing {
    #[default]
    Linear,
    /// Quadratic ease-out.
    Power2Out,
    /// Quadratic ease-in-out.
    Power2InOut,
    /// Cubic ease-out.
    Power3Out,
    /// Cubic ease-in-out.
    Power3InOut,
    /// Overshoots the target then settles. The payload is the overshoot amount.
    BackOut(f32),
    /// Pulls back before leaving. The payload is the overshoot amount.
    BackIn(f32),
    /// Damped oscillation around the target.
    ElasticOut { amplitude: f32, period: f32 },
}

impl Easing {
    /// Standard back overshoot.
    pub const BACK_OVERSHOOT: f32 = 1.7;

    #[must_use]
    pub fn apply(self, t: f32) -> f32 {
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }

        match self {
            Easing::Linear => t,
            Easing::Power2Out => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::Power2InOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Easing::Power3Out => 1.0 - (1.0 - t).powi(3),
            Easing::Power3InOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Easing::BackOut(s) => {
                let u = t - 1.0;
                1.0 + (s + 1.0) * u * u * u + s * u * u
            }
            Easing::BackIn(s) => (s + 1.0) * t * t * t - s * t * t,
            Easing::ElasticOut { amplitude, period } => {
                // Amplitudes below 1 cannot reach the target; clamp like the usual formulation.
                let a = amplitude.max(1.0);
                let p = period.max(f32::EPSILON);
                let shift = p / TAU * (1.0 / a).asin();
                a * 2.0_f32.powf(-10.0 * t) * ((t - shift) * TAU / p).sin() + 1.0
            }
        }
    }
}
