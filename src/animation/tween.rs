use crate::animation::easing::Easing;
use crate::animation::values::TrackValue;
use crate::stage::{Stage, TweenTarget};

/// Identifies a batch of tweens started together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TweenGroupId(u64);

/// A one-shot tween description.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    pub target: TweenTarget,
    /// Explicit start value. When `None` the start is read from the target
    /// at the moment the delay runs out.
    pub from: Option<TrackValue>,
    pub to: TrackValue,
    pub duration: f32,
    pub delay: f32,
    pub easing: Easing,
}

impl Tween {
    /// Tween from the target's current value.
    #[must_use]
    pub fn to(target: TweenTarget, to: TrackValue, duration: f32) -> Self {
        Self {
            target,
            from: None,
            to,
            duration,
            delay: 0.0,
            easing: Easing::Linear,
        }
    }

    /// Tween between explicit endpoints. `from` is applied immediately.
    #[must_use]
    pub fn from_to(target: TweenTarget, from: TrackValue, to: TrackValue, duration: f32) -> Self {
        Self {
            from: Some(from),
            ..Self::to(target, to, duration)
        }
    }

    #[must_use]
    pub fn with_delay(mut self, delay: f32) -> Self {
        self.delay = delay;
        self
    }

    #[must_use]
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Delay plus duration.
    #[inline]
    #[must_use]
    pub fn total_time(&self) -> f32 {
        self.delay + self.duration
    }
}

#[derive(Debug, Clone)]
struct ActiveTween {
    tween: Tween,
    group: TweenGroupId,
    elapsed: f32,
    start: Option<TrackValue>,
    primed: bool,
}

/// Runs free-standing tweens on the host tick.
///
/// Tweens cannot be cancelled once started. A group reports completion when
/// its last tween has written its final value.
#[derive(Debug, Default)]
pub struct Tweener {
    tweens: Vec<ActiveTween>,
    next_group: u64,
}

impl Tweener {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_group(&mut self) -> TweenGroupId {
        self.next_group += 1;
        TweenGroupId(self.next_group)
    }

    pub fn add(&mut self, group: TweenGroupId, tween: Tween) {
        self.tweens.push(ActiveTween {
            tween,
            group,
            elapsed: 0.0,
            start: tween.from,
            primed: false,
        });
    }

    #[must_use]
    pub fn active_count(&self) -> usize {
        self.tweens.len()
    }

    #[must_use]
    pub fn is_group_complete(&self, group: TweenGroupId) -> bool {
        !self.tweens.iter().any(|t| t.group == group)
    }

    /// Advances every tween by `dt` and drops the finished ones.
    pub fn update(&mut self, dt: f32, stage: &mut Stage<'_>) {
        for active in &mut self.tweens {
            let tween = active.tween;

            if !active.primed {
                active.primed = true;
                if let Some(from) = tween.from {
                    stage.write(tween.target, from);
                }
            }

            active.elapsed += dt;
            if active.elapsed < tween.delay {
                continue;
            }

            if active.start.is_none() {
                active.start = stage.read(tween.target);
            }
            let Some(start) = active.start else {
                // Target vanished; let the tween lapse.
                active.elapsed = tween.total_time();
                continue;
            };

            let progress = if tween.duration > 1e-6 {
                ((active.elapsed - tween.delay) / tween.duration).clamp(0.0, 1.0)
            } else {
                1.0
            };
            stage.write(tween.target, TrackValue::interpolate(start, tween.to, progress, tween.easing));
        }

        self.tweens.retain(|t| t.elapsed < t.tween.total_time());
    }
}
