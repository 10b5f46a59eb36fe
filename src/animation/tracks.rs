use smallvec::SmallVec;

use crate::animation::easing::Easing;
use crate::animation::values::Interpolatable;
use crate::roster::{Entity, EntityId};

/// The entity property a timeline keyframe drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetProperty {
    /// Uniform scale of the visual root.
    Scale,
    /// Label opacity (hides the label at 0).
    LabelOpacity,
    /// Label horizontal slide offset.
    LabelOffsetX,
}

impl TargetProperty {
    pub(crate) fn write(self, entity: &mut Entity, value: f32) {
        match self {
            TargetProperty::Scale => entity.pose.scale = value,
            TargetProperty::LabelOpacity => entity.label.set_opacity(value),
            TargetProperty::LabelOffsetX => entity.label.offset_x = value,
        }
    }
}

/// Which owned node of the entity a track animates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackChannel {
    Model,
    Label,
}

/// A single tween segment placed on the timeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Keyframe {
    /// Start time on the timeline, seconds.
    pub time: f32,
    pub property: TargetProperty,
    pub from: f32,
    pub to: f32,
    pub duration: f32,
    pub easing: Easing,
}

impl Keyframe {
    #[inline]
    #[must_use]
    pub fn end(&self) -> f32 {
        self.time + self.duration
    }

    /// Value at `time`, assuming `time >= self.time`.
    #[must_use]
    pub fn sample(&self, time: f32) -> f32 {
        let progress = if self.duration > 1e-6 {
            ((time - self.time) / self.duration).clamp(0.0, 1.0)
        } else {
            1.0
        };
        f32::interpolate_eased(self.from, self.to, progress, self.easing)
    }
}

/// Keyframes of one entity on one channel, kept sorted by start time.
#[derive(Debug, Clone)]
pub struct TimelineTrack {
    pub entity: EntityId,
    pub channel: TrackChannel,
    keyframes: SmallVec<[Keyframe; 4]>,
}

impl TimelineTrack {
    #[must_use]
    pub fn new(entity: EntityId, channel: TrackChannel) -> Self {
        Self {
            entity,
            channel,
            keyframes: SmallVec::new(),
        }
    }

    /// Inserts a keyframe after any keyframe with an equal or earlier start.
    pub fn push(&mut self, keyframe: Keyframe) {
        let at = self.keyframes.partition_point(|k| k.time <= keyframe.time);
        self.keyframes.insert(at, keyframe);
    }

    #[must_use]
    pub fn keyframes(&self) -> &[Keyframe] {
        &self.keyframes
    }

    /// Properties this track drives, in first-appearance order.
    pub fn properties(&self) -> impl Iterator<Item = TargetProperty> + '_ {
        let mut seen: SmallVec<[TargetProperty; 3]> = SmallVec::new();
        self.keyframes.iter().filter_map(move |k| {
            if seen.contains(&k.property) {
                None
            } else {
                seen.push(k.property);
                Some(k.property)
            }
        })
    }

    /// Value of `property` at `time`.
    ///
    /// The most recently started keyframe wins. Before the first keyframe,
    /// that keyframe's start value holds.
    #[must_use]
    pub fn sample(&self, property: TargetProperty, time: f32) -> Option<f32> {
        let mut first = None;
        let mut current = None;
        for keyframe in self.keyframes.iter().filter(|k| k.property == property) {
            if first.is_none() {
                first = Some(keyframe);
            }
            if keyframe.time <= time {
                current = Some(keyframe);
            } else {
                break;
            }
        }

        match current {
            Some(keyframe) => Some(keyframe.sample(time)),
            None => first.map(|k| k.from),
        }
    }

    #[must_use]
    pub fn end_time(&self) -> f32 {
        self.keyframes.iter().map(Keyframe::end).fold(0.0_f32, f32::max)
    }
}
