use crate::animation::easing::Easing;
use crate::animation::timeline::MasterTimeline;
use crate::animation::tracks::{Keyframe, TargetProperty, TimelineTrack, TrackChannel};
use crate::roster::{Entity, Roster};

const APPEAR_SCALE_DURATION: f32 = 0.6;
const APPEAR_LABEL_DURATION: f32 = 0.8;
const DISAPPEAR_DURATION: f32 = 0.5;

/// Label slide distance in overlay pixels: enters from the left, exits to the right.
const LABEL_SLIDE: f32 = 50.0;

/// Owns the one live [`MasterTimeline`] and replaces it on demand.
///
/// Rebuilding is only valid while the presentation is guided. The scheduler
/// does not check this; its owner does.
#[derive(Debug, Default)]
pub struct TimelineScheduler {
    active: Option<MasterTimeline>,
    generation: u64,
}

impl TimelineScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Kills the current timeline, then builds and installs a fresh one
    /// from `roster`.
    ///
    /// The new timeline is paused with its cursor at zero; the caller seeks
    /// and plays it according to the media state.
    pub fn rebuild(&mut self, roster: &Roster) -> &mut MasterTimeline {
        if let Some(mut previous) = self.active.take() {
            previous.kill();
            log::debug!("Killed timeline generation {}", previous.generation());
        }

        self.generation += 1;
        let timeline = Self::build(self.generation, roster);
        log::info!(
            "Built timeline generation {} ({} tracks, {:.2}s)",
            timeline.generation(),
            timeline.tracks().len(),
            timeline.duration()
        );
        self.active.insert(timeline)
    }

    /// Builds a timeline without installing it.
    #[must_use]
    pub fn build(generation: u64, roster: &Roster) -> MasterTimeline {
        let mut ordered: Vec<&Entity> = roster.iter().collect();
        ordered.sort_by_key(|e| e.order_index);

        let mut timeline = MasterTimeline::new(generation);
        for entity in ordered {
            timeline.add_track(Self::model_track(entity));
            timeline.add_track(Self::label_track(entity));
        }
        timeline
    }

    fn model_track(entity: &Entity) -> TimelineTrack {
        let mut track = TimelineTrack::new(entity.id, TrackChannel::Model);
        track.push(Keyframe {
            time: entity.time_start,
            property: TargetProperty::Scale,
            from: 0.0,
            to: entity.scale,
            duration: APPEAR_SCALE_DURATION,
            easing: Easing::BackOut(Easing::BACK_OVERSHOOT),
        });
        track.push(Keyframe {
            time: entity.time_end(),
            property: TargetProperty::Scale,
            from: entity.scale,
            to: 0.0,
            duration: DISAPPEAR_DURATION,
            easing: Easing::BackIn(Easing::BACK_OVERSHOOT),
        });
        track
    }

    fn label_track(entity: &Entity) -> TimelineTrack {
        let mut track = TimelineTrack::new(entity.id, TrackChannel::Label);
        let appear = entity.time_start;
        let disappear = entity.time_end();

        track.push(Keyframe {
            time: appear,
            property: TargetProperty::LabelOpacity,
            from: 0.0,
            to: 1.0,
            duration: APPEAR_LABEL_DURATION,
            easing: Easing::Power2Out,
        });
        track.push(Keyframe {
            time: appear,
            property: TargetProperty::LabelOffsetX,
            from: -LABEL_SLIDE,
            to: 0.0,
            duration: APPEAR_LABEL_DURATION,
            easing: Easing::Power2Out,
        });
        track.push(Keyframe {
            time: disappear,
            property: TargetProperty::LabelOpacity,
            from: 1.0,
            to: 0.0,
            duration: DISAPPEAR_DURATION,
            easing: Easing::Linear,
        });
        track.push(Keyframe {
            time: disappear,
            property: TargetProperty::LabelOffsetX,
            from: 0.0,
            to: LABEL_SLIDE,
            duration: DISAPPEAR_DURATION,
            easing: Easing::Linear,
        });
        track
    }

    #[must_use]
    pub fn active(&self) -> Option<&MasterTimeline> {
        self.active.as_ref()
    }

    pub fn active_mut(&mut self) -> Option<&mut MasterTimeline> {
        self.active.as_mut()
    }

    /// Generation of the most recent rebuild; zero before the first.
    #[inline]
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Freezes the live timeline at the end of narration.
    pub fn freeze(&mut self) {
        if let Some(timeline) = self.active.as_mut() {
            timeline.freeze();
        }
    }
}
