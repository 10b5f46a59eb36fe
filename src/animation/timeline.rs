use crate::animation::tracks::{Keyframe, TimelineTrack};
use crate::roster::{EntityId, Roster};

/// Lifecycle of a timeline instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimelineState {
    /// Authoritative: renders into entities.
    Live,
    /// Narration ended. Kept for pausing, never renders or moves again.
    Frozen,
    /// Replaced by a rebuild. Its keyframes are gone.
    Killed,
}

/// The single composite of every entity's tracks.
///
/// The cursor has no clock of its own: it only moves through [`seek`]
/// and through [`advance`] calls made by the host tick while playing.
///
/// [`seek`]: MasterTimeline::seek
/// [`advance`]: MasterTimeline::advance
#[derive(Debug, Clone)]
pub struct MasterTimeline {
    generation: u64,
    tracks: Vec<TimelineTrack>,
    cursor: f32,
    paused: bool,
    state: TimelineState,
}

impl MasterTimeline {
    /// An empty, paused timeline with its cursor at zero.
    #[must_use]
    pub fn new(generation: u64) -> Self {
        Self {
            generation,
            tracks: Vec::new(),
            cursor: 0.0,
            paused: true,
            state: TimelineState::Live,
        }
    }

    pub fn add_track(&mut self, track: TimelineTrack) {
        self.tracks.push(track);
    }

    /// Which rebuild produced this instance.
    #[inline]
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn tracks(&self) -> &[TimelineTrack] {
        &self.tracks
    }

    /// Every keyframe with its owning entity, in track order.
    pub fn keyframes(&self) -> impl Iterator<Item = (EntityId, &Keyframe)> {
        self.tracks
            .iter()
            .flat_map(|t| t.keyframes().iter().map(move |k| (t.entity, k)))
    }

    /// Sorted keyframe start times, for comparing builds.
    #[must_use]
    pub fn keyframe_times(&self) -> Vec<(EntityId, f32)> {
        let mut times: Vec<(EntityId, f32)> = self.keyframes().map(|(id, k)| (id, k.time)).collect();
        times.sort_by(|a, b| a.0.cmp(&b.0).then(a.1.total_cmp(&b.1)));
        times
    }

    /// Time at which the last keyframe settles.
    #[must_use]
    pub fn duration(&self) -> f32 {
        self.tracks.iter().map(TimelineTrack::end_time).fold(0.0_f32, f32::max)
    }

    #[inline]
    #[must_use]
    pub fn cursor(&self) -> f32 {
        self.cursor
    }

    #[inline]
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    #[inline]
    #[must_use]
    pub fn state(&self) -> TimelineState {
        self.state
    }

    #[inline]
    #[must_use]
    pub fn is_live(&self) -> bool {
        self.state == TimelineState::Live
    }

    /// Hard-sets the cursor. Ignored unless live.
    pub fn seek(&mut self, time: f32) {
        if self.is_live() {
            self.cursor = time;
        }
    }

    /// Moves the cursor by `dt` while playing.
    pub fn advance(&mut self, dt: f32) {
        if self.is_live() && !self.paused {
            self.cursor += dt;
        }
    }

    pub fn play(&mut self) {
        if self.is_live() {
            self.paused = false;
        }
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Stops the timeline for good and keeps it as a paused husk.
    pub fn freeze(&mut self) {
        self.paused = true;
        if self.is_live() {
            self.state = TimelineState::Frozen;
        }
    }

    /// Invalidates every pending keyframe. A killed timeline can never write
    /// to an entity again.
    pub fn kill(&mut self) {
        self.paused = true;
        self.state = TimelineState::Killed;
        self.tracks.clear();
    }

    /// Writes every track's value at the cursor into the roster.
    ///
    /// Returns the number of property writes. Non-live timelines write nothing.
    pub fn render(&self, roster: &mut Roster) -> usize {
        if !self.is_live() {
            return 0;
        }

        let mut writes = 0;
        for track in &self.tracks {
            let Some(entity) = roster.get_mut(track.entity) else {
                continue;
            };
            for property in track.properties() {
                if let Some(value) = track.sample(property, self.cursor) {
                    property.write(entity, value);
                    writes += 1;
                }
            }
        }
        writes
    }
}
