use crate::animation::MasterTimeline;
use crate::config::SyncSettings;
use crate::media::MediaClock;

/// What one sync step did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SyncOutcome {
    /// No timeline to drive.
    Idle,
    /// Drift within tolerance; cursor left alone.
    InSync,
    /// Cursor hard-set to the media time.
    Corrected { from: f32, to: f32 },
    /// Media time unusable this tick; nothing done.
    Skipped,
    /// Narration just ended. Reported once per session.
    Ended,
    /// Narration ended earlier; sync is permanently off.
    Finished,
}

/// Keeps the timeline cursor locked to the media clock.
///
/// Corrections are discontinuous: when drift exceeds `epsilon` the cursor
/// jumps to the media time instead of catching up, so seeks and stalls on
/// the media side show up immediately.
#[derive(Debug, Clone)]
pub struct MediaClockSync {
    epsilon: f32,
    finished: bool,
}

impl MediaClockSync {
    #[must_use]
    pub fn new(settings: SyncSettings) -> Self {
        Self {
            epsilon: settings.epsilon,
            finished: false,
        }
    }

    #[inline]
    #[must_use]
    pub fn epsilon(&self) -> f32 {
        self.epsilon
    }

    /// Whether the end of narration has been handled.
    #[inline]
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Turns sync off for the rest of the session, e.g. when the host
    /// delivers the end-of-media signal itself.
    pub fn finish(&mut self) {
        self.finished = true;
    }

    /// One per-tick step: end detection, play state mirroring, host-clock
    /// advance, then drift correction.
    pub fn tick(
        &mut self,
        timeline: Option<&mut MasterTimeline>,
        media: &dyn MediaClock,
        dt: f32,
    ) -> SyncOutcome {
        if self.finished {
            return SyncOutcome::Finished;
        }

        if media.is_ended() {
            self.finished = true;
            if let Some(timeline) = timeline {
                timeline.freeze();
            }
            log::info!("Narration ended at {:.2}s", media.current_time());
            return SyncOutcome::Ended;
        }

        let Some(timeline) = timeline else {
            return SyncOutcome::Idle;
        };

        if media.is_paused() {
            timeline.pause();
        } else {
            timeline.play();
        }
        timeline.advance(dt);

        self.resync(timeline, media.current_time())
    }

    /// Compares the cursor with `media_time` and hard-seeks when the drift
    /// exceeds epsilon.
    pub fn resync(&self, timeline: &mut MasterTimeline, media_time: f32) -> SyncOutcome {
        if !media_time.is_finite() || media_time < 0.0 {
            log::warn!("Ignoring invalid media time {media_time}");
            return SyncOutcome::Skipped;
        }

        let cursor = timeline.cursor();
        if (cursor - media_time).abs() <= self.epsilon {
            return SyncOutcome::InSync;
        }

        timeline.seek(media_time);
        log::debug!("Timeline corrected {cursor:.3}s -> {media_time:.3}s");
        SyncOutcome::Corrected {
            from: cursor,
            to: media_time,
        }
    }

    /// Issues play or pause on the media and mirrors it onto the timeline in
    /// the same call. Returns whether playback is now running.
    pub fn toggle_playback(
        &self,
        media: &mut dyn MediaClock,
        timeline: Option<&mut MasterTimeline>,
    ) -> bool {
        if self.finished {
            return false;
        }
        if media.is_paused() {
            media.play();
        } else {
            media.pause();
        }

        let playing = !media.is_paused();
        if let Some(timeline) = timeline {
            if playing {
                timeline.play();
            } else {
                timeline.pause();
            }
        }
        playing
    }
}

impl Default for MediaClockSync {
    fn default() -> Self {
        Self::new(SyncSettings::default())
    }
}
