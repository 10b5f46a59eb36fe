//! Media Module
//!
//! The narration media is the only time authority. This module defines the
//! boundary to it ([`MediaClock`]), a host-driven implementation
//! ([`VirtualMedia`]) and the lock that keeps the timeline on it
//! ([`MediaClockSync`]).

pub mod sync;

pub use sync::{MediaClockSync, SyncOutcome};

/// External media source.
pub trait MediaClock {
    /// Playback position, seconds. May be garbage while buffering.
    fn current_time(&self) -> f32;
    fn set_current_time(&mut self, time: f32);
    fn is_paused(&self) -> bool;
    fn play(&mut self);
    fn pause(&mut self);
    /// Whether playback has reached the end.
    fn is_ended(&self) -> bool;
}

/// A media clock advanced explicitly by the host.
#[derive(Debug, Clone, PartialEq)]
pub struct VirtualMedia {
    current_time: f32,
    duration: f32,
    paused: bool,
    ended: bool,
}

impl VirtualMedia {
    /// A paused clock at zero for media of the given length.
    #[must_use]
    pub fn new(duration: f32) -> Self {
        Self {
            current_time: 0.0,
            duration,
            paused: true,
            ended: false,
        }
    }

    #[must_use]
    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// Plays forward by `dt` if playing. Reaching the end pauses and raises
    /// the ended flag.
    pub fn advance(&mut self, dt: f32) {
        if self.paused || self.ended {
            return;
        }
        self.current_time += dt;
        if self.current_time >= self.duration {
            self.current_time = self.duration;
            self.paused = true;
            self.ended = true;
        }
    }
}

impl MediaClock for VirtualMedia {
    fn current_time(&self) -> f32 {
        self.current_time
    }

    fn set_current_time(&mut self, time: f32) {
        self.current_time = time.clamp(0.0, self.duration);
        self.ended = false;
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn play(&mut self) {
        if !self.ended {
            self.paused = false;
        }
    }

    fn pause(&mut self) {
        self.paused = true;
    }

    fn is_ended(&self) -> bool {
        self.ended
    }
}
