//! Time-based visual state. Everything here is sampled from a host clock
//! (seconds, monotonically increasing); nothing schedules timers.

mod easing;
mod presence;
mod sequencer;
mod stagger;

pub use easing::Easing;
pub use presence::{Phase, Presence, PresenceFrame, PresenceMode};
pub use sequencer::{TrackAnimator, TrackFrame};
pub use stagger::Stagger;

/// A single eased transition from `start` lasting `duration` seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    pub start: f64,
    pub duration: f64,
    pub easing: Easing,
}

impl Tween {
    pub fn new(start: f64, duration: f64, easing: Easing) -> Self {
        Self {
            start,
            duration,
            easing,
        }
    }

    /// Linear progress in `0..=1`. A zero duration is complete immediately.
    pub fn linear(&self, now: f64) -> f64 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        ((now - self.start) / self.duration).clamp(0.0, 1.0)
    }

    /// Eased progress in `0..=1`.
    pub fn progress(&self, now: f64) -> f64 {
        self.easing.apply(self.linear(now))
    }

    pub fn end(&self) -> f64 {
        self.start + self.duration.max(0.0)
    }

    pub fn is_done(&self, now: f64) -> bool {
        now >= self.end()
    }
}
