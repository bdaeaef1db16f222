//! Interval gating for periodically sampled subsystems.
//!
//! The control loop runs as fast as it can; slower subsystems (battery at
//! 10 Hz, barometer at 1 Hz) each hold an [`IntervalTimer`] and only do
//! work on the cycles where it reports due. Time is passed in by the
//! caller as seconds since boot, so the timer itself never reads a clock.

use crate::config::SamplingConfig;

#[derive(Debug, Clone, Copy)]
pub struct IntervalTimer {
    interval_secs: f32,
    last_secs: Option<f32>,
}

impl IntervalTimer {
    pub fn new(interval_secs: f32) -> Self {
        Self {
            interval_secs,
            last_secs: None,
        }
    }

    /// `None` when the subsystem is disabled in the config.
    pub fn from_config(sampling: &SamplingConfig) -> Option<Self> {
        sampling
            .enabled
            .then(|| Self::new(sampling.interval_secs))
    }

    pub fn interval_secs(&self) -> f32 {
        self.interval_secs
    }

    /// True at most once per interval. The first call is always due.
    pub fn due(&mut self, now_secs: f32) -> bool {
        let fire = match self.last_secs {
            None => true,
            // A clock that stepped backwards restarts the interval.
            Some(last) => now_secs < last || now_secs - last >= self.interval_secs,
        };
        if fire {
            self.last_secs = Some(now_secs);
        }
        fire
    }

    /// Forget the last fire time; the next `due` fires immediately.
    pub fn reset(&mut self) {
        self.last_secs = None;
    }
}
