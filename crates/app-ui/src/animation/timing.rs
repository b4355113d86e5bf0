//! Fixed-duration eased motion

use super::easing::Easing;
use crate::tokens::duration;
use serde::{Deserialize, Serialize};

/// Timing animation parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TimingConfig {
    /// Duration in milliseconds
    pub duration_ms: u32,
    /// Easing curve
    pub easing: Easing,
    /// Delay before motion starts, in milliseconds
    pub delay_ms: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            duration_ms: duration::EXTRA_SLOW,
            easing: Easing::EaseInOut,
            delay_ms: 0,
        }
    }
}

impl TimingConfig {
    /// Config with the given duration and easing
    pub fn new(duration_ms: u32, easing: Easing) -> Self {
        Self {
            duration_ms,
            easing,
            delay_ms: 0,
        }
    }
}

/// A tween from one value to another
#[derive(Debug, Clone, PartialEq)]
pub struct Timing {
    config: TimingConfig,
    from: f64,
    to: f64,
    elapsed_ms: f64,
}

impl Timing {
    /// Start a tween
    pub fn new(config: TimingConfig, from: f64, to: f64) -> Self {
        Self {
            config,
            from,
            to,
            elapsed_ms: 0.0,
        }
    }

    /// Target value
    pub fn target(&self) -> f64 {
        self.to
    }

    /// Advance by `dt` seconds; returns the position and whether it finished
    pub fn step(&mut self, dt: f64) -> (f64, bool) {
        self.elapsed_ms += dt.max(0.0) * 1000.0;

        let active = self.elapsed_ms - f64::from(self.config.delay_ms);
        if active <= 0.0 {
            return (self.from, false);
        }

        let duration = f64::from(self.config.duration_ms);
        if duration == 0.0 || active >= duration {
            return (self.to, true);
        }

        let progress = self.config.easing.apply(active / duration);
        (self.from + progress * (self.to - self.from), false)
    }
}
