//! Spring motion
//!
//! Positions are computed from the closed-form solution of a damped
//! harmonic oscillator rather than by numeric integration, so the result
//! does not depend on frame pacing.

use super::{AnimationError, Result};
use crate::tokens::spring as presets;
use serde::{Deserialize, Serialize};

/// Physical spring parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SpringConfig {
    /// Spring stiffness (k)
    pub stiffness: f64,
    /// Damping coefficient (c)
    pub damping: f64,
    /// Mass (m)
    pub mass: f64,
    /// Stop at the target instead of overshooting it
    pub overshoot_clamping: bool,
    /// Distance from the target below which the spring may rest
    pub rest_displacement_threshold: f64,
    /// Speed below which the spring may rest
    pub rest_speed_threshold: f64,
    /// Starting velocity, in units per second
    pub velocity: f64,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            stiffness: presets::STIFFNESS,
            damping: presets::DAMPING,
            mass: presets::MASS,
            overshoot_clamping: false,
            rest_displacement_threshold: presets::REST_DISPLACEMENT_THRESHOLD,
            rest_speed_threshold: presets::REST_SPEED_THRESHOLD,
            velocity: 0.0,
        }
    }
}

impl SpringConfig {
    /// Softer, slower spring
    pub fn gentle() -> Self {
        Self {
            stiffness: presets::GENTLE_STIFFNESS,
            damping: presets::GENTLE_DAMPING,
            ..Self::default()
        }
    }

    /// Stiff, near-critically damped spring
    pub fn snappy() -> Self {
        Self {
            stiffness: presets::SNAPPY_STIFFNESS,
            damping: presets::SNAPPY_DAMPING,
            ..Self::default()
        }
    }

    /// Damping ratio (zeta); below 1 the spring overshoots
    pub fn damping_ratio(&self) -> f64 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt())
    }

    /// Check the parameters describe a physical spring
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("stiffness", self.stiffness),
            ("damping", self.damping),
            ("mass", self.mass),
            ("restDisplacementThreshold", self.rest_displacement_threshold),
            ("restSpeedThreshold", self.rest_speed_threshold),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(AnimationError::InvalidSpring(format!(
                    "{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }
        if self.mass == 0.0 {
            return Err(AnimationError::InvalidSpring("mass must be positive".to_string()));
        }
        if self.damping == 0.0 && self.stiffness > 0.0 {
            return Err(AnimationError::InvalidSpring(
                "an undamped spring never comes to rest".to_string(),
            ));
        }
        if !self.velocity.is_finite() {
            return Err(AnimationError::InvalidSpring("velocity must be finite".to_string()));
        }
        Ok(())
    }
}

/// Sample of a spring at some instant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringSample {
    /// Position
    pub position: f64,
    /// Velocity, in units per second
    pub velocity: f64,
    /// Whether the spring has come to rest (position is then the target)
    pub at_rest: bool,
}

/// A spring moving from one position to a target
#[derive(Debug, Clone, PartialEq)]
pub struct Spring {
    config: SpringConfig,
    from: f64,
    to: f64,
    elapsed: f64,
}

impl Spring {
    /// Start a spring at `from` heading to `to`
    pub fn new(config: SpringConfig, from: f64, to: f64) -> Self {
        Self {
            config,
            from,
            to,
            elapsed: 0.0,
        }
    }

    /// Target position
    pub fn target(&self) -> f64 {
        self.to
    }

    /// Seconds since the spring started
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Advance by `dt` seconds and sample
    pub fn step(&mut self, dt: f64) -> SpringSample {
        self.elapsed += dt.max(0.0);
        self.sample(self.elapsed)
    }

    /// Sample at `t` seconds after the start
    pub fn sample(&self, t: f64) -> SpringSample {
        let SpringConfig {
            stiffness: k,
            damping: c,
            mass: m,
            ..
        } = self.config;

        let (position, velocity) = if k == 0.0 {
            (self.to, 0.0)
        } else {
            let v0 = -self.config.velocity;
            let x0 = self.to - self.from;
            let zeta = c / (2.0 * (k * m).sqrt());
            let omega0 = (k / m).sqrt();

            if zeta < 1.0 {
                let omega1 = omega0 * (1.0 - zeta * zeta).sqrt();
                let envelope = (-zeta * omega0 * t).exp();
                let a = (v0 + zeta * omega0 * x0) / omega1;
                let (sin, cos) = (omega1 * t).sin_cos();

                let position = self.to - envelope * (a * sin + x0 * cos);
                let velocity = zeta * omega0 * envelope * (a * sin + x0 * cos)
                    - envelope * (cos * (v0 + zeta * omega0 * x0) - omega1 * x0 * sin);
                (position, velocity)
            } else {
                let envelope = (-omega0 * t).exp();
                let position = self.to - envelope * (x0 + (v0 + omega0 * x0) * t);
                let velocity = envelope * (v0 * (t * omega0 - 1.0) + t * x0 * omega0 * omega0);
                (position, velocity)
            }
        };

        let overshooting = self.config.overshoot_clamping
            && k != 0.0
            && if self.from < self.to {
                position > self.to
            } else {
                position < self.to
            };
        let slow = velocity.abs() <= self.config.rest_speed_threshold;
        let close = k == 0.0 || (self.to - position).abs() <= self.config.rest_displacement_threshold;

        if overshooting || (slow && close) {
            SpringSample {
                position: self.to,
                velocity: 0.0,
                at_rest: true,
            }
        } else {
            SpringSample {
                position,
                velocity,
                at_rest: false,
            }
        }
    }
}
