//! Design tokens for Reveal Kit
//!
//! This module provides the motion design tokens: durations, easing
//! curves, spring presets, frame pacing and gesture thresholds.

// =============================================================================
// Animation Tokens
// =============================================================================

/// Animation duration tokens (in milliseconds)
pub mod duration {
    /// Instant (0ms)
    pub const INSTANT: u32 = 0;
    /// Extra fast (50ms)
    pub const EXTRA_FAST: u32 = 50;
    /// Fast (100ms)
    pub const FAST: u32 = 100;
    /// Normal (150ms)
    pub const NORMAL: u32 = 150;
    /// Moderate (200ms)
    pub const MODERATE: u32 = 200;
    /// Slow (300ms)
    pub const SLOW: u32 = 300;
    /// Extra slow (500ms), also the default timing duration
    pub const EXTRA_SLOW: u32 = 500;
    /// Long (1000ms)
    pub const LONG: u32 = 1000;
}

/// Easing curves as cubic-bezier control points `(x1, y1, x2, y2)`
pub mod easing {
    /// Default easing curve
    pub const DEFAULT: (f64, f64, f64, f64) = (0.17, 0.73, 0.14, 1.0);
    /// Ease
    pub const EASE: (f64, f64, f64, f64) = (0.42, 0.0, 1.0, 1.0);
    /// Ease in
    pub const EASE_IN: (f64, f64, f64, f64) = (0.4, 0.0, 1.0, 1.0);
    /// Ease out
    pub const EASE_OUT: (f64, f64, f64, f64) = (0.0, 0.0, 0.2, 1.0);
    /// Ease in out
    pub const EASE_IN_OUT: (f64, f64, f64, f64) = (0.42, 0.0, 0.58, 1.0);
    /// Overshooting "back" curve
    pub const BACK_OUT: (f64, f64, f64, f64) = (0.34, 1.56, 0.64, 1.0);
}

/// Spring presets
///
/// Values are physical (stiffness, damping, mass). The default matches the
/// tension 40 / friction 7 spring most mobile toolkits ship with.
pub mod spring {
    /// Default stiffness
    pub const STIFFNESS: f64 = 230.2;
    /// Default damping
    pub const DAMPING: f64 = 22.0;
    /// Default mass
    pub const MASS: f64 = 1.0;
    /// Stiffness of the gentle preset
    pub const GENTLE_STIFFNESS: f64 = 120.0;
    /// Damping of the gentle preset
    pub const GENTLE_DAMPING: f64 = 14.0;
    /// Stiffness of the snappy preset
    pub const SNAPPY_STIFFNESS: f64 = 400.0;
    /// Damping of the snappy preset
    pub const SNAPPY_DAMPING: f64 = 40.0;
    /// Displacement below which a spring may come to rest
    pub const REST_DISPLACEMENT_THRESHOLD: f64 = 0.001;
    /// Speed below which a spring may come to rest
    pub const REST_SPEED_THRESHOLD: f64 = 0.001;
}

/// Frame pacing
pub mod frame {
    /// Target frame interval (60Hz) in milliseconds
    pub const INTERVAL_MS: u64 = 16;
    /// Largest step a single tick may integrate, in milliseconds
    ///
    /// A stalled loop resumes from where it was instead of jumping.
    pub const MAX_STEP_MS: u64 = 64;
}
