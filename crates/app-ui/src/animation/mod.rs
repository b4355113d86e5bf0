//! Animation system
//!
//! Animated values, interpolation, spring and timing motion, and the frame
//! driver that advances them.
//!
//! An [`AnimatedValue`] is written either synchronously (`set_value`, used
//! by gestures for 1:1 tracking) or by an animation registered with the
//! [`AnimationDriver`]. Renderers never copy the number out once; they hold
//! an [`AnimatedInterpolation`] and resolve it every frame.
//!
//! # Example
//!
//! ```
//! use app_ui::animation::{AnimatedValue, AnimationDriver, InterpolationConfig, SpringConfig};
//! use std::time::Duration;
//!
//! let driver = AnimationDriver::new();
//! let value = AnimatedValue::new(0.0);
//! let offset = value
//!     .interpolate(InterpolationConfig::new([0.0, 100.0], [-100.0, 0.0]))
//!     .unwrap();
//!
//! value.set_value(40.0);
//! assert_eq!(offset.value().value, -60.0);
//!
//! driver.spring(&value, SpringConfig::default(), 100.0, |_| {});
//! for _ in 0..300 {
//!     driver.tick(Duration::from_millis(16));
//! }
//! assert_eq!(value.value(), 100.0);
//! ```

pub mod driver;
pub mod easing;
pub mod interpolation;
pub mod spring;
pub mod timing;
pub mod value;

pub use driver::{AnimationDriver, AnimationEnd, AnimationId, FrameLoopHandle};
pub use easing::Easing;
pub use interpolation::{
    interpolate_unit, AnimatedInterpolation, Extrapolate, Interpolation, InterpolationConfig,
    OutputValue, Unit,
};
pub use spring::{Spring, SpringConfig};
pub use timing::{Timing, TimingConfig};
pub use value::{AnimatedValue, ValueId};

use thiserror::Error;

/// Errors raised while building animations and interpolations
#[derive(Debug, Error, PartialEq)]
pub enum AnimationError {
    /// Input or output range has fewer than two points
    #[error("Interpolation range needs at least 2 points, got {0}")]
    RangeTooShort(usize),

    /// Input and output ranges differ in length
    #[error("Input range has {input} points but output range has {output}")]
    RangeLengthMismatch {
        /// Input range length
        input: usize,
        /// Output range length
        output: usize,
    },

    /// Input range is not non-decreasing, or contains a non-finite number
    #[error("Input range must be finite and non-decreasing (at index {0})")]
    NonMonotonicInput(usize),

    /// Output range mixes units
    #[error("Output range mixes units: {first} and {other}")]
    MixedUnits {
        /// Unit of the first output
        first: Unit,
        /// Conflicting unit
        other: Unit,
    },

    /// Output value could not be parsed
    #[error("Invalid output value: {0}")]
    InvalidOutput(String),

    /// Spring parameters are not physical
    #[error("Invalid spring configuration: {0}")]
    InvalidSpring(String),
}

impl From<std::convert::Infallible> for AnimationError {
    fn from(never: std::convert::Infallible) -> Self {
        match never {}
    }
}

/// Result type for animation operations
pub type Result<T> = std::result::Result<T, AnimationError>;
