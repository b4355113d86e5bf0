//! Gesture and animation layer for Reveal Kit
//!
//! This crate provides the headless half of swipe-to-reveal rows: animated
//! values with live interpolation bindings, spring and timing motion, pan
//! recognition, layout measurement and the [`LeftSwipe`] container that ties
//! them together. A host view runtime feeds it pointer and layout events and
//! renders the [`transform::ResolvedTransform`] values it produces.
//!
//! # Modules
//!
//! - [`animation`] - Animated values, interpolation, springs, timing, frame driver
//! - [`gesture`] - Pointer events and pan recognition
//! - [`layout`] - Layout measurement cache
//! - [`transform`] - Transform styles bound to animated values
//! - [`swipe`] - The swipe-to-reveal container
//! - [`config`] - Swipe configuration
//! - [`tokens`] - Motion design tokens (durations, easing curves, springs)
//!
//! # Example
//!
//! ```rust
//! use app_state::ScrollContext;
//! use app_ui::{AnimationDriver, LayoutEvent, LeftSwipe, PointerEvent, SwipeConfig};
//! use app_ui::transform::ResolvedTransform;
//!
//! let driver = AnimationDriver::new();
//! let scroll = ScrollContext::new();
//! let mut row = LeftSwipe::new(driver.clone(), scroll.as_lock(), &SwipeConfig::default());
//! row.on_layout(LayoutEvent::sized(120.0, 64.0));
//!
//! // Hidden: the row is shifted left by the panel width
//! let frame = row.render();
//! assert_eq!(frame.transform, vec![ResolvedTransform::TranslateX(-120.0)]);
//!
//! row.handle_pointer(PointerEvent::down(10.0, 10.0, 0.0));
//! row.handle_pointer(PointerEvent::moved(70.0, 10.0, 16.0));
//! assert_eq!(frame.style.resolve(), vec![ResolvedTransform::TranslateX(-60.0)]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod animation;
pub mod config;
pub mod gesture;
pub mod layout;
pub mod swipe;
pub mod tokens;
pub mod transform;

// Re-export commonly used types
pub use animation::{
    interpolate_unit, AnimatedInterpolation, AnimatedValue, AnimationDriver, AnimationError,
    Easing, Extrapolate, FrameLoopHandle, InterpolationConfig, OutputValue, SpringConfig,
    TimingConfig, Unit,
};

pub use config::{ConfigError, SwipeConfig};

pub use gesture::{GestureState, PanEvent, PanRecognizer, PanResponder, PointerEvent};

pub use layout::{Layout, LayoutEvent, LayoutReporter, LayoutRectangle};

pub use swipe::{LeftSwipe, RevealState, SwipeFrame, SwipePhase};

pub use tokens::{duration, easing, frame, spring};

pub use transform::{ResolvedTransform, Transform, TransformStyle};
