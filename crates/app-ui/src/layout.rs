//! Layout measurement cache
//!
//! Components that size something from a child's measured layout keep a
//! [`Layout`] and hand a [`LayoutReporter`] to the child. Every size change
//! bumps a generation counter so consumers know to re-derive whatever they
//! computed from the old size.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Measured frame of a view, in logical pixels
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutRectangle {
    /// Left edge relative to the parent
    pub x: f64,
    /// Top edge relative to the parent
    pub y: f64,
    /// Width
    pub width: f64,
    /// Height
    pub height: f64,
}

impl LayoutRectangle {
    /// Rectangle at the origin with the given size
    pub fn sized(width: f64, height: f64) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width,
            height,
        }
    }

    // Negative or non-finite sizes are reported by some hosts mid-transition.
    fn sanitized(self) -> Self {
        let clean = |v: f64| if v.is_finite() { v.max(0.0) } else { 0.0 };
        let coord = |v: f64| if v.is_finite() { v } else { 0.0 };
        Self {
            x: coord(self.x),
            y: coord(self.y),
            width: clean(self.width),
            height: clean(self.height),
        }
    }
}

/// Layout event delivered by the host after a layout pass
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutEvent {
    /// Measured frame
    pub layout: LayoutRectangle,
}

impl LayoutEvent {
    /// Event for a view of the given size
    pub fn sized(width: f64, height: f64) -> Self {
        Self {
            layout: LayoutRectangle::sized(width, height),
        }
    }
}

/// Last measured layout of a view
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Layout {
    rect: LayoutRectangle,
    measured: bool,
    generation: u64,
}

impl Layout {
    /// Unmeasured layout (all zero)
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a layout event
    ///
    /// Returns true when the size changed, in which case the generation is
    /// bumped. A move without a resize is stored but does not count as a
    /// change.
    pub fn on_layout(&mut self, event: LayoutEvent) -> bool {
        let rect = event.layout.sanitized();
        let resized = !self.measured
            || rect.width != self.rect.width
            || rect.height != self.rect.height;

        self.rect = rect;
        self.measured = true;
        if resized {
            self.generation += 1;
        }
        resized
    }

    /// Measured width, `0` until measured
    pub fn width(&self) -> f64 {
        self.rect.width
    }

    /// Measured height, `0` until measured
    pub fn height(&self) -> f64 {
        self.rect.height
    }

    /// Measured frame
    pub fn rect(&self) -> LayoutRectangle {
        self.rect
    }

    /// Whether at least one layout event arrived
    pub fn is_measured(&self) -> bool {
        self.measured
    }

    /// Incremented on every size change; `0` until measured
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Shared handle a child uses to report its layout
#[derive(Debug, Clone, Default)]
pub struct LayoutReporter {
    layout: Arc<Mutex<Layout>>,
}

impl LayoutReporter {
    /// Create a reporter over an unmeasured layout
    pub fn new() -> Self {
        Self::default()
    }

    /// Report a layout event
    pub fn report(&self, event: LayoutEvent) -> bool {
        let changed = self.layout.lock().on_layout(event);
        if changed {
            tracing::trace!(
                width = event.layout.width,
                height = event.layout.height,
                "layout changed"
            );
        }
        changed
    }

    /// Copy of the current layout
    pub fn snapshot(&self) -> Layout {
        *self.layout.lock()
    }

    /// Current width
    pub fn width(&self) -> f64 {
        self.layout.lock().width()
    }
}
