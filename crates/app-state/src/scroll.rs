//! Scroll-lock coordination between a scroll view and nested gestures
//!
//! A scroll view owns a [`ScrollContext`] and hands it (as a
//! `dyn ScrollLock`) to every gesture controller rendered inside it. A
//! controller that recognizes a horizontal pan may disable scrolling for
//! the duration of that pan so the scroll view does not interpret the same
//! drag as a vertical scroll.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;

/// Read/write access to an ancestor's scroll-enabled flag
///
/// Any number of nested controllers may hold the same lock, but only the
/// controller with an active gesture writes to it.
pub trait ScrollLock: Send + Sync {
    /// Whether the ancestor currently accepts scroll gestures
    fn scroll_enabled(&self) -> bool;

    /// Enable or disable scrolling on the ancestor
    fn set_scroll_enabled(&self, enabled: bool);
}

/// Scroll-enabled flag owned by a scroll view
///
/// # Example
///
/// ```
/// use app_state::scroll::{ScrollContext, ScrollLock};
///
/// let context = ScrollContext::new();
/// let rx = context.subscribe();
///
/// context.set_scroll_enabled(false);
/// assert!(!*rx.borrow());
/// assert!(!context.scroll_enabled());
/// ```
#[derive(Debug, Clone)]
pub struct ScrollContext {
    enabled_tx: Arc<watch::Sender<bool>>,
    writes: Arc<AtomicU64>,
}

impl ScrollContext {
    /// Create a context with scrolling enabled
    pub fn new() -> Self {
        Self::with_enabled(true)
    }

    /// Create a context with the given initial flag
    pub fn with_enabled(enabled: bool) -> Self {
        let (enabled_tx, _) = watch::channel(enabled);
        Self {
            enabled_tx: Arc::new(enabled_tx),
            writes: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Subscribe to flag changes
    ///
    /// The scroll view applies the latest value to its native
    /// `scrollEnabled` property.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.enabled_tx.subscribe()
    }

    /// Number of writes made through [`ScrollLock::set_scroll_enabled`]
    pub fn write_count(&self) -> u64 {
        self.writes.load(Ordering::SeqCst)
    }

    /// Share this context as a trait object
    pub fn as_lock(&self) -> Arc<dyn ScrollLock> {
        Arc::new(self.clone())
    }
}

impl Default for ScrollContext {
    fn default() -> Self {
        Self::new()
    }
}

impl ScrollLock for ScrollContext {
    fn scroll_enabled(&self) -> bool {
        *self.enabled_tx.borrow()
    }

    fn set_scroll_enabled(&self, enabled: bool) {
        self.writes.fetch_add(1, Ordering::SeqCst);
        let previous = self.enabled_tx.send_replace(enabled);
        if previous != enabled {
            tracing::trace!(enabled, "scroll lock changed");
        }
    }
}
