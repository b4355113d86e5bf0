//! Animated value handles

use super::interpolation::{AnimatedInterpolation, Interpolation, InterpolationConfig};
use super::Result;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;

static NEXT_VALUE_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of an animated value, shared by all clones of its handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ValueId(u64);

impl ValueId {
    fn next() -> Self {
        Self(NEXT_VALUE_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw numeric id
    pub fn get(&self) -> u64 {
        self.0
    }
}

/// A single mutable number driving live visual properties
///
/// Cloning the handle does not copy the number: every clone, and every
/// interpolation derived from any clone, sees the same value. Writes are
/// published through a `watch` channel so a renderer can either poll
/// [`AnimatedValue::value`] each frame or await changes.
#[derive(Debug, Clone)]
pub struct AnimatedValue {
    id: ValueId,
    tx: Arc<watch::Sender<f64>>,
}

impl AnimatedValue {
    /// Allocate a value
    pub fn new(initial: f64) -> Self {
        let (tx, _) = watch::channel(initial);
        Self {
            id: ValueId::next(),
            tx: Arc::new(tx),
        }
    }

    /// Identity of this value
    pub fn id(&self) -> ValueId {
        self.id
    }

    /// Current value
    pub fn value(&self) -> f64 {
        *self.tx.borrow()
    }

    /// Write the value immediately
    ///
    /// This does not stop an animation running on the value; whoever
    /// writes must own the value at that moment.
    pub fn set_value(&self, value: f64) {
        self.tx.send_replace(value);
    }

    /// Subscribe to changes
    pub fn subscribe(&self) -> watch::Receiver<f64> {
        self.tx.subscribe()
    }

    /// Derive a live interpolated binding
    pub fn interpolate(&self, config: InterpolationConfig) -> Result<AnimatedInterpolation> {
        let interpolation = Interpolation::new(config)?;
        Ok(AnimatedInterpolation::new(self.clone(), interpolation))
    }
}

impl Default for AnimatedValue {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl PartialEq for AnimatedValue {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for AnimatedValue {}
