//! Per-frame animation driver
//!
//! The driver owns every running animation and advances them on each
//! frame tick, independently of the view render cycle. A value has at most
//! one running animation; starting another on the same value, or stopping
//! it, removes the old one and drops its completion callback unfired.

use super::spring::{Spring, SpringConfig};
use super::timing::{Timing, TimingConfig};
use super::value::{AnimatedValue, ValueId};
use crate::tokens::frame;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

/// Identity of a started animation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnimationId(u64);

/// Passed to a completion callback once an animation reaches its target
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationEnd {
    /// The animation that finished
    pub id: AnimationId,
    /// Final value (the animation's target)
    pub value: f64,
}

type CompletionCallback = Box<dyn FnOnce(AnimationEnd) + Send + 'static>;

#[derive(Debug)]
enum Motion {
    Spring(Spring),
    Timing(Timing),
}

impl Motion {
    fn step(&mut self, dt: f64) -> (f64, bool) {
        match self {
            Motion::Spring(spring) => {
                let sample = spring.step(dt);
                (sample.position, sample.at_rest)
            }
            Motion::Timing(timing) => timing.step(dt),
        }
    }
}

struct Running {
    id: AnimationId,
    value: AnimatedValue,
    motion: Motion,
    on_end: Option<CompletionCallback>,
}

#[derive(Default)]
struct DriverState {
    running: Vec<Running>,
    next_id: u64,
    frames: u64,
}

impl DriverState {
    fn remove_for(&mut self, value: ValueId) -> Option<Running> {
        let index = self.running.iter().position(|r| r.value.id() == value)?;
        Some(self.running.swap_remove(index))
    }
}

/// Advances animations frame by frame
///
/// Clones share the same set of running animations.
#[derive(Clone, Default)]
pub struct AnimationDriver {
    state: Arc<Mutex<DriverState>>,
}

impl std::fmt::Debug for AnimationDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("AnimationDriver")
            .field("running", &state.running.len())
            .field("frames", &state.frames)
            .finish()
    }
}

impl AnimationDriver {
    /// Create a driver with nothing running
    pub fn new() -> Self {
        Self::default()
    }

    /// Spring `value` from its current position to `to`
    pub fn spring<F>(
        &self,
        value: &AnimatedValue,
        config: SpringConfig,
        to: f64,
        on_end: F,
    ) -> AnimationId
    where
        F: FnOnce(AnimationEnd) + Send + 'static,
    {
        let spring = Spring::new(config, value.value(), to);
        self.start(value, Motion::Spring(spring), Box::new(on_end))
    }

    /// Tween `value` from its current position to `to`
    pub fn timing<F>(
        &self,
        value: &AnimatedValue,
        config: TimingConfig,
        to: f64,
        on_end: F,
    ) -> AnimationId
    where
        F: FnOnce(AnimationEnd) + Send + 'static,
    {
        let timing = Timing::new(config, value.value(), to);
        self.start(value, Motion::Timing(timing), Box::new(on_end))
    }

    fn start(
        &self,
        value: &AnimatedValue,
        motion: Motion,
        on_end: CompletionCallback,
    ) -> AnimationId {
        let mut state = self.state.lock();
        if let Some(previous) = state.remove_for(value.id()) {
            tracing::debug!(animation = previous.id.0, "animation superseded");
        }

        state.next_id += 1;
        let id = AnimationId(state.next_id);
        tracing::trace!(animation = id.0, ?motion, "animation started");
        state.running.push(Running {
            id,
            value: value.clone(),
            motion,
            on_end: Some(on_end),
        });
        id
    }

    /// Stop whatever animation is driving `value`
    ///
    /// The value keeps its current position and the completion callback is
    /// dropped without being called. Returns whether anything was running.
    pub fn stop(&self, value: &AnimatedValue) -> bool {
        let stopped = self.state.lock().remove_for(value.id());
        if let Some(running) = &stopped {
            tracing::debug!(animation = running.id.0, "animation stopped");
        }
        stopped.is_some()
    }

    /// Stop a specific animation if it is still running
    pub fn cancel(&self, id: AnimationId) -> bool {
        let mut state = self.state.lock();
        match state.running.iter().position(|r| r.id == id) {
            Some(index) => {
                state.running.swap_remove(index);
                true
            }
            None => false,
        }
    }

    /// Whether an animation is driving `value`
    pub fn is_animating(&self, value: &AnimatedValue) -> bool {
        self.state.lock().running.iter().any(|r| r.value.id() == value.id())
    }

    /// Number of running animations
    pub fn active_count(&self) -> usize {
        self.state.lock().running.len()
    }

    /// Number of ticks processed so far
    pub fn frame_count(&self) -> u64 {
        self.state.lock().frames
    }

    /// Advance every animation by `dt`
    ///
    /// Steps longer than [`frame::MAX_STEP_MS`] are shortened. Completion
    /// callbacks run after the driver is unlocked, so they may start new
    /// animations. Returns the number of animations that finished.
    pub fn tick(&self, dt: Duration) -> usize {
        let dt = dt.min(Duration::from_millis(frame::MAX_STEP_MS)).as_secs_f64();

        let finished = {
            let mut state = self.state.lock();
            state.frames += 1;

            let mut finished = Vec::new();
            let mut index = 0;
            while index < state.running.len() {
                let running = &mut state.running[index];
                let (position, done) = running.motion.step(dt);
                running.value.set_value(position);

                if done {
                    let mut running = state.running.swap_remove(index);
                    finished.push((running.id, position, running.on_end.take()));
                } else {
                    index += 1;
                }
            }
            finished
        };

        let count = finished.len();
        for (id, value, on_end) in finished {
            tracing::trace!(animation = id.0, value, "animation finished");
            if let Some(on_end) = on_end {
                on_end(AnimationEnd { id, value });
            }
        }
        count
    }

    /// Tick on a tokio task at the given interval
    ///
    /// Each tick advances by the real time elapsed since the previous one.
    /// The task stops when the returned handle is dropped.
    pub fn start_frame_loop(&self, interval: Duration) -> FrameLoopHandle {
        let (stop_tx, mut stop_rx) = tokio::sync::oneshot::channel();
        let driver = self.clone();

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            let mut last = tokio::time::Instant::now();

            loop {
                tokio::select! {
                    now = ticker.tick() => {
                        driver.tick(now.saturating_duration_since(last));
                        last = now;
                    }
                    _ = &mut stop_rx => {
                        break;
                    }
                }
            }
            tracing::debug!("frame loop stopped");
        });

        FrameLoopHandle {
            stop_tx: Some(stop_tx),
            _handle: handle,
        }
    }
}

/// Handle for a running frame loop
///
/// When dropped, the loop stops.
pub struct FrameLoopHandle {
    stop_tx: Option<tokio::sync::oneshot::Sender<()>>,
    _handle: tokio::task::JoinHandle<()>,
}

impl FrameLoopHandle {
    /// Stop the loop manually
    pub fn stop(mut self) {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for FrameLoopHandle {
    fn drop(&mut self) {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(());
        }
    }
}
