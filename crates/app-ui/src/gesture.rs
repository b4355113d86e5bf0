//! Pan gesture recognition
//!
//! [`PanRecognizer`] turns raw pointer events into pan lifecycle events
//! (`Grant`, `Move`, `Release`, `Terminate`) carrying the cumulative
//! displacement since the pointer went down. Only horizontal pans are
//! claimed: a drag whose vertical travel dominates is left to the
//! enclosing scroll view.
//!
//! Handlers implement [`PanResponder`]; every callback has an empty default
//! so a responder only implements the phases it cares about.

use app_platform::GesturePolicy;
use serde::{Deserialize, Serialize};

/// Raw pointer input from the host
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum PointerEvent {
    /// Pointer pressed
    Down {
        /// Page x
        x: f64,
        /// Page y
        y: f64,
        /// Timestamp in milliseconds
        timestamp_ms: f64,
    },
    /// Pointer moved while pressed
    Move {
        /// Page x
        x: f64,
        /// Page y
        y: f64,
        /// Timestamp in milliseconds
        timestamp_ms: f64,
    },
    /// Pointer lifted
    Up {
        /// Page x
        x: f64,
        /// Page y
        y: f64,
        /// Timestamp in milliseconds
        timestamp_ms: f64,
    },
    /// The host took the pointer away (system gesture, another responder)
    Cancel,
}

impl PointerEvent {
    /// Pointer down
    pub fn down(x: f64, y: f64, timestamp_ms: f64) -> Self {
        PointerEvent::Down { x, y, timestamp_ms }
    }

    /// Pointer move
    pub fn moved(x: f64, y: f64, timestamp_ms: f64) -> Self {
        PointerEvent::Move { x, y, timestamp_ms }
    }

    /// Pointer up
    pub fn up(x: f64, y: f64, timestamp_ms: f64) -> Self {
        PointerEvent::Up { x, y, timestamp_ms }
    }
}

/// Cumulative state of the current pan
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GestureState {
    /// Page x where the pointer went down
    pub x0: f64,
    /// Page y where the pointer went down
    pub y0: f64,
    /// Horizontal displacement since the pointer went down
    pub dx: f64,
    /// Vertical displacement since the pointer went down
    pub dy: f64,
    /// Horizontal velocity in pixels per millisecond
    pub vx: f64,
    /// Vertical velocity in pixels per millisecond
    pub vy: f64,
}

/// Pan lifecycle event
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PanEvent {
    /// The pan was recognized and this responder owns it
    Grant(GestureState),
    /// The pointer moved
    Move(GestureState),
    /// The pointer was lifted
    Release(GestureState),
    /// The pan was taken away before release
    Terminate(GestureState),
}

impl PanEvent {
    /// Gesture state carried by the event
    pub fn state(&self) -> &GestureState {
        match self {
            PanEvent::Grant(s)
            | PanEvent::Move(s)
            | PanEvent::Release(s)
            | PanEvent::Terminate(s) => s,
        }
    }
}

/// Callbacks for pan lifecycle events
pub trait PanResponder {
    /// The pan was recognized
    fn on_grant(&mut self, _state: &GestureState) {}

    /// The pointer moved during an owned pan
    fn on_move(&mut self, _state: &GestureState) {}

    /// The pointer was lifted at the end of an owned pan
    fn on_release(&mut self, _state: &GestureState) {}

    /// An owned pan was taken away
    fn on_terminate(&mut self, _state: &GestureState) {}

    /// Route an event to the matching callback
    fn dispatch(&mut self, event: &PanEvent) {
        match event {
            PanEvent::Grant(s) => self.on_grant(s),
            PanEvent::Move(s) => self.on_move(s),
            PanEvent::Release(s) => self.on_release(s),
            PanEvent::Terminate(s) => self.on_terminate(s),
        }
    }
}

/// Where the recognizer is in the current pointer sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecognizerPhase {
    /// No pointer down
    Idle,
    /// Pointer down, not yet past the touch slop
    Pending,
    /// Pan claimed
    Active,
    /// Vertical drag, left to the scroll view until the pointer lifts
    Rejected,
}

/// Recognizes horizontal pans from pointer events
#[derive(Debug, Clone)]
pub struct PanRecognizer {
    touch_slop: f64,
    phase: RecognizerPhase,
    state: GestureState,
    last_timestamp_ms: f64,
}

impl PanRecognizer {
    /// Recognizer using the policy's touch slop
    pub fn new(policy: &GesturePolicy) -> Self {
        Self {
            touch_slop: policy.touch_slop,
            phase: RecognizerPhase::Idle,
            state: GestureState::default(),
            last_timestamp_ms: 0.0,
        }
    }

    /// Current phase
    pub fn phase(&self) -> RecognizerPhase {
        self.phase
    }

    /// State of the current (or last) pan
    pub fn state(&self) -> &GestureState {
        &self.state
    }

    /// Feed one pointer event, returning the pan events it produced
    ///
    /// Events that do not fit the current sequence (a move or up with no
    /// preceding down, a second down) produce nothing. Non-finite
    /// coordinates are dropped: a down or move carrying them is ignored and
    /// an up carrying them releases at the last good position.
    pub fn handle(&mut self, event: PointerEvent) -> Vec<PanEvent> {
        match event {
            PointerEvent::Down { x, y, timestamp_ms } => {
                if self.phase != RecognizerPhase::Idle || !finite(x, y) {
                    return Vec::new();
                }
                self.state = GestureState {
                    x0: x,
                    y0: y,
                    ..GestureState::default()
                };
                self.last_timestamp_ms = timestamp_ms;
                self.phase = RecognizerPhase::Pending;
                Vec::new()
            }
            PointerEvent::Move { x, y, .. } if !finite(x, y) => {
                tracing::trace!("pointer move with non-finite position dropped");
                Vec::new()
            }
            PointerEvent::Move { x, y, timestamp_ms } => match self.phase {
                RecognizerPhase::Idle | RecognizerPhase::Rejected => Vec::new(),
                RecognizerPhase::Pending => {
                    self.track(x, y, timestamp_ms);
                    if self.claims() {
                        self.phase = RecognizerPhase::Active;
                        vec![PanEvent::Grant(self.state), PanEvent::Move(self.state)]
                    } else {
                        if self.yields_to_scroll() {
                            self.phase = RecognizerPhase::Rejected;
                        }
                        Vec::new()
                    }
                }
                RecognizerPhase::Active => {
                    self.track(x, y, timestamp_ms);
                    vec![PanEvent::Move(self.state)]
                }
            },
            PointerEvent::Up { x, y, timestamp_ms } => {
                let phase = std::mem::replace(&mut self.phase, RecognizerPhase::Idle);
                if phase == RecognizerPhase::Active {
                    if finite(x, y) {
                        self.track(x, y, timestamp_ms);
                    }
                    vec![PanEvent::Release(self.state)]
                } else {
                    Vec::new()
                }
            }
            PointerEvent::Cancel => {
                let phase = std::mem::replace(&mut self.phase, RecognizerPhase::Idle);
                if phase == RecognizerPhase::Active {
                    vec![PanEvent::Terminate(self.state)]
                } else {
                    Vec::new()
                }
            }
        }
    }

    fn track(&mut self, x: f64, y: f64, timestamp_ms: f64) {
        let dx = x - self.state.x0;
        let dy = y - self.state.y0;
        let elapsed = timestamp_ms - self.last_timestamp_ms;
        if elapsed.is_finite() && elapsed > 0.0 {
            self.state.vx = (dx - self.state.dx) / elapsed;
            self.state.vy = (dy - self.state.dy) / elapsed;
            self.last_timestamp_ms = timestamp_ms;
        }
        self.state.dx = dx;
        self.state.dy = dy;
    }

    fn claims(&self) -> bool {
        let (dx, dy) = (self.state.dx.abs(), self.state.dy.abs());
        dx > self.touch_slop && dx > dy
    }

    fn yields_to_scroll(&self) -> bool {
        let (dx, dy) = (self.state.dx.abs(), self.state.dy.abs());
        dy > self.touch_slop && dy >= dx
    }
}

fn finite(x: f64, y: f64) -> bool {
    x.is_finite() && y.is_finite()
}
