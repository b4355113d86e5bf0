//! Swipe-to-reveal container
//!
//! [`LeftSwipe`] hides a panel to the left of its foreground content. A
//! horizontal drag pulls the panel into view 1:1 with the finger; releasing
//! springs it to the other rest state. The container owns a single drive
//! value: `0` means the panel is fully hidden, the measured panel width
//! means it is fully shown.
//!
//! # State machine
//!
//! ```text
//!           grant                    release
//!   Idle ─────────────▶ Tracking ─────────────▶ Settling
//!    ▲                   │   ▲                     │
//!    │ terminate/ignored │   │ grant (preempts)    │ spring at rest
//!    └───────────────────┘   └─────────────────────┤
//!    ▲                                             │
//!    └─────────────────────────────────────────────┘
//! ```
//!
//! Releasing always toggles the rest state. There is no distance or
//! velocity threshold.
//!
//! While hidden, leftward samples are discarded: the panel cannot be pushed
//! past its hidden position, and a release with a leftward displacement
//! leaves it hidden without a spring. If that gesture interrupted a settle
//! toward shown, the row jumps from its mid-flight offset straight back to
//! hidden on release.
//!
//! Pointer samples with a non-finite displacement are discarded, and a
//! release carrying one returns the row to its rest state.
//!
//! An invalid spring in the [`SwipeConfig`] is replaced by the default
//! spring with a warning.

use crate::animation::{
    AnimatedValue, AnimationDriver, AnimationEnd, InterpolationConfig, SpringConfig,
};
use crate::config::SwipeConfig;
use crate::gesture::{GestureState, PanEvent, PanRecognizer, PanResponder, PointerEvent};
use crate::layout::{LayoutEvent, LayoutReporter};
use crate::transform::{MemoTransformStyle, ResolvedTransform, Transform, TransformStyle};
use app_platform::GesturePolicy;
use app_state::{ScrollLock, Toggle};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Arc, Weak};

/// Rest state of the hidden panel
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RevealState {
    /// Panel behind the foreground
    #[default]
    Hidden,
    /// Panel fully revealed
    Shown,
}

impl RevealState {
    /// The other state
    pub fn toggled(self) -> Self {
        match self {
            RevealState::Hidden => RevealState::Shown,
            RevealState::Shown => RevealState::Hidden,
        }
    }

    /// Drive value at rest for a panel of `width`
    pub fn rest_value(self, width: f64) -> f64 {
        match self {
            RevealState::Hidden => 0.0,
            RevealState::Shown => width,
        }
    }
}

impl From<Toggle> for RevealState {
    fn from(toggle: Toggle) -> Self {
        if toggle.get() {
            RevealState::Shown
        } else {
            RevealState::Hidden
        }
    }
}

/// Where the container is in its gesture lifecycle
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum SwipePhase {
    /// No gesture and no spring
    #[default]
    Idle,
    /// A pan owns the drive value
    Tracking {
        /// Drive value when the pan was granted
        origin: f64,
        /// Whether this pan disabled the ancestor's scrolling
        locked_scroll: bool,
    },
    /// A spring is carrying the drive value to a rest state
    Settling {
        /// State entered when the spring comes to rest
        target: RevealState,
        /// Identifies this settle; stale completions are ignored
        generation: u64,
    },
}

struct SwipeCore {
    this: Weak<Mutex<SwipeCore>>,
    drive: AnimatedValue,
    layout: LayoutReporter,
    driver: AnimationDriver,
    scroll_lock: Arc<dyn ScrollLock>,
    policy: GesturePolicy,
    spring: SpringConfig,
    phase: SwipePhase,
    shown: Toggle,
    settle_generation: u64,
    seen_layout_generation: u64,
}

impl SwipeCore {
    fn reveal(&self) -> RevealState {
        self.shown.into()
    }

    fn ignores(&self, dx: f64) -> bool {
        !self.shown.get() && dx < 0.0
    }

    fn engage_scroll_lock(&mut self) {
        if let SwipePhase::Tracking { locked_scroll, .. } = &mut self.phase {
            if !*locked_scroll && self.policy.locks_scroll_during_swipe {
                self.scroll_lock.set_scroll_enabled(false);
                *locked_scroll = true;
            }
        }
    }

    fn release_scroll_lock(&mut self) {
        if let SwipePhase::Tracking { locked_scroll, .. } = &mut self.phase {
            if *locked_scroll {
                self.scroll_lock.set_scroll_enabled(true);
                *locked_scroll = false;
            }
        }
    }

    // Return the drive value to the current rest state without animating
    fn snap_to_rest(&self) {
        let rest = self.reveal().rest_value(self.layout.width());
        if self.drive.value() != rest {
            self.drive.set_value(rest);
        }
    }

    // Pick up layout reports, including ones made directly through a
    // reporter handed to the panel
    fn sync_layout(&mut self) {
        let generation = self.layout.snapshot().generation();
        if generation == self.seen_layout_generation {
            return;
        }
        self.seen_layout_generation = generation;
        if self.phase == SwipePhase::Idle {
            self.snap_to_rest();
        }
    }

    fn finish_settle(&mut self, generation: u64, end: AnimationEnd) {
        let target = match self.phase {
            SwipePhase::Settling {
                target,
                generation: current,
            } if current == generation => target,
            _ => {
                tracing::trace!(generation, "stale settle completion ignored");
                return;
            }
        };

        self.shown.set(target == RevealState::Shown);
        self.phase = SwipePhase::Idle;
        self.snap_to_rest();
        tracing::debug!(state = ?target, value = end.value, "swipe settled");
    }
}

impl PanResponder for SwipeCore {
    fn on_grant(&mut self, state: &GestureState) {
        self.sync_layout();
        if self.layout.width() <= 0.0 {
            tracing::debug!("swipe ignored: panel not measured");
            return;
        }

        match self.phase {
            SwipePhase::Tracking { .. } => return,
            SwipePhase::Settling { target, .. } => {
                self.driver.stop(&self.drive);
                tracing::debug!(abandoned = ?target, "settle preempted by new swipe");
            }
            SwipePhase::Idle => {}
        }

        let origin = self.drive.value();
        self.phase = SwipePhase::Tracking {
            origin,
            locked_scroll: false,
        };
        if state.dx.is_finite() && !self.ignores(state.dx) {
            self.engage_scroll_lock();
        }
        tracing::debug!(origin, reveal = ?self.reveal(), "swipe granted");
    }

    fn on_move(&mut self, state: &GestureState) {
        let SwipePhase::Tracking { origin, .. } = self.phase else {
            return;
        };
        if !state.dx.is_finite() {
            tracing::trace!("sample with non-finite displacement discarded");
            return;
        }
        if self.ignores(state.dx) {
            tracing::trace!(dx = state.dx, "sample discarded while hidden");
            return;
        }

        self.engage_scroll_lock();
        let value = origin + state.dx;
        tracing::trace!(dx = state.dx, value, "swipe move");
        self.drive.set_value(value);
    }

    fn on_release(&mut self, state: &GestureState) {
        if !matches!(self.phase, SwipePhase::Tracking { .. }) {
            return;
        }
        self.release_scroll_lock();

        if !state.dx.is_finite() || !self.drive.value().is_finite() {
            self.phase = SwipePhase::Idle;
            self.snap_to_rest();
            tracing::warn!(dx = state.dx, "release with non-finite position, returned to rest");
            return;
        }
        if self.ignores(state.dx) {
            self.phase = SwipePhase::Idle;
            self.snap_to_rest();
            tracing::debug!(dx = state.dx, "release ignored while hidden");
            return;
        }

        let target = self.reveal().toggled();
        let to = target.rest_value(self.layout.width());
        self.settle_generation += 1;
        let generation = self.settle_generation;
        self.phase = SwipePhase::Settling { target, generation };

        let core = self.this.clone();
        self.driver.spring(&self.drive, self.spring, to, move |end| {
            if let Some(core) = core.upgrade() {
                core.lock().finish_settle(generation, end);
            }
        });
        tracing::debug!(dx = state.dx, to, state = ?target, "swipe released");
    }

    fn on_terminate(&mut self, state: &GestureState) {
        if !matches!(self.phase, SwipePhase::Tracking { .. }) {
            return;
        }
        self.release_scroll_lock();
        self.phase = SwipePhase::Idle;
        self.snap_to_rest();
        tracing::debug!(dx = state.dx, "swipe terminated");
    }
}

impl Drop for SwipeCore {
    fn drop(&mut self) {
        self.driver.stop(&self.drive);
        self.release_scroll_lock();
    }
}

/// One rendered frame of a [`LeftSwipe`]
#[derive(Debug, Clone)]
pub struct SwipeFrame<P> {
    /// Live transform for the row holding the panel and the foreground
    pub style: TransformStyle,
    /// `style` resolved at render time
    pub transform: Vec<ResolvedTransform>,
    /// Output of the left panel renderer, if one is set
    pub panel: Option<P>,
    /// Current rest state
    pub reveal: RevealState,
    /// Current drive value
    pub drive: f64,
}

type PanelRenderer<P> = Box<dyn FnMut(&LayoutReporter) -> P + Send>;

/// Swipe-to-reveal container with a hidden left panel
///
/// # Example
///
/// ```
/// use app_platform::Platform;
/// use app_state::ScrollContext;
/// use app_ui::animation::AnimationDriver;
/// use app_ui::config::SwipeConfig;
/// use app_ui::gesture::PointerEvent;
/// use app_ui::layout::LayoutEvent;
/// use app_ui::swipe::{LeftSwipe, RevealState};
/// use std::time::Duration;
///
/// let driver = AnimationDriver::new();
/// let scroll = ScrollContext::new();
/// let config = SwipeConfig {
///     platform: Some(Platform::Ios),
///     ..SwipeConfig::default()
/// };
/// let mut swipe = LeftSwipe::new(driver.clone(), scroll.as_lock(), &config);
/// swipe.on_layout(LayoutEvent::sized(100.0, 60.0));
///
/// swipe.handle_pointer(PointerEvent::down(0.0, 0.0, 0.0));
/// swipe.handle_pointer(PointerEvent::moved(60.0, 0.0, 16.0));
/// assert_eq!(swipe.drive().value(), 60.0);
///
/// swipe.handle_pointer(PointerEvent::up(60.0, 0.0, 32.0));
/// for _ in 0..300 {
///     driver.tick(Duration::from_millis(16));
/// }
/// assert_eq!(swipe.reveal_state(), RevealState::Shown);
/// assert_eq!(swipe.drive().value(), 100.0);
/// ```
pub struct LeftSwipe<P = ()> {
    core: Arc<Mutex<SwipeCore>>,
    drive: AnimatedValue,
    layout: LayoutReporter,
    recognizer: PanRecognizer,
    left: Option<PanelRenderer<P>>,
    style: MemoTransformStyle<u64>,
}

impl LeftSwipe<()> {
    /// Create a container without a left panel
    pub fn new(
        driver: AnimationDriver,
        scroll_lock: Arc<dyn ScrollLock>,
        config: &SwipeConfig,
    ) -> Self {
        let policy = config.gesture_policy();
        let spring = match config.spring.validate() {
            Ok(()) => config.spring,
            Err(e) => {
                tracing::warn!("Invalid swipe spring, using the default: {}", e);
                SpringConfig::default()
            }
        };
        let drive = AnimatedValue::new(0.0);
        let layout = LayoutReporter::new();

        let core = Arc::new_cyclic(|this| {
            Mutex::new(SwipeCore {
                this: this.clone(),
                drive: drive.clone(),
                layout: layout.clone(),
                driver,
                scroll_lock,
                policy,
                spring,
                phase: SwipePhase::Idle,
                shown: Toggle::default(),
                settle_generation: 0,
                seen_layout_generation: 0,
            })
        });
        tracing::debug!(
            platform = %policy.platform,
            locks_scroll = policy.locks_scroll_during_swipe,
            "swipe created"
        );

        Self {
            core,
            drive,
            layout,
            recognizer: PanRecognizer::new(&policy),
            left: None,
            style: MemoTransformStyle::new(),
        }
    }
}

impl<P> LeftSwipe<P> {
    /// Set the renderer for the hidden left panel
    ///
    /// The renderer receives the reporter the panel uses to report its
    /// measured layout.
    pub fn with_left<Q, F>(self, render: F) -> LeftSwipe<Q>
    where
        F: FnMut(&LayoutReporter) -> Q + Send + 'static,
    {
        LeftSwipe {
            core: self.core,
            drive: self.drive,
            layout: self.layout,
            recognizer: self.recognizer,
            left: Some(Box::new(render)),
            style: self.style,
        }
    }

    /// Feed a raw pointer event
    pub fn handle_pointer(&mut self, event: PointerEvent) {
        for pan in self.recognizer.handle(event) {
            self.handle_pan(&pan);
        }
    }

    /// Feed a pan event from an external recognizer
    pub fn handle_pan(&self, event: &PanEvent) {
        self.core.lock().dispatch(event);
    }

    /// Record the left panel's measured layout
    pub fn on_layout(&self, event: LayoutEvent) {
        self.layout.report(event);
        self.core.lock().sync_layout();
    }

    /// Render the current frame
    ///
    /// Runs the panel renderer, then returns the row transform. The
    /// transform is rebuilt only when the panel's size changed.
    pub fn render(&mut self) -> SwipeFrame<P> {
        let panel = self.left.as_mut().map(|render| render(&self.layout));

        let (reveal, layout) = {
            let mut core = self.core.lock();
            core.sync_layout();
            (core.reveal(), core.layout.snapshot())
        };

        let drive = &self.drive;
        let style = self
            .style
            .get(&layout.generation(), || row_style(drive, layout.width()))
            .clone();

        SwipeFrame {
            transform: style.resolve(),
            style,
            panel,
            reveal,
            drive: self.drive.value(),
        }
    }

    /// Current rest state
    pub fn reveal_state(&self) -> RevealState {
        self.core.lock().reveal()
    }

    /// Current phase
    pub fn phase(&self) -> SwipePhase {
        self.core.lock().phase
    }

    /// The drive value (`0` hidden, panel width shown)
    pub fn drive(&self) -> &AnimatedValue {
        &self.drive
    }

    /// The panel's layout
    pub fn layout(&self) -> &LayoutReporter {
        &self.layout
    }
}

impl<P> fmt::Debug for LeftSwipe<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let core = self.core.lock();
        f.debug_struct("LeftSwipe")
            .field("phase", &core.phase)
            .field("reveal", &core.reveal())
            .field("drive", &self.drive.value())
            .field("width", &core.layout.width())
            .finish()
    }
}

// Drive 0 puts the row at -width so the panel sits off the left edge.
fn row_style(drive: &AnimatedValue, width: f64) -> TransformStyle {
    if width <= 0.0 {
        return TransformStyle::new(vec![Transform::translate_x(0.0)]);
    }
    let offset = InterpolationConfig::new([0.0, width], [-width, 0.0]);
    match drive.interpolate(offset) {
        Ok(binding) => TransformStyle::new(vec![Transform::translate_x(binding)]),
        Err(e) => {
            tracing::warn!("Failed to bind swipe offset: {}", e);
            TransformStyle::new(vec![Transform::translate_x(0.0)])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use app_platform::Platform;
    use app_state::ScrollContext;
    use mockall::{mock, predicate::eq, Sequence};
    use std::time::Duration;

    mock! {
        pub Lock {}

        impl ScrollLock for Lock {
            fn scroll_enabled(&self) -> bool;
            fn set_scroll_enabled(&self, enabled: bool);
        }
    }

    fn config(platform: Platform) -> SwipeConfig {
        SwipeConfig {
            platform: Some(platform),
            ..SwipeConfig::default()
        }
    }

    fn measured(
        driver: &AnimationDriver,
        lock: Arc<dyn ScrollLock>,
        platform: Platform,
    ) -> LeftSwipe {
        let swipe = LeftSwipe::new(driver.clone(), lock, &config(platform));
        swipe.on_layout(LayoutEvent::sized(100.0, 60.0));
        swipe
    }

    fn press_and_drag(swipe: &mut LeftSwipe, dx: f64) {
        swipe.handle_pointer(PointerEvent::down(200.0, 300.0, 0.0));
        swipe.handle_pointer(PointerEvent::moved(200.0 + dx, 300.0, 16.0));
    }

    fn lift(swipe: &mut LeftSwipe, dx: f64) {
        swipe.handle_pointer(PointerEvent::up(200.0 + dx, 300.0, 32.0));
    }

    fn swipe_by(swipe: &mut LeftSwipe, dx: f64) {
        press_and_drag(swipe, dx);
        lift(swipe, dx);
    }

    fn settle(driver: &AnimationDriver) {
        for _ in 0..300 {
            driver.tick(Duration::from_millis(16));
        }
    }

    #[test]
    fn test_open_then_close() {
        let driver = AnimationDriver::new();
        let scroll = ScrollContext::new();
        let mut swipe = measured(&driver, scroll.as_lock(), Platform::Ios);

        press_and_drag(&mut swipe, 60.0);
        assert_eq!(swipe.drive().value(), 60.0);
        assert!(!scroll.scroll_enabled());
        lift(&mut swipe, 60.0);
        assert!(scroll.scroll_enabled());
        assert!(matches!(
            swipe.phase(),
            SwipePhase::Settling {
                target: RevealState::Shown,
                ..
            }
        ));

        settle(&driver);
        assert_eq!(swipe.reveal_state(), RevealState::Shown);
        assert_eq!(swipe.drive().value(), 100.0);
        assert_eq!(swipe.phase(), SwipePhase::Idle);

        press_and_drag(&mut swipe, -30.0);
        assert_eq!(swipe.drive().value(), 70.0);
        lift(&mut swipe, -30.0);
        settle(&driver);
        assert_eq!(swipe.reveal_state(), RevealState::Hidden);
        assert_eq!(swipe.drive().value(), 0.0);
    }

    #[test]
    fn test_release_toggles_regardless_of_direction() {
        let driver = AnimationDriver::new();
        let mut swipe = measured(&driver, ScrollContext::new().as_lock(), Platform::Android);

        for n in 1..=6 {
            swipe_by(&mut swipe, 40.0);
            settle(&driver);
            let expected = if n % 2 == 1 {
                RevealState::Shown
            } else {
                RevealState::Hidden
            };
            assert_eq!(swipe.reveal_state(), expected, "after {} gestures", n);
            assert_eq!(swipe.drive().value(), expected.rest_value(100.0));
        }
    }

    #[test]
    fn test_drag_is_not_clamped_while_tracking() {
        let driver = AnimationDriver::new();
        let mut swipe = measured(&driver, ScrollContext::new().as_lock(), Platform::Android);

        press_and_drag(&mut swipe, 160.0);
        assert_eq!(swipe.drive().value(), 160.0);
        lift(&mut swipe, 160.0);
        settle(&driver);
        assert_eq!(swipe.drive().value(), 100.0);
    }

    #[test]
    fn test_leftward_drag_while_hidden_is_ignored() {
        let driver = AnimationDriver::new();
        let mut lock = MockLock::new();
        lock.expect_set_scroll_enabled().never();
        let mut swipe = measured(&driver, Arc::new(lock), Platform::Ios);

        press_and_drag(&mut swipe, -50.0);
        assert_eq!(swipe.drive().value(), 0.0);
        swipe.handle_pointer(PointerEvent::moved(120.0, 300.0, 24.0));
        assert_eq!(swipe.drive().value(), 0.0);

        lift(&mut swipe, -80.0);
        assert_eq!(swipe.phase(), SwipePhase::Idle);
        assert_eq!(driver.active_count(), 0);
        assert_eq!(swipe.reveal_state(), RevealState::Hidden);
    }

    #[test]
    fn test_lock_engaged_once_when_drag_turns_right() {
        let driver = AnimationDriver::new();
        let mut lock = MockLock::new();
        let mut seq = Sequence::new();
        lock.expect_set_scroll_enabled()
            .with(eq(false))
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());
        lock.expect_set_scroll_enabled()
            .with(eq(true))
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());
        let mut swipe = measured(&driver, Arc::new(lock), Platform::Ios);

        press_and_drag(&mut swipe, -20.0);
        swipe.handle_pointer(PointerEvent::moved(230.0, 300.0, 24.0));
        assert_eq!(swipe.drive().value(), 30.0);
        swipe.handle_pointer(PointerEvent::moved(260.0, 300.0, 28.0));
        lift(&mut swipe, 60.0);
    }

    #[test]
    fn test_scroll_lock_bracketing_on_ios() {
        let driver = AnimationDriver::new();
        let mut lock = MockLock::new();
        let mut seq = Sequence::new();
        for _ in 0..2 {
            lock.expect_set_scroll_enabled()
                .with(eq(false))
                .times(1)
                .in_sequence(&mut seq)
                .return_const(());
            lock.expect_set_scroll_enabled()
                .with(eq(true))
                .times(1)
                .in_sequence(&mut seq)
                .return_const(());
        }
        let mut swipe = measured(&driver, Arc::new(lock), Platform::Ios);

        press_and_drag(&mut swipe, 30.0);
        for step in 1..10 {
            let step = step as f64;
            swipe.handle_pointer(PointerEvent::moved(230.0 + step, 300.0, 16.0 + step));
        }
        lift(&mut swipe, 40.0);
        settle(&driver);

        swipe_by(&mut swipe, -50.0);
        settle(&driver);
        assert_eq!(swipe.reveal_state(), RevealState::Hidden);
    }

    #[test]
    fn test_scroll_lock_untouched_on_android() {
        let driver = AnimationDriver::new();
        let mut lock = MockLock::new();
        lock.expect_set_scroll_enabled().never();
        let mut swipe = measured(&driver, Arc::new(lock), Platform::Android);

        swipe_by(&mut swipe, 60.0);
        settle(&driver);
        assert_eq!(swipe.reveal_state(), RevealState::Shown);
    }

    #[test]
    fn test_unmeasured_panel_ignores_gestures() {
        let driver = AnimationDriver::new();
        let scroll = ScrollContext::new();
        let mut swipe = LeftSwipe::new(driver.clone(), scroll.as_lock(), &config(Platform::Ios));

        swipe_by(&mut swipe, 50.0);
        settle(&driver);
        assert_eq!(swipe.drive().value(), 0.0);
        assert_eq!(swipe.reveal_state(), RevealState::Hidden);
        assert_eq!(swipe.phase(), SwipePhase::Idle);
        assert_eq!(scroll.write_count(), 0);
    }

    #[test]
    fn test_new_gesture_preempts_settle() {
        let driver = AnimationDriver::new();
        let mut swipe = measured(&driver, ScrollContext::new().as_lock(), Platform::Android);

        swipe_by(&mut swipe, 60.0);
        for _ in 0..3 {
            driver.tick(Duration::from_millis(16));
        }
        let mid_flight = swipe.drive().value();
        assert!(mid_flight > 60.0 && mid_flight < 100.0);

        press_and_drag(&mut swipe, 20.0);
        assert!(matches!(swipe.phase(), SwipePhase::Tracking { .. }));
        assert_eq!(driver.active_count(), 0);
        assert_eq!(swipe.drive().value(), mid_flight + 20.0);

        // The abandoned settle never completes
        settle(&driver);
        assert_eq!(swipe.reveal_state(), RevealState::Hidden);

        lift(&mut swipe, 20.0);
        settle(&driver);
        assert_eq!(swipe.reveal_state(), RevealState::Shown);
        assert_eq!(swipe.drive().value(), 100.0);
    }

    #[test]
    fn test_terminate_returns_to_rest() {
        let driver = AnimationDriver::new();
        let scroll = ScrollContext::new();
        let mut swipe = measured(&driver, scroll.as_lock(), Platform::Ios);

        press_and_drag(&mut swipe, 60.0);
        swipe.handle_pointer(PointerEvent::Cancel);
        assert!(scroll.scroll_enabled());
        assert_eq!(swipe.phase(), SwipePhase::Idle);
        assert_eq!(swipe.drive().value(), 0.0);
        assert_eq!(swipe.reveal_state(), RevealState::Hidden);
    }

    #[test]
    fn test_release_without_grant_is_noop() {
        let driver = AnimationDriver::new();
        let swipe = measured(&driver, ScrollContext::new().as_lock(), Platform::Ios);

        swipe.handle_pan(&PanEvent::Release(GestureState {
            dx: 80.0,
            ..GestureState::default()
        }));
        assert_eq!(swipe.phase(), SwipePhase::Idle);
        assert_eq!(driver.active_count(), 0);
    }

    #[test]
    fn test_resize_while_shown_moves_rest_value() {
        let driver = AnimationDriver::new();
        let mut swipe = measured(&driver, ScrollContext::new().as_lock(), Platform::Android);
        swipe_by(&mut swipe, 60.0);
        settle(&driver);

        swipe.on_layout(LayoutEvent::sized(160.0, 60.0));
        assert_eq!(swipe.drive().value(), 160.0);
        assert_eq!(swipe.render().transform, vec![ResolvedTransform::TranslateX(0.0)]);
    }

    #[test]
    fn test_render_follows_drive_and_panel_layout() {
        let driver = AnimationDriver::new();
        let mut swipe = LeftSwipe::new(
            driver.clone(),
            ScrollContext::new().as_lock(),
            &config(Platform::Android),
        )
        .with_left(|reporter: &LayoutReporter| {
            reporter.report(LayoutEvent::sized(80.0, 40.0));
            "panel"
        });

        let frame = swipe.render();
        assert_eq!(frame.panel, Some("panel"));
        assert_eq!(frame.reveal, RevealState::Hidden);
        assert_eq!(frame.transform, vec![ResolvedTransform::TranslateX(-80.0)]);

        swipe.handle_pointer(PointerEvent::down(0.0, 0.0, 0.0));
        swipe.handle_pointer(PointerEvent::moved(20.0, 0.0, 16.0));
        // The live style follows the drive without a re-render
        assert_eq!(frame.style.resolve(), vec![ResolvedTransform::TranslateX(-60.0)]);
    }

    #[test]
    fn test_unmeasured_render_is_hidden_at_origin() {
        let mut swipe = LeftSwipe::new(
            AnimationDriver::new(),
            ScrollContext::new().as_lock(),
            &config(Platform::Ios),
        );
        let frame = swipe.render();
        assert_eq!(frame.panel, None);
        assert_eq!(frame.transform, vec![ResolvedTransform::TranslateX(0.0)]);
    }

    #[test]
    fn test_drop_mid_gesture_releases_lock() {
        let driver = AnimationDriver::new();
        let scroll = ScrollContext::new();
        let mut swipe = measured(&driver, scroll.as_lock(), Platform::Ios);

        press_and_drag(&mut swipe, 60.0);
        assert!(!scroll.scroll_enabled());
        drop(swipe);
        assert!(scroll.scroll_enabled());
    }

    #[test]
    fn test_drop_while_settling_stops_spring() {
        let driver = AnimationDriver::new();
        let mut swipe = measured(&driver, ScrollContext::new().as_lock(), Platform::Android);
        swipe_by(&mut swipe, 60.0);
        assert_eq!(driver.active_count(), 1);

        drop(swipe);
        assert_eq!(driver.active_count(), 0);
    }

    #[test]
    fn test_non_finite_pointer_samples_never_reach_drive() {
        let driver = AnimationDriver::new();
        let scroll = ScrollContext::new();
        let mut swipe = measured(&driver, scroll.as_lock(), Platform::Ios);

        swipe.handle_pointer(PointerEvent::down(0.0, 0.0, 0.0));
        swipe.handle_pointer(PointerEvent::moved(40.0, 0.0, 16.0));
        swipe.handle_pointer(PointerEvent::moved(f64::NAN, 0.0, 24.0));
        assert_eq!(swipe.drive().value(), 40.0);

        swipe.handle_pointer(PointerEvent::up(f64::NAN, 0.0, 32.0));
        for _ in 0..10_000 {
            driver.tick(Duration::from_millis(16));
        }
        assert_eq!(swipe.phase(), SwipePhase::Idle);
        assert_eq!(swipe.reveal_state(), RevealState::Shown);
        assert_eq!(swipe.drive().value(), 100.0);
        assert_eq!(driver.active_count(), 0);
        assert!(scroll.scroll_enabled());
    }

    #[test]
    fn test_non_finite_pan_events_return_to_rest() {
        let driver = AnimationDriver::new();
        let scroll = ScrollContext::new();
        let swipe = measured(&driver, scroll.as_lock(), Platform::Ios);
        let pan = |dx: f64| GestureState {
            dx,
            ..GestureState::default()
        };

        swipe.handle_pan(&PanEvent::Grant(pan(30.0)));
        swipe.handle_pan(&PanEvent::Move(pan(30.0)));
        swipe.handle_pan(&PanEvent::Move(pan(f64::NAN)));
        assert_eq!(swipe.drive().value(), 30.0);

        swipe.handle_pan(&PanEvent::Release(pan(f64::INFINITY)));
        assert_eq!(swipe.phase(), SwipePhase::Idle);
        assert_eq!(swipe.drive().value(), 0.0);
        assert_eq!(driver.active_count(), 0);
        assert!(scroll.scroll_enabled());
    }

    #[test]
    fn test_invalid_spring_falls_back_to_default() {
        let driver = AnimationDriver::new();
        for spring in [
            SpringConfig {
                mass: 0.0,
                ..SpringConfig::default()
            },
            SpringConfig {
                damping: 0.0,
                ..SpringConfig::default()
            },
        ] {
            let swipe_config = SwipeConfig {
                spring,
                ..config(Platform::Android)
            };
            let mut swipe =
                LeftSwipe::new(driver.clone(), ScrollContext::new().as_lock(), &swipe_config);
            swipe.on_layout(LayoutEvent::sized(100.0, 60.0));

            swipe_by(&mut swipe, 40.0);
            settle(&driver);
            assert_eq!(swipe.phase(), SwipePhase::Idle);
            assert_eq!(swipe.reveal_state(), RevealState::Shown);
            assert_eq!(swipe.drive().value(), 100.0);
        }
    }

    #[test]
    fn test_leftward_release_after_preempt_jumps_to_hidden() {
        let driver = AnimationDriver::new();
        let mut swipe = measured(&driver, ScrollContext::new().as_lock(), Platform::Android);

        swipe_by(&mut swipe, 60.0);
        for _ in 0..3 {
            driver.tick(Duration::from_millis(16));
        }
        let mid_flight = swipe.drive().value();
        assert!(mid_flight > 60.0);

        press_and_drag(&mut swipe, -30.0);
        assert_eq!(swipe.drive().value(), mid_flight);
        lift(&mut swipe, -30.0);

        assert_eq!(swipe.phase(), SwipePhase::Idle);
        assert_eq!(swipe.drive().value(), 0.0);
        assert_eq!(swipe.reveal_state(), RevealState::Hidden);
        assert_eq!(driver.active_count(), 0);
    }

    #[test]
    fn test_reveal_state_json() {
        assert_eq!(serde_json::to_string(&RevealState::Shown).unwrap(), r#""shown""#);
    }
}
