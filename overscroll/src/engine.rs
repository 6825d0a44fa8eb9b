use alloc::boxed::Box;
use alloc::string::{String, ToString};
use alloc::sync::Arc;
use core::cell::Cell;

use crate::indicator::{ElasticIndicator, Indicator};
use crate::snapshot::{EdgeSnapshot, EngineSnapshot};
use crate::tracker::DragTracker;
use crate::{DragOutcome, Edge, EdgePhase, OverscrollOptions};

struct QueuedCompletion {
    result: Option<String>,
    delay_ms: u64,
}

/// One edge's drag session. At most one session is active per edge; the
/// session object itself lives for the engine's lifetime.
struct EdgeSession {
    indicator: Option<Box<dyn Indicator + Send>>,
    /// The edge only drags elastically; releases never trigger. Set when the
    /// indicator slot is backed by the built-in [`ElasticIndicator`].
    elastic_only: bool,
    phase: EdgePhase,
    drag_height: u32,
    threshold: u32,
    dragging: bool,
    queued: Option<QueuedCompletion>,
    settle_deadline_ms: Option<u64>,
}

impl EdgeSession {
    fn new() -> Self {
        Self {
            indicator: None,
            elastic_only: false,
            phase: EdgePhase::Idle,
            drag_height: 0,
            threshold: 0,
            dragging: false,
            queued: None,
            settle_deadline_ms: None,
        }
    }

    /// Whether drag input is currently routed to this edge. Missing indicator
    /// disables the edge; `Triggered`/`Completing` sessions ignore new
    /// gestures until completion.
    fn accepts_drag(&self) -> bool {
        self.indicator.is_some()
            && !matches!(self.phase, EdgePhase::Triggered | EdgePhase::Completing)
    }
}

/// A headless pull-to-refresh / load-more engine.
///
/// This type is intentionally UI-agnostic:
/// - It does not hold any UI objects; visual feedback goes through the
///   per-edge [`Indicator`] bindings.
/// - Your adapter drives it by forwarding pointer input for whichever content
///   edge the list is resting against, plus a monotonic clock for completion
///   delays (`tick`).
/// - All processing is synchronous on the caller's thread; there are no
///   internal timers or threads.
///
/// For settle/rebound animations and indicator offset math, see the
/// `overscroll-adapter` crate.
pub struct Overscroll {
    options: OverscrollOptions,
    tracker: DragTracker,
    sessions: [EdgeSession; 2],

    notify_depth: Cell<usize>,
    notify_pending: Cell<bool>,
}

impl Overscroll {
    pub fn new(options: OverscrollOptions) -> Self {
        odebug!(
            drag_coefficient = options.drag_coefficient,
            settle_delay_ms = options.settle_delay_ms,
            "Overscroll::new"
        );
        Self {
            options,
            tracker: DragTracker::new(),
            sessions: [EdgeSession::new(), EdgeSession::new()],
            notify_depth: Cell::new(0),
            notify_pending: Cell::new(false),
        }
    }

    pub fn options(&self) -> &OverscrollOptions {
        &self.options
    }

    pub fn set_options(&mut self, mut options: OverscrollOptions) {
        if options.drag_coefficient.is_nan() {
            owarn!("set_options: NaN drag_coefficient, keeping previous");
            options.drag_coefficient = self.options.drag_coefficient;
        } else {
            options.drag_coefficient = options.drag_coefficient.clamp(0.0, 1.0);
        }
        self.options = options;
        otrace!(
            drag_coefficient = self.options.drag_coefficient,
            settle_delay_ms = self.options.settle_delay_ms,
            "Overscroll::set_options"
        );
        self.notify();
    }

    /// Clones the current options, applies `f`, then delegates to
    /// `set_options`.
    pub fn update_options(&mut self, f: impl FnOnce(&mut OverscrollOptions)) {
        let mut next = self.options.clone();
        f(&mut next);
        self.set_options(next);
    }

    pub fn set_drag_coefficient(&mut self, coefficient: f32) {
        if coefficient.is_nan() {
            owarn!("set_drag_coefficient: NaN, keeping previous");
            return;
        }
        self.options.drag_coefficient = coefficient.clamp(0.0, 1.0);
        self.notify();
    }

    pub fn set_max_drag_height(&mut self, max_drag_height: Option<u32>) {
        self.options.max_drag_height = max_drag_height;
        self.notify();
    }

    pub fn set_settle_delay_ms(&mut self, settle_delay_ms: u64) {
        self.options.settle_delay_ms = settle_delay_ms;
        self.notify();
    }

    pub fn set_on_refresh(&mut self, on_refresh: Option<impl Fn() + Send + Sync + 'static>) {
        self.options.on_refresh = on_refresh.map(|f| Arc::new(f) as _);
        self.notify();
    }

    pub fn set_on_load_more(&mut self, on_load_more: Option<impl Fn() + Send + Sync + 'static>) {
        self.options.on_load_more = on_load_more.map(|f| Arc::new(f) as _);
        self.notify();
    }

    pub fn set_on_change(&mut self, on_change: Option<impl Fn(&Overscroll) + Send + Sync + 'static>) {
        self.options.on_change = on_change.map(|f| Arc::new(f) as _);
        self.notify();
    }

    fn notify_now(&self) {
        if let Some(cb) = &self.options.on_change {
            cb(self);
        }
    }

    fn notify(&self) {
        if self.notify_depth.get() > 0 {
            self.notify_pending.set(true);
            return;
        }
        self.notify_now();
    }

    /// Batches multiple updates into a single `on_change` notification.
    ///
    /// This is recommended for UI adapters: a single pointer event often
    /// updates the drag height and the phase together. Without batching, each
    /// setter may trigger `on_change`, which can be expensive if the callback
    /// drives rendering.
    pub fn batch_update(&mut self, f: impl FnOnce(&mut Self)) {
        let depth = self.notify_depth.get();
        self.notify_depth.set(depth.saturating_add(1));

        f(self);

        let depth = self.notify_depth.get();
        debug_assert!(depth > 0, "notify_depth underflow");
        let next = depth.saturating_sub(1);
        self.notify_depth.set(next);

        if next == 0 && self.notify_pending.replace(false) {
            self.notify_now();
        }
    }

    /// Binds (or replaces) the indicator for an edge.
    ///
    /// The indicator's `height()` becomes the edge's trigger threshold; a
    /// zero height is clamped to 1.
    pub fn set_indicator(&mut self, edge: Edge, indicator: Box<dyn Indicator + Send>) {
        let height = indicator.height();
        if height == 0 {
            owarn!(?edge, "set_indicator: zero-height indicator, clamping threshold to 1");
            debug_assert!(height > 0, "indicator height must be nonzero");
        }
        let session = &mut self.sessions[edge.index()];
        session.indicator = Some(indicator);
        session.elastic_only = false;
        session.threshold = height.max(1);
        odebug!(?edge, threshold = session.threshold, "set_indicator");
        self.notify();
    }

    pub fn has_indicator(&self, edge: Edge) -> bool {
        self.sessions[edge.index()].indicator.is_some()
    }

    pub fn indicator_mut(&mut self, edge: Edge) -> Option<&mut (dyn Indicator + Send + 'static)> {
        self.sessions[edge.index()].indicator.as_deref_mut()
    }

    /// Enables/disables elastic dragging on an edge that has no indicator.
    ///
    /// Enabling on a bare edge installs the built-in [`ElasticIndicator`]:
    /// the edge drags elastically but a release never triggers. Edges with a
    /// real indicator already drag elastically; enabling is then a no-op.
    /// Disabling only removes the built-in indicator, never a real one.
    pub fn set_elastic(&mut self, edge: Edge, enabled: bool) {
        let session = &mut self.sessions[edge.index()];
        if enabled {
            if session.indicator.is_none() {
                session.indicator = Some(Box::new(ElasticIndicator));
                session.elastic_only = true;
                session.threshold = 1;
                odebug!(?edge, "set_elastic: installed elastic-only indicator");
            }
        } else if session.elastic_only {
            session.indicator = None;
            session.elastic_only = false;
            session.threshold = 0;
        }
        self.notify();
    }

    pub fn phase(&self, edge: Edge) -> EdgePhase {
        self.sessions[edge.index()].phase
    }

    pub fn drag_height(&self, edge: Edge) -> u32 {
        self.sessions[edge.index()].drag_height
    }

    pub fn threshold(&self, edge: Edge) -> u32 {
        self.sessions[edge.index()].threshold
    }

    /// Whether any edge has an in-progress drag gesture.
    pub fn is_edge_dragging(&self) -> bool {
        self.sessions.iter().any(|s| s.dragging)
    }

    /// Starts a positional gesture (pointer/finger down).
    pub fn pointer_down(&mut self, pos: f32) {
        self.tracker.pointer_down(pos);
    }

    /// Marks the next pointer position as coming from a different pointer
    /// (multi-touch hand-off).
    pub fn pointer_changed(&mut self) {
        self.tracker.pointer_changed();
    }

    /// Feeds a pointer position for the edge the list is resting against.
    ///
    /// The host decides the edge: call with `Edge::Top` when the list cannot
    /// scroll further up, `Edge::Bottom` when it cannot scroll further down.
    /// Returns whether the edge consumed the event; unconsumed events should
    /// go to the host's normal scrolling.
    pub fn pointer_move(&mut self, edge: Edge, pos: f32) -> DragOutcome {
        if !self.sessions[edge.index()].accepts_drag() {
            return DragOutcome::unconsumed(self.drag_height(edge));
        }
        let distance = self
            .tracker
            .pointer_move(pos, self.options.drag_coefficient);
        self.apply_distance(edge, distance)
    }

    /// Delta-driven alternative to `pointer_move`, for hosts that report raw
    /// scroll deltas. Positive deltas point down the scroll axis.
    pub fn drag_by(&mut self, edge: Edge, raw_delta: f32) -> DragOutcome {
        if !self.sessions[edge.index()].accepts_drag() {
            return DragOutcome::unconsumed(self.drag_height(edge));
        }
        let distance = self.tracker.drag_by(raw_delta, self.options.drag_coefficient);
        self.apply_distance(edge, distance)
    }

    fn apply_distance(&mut self, edge: Edge, distance: i64) -> DragOutcome {
        // Positive tracker distance points down the scroll axis, which is
        // past the top edge; past the bottom edge it is negative.
        let toward_edge = match edge {
            Edge::Top => distance,
            Edge::Bottom => -distance,
        };
        let max_drag_height = self.options.max_drag_height;
        let session = &mut self.sessions[edge.index()];

        if toward_edge <= 0 {
            // Back within content bounds: the session unwinds but the gesture
            // stays alive until release.
            if session.dragging && session.drag_height != 0 {
                session.drag_height = 0;
                session.phase = EdgePhase::Idle;
                if let Some(indicator) = session.indicator.as_mut() {
                    indicator.on_pulling(0, session.threshold);
                }
                self.notify();
            }
            return DragOutcome::unconsumed(0);
        }

        let mut height = toward_edge.min(u32::MAX as i64) as u32;
        if let Some(cap) = max_drag_height {
            height = height.min(cap);
        }

        session.dragging = true;
        session.drag_height = height;
        session.phase = if height >= session.threshold {
            EdgePhase::ReadyToTrigger
        } else {
            EdgePhase::Pulling
        };
        let threshold = session.threshold;
        if let Some(indicator) = session.indicator.as_mut() {
            indicator.on_pulling(height, threshold);
        }
        otrace!(?edge, height, threshold, phase = ?self.sessions[edge.index()].phase, "drag update");
        self.notify();
        DragOutcome::consumed(height)
    }

    /// Ends the gesture on an edge (pointer/finger up).
    ///
    /// Returns `true` when the edge triggered: the session moved to
    /// `Triggered`, the indicator got `on_active`, and the external
    /// `on_refresh`/`on_load_more` listener fired. A completion queued during
    /// the gesture is applied immediately after.
    ///
    /// On a non-triggering release the session returns to `Idle`; the adapter
    /// is expected to animate the visual rebound.
    pub fn release(&mut self, edge: Edge, now_ms: u64) -> bool {
        self.tracker.release();

        let session = &mut self.sessions[edge.index()];
        if !session.dragging {
            return false;
        }
        session.dragging = false;

        if session.phase != EdgePhase::ReadyToTrigger || session.elastic_only {
            session.phase = EdgePhase::Idle;
            session.drag_height = 0;
            session.queued = None;
            self.notify();
            return false;
        }

        session.phase = EdgePhase::Triggered;
        // The indicator settles at its fully-shown position while active.
        session.drag_height = session.threshold;
        if let Some(indicator) = session.indicator.as_mut() {
            indicator.on_active();
        }
        odebug!(?edge, "triggered");

        let listener = match edge {
            Edge::Top => self.options.on_refresh.clone(),
            Edge::Bottom => self.options.on_load_more.clone(),
        };
        if let Some(cb) = listener {
            cb();
        }

        if let Some(queued) = self.sessions[edge.index()].queued.take() {
            self.complete(edge, queued.result.as_deref(), queued.delay_ms, now_ms);
        } else {
            self.notify();
        }
        true
    }

    /// External completion signal for an edge.
    ///
    /// - `Triggered`: the indicator gets `on_complete(result)` and the
    ///   session moves to `Completing` until `now_ms + delay_ms` (minimum
    ///   visible duration), driven by `tick`.
    /// - `Pulling`/`ReadyToTrigger` (gesture not yet released): queued, and
    ///   applied as soon as the edge triggers.
    /// - `Idle`/`Completing`: no-op, so calling complete twice is idempotent.
    pub fn complete(&mut self, edge: Edge, result: Option<&str>, delay_ms: u64, now_ms: u64) {
        let session = &mut self.sessions[edge.index()];
        match session.phase {
            EdgePhase::Triggered => {
                if let Some(indicator) = session.indicator.as_mut() {
                    indicator.on_complete(result);
                }
                session.phase = EdgePhase::Completing;
                session.settle_deadline_ms = Some(now_ms.saturating_add(delay_ms));
                odebug!(?edge, delay_ms, "completing");
                self.notify();
            }
            EdgePhase::Pulling | EdgePhase::ReadyToTrigger => {
                session.queued = Some(QueuedCompletion {
                    result: result.map(|s| s.to_string()),
                    delay_ms,
                });
                otrace!(?edge, "completion queued until trigger");
            }
            EdgePhase::Idle | EdgePhase::Completing => {
                otrace!(?edge, phase = ?session.phase, "complete ignored");
            }
        }
    }

    /// `complete` with the configured default settle delay.
    pub fn complete_default(&mut self, edge: Edge, result: Option<&str>, now_ms: u64) {
        self.complete(edge, result, self.options.settle_delay_ms, now_ms);
    }

    /// Advances pending completion deadlines.
    ///
    /// Call this from your frame loop or timer. When a `Completing` session's
    /// deadline passes, it returns to `Idle` and the drag height resets.
    /// Returns whether any session changed.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        let mut changed = false;
        for session in &mut self.sessions {
            if session.phase == EdgePhase::Completing
                && session.settle_deadline_ms.is_some_and(|d| now_ms >= d)
            {
                session.settle_deadline_ms = None;
                session.phase = EdgePhase::Idle;
                session.drag_height = 0;
                changed = true;
            }
        }
        if changed {
            self.notify();
        }
        changed
    }

    /// Cancels an edge's queued completion and settle deadline.
    ///
    /// A `Completing` session snaps straight to `Idle`; the minimum-display
    /// delay never fires.
    pub fn cancel_pending(&mut self, edge: Edge) {
        let session = &mut self.sessions[edge.index()];
        session.queued = None;
        session.settle_deadline_ms = None;
        if session.phase == EdgePhase::Completing {
            session.phase = EdgePhase::Idle;
            session.drag_height = 0;
        }
        self.notify();
    }

    /// Tears down all in-flight work: gestures abort, queued completions and
    /// settle deadlines are dropped, both edges return to `Idle`.
    ///
    /// Call this when the host view is detached so no delayed completion can
    /// fire against it.
    pub fn detach(&mut self) {
        self.tracker.release();
        for session in &mut self.sessions {
            session.dragging = false;
            session.queued = None;
            session.settle_deadline_ms = None;
            session.phase = EdgePhase::Idle;
            session.drag_height = 0;
        }
        odebug!("detach");
        self.notify();
    }

    /// Returns a lightweight snapshot of one edge's session.
    pub fn edge_snapshot(&self, edge: Edge) -> EdgeSnapshot {
        let session = &self.sessions[edge.index()];
        EdgeSnapshot {
            phase: session.phase,
            drag_height: session.drag_height,
            threshold: session.threshold,
        }
    }

    /// Returns a combined snapshot of both edges.
    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            top: self.edge_snapshot(Edge::Top),
            bottom: self.edge_snapshot(Edge::Bottom),
        }
    }

    /// Restores phases and drag heights from a previously captured snapshot.
    ///
    /// Thresholds stay derived from the bound indicators; queued completions
    /// and settle deadlines are cleared. A snapshot captured in `Completing`
    /// restores as `Idle`: its settle deadline is gone, so the session would
    /// otherwise wait on a tick that can never fire.
    pub fn restore_snapshot(&mut self, snapshot: EngineSnapshot) {
        self.batch_update(|engine| {
            for (edge, snap) in [(Edge::Top, snapshot.top), (Edge::Bottom, snapshot.bottom)] {
                let session = &mut engine.sessions[edge.index()];
                if snap.phase == EdgePhase::Completing {
                    session.phase = EdgePhase::Idle;
                    session.drag_height = 0;
                } else {
                    session.phase = snap.phase;
                    session.drag_height = snap.drag_height;
                }
                session.dragging = false;
                session.queued = None;
                session.settle_deadline_ms = None;
            }
            engine.notify();
        });
    }
}

impl core::fmt::Debug for Overscroll {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Overscroll")
            .field("options", &self.options)
            .field("top", &self.edge_snapshot(Edge::Top))
            .field("bottom", &self.edge_snapshot(Edge::Bottom))
            .field("is_edge_dragging", &self.is_edge_dragging())
            .finish_non_exhaustive()
    }
}
