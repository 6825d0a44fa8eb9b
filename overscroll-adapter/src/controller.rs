use overscroll::{DragOutcome, Edge, EdgePhase, Overscroll, OverscrollOptions};

use crate::{ACTIVE_OFFSET, Tween, indicator_offset, rest_offset};

fn idx(edge: Edge) -> usize {
    match edge {
        Edge::Top => 0,
        Edge::Bottom => 1,
    }
}

/// A framework-neutral controller that wraps an `overscroll::Overscroll` and
/// provides the common adapter workflow: pointer plumbing, settle/rebound
/// tweens, and teardown.
///
/// This type does not hold any UI objects. Adapters drive it by calling:
/// - `on_pointer_down` / `on_pointer_move` / `on_pointer_up` for gestures
/// - `complete` when their refresh/load work finishes
/// - `tick(now_ms)` each frame/timer tick
///
/// `tick` returns the indicator offset to apply to the real widget, so the
/// engine state and the visuals stay in sync. Dropping the controller (or
/// calling [`Controller::detach`]) cancels every pending tween and delayed
/// completion.
#[derive(Debug)]
pub struct Controller {
    engine: Overscroll,
    settle: Option<(Edge, Tween)>,
}

impl Controller {
    pub fn new(options: OverscrollOptions) -> Self {
        Self {
            engine: Overscroll::new(options),
            settle: None,
        }
    }

    pub fn from_engine(engine: Overscroll) -> Self {
        Self {
            engine,
            settle: None,
        }
    }

    pub fn engine(&self) -> &Overscroll {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut Overscroll {
        &mut self.engine
    }

    pub fn into_engine(self) -> Overscroll {
        self.engine
    }

    pub fn is_animating(&self) -> bool {
        self.settle.is_some()
    }

    pub fn cancel_animation(&mut self) {
        self.settle = None;
    }

    pub fn on_pointer_down(&mut self, pos: f32) {
        self.engine.pointer_down(pos);
    }

    pub fn on_pointer_changed(&mut self) {
        self.engine.pointer_changed();
    }

    /// Feeds a pointer position for the edge the list is resting against.
    ///
    /// Grabbing an edge that is mid-rebound cancels its settle tween.
    pub fn on_pointer_move(&mut self, edge: Edge, pos: f32) -> DragOutcome {
        if self.settle.is_some_and(|(e, _)| e == edge) {
            self.settle = None;
        }
        self.engine.pointer_move(edge, pos)
    }

    /// Delta-driven alternative to `on_pointer_move`.
    pub fn on_drag(&mut self, edge: Edge, raw_delta: f32) -> DragOutcome {
        if self.settle.is_some_and(|(e, _)| e == edge) {
            self.settle = None;
        }
        self.engine.drag_by(edge, raw_delta)
    }

    /// Ends the gesture and starts the rebound.
    ///
    /// On a trigger the indicator settles to its fully shown offset; otherwise
    /// it settles back to its rest offset. Returns whether the edge triggered.
    pub fn on_pointer_up(&mut self, edge: Edge, now_ms: u64) -> bool {
        let height = self.engine.drag_height(edge);
        let threshold = self.engine.threshold(edge);
        let triggered = self.engine.release(edge, now_ms);

        if self.engine.has_indicator(edge) {
            let from = indicator_offset(height, threshold);
            let to = if triggered {
                ACTIVE_OFFSET
            } else {
                rest_offset(threshold)
            };
            if from != to {
                self.settle = Some((edge, Tween::settle(from, to, now_ms)));
            }
        }
        triggered
    }

    /// Signals that the host's refresh/load work finished; the engine applies
    /// it per its completion rules (queueing, idempotence).
    pub fn complete(&mut self, edge: Edge, result: Option<&str>, delay_ms: u64, now_ms: u64) {
        self.engine.complete(edge, result, delay_ms, now_ms);
    }

    /// `complete` with the engine's configured default settle delay.
    pub fn complete_default(&mut self, edge: Edge, result: Option<&str>, now_ms: u64) {
        self.engine.complete_default(edge, result, now_ms);
    }

    /// Advances the controller.
    ///
    /// Drives the engine's completion deadlines (an expiring completion starts
    /// the hide tween) and the active settle tween. Returns the edge and the
    /// indicator offset to apply, or `None` when nothing is animating.
    pub fn tick(&mut self, now_ms: u64) -> Option<(Edge, i64)> {
        let pre = [self.engine.phase(Edge::Top), self.engine.phase(Edge::Bottom)];
        self.engine.tick(now_ms);
        for edge in [Edge::Top, Edge::Bottom] {
            if pre[idx(edge)] == EdgePhase::Completing
                && self.engine.phase(edge) == EdgePhase::Idle
            {
                let threshold = self.engine.threshold(edge);
                self.settle = Some((
                    edge,
                    Tween::settle(ACTIVE_OFFSET, rest_offset(threshold), now_ms),
                ));
            }
        }

        let (edge, tween) = self.settle?;
        let offset = tween.sample(now_ms);
        if tween.is_done(now_ms) {
            self.settle = None;
        }
        Some((edge, offset))
    }

    /// The indicator offset for an edge right now, ignoring any settle tween.
    pub fn current_offset(&self, edge: Edge) -> i64 {
        if !self.engine.has_indicator(edge) {
            return 0;
        }
        match self.engine.phase(edge) {
            EdgePhase::Triggered | EdgePhase::Completing => ACTIVE_OFFSET,
            _ => indicator_offset(self.engine.drag_height(edge), self.engine.threshold(edge)),
        }
    }

    /// Tears down all scheduled work: settle tweens, queued completions, and
    /// delayed completion deadlines. Call when the host view is detached.
    pub fn detach(&mut self) {
        self.settle = None;
        self.engine.detach();
    }
}
