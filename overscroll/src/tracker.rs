/// Default position jump treated as an unreported pointer switch, in
/// scroll-axis units.
///
/// Hosts that know about pointer switches call `pointer_changed`; the slop is
/// only a fallback for hosts that do not. It must sit well above any single
/// fast drag event (roughly half a screen), otherwise legitimate flicks get
/// re-based away.
pub const DEFAULT_JUMP_SLOP: f32 = 400.0;

/// Converts raw pointer input into a damped, signed drag distance.
///
/// The tracker is gesture-scoped: `pointer_down` starts a gesture,
/// `pointer_move`/`drag_by` advance it, `release` resets it. The damping
/// coefficient is applied to the raw displacement from the gesture baseline,
/// so re-basing (pointer switches) carries the already-damped distance and
/// the gesture continues smoothly.
///
/// Positive distances point past the top edge, negative past the bottom edge.
/// NaN input has zero effect.
#[derive(Clone, Copy, Debug, Default)]
pub struct DragTracker {
    /// Baseline position for positional gestures. `None` until the first
    /// pointer event (or for delta-driven gestures).
    origin: Option<f32>,
    /// Raw displacement from the baseline (delta-driven gestures accumulate
    /// into this directly).
    raw: f32,
    /// Damped distance carried across re-bases.
    carried: i64,
    last_pos: f32,
    last_distance: i64,
    pointer_switch_pending: bool,
    jump_slop: f32,
}

impl DragTracker {
    pub fn new() -> Self {
        Self::with_jump_slop(DEFAULT_JUMP_SLOP)
    }

    pub fn with_jump_slop(jump_slop: f32) -> Self {
        Self {
            origin: None,
            raw: 0.0,
            carried: 0,
            last_pos: 0.0,
            last_distance: 0,
            pointer_switch_pending: false,
            jump_slop,
        }
    }

    /// The damped distance as of the last update.
    pub fn distance(&self) -> i64 {
        self.last_distance
    }

    /// Whether a gesture is in progress.
    pub fn is_tracking(&self) -> bool {
        self.origin.is_some() || self.raw != 0.0
    }

    /// Starts a positional gesture at `pos`.
    pub fn pointer_down(&mut self, pos: f32) {
        if pos.is_nan() {
            return;
        }
        self.origin = Some(pos);
        self.raw = 0.0;
        self.carried = 0;
        self.last_pos = pos;
        self.last_distance = 0;
        self.pointer_switch_pending = false;
    }

    /// Marks the next `pointer_move` as coming from a different pointer.
    ///
    /// The tracker then re-bases: it carries the damped distance accumulated
    /// so far and takes the next position as the new baseline.
    pub fn pointer_changed(&mut self) {
        self.pointer_switch_pending = true;
    }

    /// Advances a positional gesture and returns the damped distance.
    pub fn pointer_move(&mut self, pos: f32, coefficient: f32) -> i64 {
        if pos.is_nan() || coefficient.is_nan() {
            return self.last_distance;
        }
        let Some(origin) = self.origin else {
            // Move without a down event: treat as the gesture start.
            self.pointer_down(pos);
            return 0;
        };

        let jump = pos - self.last_pos;
        if self.pointer_switch_pending || jump >= self.jump_slop || -jump >= self.jump_slop {
            otrace!(pos, carried = self.last_distance, "tracker rebase");
            self.carried = self.last_distance;
            self.origin = Some(pos);
            self.raw = 0.0;
            self.pointer_switch_pending = false;
        } else {
            self.raw = pos - origin;
        }

        self.last_pos = pos;
        // Truncate toward zero so sub-unit damped movement accumulates in the
        // raw displacement rather than rounding per event.
        self.last_distance = self.carried + (self.raw * coefficient) as i64;
        self.last_distance
    }

    /// Advances a delta-driven gesture and returns the damped distance.
    ///
    /// For hosts that report scroll deltas instead of pointer positions.
    pub fn drag_by(&mut self, raw_delta: f32, coefficient: f32) -> i64 {
        if raw_delta.is_nan() || coefficient.is_nan() {
            return self.last_distance;
        }
        self.raw += raw_delta;
        self.last_distance = self.carried + (self.raw * coefficient) as i64;
        self.last_distance
    }

    /// Ends the gesture and resets all bookkeeping.
    pub fn release(&mut self) {
        let jump_slop = self.jump_slop;
        *self = Self::with_jump_slop(jump_slop);
    }
}
