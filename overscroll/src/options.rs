use alloc::sync::Arc;

use crate::engine::Overscroll;

/// A callback fired once per `Triggered` transition on its edge.
///
/// The host is expected to eventually call `Overscroll::complete` for the
/// same edge.
pub type TriggerCallback = Arc<dyn Fn() + Send + Sync>;

/// A callback fired when the engine's state changes.
pub type OnChangeCallback = Arc<dyn Fn(&Overscroll) + Send + Sync>;

/// Default damping multiplier applied to raw drag input.
pub const DEFAULT_DRAG_COEFFICIENT: f32 = 0.3;

/// Default minimum visible duration for a completed indicator, in ms.
pub const DEFAULT_SETTLE_DELAY_MS: u64 = 300;

/// Configuration for [`crate::Overscroll`].
///
/// This type is designed to be cheap to clone: callbacks are stored in `Arc`s
/// so adapters can update a few fields and call `Overscroll::set_options`
/// without reallocating closures.
pub struct OverscrollOptions {
    /// Damping multiplier applied to raw drag distance beyond content bounds.
    ///
    /// Clamped to `[0, 1]`. NaN values are rejected and keep the previous
    /// coefficient.
    pub drag_coefficient: f32,

    /// Hard cap on the drag height while an edge is elastically dragged.
    ///
    /// `None` leaves the height unbounded (the damping alone limits it in
    /// practice).
    pub max_drag_height: Option<u32>,

    /// Minimum visible duration applied by `complete_default`, in ms.
    pub settle_delay_ms: u64,

    /// Fired once per Top-edge `Triggered` transition.
    pub on_refresh: Option<TriggerCallback>,

    /// Fired once per Bottom-edge `Triggered` transition.
    pub on_load_more: Option<TriggerCallback>,

    /// Optional callback fired when the engine's internal state changes.
    pub on_change: Option<OnChangeCallback>,
}

impl OverscrollOptions {
    pub fn new() -> Self {
        Self {
            drag_coefficient: DEFAULT_DRAG_COEFFICIENT,
            max_drag_height: None,
            settle_delay_ms: DEFAULT_SETTLE_DELAY_MS,
            on_refresh: None,
            on_load_more: None,
            on_change: None,
        }
    }

    pub fn with_drag_coefficient(mut self, coefficient: f32) -> Self {
        if !coefficient.is_nan() {
            self.drag_coefficient = coefficient.clamp(0.0, 1.0);
        }
        self
    }

    pub fn with_max_drag_height(mut self, max_drag_height: Option<u32>) -> Self {
        self.max_drag_height = max_drag_height;
        self
    }

    pub fn with_settle_delay_ms(mut self, settle_delay_ms: u64) -> Self {
        self.settle_delay_ms = settle_delay_ms;
        self
    }

    pub fn with_on_refresh(mut self, on_refresh: Option<impl Fn() + Send + Sync + 'static>) -> Self {
        self.on_refresh = on_refresh.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_on_load_more(
        mut self,
        on_load_more: Option<impl Fn() + Send + Sync + 'static>,
    ) -> Self {
        self.on_load_more = on_load_more.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_on_change(
        mut self,
        on_change: Option<impl Fn(&Overscroll) + Send + Sync + 'static>,
    ) -> Self {
        self.on_change = on_change.map(|f| Arc::new(f) as _);
        self
    }
}

impl Default for OverscrollOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for OverscrollOptions {
    fn clone(&self) -> Self {
        Self {
            drag_coefficient: self.drag_coefficient,
            max_drag_height: self.max_drag_height,
            settle_delay_ms: self.settle_delay_ms,
            on_refresh: self.on_refresh.clone(),
            on_load_more: self.on_load_more.clone(),
            on_change: self.on_change.clone(),
        }
    }
}

impl core::fmt::Debug for OverscrollOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("OverscrollOptions")
            .field("drag_coefficient", &self.drag_coefficient)
            .field("max_drag_height", &self.max_drag_height)
            .field("settle_delay_ms", &self.settle_delay_ms)
            .finish_non_exhaustive()
    }
}
