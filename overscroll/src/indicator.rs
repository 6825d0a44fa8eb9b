/// Visual feedback contract for one edge.
///
/// An indicator owns its visual state (widget, animation bookkeeping, text)
/// and is created once per edge binding; the engine reuses it across drag
/// sessions and only ever calls the methods below. It never inspects the
/// indicator's internals.
///
/// `height()` doubles as the trigger threshold for the edge: dragging at or
/// past it arms the gesture.
pub trait Indicator {
    /// The indicator's extent in the scroll axis. Must be nonzero; a zero
    /// height is clamped to 1 by the engine.
    fn height(&self) -> u32;

    /// Called on every drag update with the current drag height and the
    /// trigger threshold.
    fn on_pulling(&mut self, drag_height: u32, threshold: u32);

    /// Called once when the edge triggers (refreshing/loading started).
    fn on_active(&mut self);

    /// Called when the host signals completion, with an optional result text
    /// to display while the indicator settles.
    fn on_complete(&mut self, result: Option<&str>);
}

/// A built-in indicator backing elastic-only edges.
///
/// It reports a height of 1 and ignores all callbacks: the edge can be
/// elastically dragged, but a release never triggers.
#[derive(Clone, Copy, Debug, Default)]
pub struct ElasticIndicator;

impl Indicator for ElasticIndicator {
    fn height(&self) -> u32 {
        1
    }

    fn on_pulling(&mut self, _drag_height: u32, _threshold: u32) {}

    fn on_active(&mut self) {}

    fn on_complete(&mut self, _result: Option<&str>) {}
}
