//! Indicator placement math.
//!
//! Offsets are signed distances in the scroll axis, relative to the edge the
//! indicator is attached to: `0` means fully shown, negative means tucked
//! behind the content edge. The same numbers apply to both edges; a bottom
//! adapter mirrors them when laying out.

/// The offset of a fully shown (active) indicator.
pub const ACTIVE_OFFSET: i64 = 0;

/// The resting offset for an indicator of the given height.
///
/// One unit of the indicator is kept in view so the host can still detect
/// the content boundary.
pub fn rest_offset(height: u32) -> i64 {
    1 - height as i64
}

/// The indicator offset for a given drag height.
///
/// Grows linearly with the drag and never drops below [`rest_offset`]; at
/// `drag_height == height` the indicator is fully shown.
pub fn indicator_offset(drag_height: u32, height: u32) -> i64 {
    (drag_height as i64 - height as i64).max(rest_offset(height))
}
