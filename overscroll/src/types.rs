/// A content edge of a scrollable list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Edge {
    /// The top boundary: pulling past it drives pull-to-refresh.
    Top,
    /// The bottom boundary: pulling past it drives load-more.
    Bottom,
}

impl Edge {
    pub(crate) fn index(self) -> usize {
        match self {
            Self::Top => 0,
            Self::Bottom => 1,
        }
    }
}

/// The phase of an edge's drag session.
///
/// Releases only trigger from [`EdgePhase::ReadyToTrigger`]; completion only
/// takes effect from [`EdgePhase::Triggered`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EdgePhase {
    /// No overscroll in progress.
    #[default]
    Idle,
    /// Dragging past the edge, below the trigger threshold.
    Pulling,
    /// Dragged at or past the threshold; releasing now triggers.
    ReadyToTrigger,
    /// Released from `ReadyToTrigger`; the external listener has been notified
    /// and the engine is waiting for a completion signal.
    Triggered,
    /// Completion received; the indicator stays visible until the settle
    /// deadline passes.
    Completing,
}

/// The result of feeding a drag update into the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DragOutcome {
    /// Whether the edge consumed the event. When `false`, the host should let
    /// its normal scrolling handle the input.
    pub consumed: bool,
    /// The edge's drag height after the update.
    pub drag_height: u32,
}

impl DragOutcome {
    pub(crate) fn unconsumed(drag_height: u32) -> Self {
        Self {
            consumed: false,
            drag_height,
        }
    }

    pub(crate) fn consumed(drag_height: u32) -> Self {
        Self {
            consumed: true,
            drag_height,
        }
    }
}
