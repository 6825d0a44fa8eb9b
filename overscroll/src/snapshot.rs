use crate::EdgePhase;

/// A lightweight, serializable snapshot of one edge's drag session.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EdgeSnapshot {
    pub phase: EdgePhase,
    pub drag_height: u32,
    pub threshold: u32,
}

/// A combined snapshot of both edges.
///
/// This is useful for restoring UI state across frames or sessions without
/// coupling the engine to any specific UI framework. Indicators, listeners,
/// and pending completion timers are not part of the snapshot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EngineSnapshot {
    pub top: EdgeSnapshot,
    pub bottom: EdgeSnapshot,
}
