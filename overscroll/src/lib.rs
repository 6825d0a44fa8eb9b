//! A headless pull-to-refresh / load-more engine for scrollable lists.
//!
//! For adapter-level utilities (settle tweens, indicator offset math), see the
//! `overscroll-adapter` crate.
//!
//! This crate focuses on the core state needed to run edge overscroll gestures:
//! damped drag tracking, a per-edge phase machine (idle → pulling → ready →
//! triggered → completing), and a pluggable indicator contract for visual
//! feedback.
//!
//! It is UI-agnostic. A TUI/GUI layer is expected to provide:
//! - pointer positions or raw drag deltas in the scroll axis
//! - which content edge the list is currently resting against
//! - a clock (`now_ms`) to drive completion delays
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod engine;
mod indicator;
mod options;
mod snapshot;
mod tracker;
mod types;

#[cfg(test)]
mod tests;

pub use engine::Overscroll;
pub use indicator::{ElasticIndicator, Indicator};
pub use options::{
    DEFAULT_DRAG_COEFFICIENT, DEFAULT_SETTLE_DELAY_MS, OnChangeCallback, OverscrollOptions,
    TriggerCallback,
};
pub use snapshot::{EdgeSnapshot, EngineSnapshot};
pub use tracker::{DEFAULT_JUMP_SLOP, DragTracker};
pub use types::{DragOutcome, Edge, EdgePhase};
