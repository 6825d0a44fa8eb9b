//! Adapter utilities for the `overscroll` crate.
//!
//! The `overscroll` crate is UI-agnostic and focuses on the drag/state core.
//! This crate provides small, framework-neutral helpers commonly needed by
//! adapters:
//!
//! - Indicator offset math (where to place the indicator for a drag height)
//! - Settle tweens: the rebound animation after a release or completion
//! - A [`Controller`] that wires both onto the engine and guarantees
//!   cancellation of pending work on teardown
//!
//! This crate is intentionally framework-agnostic (no ratatui/egui bindings).
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

mod controller;
mod offset;
mod tween;


pub use controller::Controller;
pub use offset::{ACTIVE_OFFSET, indicator_offset, rest_offset};
pub use tween::{Easing, Tween};
