use crate::*;

use alloc::boxed::Box;
use alloc::string::{String, ToString};
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

#[derive(Clone, Copy, Debug)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u64(&mut self) -> u64 {
        // Deterministic, dependency-free PRNG for tests.
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0
    }

    fn gen_range_i64(&mut self, start: i64, end_exclusive: i64) -> i64 {
        debug_assert!(start < end_exclusive);
        let span = (end_exclusive - start) as u64;
        start + (self.next_u64() % span) as i64
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum IndicatorEvent {
    Pulling { drag_height: u32, threshold: u32 },
    Active,
    Complete(Option<String>),
}

struct RecordingIndicator {
    height: u32,
    events: Arc<Mutex<Vec<IndicatorEvent>>>,
}

impl RecordingIndicator {
    fn new(height: u32) -> (Self, Arc<Mutex<Vec<IndicatorEvent>>>) {
        let events = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                height,
                events: Arc::clone(&events),
            },
            events,
        )
    }
}

impl Indicator for RecordingIndicator {
    fn height(&self) -> u32 {
        self.height
    }

    fn on_pulling(&mut self, drag_height: u32, threshold: u32) {
        self.events.lock().unwrap().push(IndicatorEvent::Pulling {
            drag_height,
            threshold,
        });
    }

    fn on_active(&mut self) {
        self.events.lock().unwrap().push(IndicatorEvent::Active);
    }

    fn on_complete(&mut self, result: Option<&str>) {
        self.events
            .lock()
            .unwrap()
            .push(IndicatorEvent::Complete(result.map(|s| s.to_string())));
    }
}

fn engine_with_top(
    height: u32,
    coefficient: f32,
) -> (Overscroll, Arc<Mutex<Vec<IndicatorEvent>>>) {
    let mut engine = Overscroll::new(OverscrollOptions::new().with_drag_coefficient(coefficient));
    let (indicator, events) = RecordingIndicator::new(height);
    engine.set_indicator(Edge::Top, Box::new(indicator));
    (engine, events)
}

#[test]
fn coefficient_damps_raw_delta() {
    let (mut engine, _) = engine_with_top(80, 0.3);
    let outcome = engine.drag_by(Edge::Top, 100.0);
    assert!(outcome.consumed);
    assert_eq!(outcome.drag_height, 30);
    assert_eq!(engine.drag_height(Edge::Top), 30);
}

#[test]
fn release_below_threshold_does_not_trigger() {
    let (mut engine, events) = engine_with_top(80, 1.0);
    let fired = Arc::new(AtomicUsize::new(0));
    let fired2 = Arc::clone(&fired);
    engine.set_on_refresh(Some(move || {
        fired2.fetch_add(1, Ordering::SeqCst);
    }));

    engine.drag_by(Edge::Top, 79.0);
    assert_eq!(engine.phase(Edge::Top), EdgePhase::Pulling);
    assert!(!engine.release(Edge::Top, 0));
    assert_eq!(engine.phase(Edge::Top), EdgePhase::Idle);
    assert_eq!(engine.drag_height(Edge::Top), 0);
    assert_eq!(fired.load(Ordering::SeqCst), 0);
    assert!(!events.lock().unwrap().contains(&IndicatorEvent::Active));
}

#[test]
fn release_past_threshold_triggers_once() {
    let (mut engine, events) = engine_with_top(80, 1.0);
    let fired = Arc::new(AtomicUsize::new(0));
    let fired2 = Arc::clone(&fired);
    engine.set_on_refresh(Some(move || {
        fired2.fetch_add(1, Ordering::SeqCst);
    }));

    engine.drag_by(Edge::Top, 81.0);
    assert_eq!(engine.phase(Edge::Top), EdgePhase::ReadyToTrigger);
    assert!(engine.release(Edge::Top, 0));
    assert_eq!(engine.phase(Edge::Top), EdgePhase::Triggered);
    // Active indicator settles at its fully-shown height.
    assert_eq!(engine.drag_height(Edge::Top), 80);
    assert_eq!(fired.load(Ordering::SeqCst), 1);
    assert_eq!(
        events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| **e == IndicatorEvent::Active)
            .count(),
        1
    );
}

#[test]
fn ready_to_trigger_always_precedes_triggered() {
    let (mut engine, _) = engine_with_top(50, 1.0);
    let phases = Arc::new(Mutex::new(Vec::new()));
    let phases2 = Arc::clone(&phases);
    engine.set_on_change(Some(move |engine: &Overscroll| {
        phases2.lock().unwrap().push(engine.phase(Edge::Top));
    }));

    // Jump straight past the threshold in a single event.
    engine.drag_by(Edge::Top, 200.0);
    engine.release(Edge::Top, 0);

    let phases = phases.lock().unwrap();
    let triggered_at = phases
        .iter()
        .position(|p| *p == EdgePhase::Triggered)
        .expect("triggered");
    assert!(triggered_at > 0);
    assert_eq!(phases[triggered_at - 1], EdgePhase::ReadyToTrigger);
}

#[test]
fn drag_height_never_exceeds_cap() {
    let (mut engine, _) = engine_with_top(40, 1.0);
    engine.set_max_drag_height(Some(120));

    let mut rng = Lcg::new(0xD1A6);
    for _ in 0..2_000 {
        let delta = rng.gen_range_i64(-150, 300) as f32;
        engine.drag_by(Edge::Top, delta);
        assert!(engine.drag_height(Edge::Top) <= 120);
    }
}

#[test]
fn complete_twice_is_idempotent() {
    let (mut engine, events) = engine_with_top(80, 1.0);
    engine.drag_by(Edge::Top, 100.0);
    engine.release(Edge::Top, 0);

    engine.complete(Edge::Top, Some("done"), 100, 0);
    assert_eq!(engine.phase(Edge::Top), EdgePhase::Completing);
    // Second call is a no-op and must not extend the deadline.
    engine.complete(Edge::Top, Some("again"), 1_000, 50);

    assert_eq!(
        events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| matches!(e, IndicatorEvent::Complete(_)))
            .count(),
        1
    );
    assert!(!engine.tick(99));
    assert!(engine.tick(100));
    assert_eq!(engine.phase(Edge::Top), EdgePhase::Idle);
    assert_eq!(engine.drag_height(Edge::Top), 0);
}

#[test]
fn complete_in_idle_is_noop() {
    let (mut engine, events) = engine_with_top(80, 1.0);
    engine.complete(Edge::Top, Some("done"), 100, 0);
    assert_eq!(engine.phase(Edge::Top), EdgePhase::Idle);
    assert!(events.lock().unwrap().is_empty());
}

#[test]
fn completion_during_gesture_is_queued_until_trigger() {
    let (mut engine, events) = engine_with_top(80, 1.0);
    engine.drag_by(Edge::Top, 100.0);
    assert_eq!(engine.phase(Edge::Top), EdgePhase::ReadyToTrigger);

    // Data arrived before the finger lifted.
    engine.complete(Edge::Top, Some("early"), 50, 0);
    assert!(
        !events
            .lock()
            .unwrap()
            .iter()
            .any(|e| matches!(e, IndicatorEvent::Complete(_)))
    );

    assert!(engine.release(Edge::Top, 10));
    {
        let events = events.lock().unwrap();
        let active_at = events
            .iter()
            .position(|e| *e == IndicatorEvent::Active)
            .expect("active");
        assert_eq!(
            events[active_at + 1],
            IndicatorEvent::Complete(Some("early".to_string()))
        );
    }
    assert_eq!(engine.phase(Edge::Top), EdgePhase::Completing);
    assert!(!engine.tick(59));
    assert!(engine.tick(60));
    assert_eq!(engine.phase(Edge::Top), EdgePhase::Idle);
}

#[test]
fn nan_input_has_zero_effect() {
    let (mut engine, _) = engine_with_top(80, 1.0);
    engine.drag_by(Edge::Top, 30.0);
    assert_eq!(engine.drag_height(Edge::Top), 30);

    engine.drag_by(Edge::Top, f32::NAN);
    assert_eq!(engine.drag_height(Edge::Top), 30);

    engine.pointer_move(Edge::Top, f32::NAN);
    assert_eq!(engine.drag_height(Edge::Top), 30);
}

#[test]
fn negative_delta_floors_height_at_zero() {
    let (mut engine, _) = engine_with_top(80, 1.0);
    let outcome = engine.drag_by(Edge::Top, -50.0);
    assert!(!outcome.consumed);
    assert_eq!(engine.drag_height(Edge::Top), 0);
    assert_eq!(engine.phase(Edge::Top), EdgePhase::Idle);
}

#[test]
fn crossing_back_within_content_unwinds_session() {
    let (mut engine, events) = engine_with_top(80, 1.0);
    engine.drag_by(Edge::Top, 50.0);
    assert_eq!(engine.phase(Edge::Top), EdgePhase::Pulling);

    let outcome = engine.drag_by(Edge::Top, -60.0);
    assert!(!outcome.consumed);
    assert_eq!(engine.drag_height(Edge::Top), 0);
    assert_eq!(engine.phase(Edge::Top), EdgePhase::Idle);
    assert_eq!(
        events.lock().unwrap().last(),
        Some(&IndicatorEvent::Pulling {
            drag_height: 0,
            threshold: 80
        })
    );
}

#[test]
fn crossing_back_below_threshold_returns_to_pulling() {
    let (mut engine, _) = engine_with_top(80, 1.0);
    engine.drag_by(Edge::Top, 100.0);
    assert_eq!(engine.phase(Edge::Top), EdgePhase::ReadyToTrigger);

    // Easing off below the threshold disarms the trigger before release.
    let outcome = engine.drag_by(Edge::Top, -50.0);
    assert!(outcome.consumed);
    assert_eq!(engine.drag_height(Edge::Top), 50);
    assert_eq!(engine.phase(Edge::Top), EdgePhase::Pulling);

    assert!(!engine.release(Edge::Top, 0));
    assert_eq!(engine.phase(Edge::Top), EdgePhase::Idle);
}

#[test]
fn indicator_mut_reaches_bound_indicator() {
    let (mut engine, _) = engine_with_top(80, 1.0);
    let indicator = engine.indicator_mut(Edge::Top).expect("indicator");
    assert_eq!(indicator.height(), 80);
    indicator.on_pulling(10, 80);
    assert!(engine.indicator_mut(Edge::Bottom).is_none());
}

#[test]
fn missing_indicator_disables_edge() {
    let mut engine = Overscroll::new(OverscrollOptions::new());
    let outcome = engine.drag_by(Edge::Bottom, -100.0);
    assert!(!outcome.consumed);
    assert!(!engine.release(Edge::Bottom, 0));
    // Completion against a bare edge must not crash either.
    engine.complete(Edge::Bottom, None, 100, 0);
    assert_eq!(engine.phase(Edge::Bottom), EdgePhase::Idle);
}

#[test]
fn elastic_only_edge_drags_but_never_triggers() {
    let mut engine = Overscroll::new(OverscrollOptions::new().with_drag_coefficient(1.0));
    engine.set_elastic(Edge::Top, true);
    assert!(engine.has_indicator(Edge::Top));

    let outcome = engine.drag_by(Edge::Top, 100.0);
    assert!(outcome.consumed);
    assert_eq!(outcome.drag_height, 100);
    assert_eq!(engine.phase(Edge::Top), EdgePhase::ReadyToTrigger);

    assert!(!engine.release(Edge::Top, 0));
    assert_eq!(engine.phase(Edge::Top), EdgePhase::Idle);

    // Disabling removes the built-in indicator again.
    engine.set_elastic(Edge::Top, false);
    assert!(!engine.has_indicator(Edge::Top));
}

#[test]
fn load_more_edge_uses_negative_axis_deltas() {
    let mut engine = Overscroll::new(OverscrollOptions::new().with_drag_coefficient(1.0));
    let (indicator, _) = RecordingIndicator::new(60);
    engine.set_indicator(Edge::Bottom, Box::new(indicator));
    let fired = Arc::new(AtomicUsize::new(0));
    let fired2 = Arc::clone(&fired);
    engine.set_on_load_more(Some(move || {
        fired2.fetch_add(1, Ordering::SeqCst);
    }));

    // Pulling up past the bottom edge is a negative scroll-axis delta.
    let outcome = engine.drag_by(Edge::Bottom, -70.0);
    assert!(outcome.consumed);
    assert_eq!(outcome.drag_height, 70);
    assert!(engine.release(Edge::Bottom, 0));
    assert_eq!(fired.load(Ordering::SeqCst), 1);
}

#[test]
fn pointer_rebase_carries_damped_distance() {
    let (mut engine, _) = engine_with_top(200, 0.5);
    engine.pointer_down(0.0);
    engine.pointer_move(Edge::Top, 40.0);
    assert_eq!(engine.drag_height(Edge::Top), 20);

    // Hand-off to a second finger at a far position: the damped distance is
    // carried, not re-derived from the jump.
    engine.pointer_changed();
    engine.pointer_move(Edge::Top, 100.0);
    assert_eq!(engine.drag_height(Edge::Top), 20);

    engine.pointer_move(Edge::Top, 140.0);
    assert_eq!(engine.drag_height(Edge::Top), 40);
}

#[test]
fn large_position_jump_rebases_without_pointer_changed() {
    let (mut engine, _) = engine_with_top(200, 0.5);
    engine.pointer_down(0.0);
    engine.pointer_move(Edge::Top, 10.0);
    assert_eq!(engine.drag_height(Edge::Top), 5);

    // A jump past the slop re-bases instead of producing a huge delta.
    engine.pointer_move(Edge::Top, 500.0);
    assert_eq!(engine.drag_height(Edge::Top), 5);

    engine.pointer_move(Edge::Top, 510.0);
    assert_eq!(engine.drag_height(Edge::Top), 10);
}

#[test]
fn fast_positional_drag_is_not_rebased() {
    // A single-event flick below the slop must keep its full displacement;
    // only pointer switches (or slop-sized jumps) re-base.
    let (mut engine, _) = engine_with_top(80, 1.0);
    engine.pointer_down(0.0);
    let outcome = engine.pointer_move(Edge::Top, 100.0);
    assert!(outcome.consumed);
    assert_eq!(outcome.drag_height, 100);
    assert_eq!(engine.phase(Edge::Top), EdgePhase::ReadyToTrigger);
    assert!(engine.release(Edge::Top, 0));
}

#[test]
fn on_pulling_fires_on_every_update() {
    let (mut engine, events) = engine_with_top(80, 1.0);
    engine.drag_by(Edge::Top, 10.0);
    engine.drag_by(Edge::Top, 10.0);
    assert_eq!(
        *events.lock().unwrap(),
        [
            IndicatorEvent::Pulling {
                drag_height: 10,
                threshold: 80
            },
            IndicatorEvent::Pulling {
                drag_height: 20,
                threshold: 80
            },
        ]
    );
}

#[test]
fn triggered_edge_ignores_new_drags_until_complete() {
    let (mut engine, _) = engine_with_top(80, 1.0);
    engine.drag_by(Edge::Top, 100.0);
    engine.release(Edge::Top, 0);
    assert_eq!(engine.phase(Edge::Top), EdgePhase::Triggered);

    let outcome = engine.drag_by(Edge::Top, 100.0);
    assert!(!outcome.consumed);
    assert_eq!(engine.drag_height(Edge::Top), 80);

    engine.complete(Edge::Top, None, 10, 0);
    let outcome = engine.drag_by(Edge::Top, 100.0);
    assert!(!outcome.consumed);

    engine.tick(10);
    let outcome = engine.drag_by(Edge::Top, 100.0);
    assert!(outcome.consumed);
}

#[test]
fn release_without_gesture_is_noop() {
    let (mut engine, _) = engine_with_top(80, 1.0);
    assert!(!engine.release(Edge::Top, 0));
    assert_eq!(engine.phase(Edge::Top), EdgePhase::Idle);
}

#[test]
fn set_drag_coefficient_clamps_and_rejects_nan() {
    let mut engine = Overscroll::new(OverscrollOptions::new());
    engine.set_drag_coefficient(2.0);
    assert_eq!(engine.options().drag_coefficient, 1.0);
    engine.set_drag_coefficient(f32::NAN);
    assert_eq!(engine.options().drag_coefficient, 1.0);
    engine.set_drag_coefficient(-1.0);
    assert_eq!(engine.options().drag_coefficient, 0.0);
}

#[test]
fn batch_update_coalesces_on_change() {
    let mut engine = Overscroll::new(OverscrollOptions::new());
    let notified = Arc::new(AtomicUsize::new(0));
    let notified2 = Arc::clone(&notified);
    engine.set_on_change(Some(move |_: &Overscroll| {
        notified2.fetch_add(1, Ordering::SeqCst);
    }));
    notified.store(0, Ordering::SeqCst);

    engine.batch_update(|engine| {
        engine.set_drag_coefficient(0.5);
        engine.set_settle_delay_ms(500);
        engine.set_max_drag_height(Some(100));
    });
    assert_eq!(notified.load(Ordering::SeqCst), 1);
}

#[test]
fn detach_cancels_pending_completion() {
    let (mut engine, events) = engine_with_top(80, 1.0);
    engine.drag_by(Edge::Top, 100.0);
    engine.release(Edge::Top, 0);
    engine.complete(Edge::Top, None, 100, 0);
    assert_eq!(engine.phase(Edge::Top), EdgePhase::Completing);

    engine.detach();
    assert_eq!(engine.phase(Edge::Top), EdgePhase::Idle);
    assert_eq!(engine.drag_height(Edge::Top), 0);

    let before = events.lock().unwrap().len();
    assert!(!engine.tick(1_000));
    assert_eq!(events.lock().unwrap().len(), before);
}

#[test]
fn cancel_pending_drops_queued_completion() {
    let (mut engine, events) = engine_with_top(80, 1.0);
    engine.drag_by(Edge::Top, 100.0);
    engine.complete(Edge::Top, Some("early"), 50, 0);
    engine.cancel_pending(Edge::Top);

    // The queued completion is gone; the trigger waits for a fresh one.
    assert!(engine.release(Edge::Top, 0));
    assert_eq!(engine.phase(Edge::Top), EdgePhase::Triggered);
    assert!(
        !events
            .lock()
            .unwrap()
            .iter()
            .any(|e| matches!(e, IndicatorEvent::Complete(_)))
    );
}

#[test]
fn snapshot_roundtrip_restores_phases() {
    let (mut engine, _) = engine_with_top(80, 1.0);
    engine.drag_by(Edge::Top, 100.0);
    engine.release(Edge::Top, 0);
    let snapshot = engine.snapshot();
    assert_eq!(snapshot.top.phase, EdgePhase::Triggered);
    assert_eq!(snapshot.top.drag_height, 80);

    let (mut restored, _) = engine_with_top(80, 1.0);
    restored.restore_snapshot(snapshot);
    assert_eq!(restored.phase(Edge::Top), EdgePhase::Triggered);
    assert_eq!(restored.drag_height(Edge::Top), 80);
    assert_eq!(restored.phase(Edge::Bottom), EdgePhase::Idle);
}

#[test]
fn restoring_completing_snapshot_settles_to_idle() {
    let (mut engine, _) = engine_with_top(80, 1.0);
    engine.drag_by(Edge::Top, 100.0);
    engine.release(Edge::Top, 0);
    engine.complete(Edge::Top, None, 100, 0);
    let snapshot = engine.snapshot();
    assert_eq!(snapshot.top.phase, EdgePhase::Completing);

    // The settle deadline is not part of the snapshot, so a restored
    // Completing session would wait forever; it restores as Idle instead.
    let (mut restored, _) = engine_with_top(80, 1.0);
    restored.restore_snapshot(snapshot);
    assert_eq!(restored.phase(Edge::Top), EdgePhase::Idle);
    assert_eq!(restored.drag_height(Edge::Top), 0);
    let outcome = restored.drag_by(Edge::Top, 50.0);
    assert!(outcome.consumed);
}

#[test]
fn edges_are_independent() {
    let mut engine = Overscroll::new(OverscrollOptions::new().with_drag_coefficient(1.0));
    let (top, _) = RecordingIndicator::new(80);
    let (bottom, _) = RecordingIndicator::new(60);
    engine.set_indicator(Edge::Top, Box::new(top));
    engine.set_indicator(Edge::Bottom, Box::new(bottom));

    engine.drag_by(Edge::Top, 100.0);
    engine.release(Edge::Top, 0);
    assert_eq!(engine.phase(Edge::Top), EdgePhase::Triggered);

    // The bottom edge still runs its own session while the top refreshes.
    let outcome = engine.drag_by(Edge::Bottom, -30.0);
    assert!(outcome.consumed);
    assert_eq!(engine.phase(Edge::Bottom), EdgePhase::Pulling);
    assert_eq!(engine.phase(Edge::Top), EdgePhase::Triggered);
}
