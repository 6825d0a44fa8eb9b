// Example: minimal pull-to-refresh cycle driven by raw deltas.
use overscroll::{Edge, EdgePhase, Indicator, Overscroll, OverscrollOptions};

struct PrintIndicator;

impl Indicator for PrintIndicator {
    fn height(&self) -> u32 {
        80
    }

    fn on_pulling(&mut self, drag_height: u32, threshold: u32) {
        let label = if drag_height < threshold {
            "pull to refresh"
        } else {
            "release to refresh"
        };
        println!("pulling: {drag_height}/{threshold} ({label})");
    }

    fn on_active(&mut self) {
        println!("refreshing...");
    }

    fn on_complete(&mut self, result: Option<&str>) {
        println!("complete: {}", result.unwrap_or("done"));
    }
}

fn main() {
    let mut engine = Overscroll::new(
        OverscrollOptions::new()
            .with_drag_coefficient(0.3)
            .with_on_refresh(Some(|| println!("-> host starts fetching"))),
    );
    engine.set_indicator(Edge::Top, Box::new(PrintIndicator));

    // The host feeds raw deltas whenever the list rests against its top edge.
    for _ in 0..6 {
        engine.drag_by(Edge::Top, 50.0);
    }
    assert_eq!(engine.phase(Edge::Top), EdgePhase::ReadyToTrigger);

    engine.release(Edge::Top, 0);
    println!("phase after release: {:?}", engine.phase(Edge::Top));

    // The fetch finishes; keep the indicator visible for 300 ms.
    engine.complete(Edge::Top, Some("2 new items"), 300, 100);
    engine.tick(400);
    println!("phase after settle: {:?}", engine.phase(Edge::Top));
}
