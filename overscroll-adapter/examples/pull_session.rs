use overscroll::{Edge, Indicator, OverscrollOptions};
use overscroll_adapter::Controller;

struct Spinner;

impl Indicator for Spinner {
    fn height(&self) -> u32 {
        64
    }

    fn on_pulling(&mut self, _drag_height: u32, _threshold: u32) {}

    fn on_active(&mut self) {
        println!("spinner on");
    }

    fn on_complete(&mut self, result: Option<&str>) {
        println!("spinner off: {}", result.unwrap_or(""));
    }
}

fn main() {
    // Example: a simulated host frame loop.
    //
    // An adapter would:
    // - forward pointer events while the list rests against an edge
    // - call tick(now_ms) each frame and apply the returned indicator offset
    // - call complete(...) when its refresh work finishes
    let mut c = Controller::new(OverscrollOptions::new().with_drag_coefficient(0.5));
    c.engine_mut().set_indicator(Edge::Top, Box::new(Spinner));

    c.on_pointer_down(0.0);
    for pos in [40.0, 90.0, 140.0, 160.0] {
        let outcome = c.on_pointer_move(Edge::Top, pos);
        println!(
            "move to {pos}: height={} phase={:?}",
            outcome.drag_height,
            c.engine().phase(Edge::Top)
        );
    }

    let triggered = c.on_pointer_up(Edge::Top, 0);
    println!("released: triggered={triggered}");

    let mut now_ms = 0u64;
    let mut completed = false;
    loop {
        now_ms += 16;
        if !completed && now_ms >= 200 {
            // The host's fetch finished; show the result for 300 ms.
            c.complete(Edge::Top, Some("up to date"), 300, now_ms);
            completed = true;
        }
        match c.tick(now_ms) {
            Some((edge, offset)) => println!("t={now_ms} {edge:?} offset={offset}"),
            None if completed && !c.is_animating() && now_ms > 600 => break,
            None => {}
        }
    }

    println!("final offset={}", c.current_offset(Edge::Top));
}
