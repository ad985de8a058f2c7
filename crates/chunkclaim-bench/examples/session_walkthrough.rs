//! End-to-end claim session walkthrough.
//!
//! Demonstrates: initial block → grow under default rules → hit a rule →
//! adjust rules → install a custom predicate → survive a failing one →
//! print metrics. Run with `RUST_LOG`-style verbosity fixed at DEBUG so the
//! session's tracing output is visible.

use chunkclaim_core::Cell;
use chunkclaim_engine::ClaimSession;
use chunkclaim_rules::{predicate_fn, AdjacencyOnly, PredicateError, RulesConfig};
use tracing::Level;

fn print_metrics(session: &ClaimSession) {
    let m = session.metrics();
    println!(
        "  area={:>3} perimeter={:>3} P/A={:.3} diameter={:>2} endpoints={:>2} L={:>2} fill={:.3} Lin={:>2} share={:.3}",
        m.area,
        m.perimeter,
        m.perimeter_area_ratio(),
        m.diameter,
        m.endpoint_count,
        m.side(),
        m.outer_fill_ratio,
        m.max_filled_square_side,
        m.inner_share_ratio,
    );
}

fn main() {
    tracing_subscriber::fmt().with_max_level(Level::DEBUG).init();

    println!("=== chunkclaim session walkthrough ===\n");
    let mut session = ClaimSession::with_initial_block(RulesConfig::default()).unwrap();
    print_metrics(&session);

    println!("\nGrowing east along the middle row:");
    for x in 2..=6 {
        let d = session.claim(Cell::new(x, 0));
        println!("  claim ({x},0): {}", if d.accepted { "ok".to_string() } else { d.details() });
    }
    print_metrics(&session);

    println!("\nFrontier:");
    let status = session.frontier_status();
    let blocked = status.iter().filter(|s| s.is_blocked()).count();
    println!("  {} cells, {} blocked", status.len(), blocked);

    println!("\nHover probes:");
    for cell in [Cell::new(0, 0), Cell::new(2, 0), Cell::new(2, 1), Cell::new(9, 9)] {
        let p = session.probe(cell);
        println!("  {cell}: {:?} ({})", p.status, p.support);
    }

    println!("\nRelaxing support and retrying:");
    session
        .set_rules(RulesConfig::default().with_support(0, 0))
        .unwrap();
    let d = session.claim(Cell::new(2, 1));
    println!("  claim (2,1): {}", d);

    println!("\nCustom predicate (adjacency only):");
    session.set_predicate(AdjacencyOnly);
    for cell in [Cell::new(7, 0), Cell::new(9, 0)] {
        println!("  claim {cell}: {}", session.claim(cell));
    }

    println!("\nBroken predicate:");
    session.set_predicate(predicate_fn(|_, cell| {
        Err(PredicateError::failed(format!("no data for {cell}")))
    }));
    for _ in 0..3 {
        let d = session.claim(Cell::new(8, 0));
        println!("  claim (8,0): {}", d.details());
    }
    session.clear_predicate();

    println!("\nUnclaiming:");
    for cell in [Cell::new(7, 0), Cell::new(0, 0)] {
        println!("  unclaim {cell}: {}", session.unclaim(cell));
    }
    print_metrics(&session);

    session.clear();
    println!("\nCleared; bootstrap claim anywhere:");
    println!("  claim (40,40): {}", session.claim(Cell::new(40, 40)));
    print_metrics(&session);
}
