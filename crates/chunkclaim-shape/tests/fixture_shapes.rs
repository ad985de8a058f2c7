//! Metrics and topology on the shared fixture shapes.

use chunkclaim_core::{Cell, ClaimedSet};
use chunkclaim_shape::{
    approx_diameter4, count_endpoints4, frontier, has_holes4, hole_cells4, is_connected4,
    max_filled_square_side, perimeter_edges, Bounds,
};
use chunkclaim_test_utils::{block, cells, dumbbell, initial_block, line_x, plus, ring};

fn square_side(set: &ClaimedSet) -> u32 {
    let bounds = Bounds::of(set).unwrap();
    max_filled_square_side(set, &bounds)
}

#[test]
fn initial_block_metrics() {
    let set = initial_block();
    assert_eq!(perimeter_edges(&set), 12);
    assert_eq!(count_endpoints4(&set), 0);
    assert_eq!(approx_diameter4(&set), 4);
    assert_eq!(square_side(&set), 3);
    assert_eq!(frontier(&set).len(), 12);
    assert!(is_connected4(&set));
    assert!(!has_holes4(&set));
}

#[test]
fn ring_interior_is_all_holes() {
    let set = ring(0, 0, 5, 4);
    let holes = hole_cells4(&set);
    assert_eq!(holes.len(), 4 * 3);
    assert!(holes.contains(&Cell::new(1, 1)));
    assert!(holes.contains(&Cell::new(4, 3)));
    assert!(!holes.contains(&Cell::new(0, 0)));
    // Opening the rim lets the interior drain.
    let opened = set.without_cell(Cell::new(0, 2));
    assert!(!has_holes4(&opened));
    assert!(is_connected4(&opened));
}

#[test]
fn dumbbell_bridge_cells_are_cut_vertices() {
    let d = dumbbell(4, 3);
    assert!(is_connected4(&d.cells));
    assert_eq!(d.cells.len(), 2 * 16 + 3);
    for &b in &d.bridge {
        assert!(!is_connected4(&d.cells.without_cell(b)), "bridge cell {b}");
    }
    assert!(is_connected4(&d.cells.without_cell(Cell::new(0, 0))));
}

#[test]
fn rectangle_square_side_is_short_edge() {
    for (w, h) in [(1, 1), (1, 7), (5, 2), (6, 6), (9, 4)] {
        let set = block(10, -3, 10 + w - 1, -3 + h - 1);
        assert_eq!(square_side(&set), w.min(h) as u32, "{w}x{h}");
    }
}

#[test]
fn straight_line_diameter_and_endpoints() {
    let set = line_x(-3, 2, 7);
    assert_eq!(approx_diameter4(&set), 6);
    assert_eq!(count_endpoints4(&set), 2);
    assert_eq!(perimeter_edges(&set), 2 * 7 + 2);
}

#[test]
fn plus_has_four_tips() {
    let set = plus(Cell::new(0, 0), 3);
    assert_eq!(set.len(), 13);
    assert_eq!(count_endpoints4(&set), 4);
    assert_eq!(approx_diameter4(&set), 6);
    assert_eq!(square_side(&set), 1);
}

#[test]
fn diagonal_touch_is_not_connected() {
    let diagonal = cells(&[(0, 0), (1, 1)]);
    assert!(!is_connected4(&diagonal));
    let elbow = cells(&[(0, 0), (1, 0), (1, 1)]);
    assert!(is_connected4(&elbow));
    assert_eq!(count_endpoints4(&elbow), 2);
    assert_eq!(perimeter_edges(&elbow), 8);
}
