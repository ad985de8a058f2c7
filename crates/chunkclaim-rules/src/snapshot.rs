//! Derived metrics for a claimed set.

use chunkclaim_core::ClaimedSet;
use chunkclaim_shape::{
    approx_diameter4, count_endpoints4, max_filled_square_side, perimeter_edges, Bounds,
};
use serde::Serialize;

/// Every display metric of one claimed set.
///
/// Always recomputable from the set alone and never authoritative: the
/// session rebuilds it after each mutation, and the evaluator trusts it
/// only for area, perimeter, endpoints and bounds.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct MetricsSnapshot {
    /// Number of claimed cells `A`.
    pub area: usize,
    /// Exposed edges `P`.
    pub perimeter: usize,
    /// Approximate diameter (double-sweep BFS).
    pub diameter: u32,
    /// Cells with exactly one claimed neighbour.
    pub endpoint_count: usize,
    /// Bounding rectangle; `None` for the empty set.
    pub bounds: Option<Bounds>,
    /// `A / L²`, 0 for the empty set.
    pub outer_fill_ratio: f64,
    /// `Lin² / A`, 0 for the empty set.
    pub inner_share_ratio: f64,
    /// `Lin`, side of the largest solid square.
    pub max_filled_square_side: u32,
}

impl MetricsSnapshot {
    /// Compute every metric from scratch.
    pub fn compute(claimed: &ClaimedSet) -> Self {
        let Some(bounds) = Bounds::of(claimed) else {
            return Self::default();
        };
        let area = claimed.len();
        let lin = max_filled_square_side(claimed, &bounds);
        let lin_sq = lin as f64 * lin as f64;
        Self {
            area,
            perimeter: perimeter_edges(claimed),
            diameter: approx_diameter4(claimed),
            endpoint_count: count_endpoints4(claimed),
            bounds: Some(bounds),
            outer_fill_ratio: area as f64 / bounds.square_area(),
            inner_share_ratio: lin_sq / area as f64,
            max_filled_square_side: lin,
        }
    }

    /// `P / A`, 0 for the empty set.
    pub fn perimeter_area_ratio(&self) -> f64 {
        if self.area == 0 {
            0.0
        } else {
            self.perimeter as f64 / self.area as f64
        }
    }

    /// Side of the bounding square, 0 for the empty set.
    pub fn side(&self) -> u64 {
        self.bounds.map_or(0, |b| b.side())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chunkclaim_core::Cell;

    #[test]
    fn empty_snapshot_is_zero() {
        let m = MetricsSnapshot::compute(&ClaimedSet::new());
        assert_eq!(m, MetricsSnapshot::default());
        assert_eq!(m.perimeter_area_ratio(), 0.0);
        assert_eq!(m.side(), 0);
    }

    #[test]
    fn three_by_three_block() {
        let m = MetricsSnapshot::compute(&ClaimedSet::rect(-1, -1, 1, 1));
        assert_eq!(m.area, 9);
        assert_eq!(m.perimeter, 12);
        assert_eq!(m.diameter, 4);
        assert_eq!(m.endpoint_count, 0);
        assert_eq!(m.side(), 3);
        assert_eq!(m.outer_fill_ratio, 1.0);
        assert_eq!(m.inner_share_ratio, 1.0);
        assert_eq!(m.max_filled_square_side, 3);
        assert!((m.perimeter_area_ratio() - 12.0 / 9.0).abs() < 1e-12);
    }

    #[test]
    fn line_metrics() {
        let line: ClaimedSet = (0..5).map(|x| Cell::new(x, 0)).collect();
        let m = MetricsSnapshot::compute(&line);
        assert_eq!(m.area, 5);
        assert_eq!(m.perimeter, 12);
        assert_eq!(m.diameter, 4);
        assert_eq!(m.endpoint_count, 2);
        assert_eq!(m.side(), 5);
        assert!((m.outer_fill_ratio - 0.2).abs() < 1e-12);
        assert!((m.inner_share_ratio - 0.2).abs() < 1e-12);
    }
}
