//! Pure shape metrics over a [`ClaimedSet`].
//!
//! Every function here reads its input snapshot and allocates its own
//! scratch; none mutates the set. Where the claim path needs a cheap
//! update, a from-scratch function has an incremental twin
//! ([`perimeter_after_claim`], [`endpoints_after_claim`],
//! [`Bounds::extended`](crate::Bounds::extended)) and the two are tested
//! for equivalence.

use crate::bounds::Bounds;
use chunkclaim_core::{Cell, CellSet, ClaimedSet};
use serde::Serialize;
use smallvec::SmallVec;
use std::collections::{HashSet, VecDeque};

// ── Degree ─────────────────────────────────────────────────────────

/// How many of `cell`'s four edge neighbours are claimed (0..=4).
///
/// Works whether or not `cell` itself is in the set; for a candidate cell
/// this is its adjacency degree.
pub fn claimed_neighbours4(claimed: &ClaimedSet, cell: Cell) -> usize {
    cell.neighbours4()
        .iter()
        .filter(|&&n| claimed.contains(n))
        .count()
}

// ── Perimeter ──────────────────────────────────────────────────────

/// Number of cell edges facing an unclaimed cell. O(|S|).
pub fn perimeter_edges(claimed: &ClaimedSet) -> usize {
    claimed
        .iter()
        .map(|c| 4 - claimed_neighbours4(claimed, c))
        .sum()
}

/// Perimeter after claiming a cell whose adjacency degree is `degree`.
///
/// Each claimed neighbour loses one exposed edge and the new cell exposes
/// `4 - degree`, so the change is `4 - 2·degree`.
pub fn perimeter_after_claim(perimeter: usize, degree: usize) -> usize {
    (perimeter + 4).saturating_sub(2 * degree)
}

// ── Endpoints ──────────────────────────────────────────────────────

/// Number of claimed cells with exactly one claimed neighbour ("loose ends").
pub fn count_endpoints4(claimed: &ClaimedSet) -> usize {
    claimed
        .iter()
        .filter(|&c| claimed_neighbours4(claimed, c) == 1)
        .count()
}

/// Endpoint count after claiming `cell`, given the count `before` for
/// `claimed`. O(1).
///
/// The new cell is an endpoint iff its degree is 1. Each claimed
/// neighbour's degree rises by one: a former endpoint (1 → 2) stops being
/// one, an isolated cell (0 → 1) becomes one.
pub fn endpoints_after_claim(claimed: &ClaimedSet, before: usize, cell: Cell) -> usize {
    let degree = claimed_neighbours4(claimed, cell);
    let mut ends = before as i64;
    if degree == 1 {
        ends += 1;
    }
    for n in cell.neighbours4() {
        if !claimed.contains(n) {
            continue;
        }
        match claimed_neighbours4(claimed, n) {
            0 => ends += 1,
            1 => ends -= 1,
            _ => {}
        }
    }
    ends.max(0) as usize
}

// ── Diameter ───────────────────────────────────────────────────────

/// BFS over claimed cells from `src`; returns the last cell discovered at
/// the maximum distance and that distance.
fn bfs_farthest(claimed: &ClaimedSet, src: Cell) -> (Cell, u32) {
    let mut seen: HashSet<Cell> = HashSet::with_capacity(claimed.len());
    let mut queue = VecDeque::new();
    seen.insert(src);
    queue.push_back((src, 0u32));
    let mut far = (src, 0u32);

    while let Some((cur, d)) = queue.pop_front() {
        // BFS pops in nondecreasing distance, so the last pop is the
        // last-discovered cell at the maximum distance.
        far = (cur, d);
        for n in cur.neighbours4() {
            if claimed.contains(n) && seen.insert(n) {
                queue.push_back((n, d + 1));
            }
        }
    }
    far
}

/// Approximate graph diameter of the 4-adjacency graph induced by the set.
///
/// Double sweep: BFS from the minimum cell to a farthest node `A`, then BFS
/// from `A`; the second sweep's maximum distance is returned.
///
/// This is exact for trees but only a lower bound for general shapes
/// (cycles can hide a longer shortest path). The diameter gate is
/// calibrated against this value, so it must stay approximate. Only the
/// component containing the start is measured. Empty set → 0.
pub fn approx_diameter4(claimed: &ClaimedSet) -> u32 {
    let Some(start) = claimed.iter().min() else {
        return 0;
    };
    let (a, _) = bfs_farthest(claimed, start);
    let (_, d) = bfs_farthest(claimed, a);
    d
}

// ── Arm length ─────────────────────────────────────────────────────

/// Length of the thin arm ending at `start`.
///
/// Walks from `start` through its single claimed neighbour and onwards
/// while each visited cell has degree exactly 2, stopping at a branch, a
/// dead end, or a revisit (cycle). Returns the number of steps taken.
/// If `start` does not have exactly one claimed neighbour the arm is 0.
pub fn arm_length_from(claimed: &ClaimedSet, start: Cell) -> usize {
    let mut visited: HashSet<Cell> = HashSet::new();
    let mut cur = start;
    let mut prev: Option<Cell> = None;
    let mut len = 0;

    loop {
        if !visited.insert(cur) {
            break;
        }
        let onward: SmallVec<[Cell; 4]> = cur
            .neighbours4()
            .into_iter()
            .filter(|&n| claimed.contains(n) && Some(n) != prev)
            .collect();
        if cur != start && claimed_neighbours4(claimed, cur) != 2 {
            break;
        }
        if onward.len() != 1 {
            break;
        }
        prev = Some(cur);
        cur = onward[0];
        len += 1;
    }
    len
}

// ── Maximal filled square ──────────────────────────────────────────

/// Side of the largest axis-aligned solid square inside `bounds` whose
/// cells are all claimed.
///
/// Rolling-row maximal-square DP:
/// `dp[x][z] = 1 + min(dp[x-1][z], dp[x][z-1], dp[x-1][z-1])` on claimed
/// cells, 0 elsewhere. Costs O(width × height) time and O(width) memory.
/// That can exceed O(|S|) for sparse shapes; for a 4-connected set
/// `width + height <= |S| + 1`, so the cost stays within `|S|²/4` and is
/// accepted.
pub fn max_filled_square_side(claimed: &ClaimedSet, bounds: &Bounds) -> u32 {
    if claimed.is_empty() {
        return 0;
    }
    let w = bounds.width() as usize;
    let mut dp = vec![0u32; w + 1];
    let mut best = 0;

    for z in bounds.min_z()..=bounds.max_z() {
        let mut prev_diag = 0;
        for xi in 1..=w {
            let x = (bounds.min_x() as i64 + (xi as i64 - 1)) as i32;
            let above = dp[xi];
            if claimed.contains(Cell::new(x, z)) {
                let v = 1 + dp[xi].min(dp[xi - 1]).min(prev_diag);
                dp[xi] = v;
                best = best.max(v);
            } else {
                dp[xi] = 0;
            }
            prev_diag = above;
        }
    }
    best
}

// ── Neighbourhood density ──────────────────────────────────────────

/// Counts inside the `(2r+1)² - 1` window around a centre cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct NeighbourhoodCounts {
    /// Claimed cells in the window.
    pub claimed: usize,
    /// Unclaimed cells in the window with at least one claimed 4-neighbour.
    pub available: usize,
}

/// Claimed / available counts in the square window of `radius` around
/// `center`, excluding the centre itself.
///
/// Radius 1 covers 8 cells, radius 2 covers 24 (rings 1 and 2 together).
pub fn neighbourhood_counts(claimed: &ClaimedSet, center: Cell, radius: i32) -> NeighbourhoodCounts {
    let mut counts = NeighbourhoodCounts::default();
    for dx in -radius..=radius {
        for dz in -radius..=radius {
            if dx == 0 && dz == 0 {
                continue;
            }
            let c = center.offset(dx, dz);
            if claimed.contains(c) {
                counts.claimed += 1;
            } else if claimed_neighbours4(claimed, c) > 0 {
                counts.available += 1;
            }
        }
    }
    counts
}

// ── Frontier ───────────────────────────────────────────────────────

/// Every unclaimed cell sharing an edge with the territory.
///
/// These are the only cells a claim can ever be accepted on (besides the
/// bootstrap cell of an empty set).
pub fn frontier(claimed: &ClaimedSet) -> CellSet {
    let mut out = CellSet::new();
    for c in claimed.iter() {
        for n in c.neighbours4() {
            if !claimed.contains(n) {
                out.insert(n);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn set(cells: &[(i32, i32)]) -> ClaimedSet {
        cells.iter().copied().map(Cell::from).collect()
    }

    fn line(n: i32) -> ClaimedSet {
        (0..n).map(|x| Cell::new(x, 0)).collect()
    }

    #[test]
    fn degree_counts_only_claimed() {
        let s = ClaimedSet::rect(-1, -1, 1, 1);
        assert_eq!(claimed_neighbours4(&s, Cell::new(0, 0)), 4);
        assert_eq!(claimed_neighbours4(&s, Cell::new(-1, -1)), 2);
        assert_eq!(claimed_neighbours4(&s, Cell::new(2, 0)), 1);
        assert_eq!(claimed_neighbours4(&s, Cell::new(5, 5)), 0);
    }

    #[test]
    fn perimeter_of_rectangles() {
        assert_eq!(perimeter_edges(&ClaimedSet::new()), 0);
        assert_eq!(perimeter_edges(&set(&[(0, 0)])), 4);
        assert_eq!(perimeter_edges(&ClaimedSet::rect(0, 0, 2, 2)), 12);
        assert_eq!(perimeter_edges(&ClaimedSet::rect(0, 0, 4, 1)), 14);
    }

    #[test]
    fn endpoints_of_simple_shapes() {
        assert_eq!(count_endpoints4(&set(&[(0, 0)])), 0);
        assert_eq!(count_endpoints4(&line(5)), 2);
        // Plus sign: four arms.
        let plus = set(&[(0, 0), (1, 0), (-1, 0), (0, 1), (0, -1)]);
        assert_eq!(count_endpoints4(&plus), 4);
        assert_eq!(count_endpoints4(&ClaimedSet::rect(0, 0, 2, 2)), 0);
    }

    #[test]
    fn diameter_of_line_and_block() {
        assert_eq!(approx_diameter4(&ClaimedSet::new()), 0);
        assert_eq!(approx_diameter4(&set(&[(3, 3)])), 0);
        assert_eq!(approx_diameter4(&line(7)), 6);
        assert_eq!(approx_diameter4(&ClaimedSet::rect(0, 0, 2, 2)), 4);
    }

    #[test]
    fn diameter_of_l_shape_is_exact_on_trees() {
        // L: (0,0)..(3,0) then (3,1)..(3,3); path length 6.
        let l = set(&[(0, 0), (1, 0), (2, 0), (3, 0), (3, 1), (3, 2), (3, 3)]);
        assert_eq!(approx_diameter4(&l), 6);
    }

    #[test]
    fn diameter_ignores_insertion_order() {
        let a = set(&[(0, 0), (1, 0), (1, 1), (2, 1), (2, 2), (0, 1)]);
        let b = set(&[(2, 2), (0, 1), (2, 1), (1, 1), (0, 0), (1, 0)]);
        assert_eq!(approx_diameter4(&a), approx_diameter4(&b));
    }

    #[test]
    fn arm_length_along_a_line() {
        let s = line(4);
        assert_eq!(arm_length_from(&s, Cell::new(3, 0)), 3);
        assert_eq!(arm_length_from(&s, Cell::new(0, 0)), 3);
    }

    #[test]
    fn arm_stops_at_branch() {
        // Arm (3,0)-(2,0)-(1,0) meets a T-junction at (1,0).
        let s = set(&[(3, 0), (2, 0), (1, 0), (1, 1), (1, -1)]);
        assert_eq!(arm_length_from(&s, Cell::new(3, 0)), 2);
    }

    #[test]
    fn arm_from_non_endpoint_is_zero() {
        let s = ClaimedSet::rect(0, 0, 1, 1);
        assert_eq!(arm_length_from(&s, Cell::new(0, 0)), 0);
        assert_eq!(arm_length_from(&set(&[(0, 0)]), Cell::new(0, 0)), 0);
    }

    #[test]
    fn arm_terminates_on_cycle() {
        // A ring of 8 with a one-cell tail: the walk must not loop forever.
        let mut s: ClaimedSet = ClaimedSet::rect(0, 0, 2, 2).without_cell(Cell::new(1, 1));
        s.insert(Cell::new(3, 0));
        let len = arm_length_from(&s, Cell::new(3, 0));
        assert_eq!(len, 1);
    }

    #[test]
    fn max_square_in_rectangles() {
        for (w, h) in [(1, 1), (3, 2), (2, 5), (4, 4), (6, 3)] {
            let s = ClaimedSet::rect(10, -3, 10 + w - 1, -3 + h - 1);
            let b = Bounds::of(&s).unwrap();
            assert_eq!(max_filled_square_side(&s, &b), w.min(h) as u32);
        }
    }

    #[test]
    fn max_square_with_a_gap() {
        // 3×3 block with the centre missing: best solid square is 1.
        let s = ClaimedSet::rect(0, 0, 2, 2).without_cell(Cell::new(1, 1));
        let b = Bounds::of(&s).unwrap();
        assert_eq!(max_filled_square_side(&s, &b), 1);
    }

    #[test]
    fn neighbourhood_windows() {
        let s = ClaimedSet::rect(-1, -1, 1, 1);
        let r1 = neighbourhood_counts(&s, Cell::new(2, 0), 1);
        assert_eq!(r1.claimed, 3);
        // (2,-1), (2,1) unclaimed with a claimed neighbour; (3,*) have none.
        assert_eq!(r1.available, 2);
        let r2 = neighbourhood_counts(&s, Cell::new(2, 0), 2);
        assert_eq!(r2.claimed, 6);
    }

    #[test]
    fn frontier_of_single_cell() {
        let f = frontier(&set(&[(0, 0)]));
        assert_eq!(f.len(), 4);
        assert!(frontier(&ClaimedSet::new()).is_empty());
        assert_eq!(frontier(&ClaimedSet::rect(0, 0, 2, 2)).len(), 12);
    }

    fn arb_set() -> impl Strategy<Value = ClaimedSet> {
        prop::collection::vec((-6i32..6, -6i32..6), 0..40)
            .prop_map(|v| v.into_iter().map(Cell::from).collect())
    }

    proptest! {
        #[test]
        fn perimeter_delta_matches_recompute(s in arb_set(), c in (-7i32..7, -7i32..7)) {
            let c = Cell::from(c);
            prop_assume!(!s.contains(c));
            let degree = claimed_neighbours4(&s, c);
            let incremental = perimeter_after_claim(perimeter_edges(&s), degree);
            prop_assert_eq!(incremental, perimeter_edges(&s.with_cell(c)));
        }

        #[test]
        fn endpoint_delta_matches_recompute(s in arb_set(), c in (-7i32..7, -7i32..7)) {
            let c = Cell::from(c);
            prop_assume!(!s.contains(c));
            let incremental = endpoints_after_claim(&s, count_endpoints4(&s), c);
            prop_assert_eq!(incremental, count_endpoints4(&s.with_cell(c)));
        }

        #[test]
        fn max_square_bounded_by_area(s in arb_set()) {
            if let Some(b) = Bounds::of(&s) {
                let k = max_filled_square_side(&s, &b) as usize;
                prop_assert!(k * k <= s.len());
                prop_assert!(k >= 1);
            }
        }
    }
}
