//! Connectivity and hole detection over the claimed set.

use crate::bounds::Bounds;
use chunkclaim_core::{Cell, CellSet, ClaimedSet};
use std::collections::{HashSet, VecDeque};

// ── Connectivity ───────────────────────────────────────────────────

/// Returns `true` if every claimed cell is reachable from every other
/// through 4-adjacent claimed cells.
///
/// Sets of size 0 or 1 are trivially connected.
pub fn is_connected4(claimed: &ClaimedSet) -> bool {
    let Some(start) = claimed.any() else {
        return true;
    };
    if claimed.len() == 1 {
        return true;
    }
    let mut visited: HashSet<Cell> = HashSet::with_capacity(claimed.len());
    let mut queue = VecDeque::new();
    visited.insert(start);
    queue.push_back(start);

    while let Some(cur) = queue.pop_front() {
        for n in cur.neighbours4() {
            if claimed.contains(n) && visited.insert(n) {
                queue.push_back(n);
            }
        }
    }
    visited.len() == claimed.len()
}

// ── Holes ──────────────────────────────────────────────────────────

/// Dense scan window: the claimed bounds grown by one cell on every side,
/// held in `i64` so the margin never overflows.
struct Window {
    x0: i64,
    z0: i64,
    cols: usize,
    rows: usize,
}

impl Window {
    fn around(bounds: &Bounds) -> Self {
        Self {
            x0: bounds.min_x() as i64 - 1,
            z0: bounds.min_z() as i64 - 1,
            cols: bounds.width() as usize + 2,
            rows: bounds.height() as usize + 2,
        }
    }

    fn index(&self, col: usize, row: usize) -> usize {
        row * self.cols + col
    }

    /// The grid cell at window position `(col, row)`, or `None` if it lies
    /// beyond the `i32` lattice (such a cell is never claimed).
    fn cell(&self, col: usize, row: usize) -> Option<Cell> {
        let x = i32::try_from(self.x0 + col as i64).ok()?;
        let z = i32::try_from(self.z0 + row as i64).ok()?;
        Some(Cell::new(x, z))
    }
}

/// Every unclaimed cell enclosed by the territory.
///
/// Floods the complement starting from the border of the bounds grown by
/// one, so the flood can pass around the shape. Complement cells inside
/// that window the flood never reaches are holes. O(width × height).
///
/// Returns the full set, not just a flag, so callers can compare hole
/// sets before and after a hypothetical mutation.
pub fn hole_cells4(claimed: &ClaimedSet) -> CellSet {
    let mut holes = CellSet::new();
    let Some(bounds) = Bounds::of(claimed) else {
        return holes;
    };
    let win = Window::around(&bounds);
    let is_claimed = |col: usize, row: usize| win.cell(col, row).is_some_and(|c| claimed.contains(c));

    let mut outside = vec![false; win.cols * win.rows];
    let mut queue: VecDeque<(usize, usize)> = VecDeque::new();
    let try_push = |col: usize, row: usize, outside: &mut [bool], queue: &mut VecDeque<(usize, usize)>| {
        let i = win.index(col, row);
        if outside[i] || is_claimed(col, row) {
            return;
        }
        outside[i] = true;
        queue.push_back((col, row));
    };

    for col in 0..win.cols {
        try_push(col, 0, &mut outside, &mut queue);
        try_push(col, win.rows - 1, &mut outside, &mut queue);
    }
    for row in 0..win.rows {
        try_push(0, row, &mut outside, &mut queue);
        try_push(win.cols - 1, row, &mut outside, &mut queue);
    }

    while let Some((col, row)) = queue.pop_front() {
        if col + 1 < win.cols {
            try_push(col + 1, row, &mut outside, &mut queue);
        }
        if col > 0 {
            try_push(col - 1, row, &mut outside, &mut queue);
        }
        if row + 1 < win.rows {
            try_push(col, row + 1, &mut outside, &mut queue);
        }
        if row > 0 {
            try_push(col, row - 1, &mut outside, &mut queue);
        }
    }

    for col in 0..win.cols {
        for row in 0..win.rows {
            if outside[win.index(col, row)] || is_claimed(col, row) {
                continue;
            }
            if let Some(c) = win.cell(col, row) {
                holes.insert(c);
            }
        }
    }
    holes
}

/// Returns `true` if the territory encloses at least one unclaimed cell.
pub fn has_holes4(claimed: &ClaimedSet) -> bool {
    !hole_cells4(claimed).is_empty()
}

// ── Before/after comparison ────────────────────────────────────────

/// How the hole set changed across a hypothetical mutation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HoleChange {
    /// Acceptable: no new hole and no growth.
    Unchanged,
    /// There were no holes before and there are now.
    Created {
        /// Hole cells after the mutation.
        after: usize,
    },
    /// Existing holes grew.
    Grown {
        /// Hole cells before the mutation.
        before: usize,
        /// Hole cells after the mutation.
        after: usize,
    },
}

impl HoleChange {
    /// Returns `true` for [`HoleChange::Unchanged`].
    pub fn is_acceptable(&self) -> bool {
        matches!(self, Self::Unchanged)
    }
}

/// Claim-side comparison: growth is measured by hole-cell count.
///
/// A claim can only fill or split holes, never move them, so the count is
/// sufficient here.
pub fn compare_holes_by_count(before: &CellSet, after: &CellSet) -> HoleChange {
    if before.is_empty() {
        if after.is_empty() {
            HoleChange::Unchanged
        } else {
            HoleChange::Created { after: after.len() }
        }
    } else if after.len() > before.len() {
        HoleChange::Grown {
            before: before.len(),
            after: after.len(),
        }
    } else {
        HoleChange::Unchanged
    }
}

/// Unclaim-side comparison: any hole cell that was not a hole before
/// counts as growth, even if the total shrank elsewhere.
pub fn compare_holes_by_membership(before: &CellSet, after: &CellSet) -> HoleChange {
    if before.is_empty() {
        if after.is_empty() {
            HoleChange::Unchanged
        } else {
            HoleChange::Created { after: after.len() }
        }
    } else if after.iter().any(|c| !before.contains(c)) {
        HoleChange::Grown {
            before: before.len(),
            after: after.len(),
        }
    } else {
        HoleChange::Unchanged
    }
}
