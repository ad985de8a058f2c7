//! Axis-aligned bounding rectangle of a claimed set.

use chunkclaim_core::{Cell, ClaimedSet};
use serde::Serialize;

/// Bounding rectangle of a non-empty claimed set.
///
/// `width`, `height` and `side` are stored as `u64` so a span across the
/// whole `i32` range cannot overflow. `side` is `L = max(width, height)`,
/// the edge of the smallest enclosing square.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Bounds {
    min_x: i32,
    max_x: i32,
    min_z: i32,
    max_z: i32,
    width: u64,
    height: u64,
    side: u64,
}

impl Bounds {
    fn from_extremes(min_x: i32, max_x: i32, min_z: i32, max_z: i32) -> Self {
        let width = (max_x as i64 - min_x as i64 + 1) as u64;
        let height = (max_z as i64 - min_z as i64 + 1) as u64;
        Self {
            min_x,
            max_x,
            min_z,
            max_z,
            width,
            height,
            side: width.max(height),
        }
    }

    /// The 1×1 bounds of a single cell.
    pub fn single(cell: Cell) -> Self {
        Self::from_extremes(cell.x, cell.x, cell.z, cell.z)
    }

    /// Full recompute over `claimed`. `None` for the empty set. O(|S|).
    pub fn of(claimed: &ClaimedSet) -> Option<Self> {
        let mut iter = claimed.iter();
        let first = iter.next()?;
        let (mut min_x, mut max_x, mut min_z, mut max_z) = (first.x, first.x, first.z, first.z);
        for c in iter {
            min_x = min_x.min(c.x);
            max_x = max_x.max(c.x);
            min_z = min_z.min(c.z);
            max_z = max_z.max(c.z);
        }
        Some(Self::from_extremes(min_x, max_x, min_z, max_z))
    }

    /// Incremental update: the bounds after adding `cell`. O(1).
    ///
    /// Identical to [`Bounds::of`] on the union set.
    pub fn extended(bounds: Option<Self>, cell: Cell) -> Self {
        match bounds {
            None => Self::single(cell),
            Some(b) => b.including(cell),
        }
    }

    /// These bounds grown to cover `cell`.
    pub fn including(self, cell: Cell) -> Self {
        Self::from_extremes(
            self.min_x.min(cell.x),
            self.max_x.max(cell.x),
            self.min_z.min(cell.z),
            self.max_z.max(cell.z),
        )
    }

    /// Minimum x (inclusive).
    pub fn min_x(&self) -> i32 {
        self.min_x
    }

    /// Maximum x (inclusive).
    pub fn max_x(&self) -> i32 {
        self.max_x
    }

    /// Minimum z (inclusive).
    pub fn min_z(&self) -> i32 {
        self.min_z
    }

    /// Maximum z (inclusive).
    pub fn max_z(&self) -> i32 {
        self.max_z
    }

    /// Number of columns spanned.
    pub fn width(&self) -> u64 {
        self.width
    }

    /// Number of rows spanned.
    pub fn height(&self) -> u64 {
        self.height
    }

    /// `L = max(width, height)`.
    pub fn side(&self) -> u64 {
        self.side
    }

    /// Area of the enclosing square, `L²`, as a float for ratio math.
    pub fn square_area(&self) -> f64 {
        let l = self.side as f64;
        l * l
    }

    /// Returns `true` if `cell` lies inside the rectangle.
    pub fn contains(&self, cell: Cell) -> bool {
        (self.min_x..=self.max_x).contains(&cell.x) && (self.min_z..=self.max_z).contains(&cell.z)
    }
}
