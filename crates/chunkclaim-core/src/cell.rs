//! The [`Cell`] coordinate type and its canonical encodings.

use crate::error::CellParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A single chunk on the infinite claim grid.
///
/// Identity is purely by value: two cells are equal iff both coordinates
/// match. `x` grows east, `z` grows south (Minecraft convention).
///
/// Lattice arithmetic ([`offset`](Self::offset), [`neighbours4`](Self::neighbours4))
/// wraps at the `i32` extremes. Claim worlds never come near those
/// coordinates, and wrapping keeps every metric total instead of panicking
/// in debug builds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    /// East-west coordinate.
    pub x: i32,
    /// North-south coordinate.
    pub z: i32,
}

impl Cell {
    /// Construct a cell from its coordinates.
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// The cell displaced by `(dx, dz)`.
    pub const fn offset(self, dx: i32, dz: i32) -> Self {
        Self {
            x: self.x.wrapping_add(dx),
            z: self.z.wrapping_add(dz),
        }
    }

    /// The four edge-sharing neighbours, in the fixed order
    /// east, west, south, north.
    ///
    /// BFS-based metrics depend on this order for their tie-breaking, so
    /// it must not change.
    ///
    /// ```
    /// use chunkclaim_core::Cell;
    ///
    /// let n = Cell::new(0, 0).neighbours4();
    /// assert_eq!(n, [Cell::new(1, 0), Cell::new(-1, 0), Cell::new(0, 1), Cell::new(0, -1)]);
    /// ```
    pub const fn neighbours4(self) -> [Cell; 4] {
        [
            self.offset(1, 0),
            self.offset(-1, 0),
            self.offset(0, 1),
            self.offset(0, -1),
        ]
    }

    /// Returns `true` if `other` shares an edge with `self`.
    pub fn is_adjacent4(self, other: Cell) -> bool {
        let dx = (self.x as i64 - other.x as i64).abs();
        let dz = (self.z as i64 - other.z as i64).abs();
        dx + dz == 1
    }

    /// Canonical string key `"x,z"`.
    ///
    /// Inverse of [`from_key`](Self::from_key) for every `i32` pair.
    pub fn key(self) -> String {
        self.to_string()
    }

    /// Parse a canonical `"x,z"` key.
    pub fn from_key(key: &str) -> Result<Self, CellParseError> {
        key.parse()
    }

    /// Injective 64-bit packing: `x` in the high word, `z` in the low word.
    pub const fn packed(self) -> u64 {
        ((self.x as u32 as u64) << 32) | (self.z as u32 as u64)
    }

    /// Inverse of [`packed`](Self::packed).
    pub const fn from_packed(packed: u64) -> Self {
        Self {
            x: (packed >> 32) as u32 as i32,
            z: packed as u32 as i32,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.z)
    }
}

impl FromStr for Cell {
    type Err = CellParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (xs, zs) = s
            .split_once(',')
            .ok_or_else(|| CellParseError::MissingSeparator {
                input: s.to_string(),
            })?;
        let x = xs.parse::<i32>().map_err(|_| CellParseError::InvalidComponent {
            input: s.to_string(),
            axis: "x",
        })?;
        let z = zs.parse::<i32>().map_err(|_| CellParseError::InvalidComponent {
            input: s.to_string(),
            axis: "z",
        })?;
        Ok(Self { x, z })
    }
}

impl From<(i32, i32)> for Cell {
    fn from((x, z): (i32, i32)) -> Self {
        Self { x, z }
    }
}
