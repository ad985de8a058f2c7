//! Shape and predicate fixtures for chunkclaim development.
//!
//! Shape builders return plain [`ClaimedSet`]s so tests can feed them to
//! any crate. Predicate fixtures live in [`fixtures`].

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use chunkclaim_core::{Cell, ClaimedSet};

/// Build a set from `(x, z)` pairs.
pub fn cells(list: &[(i32, i32)]) -> ClaimedSet {
    list.iter().copied().map(Cell::from).collect()
}

/// Solid rectangle `[x0, x1] × [z0, z1]`.
pub fn block(x0: i32, z0: i32, x1: i32, z1: i32) -> ClaimedSet {
    ClaimedSet::rect(x0, z0, x1, z1)
}

/// The 3×3 starting territory centred on the origin.
pub fn initial_block() -> ClaimedSet {
    block(-1, -1, 1, 1)
}

/// `len` cells in a row along +x starting at `(x0, z)`.
pub fn line_x(x0: i32, z: i32, len: i32) -> ClaimedSet {
    (0..len).map(|i| Cell::new(x0 + i, z)).collect()
}

/// One-cell-thick rectangular outline.
pub fn ring(x0: i32, z0: i32, x1: i32, z1: i32) -> ClaimedSet {
    block(x0, z0, x1, z1)
        .iter()
        .filter(|c| c.x == x0 || c.x == x1 || c.z == z0 || c.z == z1)
        .collect()
}

/// A centre cell with four straight arms of `arm` cells each.
pub fn plus(center: Cell, arm: i32) -> ClaimedSet {
    let mut set = ClaimedSet::new();
    set.insert(center);
    for i in 1..=arm {
        set.insert(center.offset(i, 0));
        set.insert(center.offset(-i, 0));
        set.insert(center.offset(0, i));
        set.insert(center.offset(0, -i));
    }
    set
}

/// Two square lobes joined by a one-cell-wide bridge.
pub struct Dumbbell {
    pub cells: ClaimedSet,
    /// Bridge cells, west to east. Removing any one disconnects the lobes.
    pub bridge: Vec<Cell>,
}

/// Lobes of side `lobe` at `[0, lobe)²` and east of a `bridge_len` bridge
/// running along the middle row.
pub fn dumbbell(lobe: i32, bridge_len: i32) -> Dumbbell {
    let mid = lobe / 2;
    let mut cells = block(0, 0, lobe - 1, lobe - 1);
    let bridge: Vec<Cell> = (0..bridge_len).map(|i| Cell::new(lobe + i, mid)).collect();
    cells.extend(bridge.iter().copied());
    let east = lobe + bridge_len;
    cells.extend(block(east, 0, east + lobe - 1, lobe - 1).iter());
    Dumbbell { cells, bridge }
}
