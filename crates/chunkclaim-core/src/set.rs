//! The [`ClaimedSet`] snapshot type.

use crate::cell::Cell;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// A derived set of cells (holes, frontier).
///
/// `IndexSet` keeps iteration deterministic for a given construction
/// sequence, which makes test failures reproducible. No algorithm in the
/// workspace depends on that order.
pub type CellSet = IndexSet<Cell>;

/// The cells currently part of the territory.
///
/// Duplicate-free. Only the owning session mutates it; metrics, topology
/// checks and the rule evaluator take `&ClaimedSet` and never write.
/// Hypothetical post-action sets are built with [`with_cell`](Self::with_cell)
/// and [`without_cell`](Self::without_cell).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClaimedSet {
    cells: IndexSet<Cell>,
}

impl ClaimedSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// A solid rectangle spanning `[x0, x1] × [z0, z1]` inclusive.
    ///
    /// Empty if either range is inverted.
    pub fn rect(x0: i32, z0: i32, x1: i32, z1: i32) -> Self {
        let mut set = Self::new();
        for x in x0..=x1 {
            for z in z0..=z1 {
                set.insert(Cell::new(x, z));
            }
        }
        set
    }

    /// Number of claimed cells (the territory's area).
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns `true` if nothing is claimed.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Membership test.
    pub fn contains(&self, cell: Cell) -> bool {
        self.cells.contains(&cell)
    }

    /// Iterate over the claimed cells.
    pub fn iter(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells.iter().copied()
    }

    /// An arbitrary member, or `None` if empty.
    pub fn any(&self) -> Option<Cell> {
        self.cells.first().copied()
    }

    /// Add a cell. Returns `false` if it was already present.
    pub fn insert(&mut self, cell: Cell) -> bool {
        self.cells.insert(cell)
    }

    /// Remove a cell. Returns `false` if it was not present.
    pub fn remove(&mut self, cell: Cell) -> bool {
        self.cells.swap_remove(&cell)
    }

    /// Remove every cell.
    pub fn clear(&mut self) {
        self.cells.clear();
    }

    /// A copy of this set with `cell` added.
    pub fn with_cell(&self, cell: Cell) -> Self {
        let mut next = self.clone();
        next.insert(cell);
        next
    }

    /// A copy of this set with `cell` removed.
    pub fn without_cell(&self, cell: Cell) -> Self {
        let mut next = self.clone();
        next.remove(cell);
        next
    }
}

impl FromIterator<Cell> for ClaimedSet {
    fn from_iter<I: IntoIterator<Item = Cell>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}

impl Extend<Cell> for ClaimedSet {
    fn extend<I: IntoIterator<Item = Cell>>(&mut self, iter: I) {
        self.cells.extend(iter);
    }
}

impl<'a> IntoIterator for &'a ClaimedSet {
    type Item = &'a Cell;
    type IntoIter = indexmap::set::Iter<'a, Cell>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_is_duplicate_free() {
        let mut s = ClaimedSet::new();
        assert!(s.insert(Cell::new(1, 1)));
        assert!(!s.insert(Cell::new(1, 1)));
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn hypothetical_copies_leave_original_untouched() {
        let s = ClaimedSet::rect(0, 0, 1, 1);
        let grown = s.with_cell(Cell::new(2, 0));
        let shrunk = s.without_cell(Cell::new(0, 0));
        assert_eq!(s.len(), 4);
        assert_eq!(grown.len(), 5);
        assert_eq!(shrunk.len(), 3);
        assert!(!shrunk.contains(Cell::new(0, 0)));
    }

    #[test]
    fn equality_ignores_insertion_order() {
        let a: ClaimedSet = [Cell::new(0, 0), Cell::new(1, 0)].into_iter().collect();
        let b: ClaimedSet = [Cell::new(1, 0), Cell::new(0, 0)].into_iter().collect();
        assert_eq!(a, b);
    }

    #[test]
    fn rect_inverted_range_is_empty() {
        assert!(ClaimedSet::rect(2, 0, 1, 0).is_empty());
        assert_eq!(ClaimedSet::rect(-1, -1, 1, 1).len(), 9);
    }

    #[test]
    fn serializes_as_plain_array() {
        let s: ClaimedSet = [Cell::new(0, 0)].into_iter().collect();
        let json = serde_json::to_string(&s).unwrap();
        assert_eq!(json, r#"[{"x":0,"z":0}]"#);
        let back: ClaimedSet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, s);
    }
}
