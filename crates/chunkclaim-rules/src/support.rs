//! Neighbourhood support around a candidate cell.

use crate::config::RulesConfig;
use chunkclaim_core::{Cell, ClaimedSet};
use chunkclaim_shape::{neighbourhood_counts, NeighbourhoodCounts};
use serde::Serialize;
use std::fmt;

/// Claimed/available counts in the 8-cell and 24-cell windows around a
/// cell, with the thresholds they are judged against.
///
/// The support gate rejects unless both windows pass. Hosts also show
/// this report for the hovered cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct SupportReport {
    /// Window centre.
    pub cell: Cell,
    /// Radius-1 window (8 cells).
    pub ring1: NeighbourhoodCounts,
    /// Radius-2 window (24 cells, rings 1 and 2).
    pub rings12: NeighbourhoodCounts,
    /// Ring-1 threshold: claimed must exceed it.
    pub m: u32,
    /// Rings-1+2 threshold: claimed must exceed it.
    pub n: u32,
}

impl SupportReport {
    /// Count both windows around `cell` in `claimed`.
    pub fn compute(claimed: &ClaimedSet, rules: &RulesConfig, cell: Cell) -> Self {
        Self {
            cell,
            ring1: neighbourhood_counts(claimed, cell, 1),
            rings12: neighbourhood_counts(claimed, cell, 2),
            m: rules.support_m,
            n: rules.support_n,
        }
    }

    /// Ring-1 claimed count exceeds `m`.
    pub fn ring1_passes(&self) -> bool {
        self.ring1.claimed > self.m as usize
    }

    /// Rings-1+2 claimed count exceeds `n`.
    pub fn rings12_passes(&self) -> bool {
        self.rings12.claimed > self.n as usize
    }

    /// Both windows pass.
    pub fn passes(&self) -> bool {
        self.ring1_passes() && self.rings12_passes()
    }
}

impl fmt::Display for SupportReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ring 1 (8 cells) claimed={} available={} (needs > m={}) and rings 1+2 (24 cells) \
             claimed={} available={} (needs > n={})",
            self.ring1.claimed,
            self.ring1.available,
            self.m,
            self.rings12.claimed,
            self.rings12.available,
            self.n,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edge_of_block_counts() {
        let s = ClaimedSet::rect(-1, -1, 1, 1);
        let r = SupportReport::compute(&s, &RulesConfig::default(), Cell::new(2, 0));
        // Ring 1 around (2,0): (1,-1), (1,0), (1,1) claimed.
        assert_eq!(r.ring1.claimed, 3);
        // (2,-1) and (2,1) touch the block.
        assert_eq!(r.ring1.available, 2);
        // Radius 2 adds column x=0.
        assert_eq!(r.rings12.claimed, 6);
        assert!(r.passes());
    }

    #[test]
    fn lone_cell_fails_default_thresholds() {
        let s = ClaimedSet::rect(0, 0, 0, 0);
        let r = SupportReport::compute(&s, &RulesConfig::default(), Cell::new(1, 0));
        assert_eq!(r.ring1.claimed, 1);
        assert!(!r.ring1_passes());
        assert!(!r.passes());
        assert!(r.to_string().contains("needs > m=1"));
    }
}
