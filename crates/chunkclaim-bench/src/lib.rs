//! Territory profiles for chunkclaim benchmarks and examples.
//!
//! - [`solid_square`]: filled `side × side` block, the compact extreme
//! - [`serpentine`]: one-cell-wide snake, the long-diameter extreme
//! - [`comb`]: spine with evenly spaced teeth, many endpoints
//! - [`grown_territory`]: deterministic organic growth under real rules

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use chunkclaim_core::{Cell, ClaimedSet};
use chunkclaim_engine::ClaimSession;
use chunkclaim_rules::RulesConfig;
use chunkclaim_shape::frontier;

/// Filled square with its minimum corner at the origin.
pub fn solid_square(side: i32) -> ClaimedSet {
    ClaimedSet::rect(0, 0, side - 1, side - 1)
}

/// A snake of `rows` horizontal runs of `width` cells, joined at
/// alternating ends and separated by one empty row.
///
/// The set is a tree (a single path), so the approximate diameter is
/// exact and close to the area.
pub fn serpentine(rows: i32, width: i32) -> ClaimedSet {
    let mut set = ClaimedSet::new();
    for r in 0..rows {
        let z = r * 2;
        for x in 0..width {
            set.insert(Cell::new(x, z));
        }
        if r + 1 < rows {
            let joint = if r % 2 == 0 { width - 1 } else { 0 };
            set.insert(Cell::new(joint, z + 1));
        }
    }
    set
}

/// A spine along `z = 0` of `teeth * 2 - 1` cells with a tooth of
/// `tooth_len` cells rising from every other spine cell.
pub fn comb(teeth: i32, tooth_len: i32) -> ClaimedSet {
    let mut set = ClaimedSet::new();
    for x in 0..(teeth * 2 - 1) {
        set.insert(Cell::new(x, 0));
        if x % 2 == 0 {
            for z in 1..=tooth_len {
                set.insert(Cell::new(x, z));
            }
        }
    }
    set
}

/// Grow from the initial 3×3 block by attempting claims on frontier
/// cells picked from a seeded sequence until `target_area` is reached or
/// `max_attempts` run out.
///
/// Rejected attempts are skipped, so the result is shaped by `rules`.
/// Deterministic for a given `(rules, target_area, seed)`.
pub fn grown_territory(
    rules: RulesConfig,
    target_area: usize,
    seed: u64,
    max_attempts: usize,
) -> ClaimedSet {
    let Ok(mut session) = ClaimSession::with_initial_block(rules) else {
        return ClaimedSet::new();
    };
    let mut state = seed;
    for _ in 0..max_attempts {
        if session.claimed().len() >= target_area {
            break;
        }
        let mut candidates: Vec<Cell> = frontier(session.claimed()).into_iter().collect();
        if candidates.is_empty() {
            break;
        }
        candidates.sort_unstable();
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        let pick = (state >> 33) as usize % candidates.len();
        session.claim(candidates[pick]);
    }
    session.claimed().clone()
}
