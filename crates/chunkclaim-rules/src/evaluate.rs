//! The claim and unclaim gate chains.
//!
//! Both chains are pure: they read one snapshot of the claimed set and
//! return a [`Decision`]. Gates run in a fixed order and the first
//! rejection wins. A disabled gate returns before computing anything.

use crate::config::RulesConfig;
use crate::decision::{Decision, RuleId};
use crate::snapshot::MetricsSnapshot;
use crate::support::SupportReport;
use chunkclaim_core::{Cell, ClaimedSet};
use chunkclaim_shape::{
    approx_diameter4, arm_length_from, claimed_neighbours4, compare_holes_by_count,
    compare_holes_by_membership, count_endpoints4, endpoints_after_claim, hole_cells4,
    is_connected4, max_filled_square_side, perimeter_after_claim, perimeter_edges, Bounds,
    HoleChange,
};
use std::cell::OnceCell;
use tracing::trace;

// ── Claim probe ────────────────────────────────────────────────────

/// One candidate claim against one snapshot.
///
/// Baseline figures come from the cached snapshot when it describes the
/// same set; the hypothetical `S ∪ {cell}` is built at most once and
/// shared by every gate that needs it.
struct ClaimProbe<'a> {
    claimed: &'a ClaimedSet,
    cached: Option<&'a MetricsSnapshot>,
    cell: Cell,
    degree: usize,
    next: OnceCell<ClaimedSet>,
}

impl<'a> ClaimProbe<'a> {
    fn new(
        claimed: &'a ClaimedSet,
        cached: Option<&'a MetricsSnapshot>,
        cell: Cell,
        degree: usize,
    ) -> Self {
        // Only a snapshot whose area and bounds match the set is used.
        let cached = cached
            .filter(|m| m.area == claimed.len() && m.bounds == Bounds::of(claimed));
        Self {
            claimed,
            cached,
            cell,
            degree,
            next: OnceCell::new(),
        }
    }

    fn area(&self) -> usize {
        self.claimed.len()
    }

    fn perimeter(&self) -> usize {
        self.cached
            .map_or_else(|| perimeter_edges(self.claimed), |m| m.perimeter)
    }

    fn endpoints(&self) -> usize {
        self.cached
            .map_or_else(|| count_endpoints4(self.claimed), |m| m.endpoint_count)
    }

    fn bounds(&self) -> Option<Bounds> {
        match self.cached {
            Some(m) => m.bounds,
            None => Bounds::of(self.claimed),
        }
    }

    fn next_bounds(&self) -> Bounds {
        Bounds::extended(self.bounds(), self.cell)
    }

    fn next(&self) -> &ClaimedSet {
        self.next.get_or_init(|| self.claimed.with_cell(self.cell))
    }
}

type ClaimGate = fn(&ClaimProbe<'_>, &RulesConfig) -> Option<Decision>;

/// Optional gates, in evaluation order after duplicate/bootstrap/adjacency.
const CLAIM_GATES: [ClaimGate; 9] = [
    two_adjacency_gate,
    arm_length_gate,
    support_gate,
    perimeter_area_gate,
    diameter_gate,
    endpoints_gate,
    holes_gate,
    outer_fill_gate,
    inner_share_gate,
];

// ── Claim chain ────────────────────────────────────────────────────

/// Decide whether `cell` may be added to `claimed` under `rules`.
///
/// Equivalent to [`can_claim_with`] without a cached snapshot.
pub fn can_claim(claimed: &ClaimedSet, rules: &RulesConfig, cell: Cell) -> Decision {
    can_claim_with(claimed, rules, None, cell)
}

/// Decide whether `cell` may be added to `claimed`, reusing a cached
/// [`MetricsSnapshot`] of the same set for area, perimeter, endpoints and
/// bounds.
///
/// The snapshot must describe `claimed`. One whose area or bounds differ
/// is discarded and the figures are recomputed; a different set with the
/// same area and bounds is not detected.
///
/// Gate order:
///
/// 1. duplicate (always)
/// 2. empty set: accept the bootstrap cell
/// 3. 4-adjacency (always)
/// 4. two-adjacency, arm length, support, perimeter/area, diameter,
///    endpoints, holes, outer fill, inner share (each behind its toggle)
pub fn can_claim_with(
    claimed: &ClaimedSet,
    rules: &RulesConfig,
    cached: Option<&MetricsSnapshot>,
    cell: Cell,
) -> Decision {
    if claimed.contains(cell) {
        return Decision::reject(RuleId::Duplicate, "chunk is already claimed");
    }
    if claimed.is_empty() {
        return Decision::accept();
    }
    let degree = claimed_neighbours4(claimed, cell);
    if degree == 0 {
        return Decision::reject(
            RuleId::Adjacency,
            "must share an edge with the existing territory",
        );
    }

    let probe = ClaimProbe::new(claimed, cached, cell, degree);
    for gate in CLAIM_GATES {
        if let Some(rejection) = gate(&probe, rules) {
            trace!(%cell, rule = rejection.rule.as_ref().map(RuleId::code), "claim rejected");
            return rejection;
        }
    }
    Decision::accept()
}

fn two_adjacency_gate(p: &ClaimProbe<'_>, rules: &RulesConfig) -> Option<Decision> {
    if !rules.require_two_adjacent || p.degree >= 2 {
        return None;
    }
    Some(Decision::reject(
        RuleId::TwoAdjacency,
        "expansion needs at least 2 claimed edge neighbours",
    ))
}

fn arm_length_gate(p: &ClaimProbe<'_>, rules: &RulesConfig) -> Option<Decision> {
    if !rules.limit_arm || p.degree != 1 {
        return None;
    }
    let arm = arm_length_from(p.next(), p.cell);
    (arm > rules.max_arm_len as usize).then(|| {
        Decision::reject(
            RuleId::ArmLength,
            format!("thin arm too long (armLen={arm} > L={})", rules.max_arm_len),
        )
    })
}

fn support_gate(p: &ClaimProbe<'_>, rules: &RulesConfig) -> Option<Decision> {
    if !rules.limit_support {
        return None;
    }
    let report = SupportReport::compute(p.claimed, rules, p.cell);
    (!report.passes()).then(|| Decision::reject(RuleId::Support, report.to_string()))
}

fn perimeter_area_gate(p: &ClaimProbe<'_>, rules: &RulesConfig) -> Option<Decision> {
    if !rules.limit_perimeter_area {
        return None;
    }
    let perimeter = perimeter_after_claim(p.perimeter(), p.degree);
    let ratio = perimeter as f64 / (p.area() + 1) as f64;
    (ratio > rules.max_perimeter_area).then(|| {
        Decision::reject(
            RuleId::PerimeterArea,
            format!(
                "P/A too high ({ratio:.3} > {})",
                rules.max_perimeter_area
            ),
        )
    })
}

fn diameter_gate(p: &ClaimProbe<'_>, rules: &RulesConfig) -> Option<Decision> {
    if !rules.limit_diameter {
        return None;
    }
    let diameter = approx_diameter4(p.next());
    (diameter > rules.max_diameter).then(|| {
        Decision::reject(
            RuleId::Diameter,
            format!("diameter too large ({diameter} > {})", rules.max_diameter),
        )
    })
}

fn endpoints_gate(p: &ClaimProbe<'_>, rules: &RulesConfig) -> Option<Decision> {
    if !rules.limit_endpoints {
        return None;
    }
    let ends = endpoints_after_claim(p.claimed, p.endpoints(), p.cell);
    (ends > rules.max_endpoints as usize).then(|| {
        Decision::reject(
            RuleId::Endpoints,
            format!("too many endpoints ({ends} > {})", rules.max_endpoints),
        )
    })
}

fn holes_gate(p: &ClaimProbe<'_>, rules: &RulesConfig) -> Option<Decision> {
    if !rules.forbid_holes {
        return None;
    }
    let before = hole_cells4(p.claimed);
    let after = hole_cells4(p.next());
    match compare_holes_by_count(&before, &after) {
        HoleChange::Unchanged => None,
        HoleChange::Created { .. } => Some(Decision::reject(
            RuleId::Holes,
            "claim would enclose a hole",
        )),
        HoleChange::Grown { before, after } => Some(Decision::reject(
            RuleId::Holes,
            format!("hole area would grow ({before} -> {after})"),
        )),
    }
}

fn outer_fill_gate(p: &ClaimProbe<'_>, rules: &RulesConfig) -> Option<Decision> {
    if !rules.limit_outer_fill {
        return None;
    }
    let current = p
        .bounds()
        .map_or(p.area() as f64, |b| p.area() as f64 / b.square_area());
    let next = (p.area() + 1) as f64 / p.next_bounds().square_area();
    let min = rules.min_outer_fill;

    if current >= min {
        (next < min).then(|| {
            Decision::reject(
                RuleId::OuterFill,
                format!("bounding-square fill too low ({next:.3} < {min})"),
            )
        })
    } else {
        (next < current).then(|| {
            Decision::reject(
                RuleId::OuterFill,
                format!("bounding-square fill would drop ({current:.3} -> {next:.3}, threshold={min})"),
            )
        })
    }
}

fn inner_share_gate(p: &ClaimProbe<'_>, rules: &RulesConfig) -> Option<Decision> {
    if !rules.limit_inner_share {
        return None;
    }
    let lin = max_filled_square_side(p.next(), &p.next_bounds()) as f64;
    let share = lin * lin / (p.area() + 1) as f64;
    (share < rules.min_inner_share).then(|| {
        Decision::reject(
            RuleId::InnerShare,
            format!(
                "largest solid square share too low ({share:.3} < {})",
                rules.min_inner_share
            ),
        )
    })
}

// ── Unclaim chain ──────────────────────────────────────────────────

/// Decide whether `cell` may be removed from `claimed`.
///
/// 1. the cell must be claimed
/// 2. the last remaining cell may always go
/// 3. the rest must stay 4-connected
/// 4. no hole may appear, and no cell may become a hole that was not one
///    before
///
/// Every step is unconditional; `rules` has no unclaim toggles and is
/// taken so both chains share a signature.
pub fn can_unclaim(claimed: &ClaimedSet, _rules: &RulesConfig, cell: Cell) -> Decision {
    if !claimed.contains(cell) {
        return Decision::reject(RuleId::NotClaimed, "chunk is not claimed");
    }
    if claimed.len() <= 1 {
        return Decision::accept();
    }
    let next = claimed.without_cell(cell);
    if !is_connected4(&next) {
        return Decision::reject(
            RuleId::Disconnects,
            "unclaiming would split the territory",
        );
    }
    match compare_holes_by_membership(&hole_cells4(claimed), &hole_cells4(&next)) {
        HoleChange::Unchanged => Decision::accept(),
        HoleChange::Created { .. } => {
            Decision::reject(RuleId::UnclaimHoles, "unclaiming would open a hole")
        }
        HoleChange::Grown { before, after } => Decision::reject(
            RuleId::UnclaimHoles,
            format!("hole area would grow ({before} -> {after})"),
        ),
    }
}
