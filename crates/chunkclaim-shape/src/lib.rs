//! Shape metrics and topology checks for claimed chunk sets.
//!
//! Everything here is a pure function of a [`ClaimedSet`](chunkclaim_core::ClaimedSet)
//! snapshot. The rule evaluator composes these into claim decisions; the
//! session uses them to derive display metrics.
//!
//! # Metrics
//!
//! - [`perimeter_edges`], [`claimed_neighbours4`], [`count_endpoints4`]
//! - [`approx_diameter4`] (double-sweep BFS, approximate for non-trees)
//! - [`Bounds`] and [`max_filled_square_side`] (maximal-square DP)
//! - [`arm_length_from`], [`neighbourhood_counts`], [`frontier`]
//!
//! # Topology
//!
//! - [`is_connected4`] (BFS flood)
//! - [`hole_cells4`] (exterior flood, complement inside the bounds)

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod bounds;
pub mod metrics;
pub mod topology;

pub use bounds::Bounds;
pub use metrics::{
    approx_diameter4, arm_length_from, claimed_neighbours4, count_endpoints4,
    endpoints_after_claim, frontier, max_filled_square_side, neighbourhood_counts,
    perimeter_after_claim, perimeter_edges, NeighbourhoodCounts,
};
pub use topology::{
    compare_holes_by_count, compare_holes_by_membership, has_holes4, hole_cells4, is_connected4,
    HoleChange,
};
