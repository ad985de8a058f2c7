//! chunkclaim: land-claim validation and shape metrics for chunk
//! territories on an infinite integer grid.
//!
//! This is the facade crate re-exporting the public API of every
//! chunkclaim sub-crate.
//!
//! # Quick start
//!
//! ```rust
//! use chunkclaim::prelude::*;
//!
//! let rules = RulesConfig::default().with_diameter_limit(12);
//! let mut session = ClaimSession::with_initial_block(rules).unwrap();
//!
//! // Edge-centre cells of the starting block are well supported.
//! assert!(session.claim(Cell::new(2, 0)).accepted);
//!
//! // Diagonal contact is not adjacency.
//! let d = session.claim(Cell::new(3, 1));
//! assert_eq!(d.rule, Some(RuleId::Adjacency));
//!
//! // The centre cannot be given up: it would leave a hole.
//! let d = session.unclaim(Cell::new(0, 0));
//! assert_eq!(d.rule, Some(RuleId::UnclaimHoles));
//!
//! assert_eq!(session.metrics().area, 10);
//! ```
//!
//! # Custom claim logic
//!
//! ```rust
//! use chunkclaim::prelude::*;
//!
//! let mut session = ClaimSession::with_initial_block(RulesConfig::default()).unwrap();
//! session.set_predicate(predicate_fn(|view, cell| {
//!     if cell.x > 4 {
//!         return Ok(PredicateVerdict::reject("beyond the river").with_module("border").into());
//!     }
//!     Ok(can_claim(view.claimed, view.rules, cell).into())
//! }));
//! assert!(!session.claim(Cell::new(5, 0)).accepted);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `chunkclaim-core` | `Cell`, `ClaimedSet`, `CellSet`, key parsing |
//! | [`shape`] | `chunkclaim-shape` | Metrics, bounds, connectivity, holes |
//! | [`rules`] | `chunkclaim-rules` | `RulesConfig`, gate chains, predicates |
//! | [`engine`] | `chunkclaim-engine` | `ClaimSession`, probes, frontier status |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Grid primitives (`chunkclaim-core`).
pub use chunkclaim_core as types;

/// Shape metrics and topology checks (`chunkclaim-shape`).
///
/// Pure functions over a [`types::ClaimedSet`]; the incremental variants
/// ([`shape::perimeter_after_claim`], [`shape::endpoints_after_claim`],
/// [`shape::Bounds::extended`]) match their from-scratch twins.
pub use chunkclaim_shape as shape;

/// Rule configuration, gate chains and pluggable predicates
/// (`chunkclaim-rules`).
pub use chunkclaim_rules as rules;

/// The claim session (`chunkclaim-engine`).
pub use chunkclaim_engine as engine;

/// Common imports for typical chunkclaim usage.
///
/// ```rust
/// use chunkclaim::prelude::*;
/// ```
pub mod prelude {
    // Grid
    pub use chunkclaim_core::{Cell, CellSet, ClaimedSet};

    // Shape
    pub use chunkclaim_shape::Bounds;

    // Rules
    pub use chunkclaim_rules::{
        can_claim, can_unclaim, predicate_fn, ClaimPredicate, Decision, MetricsSnapshot,
        PredicateError, PredicateOutput, PredicateVerdict, RuleId, RulesConfig, StateView,
    };

    // Errors
    pub use chunkclaim_core::CellParseError;
    pub use chunkclaim_engine::SessionError;
    pub use chunkclaim_rules::ConfigError;

    // Engine
    pub use chunkclaim_engine::{
        CellProbe, ClaimSession, FrontierStatus, ProbeStatus, ToggleAction, ToggleOutcome,
    };
}
