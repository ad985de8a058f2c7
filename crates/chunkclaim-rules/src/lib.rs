//! Claim rules for chunkclaim territories.
//!
//! [`can_claim`] and [`can_unclaim`] are pure gate chains over a
//! [`ClaimedSet`](chunkclaim_core::ClaimedSet) snapshot, configured by a
//! [`RulesConfig`]. They never fail: a rejection is a [`Decision`] naming
//! the [`RuleId`] that fired.
//!
//! Hosts that want their own claim logic implement [`ClaimPredicate`] and
//! call it through [`invoke_guarded`], which contains errors and panics.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod decision;
pub mod evaluate;
pub mod predicate;
pub mod snapshot;
pub mod support;

pub use config::{ConfigError, RulesConfig};
pub use decision::{Decision, RuleId};
pub use evaluate::{can_claim, can_claim_with, can_unclaim};
pub use predicate::{
    invoke_guarded, normalize, predicate_fn, AdjacencyOnly, ClaimPredicate, DefaultRules,
    PredicateError, PredicateOutput, PredicateVerdict, StateView,
};
pub use snapshot::MetricsSnapshot;
pub use support::SupportReport;
