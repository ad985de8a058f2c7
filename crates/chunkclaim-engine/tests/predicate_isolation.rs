//! Custom predicates inside a session: replacement, failure isolation and
//! the runtime-error latch.

use chunkclaim_core::Cell;
use chunkclaim_engine::{ClaimSession, ProbeStatus};
use chunkclaim_rules::{
    AdjacencyOnly, DefaultRules, PredicateOutput, PredicateVerdict, RuleId, RulesConfig,
};
use chunkclaim_shape::is_connected4;
use chunkclaim_test_utils::fixtures::{
    ConstPredicate, FailingPredicate, PanickingPredicate, RecordingPredicate,
};
use serde_json::json;

fn session() -> ClaimSession {
    ClaimSession::with_initial_block(RulesConfig::default()).unwrap()
}

#[test]
fn adjacency_only_ignores_shape_rules() {
    let mut s = session();
    // The default chain rejects a corner-flush cell once m is raised.
    s.set_rules(RulesConfig::default().with_support(3, 5)).unwrap();
    assert_eq!(s.evaluate_claim(Cell::new(2, 1)).rule, Some(RuleId::Support));

    s.set_predicate(AdjacencyOnly);
    assert!(s.claim(Cell::new(2, 1)).accepted);
    assert!(!s.claim(Cell::new(2, 1)).accepted);
    assert!(!s.claim(Cell::new(7, 7)).accepted);
}

#[test]
fn default_rules_predicate_matches_builtin() {
    let mut with = session();
    with.set_predicate(DefaultRules);
    let without = session();
    for x in -3..=3 {
        for z in -3..=3 {
            let c = Cell::new(x, z);
            assert_eq!(with.evaluate_claim(c), without.evaluate_claim(c), "at {c}");
        }
    }
}

#[test]
fn predicate_sees_only_claims() {
    let mut s = session();
    let recorder = RecordingPredicate::new();
    let log = recorder.handle();
    s.set_predicate(recorder);

    s.claim(Cell::new(2, 0));
    s.unclaim(Cell::new(2, 0));
    s.toggle(Cell::new(-2, 0));
    assert_eq!(*log.borrow(), vec![Cell::new(2, 0), Cell::new(-2, 0)]);
}

#[test]
fn structured_rejection_is_reported() {
    let mut s = session();
    let verdict = PredicateVerdict::reject("reserved for spawn").with_module("zoning");
    s.set_predicate(ConstPredicate::new("zoning", verdict));
    let d = s.claim(Cell::new(2, 0));
    assert!(!d.accepted);
    assert_eq!(d.rule, Some(RuleId::Custom("zoning".into())));
    assert_eq!(d.details(), "zoning: reserved for spawn");
    assert_eq!(s.predicate_name(), Some("zoning"));
}

#[test]
fn dynamic_output_is_coerced() {
    let mut s = session();
    s.set_predicate(ConstPredicate::new(
        "script",
        PredicateOutput::Dynamic(json!({"allowed": false, "reason": "no"})),
    ));
    assert!(!s.claim(Cell::new(2, 0)).accepted);

    s.set_predicate(ConstPredicate::new("script", PredicateOutput::Dynamic(json!(1))));
    assert!(s.claim(Cell::new(2, 0)).accepted);
}

#[test]
fn panicking_predicate_never_unwinds_into_session() {
    let mut s = session();
    s.set_predicate(PanickingPredicate::new("index out of range"));
    let d = s.claim(Cell::new(2, 0));
    assert!(d.is_runtime_error());
    assert_eq!(s.claimed().len(), 9);

    // Frontier classification and probing survive too.
    let status = s.frontier_status();
    assert!(status.iter().all(|f| f.decision.is_runtime_error()));
    assert_eq!(s.probe(Cell::new(2, 0)).status, ProbeStatus::Blocked);
    assert_eq!(
        s.last_runtime_error().as_deref(),
        Some("predicate runtime error: panicked: index out of range")
    );
}

#[test]
fn failing_predicate_after_successes() {
    let mut s = session();
    s.set_predicate(FailingPredicate::new(2));
    assert!(s.claim(Cell::new(2, 0)).accepted);
    assert!(s.claim(Cell::new(-2, 0)).accepted);
    let d = s.claim(Cell::new(0, 2));
    assert!(d.is_runtime_error());
    assert!(s.last_runtime_error().is_some());
    assert_eq!(s.claimed().len(), 11);

    // Unclaims keep working while the predicate is broken.
    assert!(s.unclaim(Cell::new(2, 0)).accepted);
}

#[test]
fn accepting_predicate_keeps_territory_connected() {
    let mut s = session();
    s.set_predicate(ConstPredicate::new("yes", true));
    let far = Cell::new(20_000_000, 0);
    let d = s.claim(far);
    assert!(!d.accepted);
    assert_eq!(d.rule, Some(RuleId::Adjacency));
    assert!(!s.claimed().contains(far));
    assert_eq!(s.metrics().area, 9);
    assert!(is_connected4(s.claimed()));

    // The territory is still editable afterwards.
    assert!(s.unclaim(Cell::new(1, 1)).accepted);
    assert!(s.claim(Cell::new(2, 0)).accepted);
    assert!(is_connected4(s.claimed()));
}
