//! Session invariants under random click sequences.
//!
//! Drives a session with toggles on cells around the origin and checks,
//! after every step, that the territory stays 4-connected, that the
//! cached metrics equal a fresh recompute, and that rejected actions
//! leave the territory untouched. With `forbid_holes` on, a hole-free
//! start stays hole-free.

use chunkclaim_core::Cell;
use chunkclaim_engine::{ClaimSession, ProbeStatus, ToggleAction};
use chunkclaim_rules::{MetricsSnapshot, RulesConfig};
use chunkclaim_shape::{has_holes4, is_connected4};
use proptest::prelude::*;

const SPAN: i32 = 6;

fn click_strategy() -> impl Strategy<Value = Vec<(i32, i32)>> {
    prop::collection::vec((-SPAN..=SPAN, -SPAN..=SPAN), 1..120)
}

fn rules_strategy() -> impl Strategy<Value = RulesConfig> {
    prop_oneof![
        Just(RulesConfig::default()),
        Just(RulesConfig::permissive()),
        Just(RulesConfig::permissive().with_forbid_holes(true)),
        Just(
            RulesConfig::default()
                .with_diameter_limit(8)
                .with_endpoint_limit(4)
                .with_outer_fill(0.5)
        ),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn toggles_preserve_invariants(rules in rules_strategy(), clicks in click_strategy()) {
        let forbid_holes = rules.forbid_holes;
        let mut session = ClaimSession::with_initial_block(rules).unwrap();

        for (x, z) in clicks {
            let cell = Cell::new(x, z);
            let before = session.claimed().clone();
            let out = session.toggle(cell);

            if out.decision.accepted {
                match out.action {
                    ToggleAction::Claim => prop_assert!(session.claimed().contains(cell)),
                    ToggleAction::Unclaim => prop_assert!(!session.claimed().contains(cell)),
                }
            } else {
                prop_assert_eq!(session.claimed(), &before);
            }

            prop_assert!(is_connected4(session.claimed()));
            prop_assert_eq!(session.metrics(), &MetricsSnapshot::compute(session.claimed()));
            if forbid_holes {
                prop_assert!(!has_holes4(session.claimed()));
            }
        }
    }

    #[test]
    fn probe_agrees_with_toggle(rules in rules_strategy(), clicks in click_strategy()) {
        let mut session = ClaimSession::with_initial_block(rules).unwrap();
        for (x, z) in clicks {
            let cell = Cell::new(x, z);
            let probe = session.probe(cell);
            prop_assert_eq!(probe.status.is_claimed(), session.claimed().contains(cell));
            let out = session.toggle(cell);
            prop_assert_eq!(&probe.decision, &out.decision);
            let expect_accept = matches!(
                probe.status,
                ProbeStatus::ClaimedRemovable | ProbeStatus::Claimable
            );
            prop_assert_eq!(expect_accept, out.decision.accepted);
        }
    }
}

#[test]
fn emptied_territory_restarts_anywhere() {
    let mut session = ClaimSession::with_initial_block(RulesConfig::permissive()).unwrap();
    // Peel the block down to nothing, outer ring first.
    let order = [
        (-1, -1), (0, -1), (1, -1), (1, 0), (1, 1), (0, 1), (-1, 1), (-1, 0), (0, 0),
    ];
    for (x, z) in order {
        let d = session.unclaim(Cell::new(x, z));
        assert!(d.accepted, "({x},{z}): {d}");
    }
    assert!(session.claimed().is_empty());
    assert!(session.claim(Cell::new(100, -100)).accepted);
    assert_eq!(session.metrics().area, 1);
}

#[test]
fn metrics_serialize_for_hosts() {
    let session = ClaimSession::with_initial_block(RulesConfig::default()).unwrap();
    let json = serde_json::to_value(session.metrics()).unwrap();
    assert_eq!(json["area"], 9);
    assert_eq!(json["perimeter"], 12);
    assert_eq!(json["bounds"]["side"], 3);
    let probe = serde_json::to_value(session.probe(Cell::new(0, 0))).unwrap();
    assert_eq!(probe["status"], "ClaimedLocked");
    assert_eq!(probe["decision"]["rule"], "U2");
}
