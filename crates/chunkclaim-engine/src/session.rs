//! The claim session: one territory, its rules, and its cached metrics.
//!
//! [`ClaimSession`] is the only owner of a [`ClaimedSet`]. Every mutation
//! goes through [`claim()`](ClaimSession::claim) or
//! [`unclaim()`](ClaimSession::unclaim), which decide against the current
//! snapshot and apply only on acceptance, so decide-then-apply cannot
//! interleave with another mutation. Metrics are rebuilt after each
//! change.
//!
//! # Predicates
//!
//! An installed [`ClaimPredicate`] replaces the built-in claim chain. It
//! is always called through [`invoke_guarded`], so a failing predicate
//! yields a [`RuleId::RuntimeError`](chunkclaim_rules::RuleId::RuntimeError)
//! rejection. Repeated failures with the same message are logged once.
//! Duplicate and 4-adjacency rejections still apply on top of the
//! predicate. Unclaims always use the built-in chain.
//!
//! The session is single-threaded: predicates need not be `Send`.

use crate::error::SessionError;
use crate::probe::{CellProbe, FrontierStatus, ProbeStatus};
use chunkclaim_core::{Cell, CellSet, ClaimedSet};
use chunkclaim_rules::{
    can_claim_with, can_unclaim, invoke_guarded, ClaimPredicate, Decision, MetricsSnapshot,
    RuleId, RulesConfig, StateView, SupportReport,
};
use chunkclaim_shape::{claimed_neighbours4, frontier, hole_cells4, is_connected4};
use serde::Serialize;
use std::cell::RefCell;
use std::fmt;
use tracing::{debug, info, warn};

/// Half-width of the starting block: `reset()` claims `[-1, 1]²`.
pub const INITIAL_BLOCK_RADIUS: i32 = 1;

// ── Toggle outcome ─────────────────────────────────────────────────

/// Which action a [`toggle()`](ClaimSession::toggle) attempted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum ToggleAction {
    /// The cell was unclaimed; a claim was attempted.
    Claim,
    /// The cell was claimed; an unclaim was attempted.
    Unclaim,
}

/// Result of a [`toggle()`](ClaimSession::toggle).
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ToggleOutcome {
    /// The attempted action.
    pub action: ToggleAction,
    /// Its verdict; the territory changed iff accepted.
    pub decision: Decision,
}

// ── ClaimSession ───────────────────────────────────────────────────

/// Owns a territory and arbitrates every change to it.
///
/// # Example
///
/// ```
/// use chunkclaim_core::Cell;
/// use chunkclaim_engine::ClaimSession;
/// use chunkclaim_rules::RulesConfig;
///
/// let mut session = ClaimSession::with_initial_block(RulesConfig::default()).unwrap();
/// assert_eq!(session.metrics().area, 9);
/// let d = session.claim(Cell::new(2, 0));
/// assert!(d.accepted);
/// assert_eq!(session.metrics().area, 10);
/// ```
pub struct ClaimSession {
    claimed: ClaimedSet,
    rules: RulesConfig,
    metrics: MetricsSnapshot,
    predicate: Option<Box<dyn ClaimPredicate>>,
    last_runtime_error: RefCell<Option<String>>,
}

impl ClaimSession {
    /// An empty territory under validated `rules`.
    pub fn new(rules: RulesConfig) -> Result<Self, SessionError> {
        rules.validate()?;
        Ok(Self {
            claimed: ClaimedSet::new(),
            rules,
            metrics: MetricsSnapshot::default(),
            predicate: None,
            last_runtime_error: RefCell::new(None),
        })
    }

    /// A session starting from the 3×3 block around the origin.
    pub fn with_initial_block(rules: RulesConfig) -> Result<Self, SessionError> {
        let mut session = Self::new(rules)?;
        session.reset();
        Ok(session)
    }

    /// Resume from a previously saved territory.
    ///
    /// The set must be 4-connected, the invariant every session-made
    /// territory keeps.
    pub fn restore(rules: RulesConfig, claimed: ClaimedSet) -> Result<Self, SessionError> {
        if !is_connected4(&claimed) {
            return Err(SessionError::Disconnected {
                cells: claimed.len(),
            });
        }
        let mut session = Self::new(rules)?;
        session.claimed = claimed;
        session.refresh_metrics();
        Ok(session)
    }

    // ── Accessors ──────────────────────────────────────────────

    /// The current territory.
    pub fn claimed(&self) -> &ClaimedSet {
        &self.claimed
    }

    /// The active rules.
    pub fn rules(&self) -> &RulesConfig {
        &self.rules
    }

    /// Metrics of the current territory.
    pub fn metrics(&self) -> &MetricsSnapshot {
        &self.metrics
    }

    /// Name of the installed predicate, if any.
    pub fn predicate_name(&self) -> Option<&str> {
        self.predicate.as_deref().map(|p| p.name())
    }

    /// The last predicate failure message, cleared by the next successful
    /// predicate call.
    pub fn last_runtime_error(&self) -> Option<String> {
        self.last_runtime_error.borrow().clone()
    }

    // ── Configuration ──────────────────────────────────────────

    /// Replace the rules after validating them.
    ///
    /// On error the previous rules stay in effect.
    pub fn set_rules(&mut self, rules: RulesConfig) -> Result<(), SessionError> {
        rules.validate()?;
        debug!(?rules, "rules updated");
        self.rules = rules;
        Ok(())
    }

    /// Replace the rules, coercing out-of-range thresholds instead of
    /// failing.
    pub fn set_rules_clamped(&mut self, rules: RulesConfig) {
        let rules = rules.clamped();
        debug!(?rules, "rules updated (clamped)");
        self.rules = rules;
    }

    /// Use `predicate` for claim decisions from now on.
    pub fn set_predicate<P: ClaimPredicate + 'static>(&mut self, predicate: P) {
        debug!(predicate = predicate.name(), "claim predicate installed");
        self.predicate = Some(Box::new(predicate));
        self.last_runtime_error.replace(None);
    }

    /// Go back to the built-in claim chain.
    pub fn clear_predicate(&mut self) {
        if let Some(old) = self.predicate.take() {
            debug!(predicate = old.name(), "claim predicate removed");
        }
        self.last_runtime_error.replace(None);
    }

    // ── Lifecycle ──────────────────────────────────────────────

    /// Replace the territory with the 3×3 starting block.
    pub fn reset(&mut self) {
        let r = INITIAL_BLOCK_RADIUS;
        self.claimed = ClaimedSet::rect(-r, -r, r, r);
        self.refresh_metrics();
        info!(area = self.claimed.len(), "territory reset to initial block");
    }

    /// Remove every claimed cell.
    pub fn clear(&mut self) {
        self.claimed.clear();
        self.refresh_metrics();
        info!("territory cleared");
    }

    // ── Decisions ──────────────────────────────────────────────

    /// Decide a claim of `cell` without applying it.
    ///
    /// Uses the installed predicate if there is one, else the built-in
    /// chain with the cached metrics.
    ///
    /// A predicate cannot override duplicate or 4-adjacency rejections:
    /// its acceptance of such a cell is turned into the built-in
    /// rejection, so the territory stays 4-connected.
    pub fn evaluate_claim(&self, cell: Cell) -> Decision {
        let Some(predicate) = self.predicate.as_deref() else {
            return can_claim_with(&self.claimed, &self.rules, Some(&self.metrics), cell);
        };
        let view = StateView {
            claimed: &self.claimed,
            rules: &self.rules,
            metrics: &self.metrics,
        };
        let decision = invoke_guarded(predicate, &view, cell);
        self.note_predicate_result(predicate.name(), &decision);
        if decision.accepted {
            if let Some(rejection) = self.structural_rejection(cell) {
                debug!(
                    %cell,
                    predicate = predicate.name(),
                    rule = rejection.rule.as_ref().map(RuleId::code),
                    "predicate acceptance overridden"
                );
                return rejection;
            }
        }
        decision
    }

    /// Decide an unclaim of `cell` without applying it.
    pub fn evaluate_unclaim(&self, cell: Cell) -> Decision {
        can_unclaim(&self.claimed, &self.rules, cell)
    }

    /// Claim `cell` if the decision accepts it.
    pub fn claim(&mut self, cell: Cell) -> Decision {
        let decision = self.evaluate_claim(cell);
        if decision.accepted {
            self.claimed.insert(cell);
            self.refresh_metrics();
            debug!(%cell, area = self.metrics.area, "claimed");
        }
        decision
    }

    /// Unclaim `cell` if the decision accepts it.
    pub fn unclaim(&mut self, cell: Cell) -> Decision {
        let decision = self.evaluate_unclaim(cell);
        if decision.accepted {
            self.claimed.remove(cell);
            self.refresh_metrics();
            debug!(%cell, area = self.metrics.area, "unclaimed");
        }
        decision
    }

    /// Unclaim `cell` if it is claimed, claim it otherwise.
    pub fn toggle(&mut self, cell: Cell) -> ToggleOutcome {
        if self.claimed.contains(cell) {
            ToggleOutcome {
                action: ToggleAction::Unclaim,
                decision: self.unclaim(cell),
            }
        } else {
            ToggleOutcome {
                action: ToggleAction::Claim,
                decision: self.claim(cell),
            }
        }
    }

    // ── Reports ────────────────────────────────────────────────

    /// Classify `cell` the way a click on it would go.
    pub fn probe(&self, cell: Cell) -> CellProbe {
        let support = self.support_report(cell);
        if self.claimed.contains(cell) {
            let decision = self.evaluate_unclaim(cell);
            let status = if decision.accepted {
                ProbeStatus::ClaimedRemovable
            } else {
                ProbeStatus::ClaimedLocked
            };
            return CellProbe {
                cell,
                status,
                decision,
                support,
            };
        }
        let decision = self.evaluate_claim(cell);
        let status = if decision.accepted {
            ProbeStatus::Claimable
        } else if claimed_neighbours4(&self.claimed, cell) > 0 {
            ProbeStatus::Blocked
        } else {
            ProbeStatus::Unreachable
        };
        CellProbe {
            cell,
            status,
            decision,
            support,
        }
    }

    /// The claim verdict for every frontier cell, sorted by cell.
    pub fn frontier_status(&self) -> Vec<FrontierStatus> {
        let mut cells: Vec<Cell> = frontier(&self.claimed).into_iter().collect();
        cells.sort_unstable();
        cells
            .into_iter()
            .map(|cell| FrontierStatus {
                cell,
                decision: self.evaluate_claim(cell),
            })
            .collect()
    }

    /// Frontier cells a rule currently rejects.
    pub fn blocked_cells(&self) -> CellSet {
        self.frontier_status()
            .into_iter()
            .filter(FrontierStatus::is_blocked)
            .map(|s| s.cell)
            .collect()
    }

    /// Neighbourhood support around `cell` under the current rules.
    pub fn support_report(&self, cell: Cell) -> SupportReport {
        SupportReport::compute(&self.claimed, &self.rules, cell)
    }

    /// Cells enclosed by the territory.
    pub fn hole_cells(&self) -> CellSet {
        hole_cells4(&self.claimed)
    }

    // ── Internal ───────────────────────────────────────────────

    /// The always-on claim gates, for cells a predicate accepted.
    fn structural_rejection(&self, cell: Cell) -> Option<Decision> {
        if self.claimed.contains(cell) {
            return Some(Decision::reject(RuleId::Duplicate, "chunk is already claimed"));
        }
        if !self.claimed.is_empty() && claimed_neighbours4(&self.claimed, cell) == 0 {
            return Some(Decision::reject(
                RuleId::Adjacency,
                "must share an edge with the existing territory",
            ));
        }
        None
    }

    fn refresh_metrics(&mut self) {
        self.metrics = MetricsSnapshot::compute(&self.claimed);
    }

    fn note_predicate_result(&self, name: &str, decision: &Decision) {
        let mut last = self.last_runtime_error.borrow_mut();
        if !decision.is_runtime_error() {
            *last = None;
            return;
        }
        let message = decision.reason.clone().unwrap_or_default();
        if last.as_deref() != Some(message.as_str()) {
            warn!(predicate = name, %message, "claim predicate failed");
        }
        *last = Some(message);
    }
}

impl fmt::Debug for ClaimSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClaimSession")
            .field("area", &self.claimed.len())
            .field("rules", &self.rules)
            .field("predicate", &self.predicate_name())
            .finish()
    }
}
