//! Per-cell reports for hover and frontier display.

use chunkclaim_core::Cell;
use chunkclaim_rules::{Decision, SupportReport};
use serde::Serialize;

/// What a click on a cell would do, and whether it would succeed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum ProbeStatus {
    /// Claimed; unclaiming it would be accepted.
    ClaimedRemovable,
    /// Claimed; unclaiming it would be rejected.
    ClaimedLocked,
    /// Unclaimed; claiming it would be accepted.
    Claimable,
    /// On the frontier but rejected by a rule.
    Blocked,
    /// Not adjacent to the territory.
    Unreachable,
}

impl ProbeStatus {
    /// Returns `true` for the claimed statuses.
    pub fn is_claimed(&self) -> bool {
        matches!(self, Self::ClaimedRemovable | Self::ClaimedLocked)
    }
}

/// Hover report for one cell.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CellProbe {
    /// The probed cell.
    pub cell: Cell,
    /// Classification.
    pub status: ProbeStatus,
    /// The unclaim decision for claimed cells, the claim decision otherwise.
    pub decision: Decision,
    /// Neighbourhood support around the cell.
    pub support: SupportReport,
}

/// Claim verdict for one frontier cell.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FrontierStatus {
    /// An unclaimed cell adjacent to the territory.
    pub cell: Cell,
    /// What claiming it would return.
    pub decision: Decision,
}

impl FrontierStatus {
    /// Returns `true` if a rule rejects the claim.
    pub fn is_blocked(&self) -> bool {
        !self.decision.accepted
    }
}
