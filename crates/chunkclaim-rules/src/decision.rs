//! Claim and unclaim verdicts.

use serde::{Serialize, Serializer};
use std::fmt;

// ── RuleId ─────────────────────────────────────────────────────────

/// Which gate produced a rejection.
///
/// Informational only: hosts display it, nothing branches on it except
/// the runtime-error check in the session.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum RuleId {
    /// Z: the cell is already claimed.
    Duplicate,
    /// A: the cell shares no edge with the territory.
    Adjacency,
    /// B: fewer than two claimed edge neighbours.
    TwoAdjacency,
    /// C: the claim would extend a thin arm past the limit.
    ArmLength,
    /// J: too few claimed cells in the 8- or 24-cell window.
    Support,
    /// D: perimeter/area ratio too high.
    PerimeterArea,
    /// I: approximate diameter too large.
    Diameter,
    /// E: too many endpoints.
    Endpoints,
    /// F: the claim would create or enlarge a hole.
    Holes,
    /// G: bounding-square fill would drop.
    OuterFill,
    /// H: largest solid square too small a share of the area.
    InnerShare,
    /// U0: unclaim of a cell that is not claimed.
    NotClaimed,
    /// U1: unclaim would split the territory.
    Disconnects,
    /// U2: unclaim would create or enlarge a hole.
    UnclaimHoles,
    /// A user predicate failed or panicked.
    RuntimeError,
    /// A module name supplied by a user predicate.
    Custom(String),
}

impl RuleId {
    /// Short code shown next to the reason (`"C"`, `"U1"`, ...).
    pub fn code(&self) -> &str {
        match self {
            Self::Duplicate => "Z",
            Self::Adjacency => "A",
            Self::TwoAdjacency => "B",
            Self::ArmLength => "C",
            Self::Support => "J",
            Self::PerimeterArea => "D",
            Self::Diameter => "I",
            Self::Endpoints => "E",
            Self::Holes => "F",
            Self::OuterFill => "G",
            Self::InnerShare => "H",
            Self::NotClaimed => "U0",
            Self::Disconnects => "U1",
            Self::UnclaimHoles => "U2",
            Self::RuntimeError => "RuntimeError",
            Self::Custom(name) => name,
        }
    }

    /// Human-readable gate name.
    pub fn label(&self) -> &str {
        match self {
            Self::Duplicate => "duplicate claim",
            Self::Adjacency => "4-adjacent expansion",
            Self::TwoAdjacency => "two-adjacency threshold",
            Self::ArmLength => "long-arm suppression",
            Self::Support => "neighbourhood support (8/24)",
            Self::PerimeterArea => "compactness (P/A)",
            Self::Diameter => "diameter cap",
            Self::Endpoints => "endpoint cap",
            Self::Holes => "no holes",
            Self::OuterFill => "bounding-square fill (A/L²)",
            Self::InnerShare => "inner solid-square share (Lin²/A)",
            Self::NotClaimed => "unclaim: not claimed",
            Self::Disconnects => "unclaim: stay connected",
            Self::UnclaimHoles => "unclaim: no new or larger holes",
            Self::RuntimeError => "predicate runtime error",
            Self::Custom(name) => name,
        }
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Custom(name) => f.write_str(name),
            other => write!(f, "{} | {}", other.code(), other.label()),
        }
    }
}

impl Serialize for RuleId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

// ── Decision ───────────────────────────────────────────────────────

/// The verdict on a claim or unclaim.
///
/// A rejection is a normal value, not an error. `rule` and `reason` are
/// for display; an accepted decision from a user predicate may still
/// carry them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Decision {
    /// Whether the action may proceed.
    pub accepted: bool,
    /// The gate that decided, if any.
    pub rule: Option<RuleId>,
    /// Explanation for the user.
    pub reason: Option<String>,
}

impl Decision {
    /// An unconditional acceptance.
    pub fn accept() -> Self {
        Self {
            accepted: true,
            rule: None,
            reason: None,
        }
    }

    /// A rejection by `rule`.
    pub fn reject(rule: RuleId, reason: impl Into<String>) -> Self {
        Self {
            accepted: false,
            rule: Some(rule),
            reason: Some(reason.into()),
        }
    }

    /// A rejection with no rule or reason attached.
    pub fn deny() -> Self {
        Self {
            accepted: false,
            rule: None,
            reason: None,
        }
    }

    /// Returns `true` if this decision stands in for a failed predicate.
    pub fn is_runtime_error(&self) -> bool {
        matches!(self.rule, Some(RuleId::RuntimeError))
    }

    /// One-line description: `"<rule>: <reason>"`, whichever parts exist.
    pub fn details(&self) -> String {
        match (&self.rule, &self.reason) {
            (Some(rule), Some(reason)) => format!("{rule}: {reason}"),
            (Some(rule), None) => rule.to_string(),
            (None, Some(reason)) => reason.clone(),
            (None, None) if self.accepted => "accepted".to_string(),
            (None, None) => "rejected".to_string(),
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.details())
    }
}
