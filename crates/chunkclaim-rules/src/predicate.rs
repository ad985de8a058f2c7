//! Pluggable claim predicates.
//!
//! A host may replace the built-in claim chain with its own
//! [`ClaimPredicate`]. The predicate sees a read-only [`StateView`] and
//! returns loosely-shaped [`PredicateOutput`]; [`normalize`] turns that
//! into a [`Decision`]. [`invoke_guarded`] is the failure boundary: an
//! `Err` or a panic inside the predicate becomes a
//! [`RuleId::RuntimeError`] rejection instead of unwinding into the caller.
//!
//! Predicates replace the claim decision only; unclaims always go through
//! [`can_unclaim`](crate::can_unclaim).

use crate::config::RulesConfig;
use crate::decision::{Decision, RuleId};
use crate::evaluate::can_claim_with;
use crate::snapshot::MetricsSnapshot;
use chunkclaim_core::{Cell, ClaimedSet};
use serde::Deserialize;
use serde_json::Value;
use std::any::Any;
use std::error::Error;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

// ── View ───────────────────────────────────────────────────────────

/// Read-only state handed to a predicate.
#[derive(Clone, Copy, Debug)]
pub struct StateView<'a> {
    /// The current territory.
    pub claimed: &'a ClaimedSet,
    /// The active rules.
    pub rules: &'a RulesConfig,
    /// Metrics of `claimed`; must describe that exact set.
    pub metrics: &'a MetricsSnapshot,
}

// ── Output ─────────────────────────────────────────────────────────

/// A structured predicate result.
///
/// `ok` wins over `allowed`; with neither present the verdict counts as
/// accepted.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PredicateVerdict {
    /// Primary success flag.
    pub ok: Option<bool>,
    /// Alternate success flag, read when `ok` is absent.
    pub allowed: Option<bool>,
    /// Explanation for the user.
    pub reason: Option<String>,
    /// Name of the rule that decided.
    pub module: Option<String>,
}

impl PredicateVerdict {
    /// An accepting verdict.
    pub fn allow() -> Self {
        Self {
            ok: Some(true),
            ..Self::default()
        }
    }

    /// A rejecting verdict with a reason.
    pub fn reject(reason: impl Into<String>) -> Self {
        Self {
            ok: Some(false),
            reason: Some(reason.into()),
            ..Self::default()
        }
    }

    /// Attach a module name.
    pub fn with_module(mut self, module: impl Into<String>) -> Self {
        self.module = Some(module.into());
        self
    }
}

/// What a predicate may return.
#[derive(Clone, Debug, PartialEq)]
pub enum PredicateOutput {
    /// Accept or reject with no explanation.
    Bool(bool),
    /// Reject with this reason.
    Reason(String),
    /// A structured verdict.
    Verdict(PredicateVerdict),
    /// A fully-formed decision, passed through untouched.
    Decision(Decision),
    /// Untyped output, e.g. from a scripting host.
    Dynamic(Value),
}

impl From<bool> for PredicateOutput {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for PredicateOutput {
    fn from(v: &str) -> Self {
        Self::Reason(v.to_string())
    }
}

impl From<String> for PredicateOutput {
    fn from(v: String) -> Self {
        Self::Reason(v)
    }
}

impl From<PredicateVerdict> for PredicateOutput {
    fn from(v: PredicateVerdict) -> Self {
        Self::Verdict(v)
    }
}

impl From<Decision> for PredicateOutput {
    fn from(v: Decision) -> Self {
        Self::Decision(v)
    }
}

impl From<Value> for PredicateOutput {
    fn from(v: Value) -> Self {
        Self::Dynamic(v)
    }
}

/// Coerce any predicate output into a [`Decision`]. Never fails.
pub fn normalize(output: PredicateOutput) -> Decision {
    match output {
        PredicateOutput::Bool(true) => Decision::accept(),
        PredicateOutput::Bool(false) => Decision::deny(),
        PredicateOutput::Reason(reason) => Decision {
            accepted: false,
            rule: None,
            reason: Some(reason),
        },
        PredicateOutput::Verdict(v) => from_verdict(v),
        PredicateOutput::Decision(d) => d,
        PredicateOutput::Dynamic(value) => from_value(value),
    }
}

fn from_verdict(v: PredicateVerdict) -> Decision {
    let Some(accepted) = v.ok.or(v.allowed) else {
        return Decision::accept();
    };
    Decision {
        accepted,
        rule: v.module.map(RuleId::Custom),
        reason: v.reason,
    }
}

fn from_value(value: Value) -> Decision {
    match value {
        Value::Bool(b) => normalize(PredicateOutput::Bool(b)),
        Value::String(s) => normalize(PredicateOutput::Reason(s)),
        Value::Object(map) => {
            let flag = |name: &str| map.get(name).and_then(Value::as_bool);
            let text = |name: &str| map.get(name).and_then(Value::as_str).map(str::to_string);
            match flag("ok").or_else(|| flag("allowed")) {
                Some(accepted) => Decision {
                    accepted,
                    rule: text("module").map(RuleId::Custom),
                    reason: text("reason"),
                },
                None => Decision::accept(),
            }
        }
        Value::Null => Decision::deny(),
        Value::Number(n) => match n.as_f64() {
            Some(f) if f == 0.0 || f.is_nan() => Decision::deny(),
            _ => Decision::accept(),
        },
        Value::Array(_) => Decision::accept(),
    }
}

// ── Errors ─────────────────────────────────────────────────────────

/// A predicate failed while deciding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PredicateError {
    /// The predicate reported its own failure.
    Failed {
        /// What went wrong.
        reason: String,
    },
    /// The predicate panicked; captured by [`invoke_guarded`].
    Panicked {
        /// Panic payload, if it was a string.
        message: String,
    },
}

impl PredicateError {
    /// A [`PredicateError::Failed`] with the given reason.
    pub fn failed(reason: impl Into<String>) -> Self {
        Self::Failed {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for PredicateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Failed { reason } => f.write_str(reason),
            Self::Panicked { message } => write!(f, "panicked: {message}"),
        }
    }
}

impl Error for PredicateError {}

// ── Predicate trait ────────────────────────────────────────────────

/// A replacement for the built-in claim chain.
///
/// Closures `Fn(&StateView<'_>, Cell) -> Result<PredicateOutput,
/// PredicateError>` implement this trait directly; [`predicate_fn`] helps
/// the compiler infer their signature.
pub trait ClaimPredicate {
    /// Name used in logs.
    fn name(&self) -> &str {
        "custom"
    }

    /// Decide whether `cell` may be claimed in `view`.
    fn decide(&self, view: &StateView<'_>, cell: Cell) -> Result<PredicateOutput, PredicateError>;
}

impl<F> ClaimPredicate for F
where
    F: Fn(&StateView<'_>, Cell) -> Result<PredicateOutput, PredicateError>,
{
    fn decide(&self, view: &StateView<'_>, cell: Cell) -> Result<PredicateOutput, PredicateError> {
        self(view, cell)
    }
}

/// Identity helper that pins a closure to the predicate signature.
pub fn predicate_fn<F>(f: F) -> F
where
    F: Fn(&StateView<'_>, Cell) -> Result<PredicateOutput, PredicateError>,
{
    f
}

/// Run `predicate` and normalize its output, converting failures into a
/// [`RuleId::RuntimeError`] rejection.
///
/// Panics are caught with [`std::panic::catch_unwind`]. The process panic
/// hook still runs, so the default hook prints the panic to stderr.
pub fn invoke_guarded(
    predicate: &dyn ClaimPredicate,
    view: &StateView<'_>,
    cell: Cell,
) -> Decision {
    let result = panic::catch_unwind(AssertUnwindSafe(|| predicate.decide(view, cell)));
    match result {
        Ok(Ok(output)) => normalize(output),
        Ok(Err(err)) => runtime_error(&err),
        Err(payload) => runtime_error(&PredicateError::Panicked {
            message: panic_message(payload.as_ref()),
        }),
    }
}

fn runtime_error(err: &PredicateError) -> Decision {
    Decision::reject(RuleId::RuntimeError, format!("predicate runtime error: {err}"))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

// ── Starter predicates ─────────────────────────────────────────────

/// The minimal rule set: no duplicates, anything goes on an empty
/// territory, otherwise the cell must share an edge with it.
#[derive(Clone, Copy, Debug, Default)]
pub struct AdjacencyOnly;

impl ClaimPredicate for AdjacencyOnly {
    fn name(&self) -> &str {
        "adjacency-only"
    }

    fn decide(&self, view: &StateView<'_>, cell: Cell) -> Result<PredicateOutput, PredicateError> {
        if view.claimed.contains(cell) {
            return Ok(false.into());
        }
        if view.claimed.is_empty() {
            return Ok(true.into());
        }
        let adjacent = cell.neighbours4().into_iter().any(|n| view.claimed.contains(n));
        Ok(adjacent.into())
    }
}

/// The built-in gate chain exposed as a predicate.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultRules;

impl ClaimPredicate for DefaultRules {
    fn name(&self) -> &str {
        "default-rules"
    }

    fn decide(&self, view: &StateView<'_>, cell: Cell) -> Result<PredicateOutput, PredicateError> {
        Ok(can_claim_with(view.claimed, view.rules, Some(view.metrics), cell).into())
    }
}
