//! Reusable predicate fixtures.
//!
//! - [`ConstPredicate`]: returns the same output every call.
//! - [`FailingPredicate`]: succeeds N times, then returns `Err`.
//! - [`PanickingPredicate`]: panics on every call.
//! - [`RecordingPredicate`]: accepts and remembers every cell it was asked about.

use chunkclaim_core::Cell;
use chunkclaim_rules::{ClaimPredicate, PredicateError, PredicateOutput, StateView};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Returns a fixed output regardless of state.
pub struct ConstPredicate {
    pub name: String,
    pub output: PredicateOutput,
}

impl ConstPredicate {
    pub fn new(name: impl Into<String>, output: impl Into<PredicateOutput>) -> Self {
        Self {
            name: name.into(),
            output: output.into(),
        }
    }
}

impl ClaimPredicate for ConstPredicate {
    fn name(&self) -> &str {
        &self.name
    }

    fn decide(&self, _view: &StateView<'_>, _cell: Cell) -> Result<PredicateOutput, PredicateError> {
        Ok(self.output.clone())
    }
}

/// Accepts `succeed_count` times, then fails with the same message on
/// every later call.
pub struct FailingPredicate {
    pub succeed_count: usize,
    call_count: AtomicUsize,
}

impl FailingPredicate {
    pub fn new(succeed_count: usize) -> Self {
        Self {
            succeed_count,
            call_count: AtomicUsize::new(0),
        }
    }

    /// How many times `decide()` has been called.
    pub fn calls(&self) -> usize {
        self.call_count.load(Ordering::Relaxed)
    }
}

impl ClaimPredicate for FailingPredicate {
    fn name(&self) -> &str {
        "failing"
    }

    fn decide(&self, _view: &StateView<'_>, _cell: Cell) -> Result<PredicateOutput, PredicateError> {
        let n = self.call_count.fetch_add(1, Ordering::Relaxed);
        if n >= self.succeed_count {
            return Err(PredicateError::failed(format!(
                "deliberate failure after {} successful calls",
                self.succeed_count
            )));
        }
        Ok(true.into())
    }
}

/// Panics with `message` on every call.
pub struct PanickingPredicate {
    pub message: String,
}

impl PanickingPredicate {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl ClaimPredicate for PanickingPredicate {
    fn name(&self) -> &str {
        "panicking"
    }

    fn decide(&self, _view: &StateView<'_>, _cell: Cell) -> Result<PredicateOutput, PredicateError> {
        panic!("{}", self.message)
    }
}

/// Accepts everything and records the cells it was consulted on.
///
/// The log is shared, so a test can keep a [`handle`](Self::handle) after
/// moving the predicate into a session.
#[derive(Default)]
pub struct RecordingPredicate {
    seen: Rc<RefCell<Vec<Cell>>>,
}

impl RecordingPredicate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared log of cells passed to `decide()`, in call order.
    pub fn handle(&self) -> Rc<RefCell<Vec<Cell>>> {
        Rc::clone(&self.seen)
    }
}

impl ClaimPredicate for RecordingPredicate {
    fn name(&self) -> &str {
        "recording"
    }

    fn decide(&self, _view: &StateView<'_>, cell: Cell) -> Result<PredicateOutput, PredicateError> {
        self.seen.borrow_mut().push(cell);
        Ok(true.into())
    }
}
