//! Claim session for chunkclaim territories.
//!
//! [`ClaimSession`] owns the claimed set, the active rules, cached
//! metrics and an optional custom predicate. Hosts drive it with
//! [`claim`](ClaimSession::claim), [`unclaim`](ClaimSession::unclaim) and
//! [`toggle`](ClaimSession::toggle), and read back
//! [`probe`](ClaimSession::probe) and
//! [`frontier_status`](ClaimSession::frontier_status) for display.
//!
//! Logging goes through `tracing`; install a subscriber to see it.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod probe;
pub mod session;

pub use error::SessionError;
pub use probe::{CellProbe, FrontierStatus, ProbeStatus};
pub use session::{ClaimSession, ToggleAction, ToggleOutcome, INITIAL_BLOCK_RADIUS};
