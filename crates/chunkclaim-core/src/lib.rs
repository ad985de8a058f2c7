//! Core types for the chunkclaim engine.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! grid primitives every other crate builds on: the [`Cell`] coordinate,
//! its canonical `"x,z"` key and 64-bit packing, 4-neighbour enumeration,
//! and the [`ClaimedSet`] snapshot type.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod cell;
pub mod error;
pub mod set;

pub use cell::Cell;
pub use error::CellParseError;
pub use set::{CellSet, ClaimedSet};
