//! Error types for cell key parsing.

use std::error::Error;
use std::fmt;

/// Errors from parsing a canonical `"x,z"` cell key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CellParseError {
    /// The key has no `,` separating the two coordinates.
    MissingSeparator {
        /// The rejected input.
        input: String,
    },
    /// One coordinate is not a valid `i32`.
    InvalidComponent {
        /// The rejected input.
        input: String,
        /// Which coordinate failed (`"x"` or `"z"`).
        axis: &'static str,
    },
}

impl fmt::Display for CellParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSeparator { input } => {
                write!(f, "cell key {input:?} has no ',' separator")
            }
            Self::InvalidComponent { input, axis } => {
                write!(f, "cell key {input:?} has an invalid {axis} coordinate")
            }
        }
    }
}

impl Error for CellParseError {}
