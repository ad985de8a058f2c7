//! Session construction errors.

use chunkclaim_rules::ConfigError;
use std::error::Error;
use std::fmt;

/// Errors from building or reconfiguring a [`ClaimSession`](crate::ClaimSession).
///
/// Claim and unclaim rejections are not errors; they come back as
/// [`Decision`](chunkclaim_rules::Decision) values.
#[derive(Clone, Debug, PartialEq)]
pub enum SessionError {
    /// The rules failed validation.
    Config(ConfigError),
    /// A restored territory is not 4-connected.
    Disconnected {
        /// Cells in the rejected set.
        cells: usize,
    },
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "invalid rules: {e}"),
            Self::Disconnected { cells } => {
                write!(f, "territory of {cells} cells is not 4-connected")
            }
        }
    }
}

impl Error for SessionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Disconnected { .. } => None,
        }
    }
}

impl From<ConfigError> for SessionError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}
