//! Arena-specific error types.

use std::error::Error;
use std::fmt;

/// Errors that can occur during arena operations.
///
/// Both variants are reported synchronously as the failed result of the
/// call that triggered them. Protocol misuse (nested temporary regions,
/// ending a foreign region, releasing an arena with an open region) is a
/// programmer error and asserts instead of returning one of these.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArenaError {
    /// The arena (or temporary region) cannot satisfy a request and its
    /// policy forbids growth.
    CapacityExceeded {
        /// Number of bytes requested.
        requested: usize,
        /// Bytes still available at the point of failure.
        remaining: usize,
    },
    /// The arena configuration is unusable as given.
    InvalidConfig {
        /// Human-readable description of the rejected configuration.
        reason: String,
    },
}

impl fmt::Display for ArenaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CapacityExceeded {
                requested,
                remaining,
            } => {
                write!(
                    f,
                    "arena capacity exceeded: requested {requested} bytes, {remaining} bytes remaining"
                )
            }
            Self::InvalidConfig { reason } => {
                write!(f, "invalid arena config: {reason}")
            }
        }
    }
}

impl Error for ArenaError {}
