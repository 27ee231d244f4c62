//! Error classification shared by every service.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse category of a failed operation.
///
/// Service errors expose their category so callers can pick a presentation
/// without matching on every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// An exclusive-state precondition was violated (a timer is already
    /// running).
    Conflict,
    /// The operation requires a state that does not hold (no timer is
    /// running).
    State,
    /// Caller-supplied input failed a structural check.
    Validation,
    /// The backing store rejected the underlying call.
    Persistence,
}

impl ErrorKind {
    /// Returns the canonical name of the category.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Conflict => "conflict",
            Self::State => "state",
            Self::Validation => "validation",
            Self::Persistence => "persistence",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
