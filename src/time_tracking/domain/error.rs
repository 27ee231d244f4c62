//! Error types for time entry validation.

use super::TimeEntryId;
use thiserror::Error;

/// Errors returned while constructing or mutating time entries.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TimeEntryDomainError {
    /// The description is empty after trimming.
    #[error("time entry description must not be empty")]
    EmptyDescription,

    /// A duration input is not a non-negative whole number.
    #[error("invalid duration '{0}', expected a non-negative whole number")]
    InvalidDuration(String),

    /// The entry has already been stopped.
    #[error("time entry {0} is not running")]
    NotRunning(TimeEntryId),
}
