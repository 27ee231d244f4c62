//! Error types for task domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task description is empty after trimming.
    #[error("task description must not be empty")]
    EmptyDescription,
}

/// Error returned while parsing a task status from user input or storage.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid task status: {0}")]
pub struct ParseTaskStatusError(pub String);
