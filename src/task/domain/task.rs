//! Task aggregate root and its status set.

use super::{ParseTaskStatusError, TaskDomainError, TaskId};
use crate::ids::{ProjectId, UserId};
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task workflow status.
///
/// The set is flat: any status may move to any other, and none is
/// terminal. A `done` task is reopened by moving it back to `doing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Work is in progress.
    Doing,
    /// Work is waiting for review.
    ForReview,
    /// Work is finished.
    Done,
    /// Work is postponed.
    Deferred,
}

impl TaskStatus {
    /// Every status, in kanban column order.
    pub const ALL: [Self; 4] = [Self::Doing, Self::ForReview, Self::Done, Self::Deferred];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Doing => "doing",
            Self::ForReview => "for_review",
            Self::Done => "done",
            Self::Deferred => "deferred",
        }
    }

    /// Returns the column heading shown on the board.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Doing => "Doing",
            Self::ForReview => "For review",
            Self::Done => "Done",
            Self::Deferred => "Deferred",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "doing" => Ok(Self::Doing),
            "for_review" => Ok(Self::ForReview),
            "done" => Ok(Self::Done),
            "deferred" => Ok(Self::Deferred),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

/// Validated input for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    description: String,
    references: Option<String>,
    assignee_id: UserId,
    project_id: ProjectId,
    due_date: Option<NaiveDate>,
    status: TaskStatus,
}

impl TaskDraft {
    /// Creates a draft starting in [`TaskStatus::Doing`].
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyDescription`] when the description is
    /// blank.
    pub fn new(
        description: impl Into<String>,
        project_id: ProjectId,
        assignee_id: UserId,
    ) -> Result<Self, TaskDomainError> {
        let raw = description.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TaskDomainError::EmptyDescription);
        }
        Ok(Self {
            description: trimmed.to_owned(),
            references: None,
            assignee_id,
            project_id,
            due_date: None,
            status: TaskStatus::Doing,
        })
    }

    /// Sets free-text references (links, ticket numbers).
    #[must_use]
    pub fn with_references(mut self, references: impl Into<String>) -> Self {
        self.references = Some(references.into());
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Overrides the initial status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    description: String,
    references: Option<String>,
    assignee_id: UserId,
    project_id: ProjectId,
    due_date: Option<NaiveDate>,
    status: TaskStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted description.
    pub description: String,
    /// Persisted references, if any.
    pub references: Option<String>,
    /// Persisted assignee.
    pub assignee_id: UserId,
    /// Persisted owning project.
    pub project_id: ProjectId,
    /// Persisted due date, if any.
    pub due_date: Option<NaiveDate>,
    /// Persisted status.
    pub status: TaskStatus,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest status-change timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new task from a validated draft.
    #[must_use]
    pub fn create(draft: TaskDraft, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: TaskId::new(),
            description: draft.description,
            references: draft.references,
            assignee_id: draft.assignee_id,
            project_id: draft.project_id,
            due_date: draft.due_date,
            status: draft.status,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            description: data.description,
            references: data.references,
            assignee_id: data.assignee_id,
            project_id: data.project_id,
            due_date: data.due_date,
            status: data.status,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the references, if any.
    #[must_use]
    pub fn references(&self) -> Option<&str> {
        self.references.as_deref()
    }

    /// Returns the assignee.
    #[must_use]
    pub const fn assignee_id(&self) -> UserId {
        self.assignee_id
    }

    /// Returns the owning project.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    /// Returns the current status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest status-change timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Moves the task to `status` and returns the status it left.
    ///
    /// Every transition is permitted, including moving to the current
    /// status, which only refreshes `updated_at`.
    pub fn change_status(&mut self, status: TaskStatus, clock: &impl Clock) -> TaskStatus {
        let previous = self.status;
        self.status = status;
        self.updated_at = clock.utc();
        previous
    }
}
