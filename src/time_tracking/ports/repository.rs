//! Repository port for time entry persistence.

use crate::ids::{ClientId, ProjectId, UserId};
use crate::task::domain::TaskId;
use crate::time_tracking::domain::{TimeEntry, TimeEntryId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for time entry repository operations.
pub type TimeEntryRepositoryResult<T> = Result<T, TimeEntryRepositoryError>;

/// Criteria for listing time entries. Unset fields match every entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeEntryFilter {
    /// Restrict to entries owned by this user.
    pub user_id: Option<UserId>,
    /// Restrict to entries linked to this client.
    pub client_id: Option<ClientId>,
    /// Restrict to entries linked to this project.
    pub project_id: Option<ProjectId>,
    /// Restrict to entries linked to this task.
    pub task_id: Option<TaskId>,
    /// Restrict to running (`true`) or stopped (`false`) entries.
    pub running: Option<bool>,
}

impl TimeEntryFilter {
    /// Creates a filter matching every entry.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            user_id: None,
            client_id: None,
            project_id: None,
            task_id: None,
            running: None,
        }
    }

    /// Restricts the filter to one user.
    #[must_use]
    pub const fn for_user(mut self, user_id: UserId) -> Self {
        self.user_id = Some(user_id);
        self
    }

    /// Restricts the filter to one client.
    #[must_use]
    pub const fn for_client(mut self, client_id: ClientId) -> Self {
        self.client_id = Some(client_id);
        self
    }

    /// Restricts the filter to one project.
    #[must_use]
    pub const fn for_project(mut self, project_id: ProjectId) -> Self {
        self.project_id = Some(project_id);
        self
    }

    /// Restricts the filter to one task.
    #[must_use]
    pub const fn for_task(mut self, task_id: TaskId) -> Self {
        self.task_id = Some(task_id);
        self
    }

    /// Restricts the filter by running state.
    #[must_use]
    pub const fn running(mut self, running: bool) -> Self {
        self.running = Some(running);
        self
    }

    /// Returns `true` when `entry` satisfies every set criterion.
    #[must_use]
    pub fn matches(&self, entry: &TimeEntry) -> bool {
        let links = entry.links();
        self.user_id.is_none_or(|id| entry.user_id() == id)
            && self.client_id.is_none_or(|id| links.client_id == Some(id))
            && self.project_id.is_none_or(|id| links.project_id == Some(id))
            && self.task_id.is_none_or(|id| links.task_id == Some(id))
            && self.running.is_none_or(|running| entry.is_running() == running)
    }
}

/// Time entry persistence contract.
#[async_trait]
pub trait TimeEntryRepository: Send + Sync {
    /// Stores a new entry.
    ///
    /// # Errors
    ///
    /// Returns [`TimeEntryRepositoryError::DuplicateEntry`] when the ID
    /// already exists and [`TimeEntryRepositoryError::RunningEntryExists`]
    /// when storing a second running entry for the same user.
    async fn store(&self, entry: &TimeEntry) -> TimeEntryRepositoryResult<()>;

    /// Persists changes to an existing entry.
    ///
    /// # Errors
    ///
    /// Returns [`TimeEntryRepositoryError::NotFound`] when the entry does not
    /// exist.
    async fn update(&self, entry: &TimeEntry) -> TimeEntryRepositoryResult<()>;

    /// Removes an entry.
    ///
    /// # Errors
    ///
    /// Returns [`TimeEntryRepositoryError::NotFound`] when the entry does not
    /// exist.
    async fn delete(&self, id: TimeEntryId) -> TimeEntryRepositoryResult<()>;

    /// Finds an entry by identifier.
    ///
    /// Returns `None` when the entry does not exist.
    async fn find_by_id(&self, id: TimeEntryId) -> TimeEntryRepositoryResult<Option<TimeEntry>>;

    /// Finds the running entry owned by `user_id`, if any.
    async fn find_running(&self, user_id: UserId) -> TimeEntryRepositoryResult<Option<TimeEntry>>;

    /// Lists entries matching `filter` in creation order.
    async fn list(&self, filter: &TimeEntryFilter) -> TimeEntryRepositoryResult<Vec<TimeEntry>>;
}

/// Errors returned by time entry repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TimeEntryRepositoryError {
    /// An entry with the same identifier already exists.
    #[error("duplicate time entry identifier: {0}")]
    DuplicateEntry(TimeEntryId),

    /// The user already owns a running entry.
    #[error("user {0} already has a running timer")]
    RunningEntryExists(UserId),

    /// The entry was not found.
    #[error("time entry not found: {0}")]
    NotFound(TimeEntryId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TimeEntryRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
