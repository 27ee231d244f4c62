//! Service layer for task creation, status changes, and board loading.

use crate::error::ErrorKind;
use crate::ids::{ProjectId, UserId};
use crate::notification::{NotificationSink, notify_outcome};
use crate::task::{
    domain::{
        KanbanBoard, ParseTaskStatusError, Task, TaskDomainError, TaskDraft, TaskId, TaskStatus,
    },
    ports::{TaskFilter, TaskRepository, TaskRepositoryError},
};
use chrono::NaiveDate;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    description: String,
    project_id: ProjectId,
    assignee_id: UserId,
    references: Option<String>,
    due_date: Option<NaiveDate>,
    status: Option<String>,
}

impl CreateTaskRequest {
    /// Creates a request with required task fields.
    #[must_use]
    pub fn new(description: impl Into<String>, project_id: ProjectId, assignee_id: UserId) -> Self {
        Self {
            description: description.into(),
            project_id,
            assignee_id,
            references: None,
            due_date: None,
            status: None,
        }
    }

    /// Sets task references.
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

    /// Sets the initial status by its storage name.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }
}

/// Request payload for moving a task to another status.
///
/// The status is carried as text because it arrives from UI controls
/// (drop targets, dropdowns) and is validated by the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeStatusRequest {
    task_id: TaskId,
    status: String,
}

impl ChangeStatusRequest {
    /// Creates a status change request.
    #[must_use]
    pub fn new(task_id: TaskId, status: impl Into<String>) -> Self {
        Self {
            task_id,
            status: status.into(),
        }
    }

    /// Returns the target task.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the requested status text.
    #[must_use]
    pub fn status(&self) -> &str {
        &self.status
    }
}

/// Service-level errors for task status operations.
#[derive(Debug, Error)]
pub enum TaskStatusError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// The requested status is not one of the known statuses.
    #[error(transparent)]
    InvalidStatus(#[from] ParseTaskStatusError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}

impl TaskStatusError {
    /// Classifies the error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(_) | Self::InvalidStatus(_) => ErrorKind::Validation,
            Self::Repository(_) => ErrorKind::Persistence,
        }
    }
}

/// Result type for task status service operations.
pub type TaskStatusResult<T> = Result<T, TaskStatusError>;

/// Task status orchestration service.
#[derive(Clone)]
pub struct TaskStatusService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
    notifier: Arc<dyn NotificationSink>,
}

impl<R, C> TaskStatusService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task status service.
    #[must_use]
    pub fn new(repository: Arc<R>, clock: Arc<C>, notifier: Arc<dyn NotificationSink>) -> Self {
        Self {
            repository,
            clock,
            notifier,
        }
    }

    /// Creates and stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStatusError`] when the description or initial status
    /// is invalid or the repository rejects the task.
    pub async fn create_task(&self, request: CreateTaskRequest) -> TaskStatusResult<Task> {
        let outcome = self.store_new_task(request).await;
        self.announce(&outcome, |task| format!("Task \"{}\" created", task.description()));
        outcome
    }

    async fn store_new_task(&self, request: CreateTaskRequest) -> TaskStatusResult<Task> {
        let mut draft = TaskDraft::new(request.description, request.project_id, request.assignee_id)?;
        if let Some(references) = request.references {
            draft = draft.with_references(references);
        }
        if let Some(due_date) = request.due_date {
            draft = draft.with_due_date(due_date);
        }
        if let Some(status) = request.status {
            draft = draft.with_status(TaskStatus::try_from(status.as_str())?);
        }

        let task = Task::create(draft, &*self.clock);
        self.repository.store(&task).await?;
        info!(task_id = %task.id(), status = %task.status(), "task created");
        Ok(task)
    }

    /// Moves a task to the requested status.
    ///
    /// Any status may follow any other. The change is persisted through the
    /// repository and the updated task is returned.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStatusError::InvalidStatus`] for an unknown status and
    /// [`TaskStatusError::Repository`] when the task is missing or the
    /// update is rejected.
    pub async fn change_status(&self, request: ChangeStatusRequest) -> TaskStatusResult<Task> {
        let outcome = self.persist_status_change(&request).await;
        self.announce(&outcome, |task| {
            format!("Task moved to {}", task.status().label())
        });
        outcome
    }

    async fn persist_status_change(&self, request: &ChangeStatusRequest) -> TaskStatusResult<Task> {
        let status = TaskStatus::try_from(request.status())?;
        let mut task = self
            .repository
            .find_by_id(request.task_id())
            .await?
            .ok_or(TaskRepositoryError::NotFound(request.task_id()))?;

        let previous = task.change_status(status, &*self.clock);
        self.repository.update(&task).await?;
        info!(task_id = %task.id(), from = %previous, to = %status, "task status changed");
        Ok(task)
    }

    /// Moves a task on a locally held board, persists the change, then
    /// reloads the board from the repository.
    ///
    /// The local move is applied before the repository call so the board
    /// reflects the user's action immediately. Whatever the outcome, the
    /// board is then replaced with a fresh projection of `filter`, which
    /// undoes the local move when persistence failed.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`Self::change_status`].
    pub async fn move_on_board(
        &self,
        board: &mut KanbanBoard,
        filter: &TaskFilter,
        request: ChangeStatusRequest,
    ) -> TaskStatusResult<Task> {
        if let Ok(status) = TaskStatus::try_from(request.status()) {
            board.move_task(request.task_id(), status, &*self.clock);
        }

        let outcome = self.change_status(request).await;
        match self.load_board(filter).await {
            Ok(fresh) => *board = fresh,
            Err(err) => warn!(error = %err, "board refresh failed; keeping local view"),
        }
        outcome
    }

    /// Lists tasks matching `filter` in creation order.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStatusError::Repository`] when the lookup fails.
    pub async fn list_tasks(&self, filter: &TaskFilter) -> TaskStatusResult<Vec<Task>> {
        let tasks = self.repository.list(filter).await?;
        debug!(count = tasks.len(), "tasks listed");
        Ok(tasks)
    }

    /// Loads tasks matching `filter` and projects them onto a board.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStatusError::Repository`] when the lookup fails.
    pub async fn load_board(&self, filter: &TaskFilter) -> TaskStatusResult<KanbanBoard> {
        let tasks = self.list_tasks(filter).await?;
        Ok(KanbanBoard::from_tasks(tasks))
    }

    fn announce<T>(&self, outcome: &TaskStatusResult<T>, on_success: impl FnOnce(&T) -> String) {
        if let Err(err) = outcome {
            warn!(kind = %err.kind(), error = %err, "task operation rejected");
        }
        notify_outcome(&*self.notifier, outcome, on_success);
    }
}
