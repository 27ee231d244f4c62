//! Shared world state for task board BDD scenarios.

use std::sync::Arc;

use clientdesk::{
    clock::ManualClock,
    ids::{ProjectId, UserId},
    notification::adapters::RecordingNotificationSink,
    task::{
        adapters::memory::InMemoryTaskRepository,
        domain::{KanbanBoard, Task},
        ports::TaskFilter,
        services::{TaskStatusError, TaskStatusService},
    },
};
use rstest::fixture;

/// Service type used by the BDD world.
pub type TestTaskService = TaskStatusService<InMemoryTaskRepository, ManualClock>;

/// Scenario world for task board behaviour tests.
pub struct TaskBoardWorld {
    pub service: TestTaskService,
    pub project_id: ProjectId,
    pub assignee_id: UserId,
    pub board: KanbanBoard,
    pub last_task: Option<Task>,
    pub last_error: Option<TaskStatusError>,
}

impl TaskBoardWorld {
    /// Creates a world with an empty board for one project.
    #[must_use]
    pub fn new() -> Self {
        let service = TaskStatusService::new(
            Arc::new(InMemoryTaskRepository::new()),
            Arc::new(ManualClock::default()),
            Arc::new(RecordingNotificationSink::new()),
        );

        Self {
            service,
            project_id: ProjectId::new(),
            assignee_id: UserId::new(),
            board: KanbanBoard::default(),
            last_task: None,
            last_error: None,
        }
    }

    /// Filter selecting the scenario's project.
    #[must_use]
    pub const fn filter(&self) -> TaskFilter {
        TaskFilter::all().for_project(self.project_id)
    }
}

impl Default for TaskBoardWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskBoardWorld {
    TaskBoardWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
