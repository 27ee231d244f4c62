//! Kanban projection of a task list.

use super::{Task, TaskId, TaskStatus};
use mockable::Clock;

/// Tasks partitioned into one column per [`TaskStatus`].
///
/// Each column keeps the relative order of the input list. Building a board
/// twice from the same list yields equal boards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KanbanBoard {
    doing: Vec<Task>,
    for_review: Vec<Task>,
    done: Vec<Task>,
    deferred: Vec<Task>,
}

impl KanbanBoard {
    /// Partitions `tasks` by status.
    #[must_use]
    pub fn from_tasks(tasks: impl IntoIterator<Item = Task>) -> Self {
        let mut board = Self::default();
        for task in tasks {
            board.column_mut(task.status()).push(task);
        }
        board
    }

    /// Returns the tasks in the given column.
    #[must_use]
    pub fn column(&self, status: TaskStatus) -> &[Task] {
        match status {
            TaskStatus::Doing => &self.doing,
            TaskStatus::ForReview => &self.for_review,
            TaskStatus::Done => &self.done,
            TaskStatus::Deferred => &self.deferred,
        }
    }

    /// Iterates over the columns in board order.
    pub fn columns(&self) -> impl Iterator<Item = (TaskStatus, &[Task])> {
        TaskStatus::ALL
            .into_iter()
            .map(move |status| (status, self.column(status)))
    }

    /// Returns the total number of tasks on the board.
    #[must_use]
    pub fn len(&self) -> usize {
        self.doing.len() + self.for_review.len() + self.done.len() + self.deferred.len()
    }

    /// Returns `true` when no column holds a task.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Looks up a task anywhere on the board.
    #[must_use]
    pub fn find(&self, task_id: TaskId) -> Option<&Task> {
        self.columns()
            .flat_map(|(_, tasks)| tasks.iter())
            .find(|task| task.id() == task_id)
    }

    /// Moves a task to the end of the `status` column.
    ///
    /// Returns the status the task left, or `None` when the task is not on
    /// the board.
    pub fn move_task(
        &mut self,
        task_id: TaskId,
        status: TaskStatus,
        clock: &impl Clock,
    ) -> Option<TaskStatus> {
        let current = self.find(task_id)?.status();
        let source = self.column_mut(current);
        let position = source.iter().position(|task| task.id() == task_id)?;
        let mut task = source.remove(position);
        let previous = task.change_status(status, clock);
        self.column_mut(status).push(task);
        Some(previous)
    }

    fn column_mut(&mut self, status: TaskStatus) -> &mut Vec<Task> {
        match status {
            TaskStatus::Doing => &mut self.doing,
            TaskStatus::ForReview => &mut self.for_review,
            TaskStatus::Done => &mut self.done,
            TaskStatus::Deferred => &mut self.deferred,
        }
    }
}
