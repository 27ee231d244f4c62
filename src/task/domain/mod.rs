//! Domain model for task status management.
//!
//! Tasks carry a status drawn from a flat set with no forbidden
//! transitions. The kanban board is a read-only projection of a task list
//! into one column per status.

mod board;
mod error;
mod ids;
mod task;

pub use board::KanbanBoard;
pub use error::{ParseTaskStatusError, TaskDomainError};
pub use ids::TaskId;
pub use task::{PersistedTaskData, Task, TaskDraft, TaskStatus};
