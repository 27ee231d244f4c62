//! Application services for task status orchestration.

mod status;

pub use status::{
    ChangeStatusRequest, CreateTaskRequest, TaskStatusError, TaskStatusResult, TaskStatusService,
};
