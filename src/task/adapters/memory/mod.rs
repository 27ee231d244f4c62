//! In-memory adapters for tests and single-process hosts.

mod task;

pub use task::InMemoryTaskRepository;
