//! Port contracts for time tracking.

pub mod repository;

pub use repository::{
    TimeEntryFilter, TimeEntryRepository, TimeEntryRepositoryError, TimeEntryRepositoryResult,
};
