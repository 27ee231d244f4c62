//! Domain model for time entries and time reports.

mod duration;
mod error;
mod ids;
mod report;
mod time_entry;

pub use duration::{ManualDuration, elapsed_seconds, rounded_minutes};
pub use error::TimeEntryDomainError;
pub use ids::TimeEntryId;
pub use report::{ReportWindow, TimeReport};
pub use time_entry::{EntryLinks, PersistedTimeEntryData, TimeEntry};
