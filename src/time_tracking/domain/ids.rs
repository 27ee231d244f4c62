//! Identifier types for the time tracking domain.

use crate::ids::uuid_identifier;

uuid_identifier!(
    /// Unique identifier for a time entry.
    TimeEntryId
);
