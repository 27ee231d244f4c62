//! Time entry aggregate.

use super::{ManualDuration, TimeEntryDomainError, TimeEntryId, elapsed_seconds, rounded_minutes};
use crate::ids::{ClientId, ProjectId, UserId};
use crate::task::domain::TaskId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Optional client, project, and task references attached to an entry.
///
/// The references are lookup-only and are never checked for existence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntryLinks {
    /// Client the time was spent for.
    pub client_id: Option<ClientId>,
    /// Project the time was spent on.
    pub project_id: Option<ProjectId>,
    /// Task the time was spent on.
    pub task_id: Option<TaskId>,
}

impl EntryLinks {
    /// Creates an empty set of references.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            client_id: None,
            project_id: None,
            task_id: None,
        }
    }

    /// Sets the client reference.
    #[must_use]
    pub const fn with_client(mut self, client_id: ClientId) -> Self {
        self.client_id = Some(client_id);
        self
    }

    /// Sets the project reference.
    #[must_use]
    pub const fn with_project(mut self, project_id: ProjectId) -> Self {
        self.project_id = Some(project_id);
        self
    }

    /// Sets the task reference.
    #[must_use]
    pub const fn with_task(mut self, task_id: TaskId) -> Self {
        self.task_id = Some(task_id);
        self
    }
}

/// A record of time spent, either running or completed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeEntry {
    id: TimeEntryId,
    user_id: UserId,
    description: String,
    #[serde(flatten)]
    links: EntryLinks,
    start_time: DateTime<Utc>,
    end_time: Option<DateTime<Utc>>,
    duration_minutes: u32,
    is_running: bool,
}

/// Parameter object for reconstructing a persisted time entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTimeEntryData {
    /// Persisted entry identifier.
    pub id: TimeEntryId,
    /// Persisted owner.
    pub user_id: UserId,
    /// Persisted description.
    pub description: String,
    /// Persisted references.
    pub links: EntryLinks,
    /// Persisted start timestamp.
    pub start_time: DateTime<Utc>,
    /// Persisted end timestamp, absent while running.
    pub end_time: Option<DateTime<Utc>>,
    /// Persisted duration in minutes.
    pub duration_minutes: u32,
    /// Persisted running flag.
    pub is_running: bool,
}

fn validated_description(description: String) -> Result<String, TimeEntryDomainError> {
    let trimmed = description.trim();
    if trimmed.is_empty() {
        return Err(TimeEntryDomainError::EmptyDescription);
    }
    Ok(trimmed.to_owned())
}

impl TimeEntry {
    /// Creates a running entry starting at the current clock time.
    ///
    /// # Errors
    ///
    /// Returns [`TimeEntryDomainError::EmptyDescription`] when the
    /// description is blank.
    pub fn start(
        user_id: UserId,
        description: impl Into<String>,
        links: EntryLinks,
        clock: &impl Clock,
    ) -> Result<Self, TimeEntryDomainError> {
        Ok(Self {
            id: TimeEntryId::new(),
            user_id,
            description: validated_description(description.into())?,
            links,
            start_time: clock.utc(),
            end_time: None,
            duration_minutes: 0,
            is_running: true,
        })
    }

    /// Creates a completed entry with a known duration.
    ///
    /// The end time is `start_time + duration`.
    ///
    /// # Errors
    ///
    /// Returns [`TimeEntryDomainError::EmptyDescription`] when the
    /// description is blank and [`TimeEntryDomainError::InvalidDuration`]
    /// when the end time falls outside the representable range.
    pub fn manual(
        user_id: UserId,
        description: impl Into<String>,
        links: EntryLinks,
        start_time: DateTime<Utc>,
        duration: ManualDuration,
    ) -> Result<Self, TimeEntryDomainError> {
        let description = validated_description(description.into())?;
        let end_time = start_time
            .checked_add_signed(duration.as_chrono())
            .ok_or_else(|| {
                TimeEntryDomainError::InvalidDuration(format!("{} min", duration.minutes()))
            })?;
        Ok(Self {
            id: TimeEntryId::new(),
            user_id,
            description,
            links,
            start_time,
            end_time: Some(end_time),
            duration_minutes: duration.minutes(),
            is_running: false,
        })
    }

    /// Reconstructs an entry from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTimeEntryData) -> Self {
        Self {
            id: data.id,
            user_id: data.user_id,
            description: data.description,
            links: data.links,
            start_time: data.start_time,
            end_time: data.end_time,
            duration_minutes: data.duration_minutes,
            is_running: data.is_running,
        }
    }

    /// Stops a running entry at the current clock time.
    ///
    /// Sets the end time and the duration rounded to the nearest minute.
    ///
    /// # Errors
    ///
    /// Returns [`TimeEntryDomainError::NotRunning`] when the entry has
    /// already been stopped.
    pub fn stop(&mut self, clock: &impl Clock) -> Result<(), TimeEntryDomainError> {
        if !self.is_running {
            return Err(TimeEntryDomainError::NotRunning(self.id));
        }
        let end_time = clock.utc();
        self.duration_minutes = rounded_minutes(self.start_time, end_time);
        self.end_time = Some(end_time);
        self.is_running = false;
        Ok(())
    }

    /// Whole seconds elapsed since the entry started, as of `now`.
    ///
    /// For stopped entries the count ends at the end time.
    #[must_use]
    pub fn elapsed_seconds_at(&self, now: DateTime<Utc>) -> u64 {
        elapsed_seconds(self.start_time, self.end_time.unwrap_or(now))
    }

    /// Returns the entry identifier.
    #[must_use]
    pub const fn id(&self) -> TimeEntryId {
        self.id
    }

    /// Returns the owning user.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the client, project, and task references.
    #[must_use]
    pub const fn links(&self) -> EntryLinks {
        self.links
    }

    /// Returns the start timestamp.
    #[must_use]
    pub const fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    /// Returns the end timestamp; `None` while running.
    #[must_use]
    pub const fn end_time(&self) -> Option<DateTime<Utc>> {
        self.end_time
    }

    /// Returns the duration in minutes; 0 while running.
    #[must_use]
    pub const fn duration_minutes(&self) -> u32 {
        self.duration_minutes
    }

    /// Returns `true` while the timer is running.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.is_running
    }
}
