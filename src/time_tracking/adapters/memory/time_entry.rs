//! In-memory repository for time entries.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::ids::UserId;
use crate::time_tracking::{
    domain::{TimeEntry, TimeEntryId},
    ports::{
        TimeEntryFilter, TimeEntryRepository, TimeEntryRepositoryError, TimeEntryRepositoryResult,
    },
};

/// Thread-safe in-memory time entry repository.
///
/// Enforces the one-running-entry-per-user invariant on writes.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTimeEntryRepository {
    state: Arc<RwLock<InMemoryTimeEntryState>>,
}

#[derive(Debug, Default)]
struct InMemoryTimeEntryState {
    entries: HashMap<TimeEntryId, TimeEntry>,
    creation_order: Vec<TimeEntryId>,
    running_index: HashMap<UserId, TimeEntryId>,
}

impl InMemoryTimeEntryRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl std::fmt::Display) -> TimeEntryRepositoryError {
    TimeEntryRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

/// Rejects `entry` when another entry of the same user is already running.
fn check_running_slot(
    state: &InMemoryTimeEntryState,
    entry: &TimeEntry,
) -> TimeEntryRepositoryResult<()> {
    if !entry.is_running() {
        return Ok(());
    }
    match state.running_index.get(&entry.user_id()) {
        Some(running_id) if *running_id != entry.id() => Err(
            TimeEntryRepositoryError::RunningEntryExists(entry.user_id()),
        ),
        _ => Ok(()),
    }
}

fn index_running(state: &mut InMemoryTimeEntryState, entry: &TimeEntry) {
    if entry.is_running() {
        state.running_index.insert(entry.user_id(), entry.id());
    } else if state.running_index.get(&entry.user_id()) == Some(&entry.id()) {
        state.running_index.remove(&entry.user_id());
    }
}

#[async_trait]
impl TimeEntryRepository for InMemoryTimeEntryRepository {
    async fn store(&self, entry: &TimeEntry) -> TimeEntryRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        if state.entries.contains_key(&entry.id()) {
            return Err(TimeEntryRepositoryError::DuplicateEntry(entry.id()));
        }
        check_running_slot(&state, entry)?;

        index_running(&mut state, entry);
        state.creation_order.push(entry.id());
        state.entries.insert(entry.id(), entry.clone());
        Ok(())
    }

    async fn update(&self, entry: &TimeEntry) -> TimeEntryRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        if !state.entries.contains_key(&entry.id()) {
            return Err(TimeEntryRepositoryError::NotFound(entry.id()));
        }
        check_running_slot(&state, entry)?;

        index_running(&mut state, entry);
        state.entries.insert(entry.id(), entry.clone());
        Ok(())
    }

    async fn delete(&self, id: TimeEntryId) -> TimeEntryRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let removed = state
            .entries
            .remove(&id)
            .ok_or(TimeEntryRepositoryError::NotFound(id))?;
        state.creation_order.retain(|entry_id| *entry_id != id);
        if state.running_index.get(&removed.user_id()) == Some(&id) {
            state.running_index.remove(&removed.user_id());
        }
        Ok(())
    }

    async fn find_by_id(&self, id: TimeEntryId) -> TimeEntryRepositoryResult<Option<TimeEntry>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.entries.get(&id).cloned())
    }

    async fn find_running(&self, user_id: UserId) -> TimeEntryRepositoryResult<Option<TimeEntry>> {
        let state = self.state.read().map_err(lock_error)?;
        let entry = state
            .running_index
            .get(&user_id)
            .and_then(|entry_id| state.entries.get(entry_id))
            .cloned();
        Ok(entry)
    }

    async fn list(&self, filter: &TimeEntryFilter) -> TimeEntryRepositoryResult<Vec<TimeEntry>> {
        let state = self.state.read().map_err(lock_error)?;
        let entries = state
            .creation_order
            .iter()
            .filter_map(|id| state.entries.get(id))
            .filter(|entry| filter.matches(entry))
            .cloned()
            .collect();
        Ok(entries)
    }
}
