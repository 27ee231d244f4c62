//! Aggregated time totals.

use super::TimeEntry;
use crate::ids::{ClientId, ProjectId};
use crate::task::domain::TaskId;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// Half-open `[from, to)` window over entry start times.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportWindow {
    /// Inclusive lower bound.
    pub from: DateTime<Utc>,
    /// Exclusive upper bound.
    pub to: DateTime<Utc>,
}

impl ReportWindow {
    /// Returns `true` when `instant` lies inside the window.
    #[must_use]
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.from <= instant && instant < self.to
    }
}

/// Minutes logged across stopped entries, grouped by reference.
///
/// Running entries are excluded because their duration is not yet known.
/// Entries without a given reference count toward the total only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimeReport {
    /// Number of entries counted.
    pub entry_count: usize,
    /// Minutes across every counted entry.
    pub total_minutes: u64,
    /// Minutes per client.
    pub by_client: BTreeMap<ClientId, u64>,
    /// Minutes per project.
    pub by_project: BTreeMap<ProjectId, u64>,
    /// Minutes per task.
    pub by_task: BTreeMap<TaskId, u64>,
}

impl TimeReport {
    /// Aggregates `entries`, keeping only those starting inside `window`
    /// when one is given.
    #[must_use]
    pub fn from_entries<'a>(
        entries: impl IntoIterator<Item = &'a TimeEntry>,
        window: Option<ReportWindow>,
    ) -> Self {
        let mut report = Self::default();
        let counted = entries.into_iter().filter(|entry| {
            !entry.is_running() && window.is_none_or(|bounds| bounds.contains(entry.start_time()))
        });
        for entry in counted {
            report.add(entry);
        }
        report
    }

    fn add(&mut self, entry: &TimeEntry) {
        let minutes = u64::from(entry.duration_minutes());
        let links = entry.links();
        self.entry_count += 1;
        self.total_minutes += minutes;
        if let Some(client_id) = links.client_id {
            *self.by_client.entry(client_id).or_default() += minutes;
        }
        if let Some(project_id) = links.project_id {
            *self.by_project.entry(project_id).or_default() += minutes;
        }
        if let Some(task_id) = links.task_id {
            *self.by_task.entry(task_id).or_default() += minutes;
        }
    }
}
