//! Per-user time tracking session.

use super::ticker::ElapsedTicker;
use crate::config::TimerConfig;
use crate::error::ErrorKind;
use crate::ids::UserId;
use crate::notification::{NotificationSink, notify_outcome};
use crate::time_tracking::{
    domain::{
        EntryLinks, ManualDuration, ReportWindow, TimeEntry, TimeEntryDomainError, TimeEntryId,
        TimeReport,
    },
    ports::{TimeEntryFilter, TimeEntryRepository, TimeEntryRepositoryError},
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Request payload for starting a timer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartTimerRequest {
    description: String,
    links: EntryLinks,
}

impl StartTimerRequest {
    /// Creates a request with no client, project, or task reference.
    #[must_use]
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            links: EntryLinks::none(),
        }
    }

    /// Attaches client, project, and task references.
    #[must_use]
    pub const fn with_links(mut self, links: EntryLinks) -> Self {
        self.links = links;
        self
    }
}

/// Raw duration input for a manual entry, as captured by the entry form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DurationInput {
    /// An already numeric minute count.
    Minutes(u32),
    /// A total-minutes text field.
    MinutesText(String),
    /// Separate hour and minute text fields.
    HoursAndMinutes {
        /// Hours text; blank means zero.
        hours: String,
        /// Minutes text; blank means zero.
        minutes: String,
    },
}

impl DurationInput {
    fn resolve(&self) -> Result<ManualDuration, TimeEntryDomainError> {
        match self {
            Self::Minutes(minutes) => Ok(ManualDuration::from_minutes(*minutes)),
            Self::MinutesText(text) => ManualDuration::parse_minutes(text),
            Self::HoursAndMinutes { hours, minutes } => {
                ManualDuration::from_hours_and_minutes(hours, minutes)
            }
        }
    }
}

/// Request payload for logging a completed entry without a timer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManualEntryRequest {
    description: String,
    start_time: DateTime<Utc>,
    duration: DurationInput,
    links: EntryLinks,
}

impl ManualEntryRequest {
    /// Creates a request with required entry fields.
    #[must_use]
    pub fn new(
        description: impl Into<String>,
        start_time: DateTime<Utc>,
        duration: DurationInput,
    ) -> Self {
        Self {
            description: description.into(),
            start_time,
            duration,
            links: EntryLinks::none(),
        }
    }

    /// Attaches client, project, and task references.
    #[must_use]
    pub const fn with_links(mut self, links: EntryLinks) -> Self {
        self.links = links;
        self
    }
}

/// Service-level errors for time tracking operations.
#[derive(Debug, Error)]
pub enum TimeTrackingError {
    /// A timer is already running for this session.
    #[error("timer already running")]
    TimerAlreadyRunning(TimeEntryId),
    /// No timer is running.
    #[error("no active timer")]
    NoActiveTimer,
    /// The entry to delete is still running.
    #[error("cannot delete a running timer")]
    EntryRunning(TimeEntryId),
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TimeEntryDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TimeEntryRepositoryError),
}

impl TimeTrackingError {
    /// Classifies the error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::TimerAlreadyRunning(_)
            | Self::Repository(TimeEntryRepositoryError::RunningEntryExists(_)) => {
                ErrorKind::Conflict
            }
            Self::NoActiveTimer
            | Self::EntryRunning(_)
            | Self::Domain(TimeEntryDomainError::NotRunning(_)) => ErrorKind::State,
            Self::Domain(_) => ErrorKind::Validation,
            Self::Repository(_) => ErrorKind::Persistence,
        }
    }
}

/// Result type for time tracking operations.
pub type TimeTrackingResult<T> = Result<T, TimeTrackingError>;

#[derive(Debug)]
struct ActiveTimer {
    entry: TimeEntry,
    ticker: ElapsedTicker,
}

/// Time tracking for one user: at most one running timer, a live elapsed
/// counter, and manual entries.
///
/// Operations are atomic from the caller's view: when the repository
/// rejects a write, the session state is left as it was.
pub struct TimeTrackingSession<R, C>
where
    R: TimeEntryRepository,
    C: Clock + Send + Sync + 'static,
{
    user_id: UserId,
    repository: Arc<R>,
    clock: Arc<C>,
    notifier: Arc<dyn NotificationSink>,
    tick_interval: Duration,
    active: Option<ActiveTimer>,
    elapsed_tx: Arc<watch::Sender<u64>>,
    elapsed_rx: watch::Receiver<u64>,
}

impl<R, C> TimeTrackingSession<R, C>
where
    R: TimeEntryRepository,
    C: Clock + Send + Sync + 'static,
{
    /// Creates an idle session for `user_id`.
    #[must_use]
    pub fn new(
        user_id: UserId,
        repository: Arc<R>,
        clock: Arc<C>,
        notifier: Arc<dyn NotificationSink>,
    ) -> Self {
        let (elapsed_tx, elapsed_rx) = watch::channel(0);
        Self {
            user_id,
            repository,
            clock,
            notifier,
            tick_interval: TimerConfig::default().tick_interval(),
            active: None,
            elapsed_tx: Arc::new(elapsed_tx),
            elapsed_rx,
        }
    }

    /// Applies timer settings.
    #[must_use]
    pub fn with_config(mut self, config: &TimerConfig) -> Self {
        self.tick_interval = config.tick_interval();
        self
    }

    /// Returns the session owner.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the running entry, if any.
    #[must_use]
    pub fn active_entry(&self) -> Option<&TimeEntry> {
        self.active.as_ref().map(|timer| &timer.entry)
    }

    /// Returns the most recently published elapsed seconds.
    #[must_use]
    pub fn elapsed_seconds(&self) -> u64 {
        *self.elapsed_rx.borrow()
    }

    /// Subscribes to elapsed-second updates.
    #[must_use]
    pub fn subscribe_elapsed(&self) -> watch::Receiver<u64> {
        self.elapsed_tx.subscribe()
    }

    /// Recomputes the elapsed seconds from the clock now, publishes the
    /// value, and returns it. Returns 0 when idle.
    pub fn refresh_elapsed(&self) -> u64 {
        let seconds = self
            .active_entry()
            .map_or(0, |entry| entry.elapsed_seconds_at(self.clock.utc()));
        self.elapsed_tx.send_replace(seconds);
        seconds
    }

    /// Adopts the user's running entry from the repository, if one exists,
    /// and restarts the elapsed ticker for it.
    ///
    /// Used after a reload, when the running entry outlived the previous
    /// session.
    ///
    /// # Errors
    ///
    /// Returns [`TimeTrackingError::TimerAlreadyRunning`] when this session
    /// already tracks a timer and [`TimeTrackingError::Repository`] when the
    /// lookup fails.
    pub async fn resume(&mut self) -> TimeTrackingResult<Option<TimeEntry>> {
        if let Some(active) = self.active_entry() {
            return Err(TimeTrackingError::TimerAlreadyRunning(active.id()));
        }
        let running = self.repository.find_running(self.user_id).await?;
        if let Some(entry) = running.clone() {
            info!(entry_id = %entry.id(), user_id = %self.user_id, "resumed running timer");
            self.activate(entry);
            self.refresh_elapsed();
        }
        Ok(running)
    }

    /// Starts a timer.
    ///
    /// # Errors
    ///
    /// Returns [`TimeTrackingError::TimerAlreadyRunning`] when a timer is
    /// active (the running timer is left untouched),
    /// [`TimeTrackingError::Domain`] for a blank description, and
    /// [`TimeTrackingError::Repository`] when the entry cannot be stored.
    pub async fn start_timer(&mut self, request: StartTimerRequest) -> TimeTrackingResult<TimeEntry> {
        let outcome = self.begin(request).await;
        self.announce(&outcome, |entry| {
            format!("Timer started: {}", entry.description())
        });
        outcome
    }

    async fn begin(&mut self, request: StartTimerRequest) -> TimeTrackingResult<TimeEntry> {
        if let Some(active) = self.active_entry() {
            return Err(TimeTrackingError::TimerAlreadyRunning(active.id()));
        }
        let entry = TimeEntry::start(
            self.user_id,
            request.description,
            request.links,
            &*self.clock,
        )?;
        self.repository.store(&entry).await?;
        info!(entry_id = %entry.id(), user_id = %self.user_id, "timer started");
        self.activate(entry.clone());
        Ok(entry)
    }

    /// Starts a new timer reusing the description and references of
    /// `previous`.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`Self::start_timer`].
    pub async fn restart_timer(&mut self, previous: &TimeEntry) -> TimeTrackingResult<TimeEntry> {
        let request =
            StartTimerRequest::new(previous.description()).with_links(previous.links());
        self.start_timer(request).await
    }

    /// Stops the running timer and commits its rounded duration.
    ///
    /// # Errors
    ///
    /// Returns [`TimeTrackingError::NoActiveTimer`] when idle (nothing is
    /// written) and [`TimeTrackingError::Repository`] when the update is
    /// rejected, in which case the timer keeps running.
    pub async fn stop_timer(&mut self) -> TimeTrackingResult<TimeEntry> {
        let outcome = self.finish().await;
        self.announce(&outcome, |entry| {
            format!(
                "Timer stopped: {} min logged for {}",
                entry.duration_minutes(),
                entry.description()
            )
        });
        outcome
    }

    async fn finish(&mut self) -> TimeTrackingResult<TimeEntry> {
        let mut entry = self
            .active_entry()
            .cloned()
            .ok_or(TimeTrackingError::NoActiveTimer)?;
        entry.stop(&*self.clock)?;
        self.repository.update(&entry).await?;

        if let Some(timer) = self.active.take() {
            timer.ticker.stop().await;
        }
        self.elapsed_tx.send_replace(0);
        info!(
            entry_id = %entry.id(),
            duration_minutes = entry.duration_minutes(),
            "timer stopped"
        );
        Ok(entry)
    }

    /// Logs a completed entry with a known duration.
    ///
    /// Independent of the running timer, which is never touched.
    ///
    /// # Errors
    ///
    /// Returns [`TimeTrackingError::Domain`] for a blank description or an
    /// invalid duration and [`TimeTrackingError::Repository`] when the entry
    /// cannot be stored.
    pub async fn add_time_entry(&self, request: ManualEntryRequest) -> TimeTrackingResult<TimeEntry> {
        let outcome = self.log_manual(request).await;
        self.announce(&outcome, |entry| {
            format!("Logged {} min for {}", entry.duration_minutes(), entry.description())
        });
        outcome
    }

    async fn log_manual(&self, request: ManualEntryRequest) -> TimeTrackingResult<TimeEntry> {
        let duration = request.duration.resolve()?;
        let entry = TimeEntry::manual(
            self.user_id,
            request.description,
            request.links,
            request.start_time,
            duration,
        )?;
        self.repository.store(&entry).await?;
        info!(entry_id = %entry.id(), duration_minutes = duration.minutes(), "manual entry added");
        Ok(entry)
    }

    /// Deletes a stopped entry owned by this session's user.
    ///
    /// Entries of other users are reported as not found.
    ///
    /// # Errors
    ///
    /// Returns [`TimeTrackingError::EntryRunning`] when the entry is still
    /// running (stop it first) and [`TimeTrackingError::Repository`] when
    /// it does not exist or the deletion is rejected.
    pub async fn delete_time_entry(&self, id: TimeEntryId) -> TimeTrackingResult<()> {
        let outcome = self.remove(id).await;
        self.announce(&outcome, |()| "Time entry deleted".to_owned());
        outcome
    }

    async fn remove(&self, id: TimeEntryId) -> TimeTrackingResult<()> {
        if self.active_entry().is_some_and(|entry| entry.id() == id) {
            return Err(TimeTrackingError::EntryRunning(id));
        }
        let entry = self
            .repository
            .find_by_id(id)
            .await?
            .filter(|entry| entry.user_id() == self.user_id)
            .ok_or(TimeEntryRepositoryError::NotFound(id))?;
        if entry.is_running() {
            return Err(TimeTrackingError::EntryRunning(id));
        }
        self.repository.delete(id).await?;
        info!(entry_id = %id, "time entry deleted");
        Ok(())
    }

    /// Lists this user's entries matching `filter`; the filter's user is
    /// always replaced by the session owner.
    ///
    /// # Errors
    ///
    /// Returns [`TimeTrackingError::Repository`] when the lookup fails.
    pub async fn list_entries(&self, filter: TimeEntryFilter) -> TimeTrackingResult<Vec<TimeEntry>> {
        let entries = self.repository.list(&filter.for_user(self.user_id)).await?;
        debug!(count = entries.len(), user_id = %self.user_id, "time entries listed");
        Ok(entries)
    }

    /// Aggregates this user's stopped entries matching `filter`.
    ///
    /// # Errors
    ///
    /// Returns [`TimeTrackingError::Repository`] when the lookup fails.
    pub async fn report(
        &self,
        filter: TimeEntryFilter,
        window: Option<ReportWindow>,
    ) -> TimeTrackingResult<TimeReport> {
        let entries = self.list_entries(filter.running(false)).await?;
        Ok(TimeReport::from_entries(&entries, window))
    }

    /// Ends the session, cancelling the elapsed ticker.
    ///
    /// A running entry stays persisted as running and can be picked up
    /// later with [`Self::resume`].
    pub async fn shutdown(mut self) {
        if let Some(timer) = self.active.take() {
            debug!(entry_id = %timer.entry.id(), "session shut down with timer running");
            timer.ticker.stop().await;
        }
    }

    fn activate(&mut self, entry: TimeEntry) {
        self.elapsed_tx.send_replace(0);
        let ticker = ElapsedTicker::spawn(
            Arc::clone(&self.clock),
            entry.start_time(),
            self.tick_interval,
            Arc::clone(&self.elapsed_tx),
        );
        self.active = Some(ActiveTimer { entry, ticker });
    }

    fn announce<T>(&self, outcome: &TimeTrackingResult<T>, on_success: impl FnOnce(&T) -> String) {
        if let Err(err) = outcome {
            warn!(kind = %err.kind(), error = %err, user_id = %self.user_id, "time tracking operation rejected");
        }
        notify_outcome(&*self.notifier, outcome, on_success);
    }
}
