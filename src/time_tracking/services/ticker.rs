//! Background task publishing the elapsed seconds of a running timer.

use crate::time_tracking::domain::elapsed_seconds;
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Handle to a running elapsed-time ticker.
///
/// Dropping the handle cancels the ticker without waiting for it.
#[derive(Debug)]
pub(crate) struct ElapsedTicker {
    cancel: CancellationToken,
    handle: Option<JoinHandle<()>>,
}

impl ElapsedTicker {
    /// Spawns a ticker that publishes `floor((now - start) / 1s)` into
    /// `elapsed` every `period`, starting immediately.
    pub(crate) fn spawn<C>(
        clock: Arc<C>,
        start: DateTime<Utc>,
        period: Duration,
        elapsed: Arc<watch::Sender<u64>>,
    ) -> Self
    where
        C: Clock + Send + Sync + 'static,
    {
        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    biased;
                    () = token.cancelled() => break,
                    _ = interval.tick() => {
                        let seconds = elapsed_seconds(start, clock.utc());
                        elapsed.send_replace(seconds);
                        debug!(elapsed_seconds = seconds, "timer tick");
                    }
                }
            }
        });

        Self {
            cancel,
            handle: Some(handle),
        }
    }

    /// Cancels the ticker and waits for its task to finish, so no tick
    /// lands after this returns.
    pub(crate) async fn stop(mut self) {
        self.cancel.cancel();
        if let Some(handle) = self.handle.take() {
            if let Err(err) = handle.await {
                warn!(error = %err, "timer ticker ended abnormally");
            }
        }
    }
}

impl Drop for ElapsedTicker {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
