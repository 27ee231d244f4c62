//! Sink that keeps notifications in memory.

use crate::notification::{Notification, NotificationKind, NotificationSink};
use std::sync::{Arc, PoisonError, RwLock};

/// Thread-safe sink recording every notification in delivery order.
///
/// Clones share the same buffer, so a UI can hold one clone and drain it
/// while services write through another.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotificationSink {
    received: Arc<RwLock<Vec<Notification>>>,
}

impl RecordingNotificationSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of every notification received so far.
    #[must_use]
    pub fn notifications(&self) -> Vec<Notification> {
        self.received
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the most recent notification, if any.
    #[must_use]
    pub fn last(&self) -> Option<Notification> {
        self.received
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }

    /// Counts received notifications of the given kind.
    #[must_use]
    pub fn count(&self, kind: NotificationKind) -> usize {
        self.received
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|notification| notification.kind == kind)
            .count()
    }

    /// Removes and returns every buffered notification.
    pub fn drain(&self) -> Vec<Notification> {
        let mut received = self
            .received
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        std::mem::take(&mut *received)
    }
}

impl NotificationSink for RecordingNotificationSink {
    fn notify(&self, notification: Notification) {
        self.received
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notification);
    }
}
