//! Sink that forwards notifications to `tracing`.

use crate::notification::{Notification, NotificationKind, NotificationSink};

/// Emits each notification as a `tracing` event.
///
/// Successes log at `info`, errors at `warn`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotificationSink;

impl NotificationSink for TracingNotificationSink {
    fn notify(&self, notification: Notification) {
        match notification.kind {
            NotificationKind::Success => {
                tracing::info!(kind = "success", message = %notification.message, "notification");
            }
            NotificationKind::Error => {
                tracing::warn!(kind = "error", message = %notification.message, "notification");
            }
        }
    }
}
