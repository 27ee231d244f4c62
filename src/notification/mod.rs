//! User-facing notifications.
//!
//! Services report the outcome of every mutating operation through a
//! [`NotificationSink`]. Sinks are fire-and-forget: they cannot fail and
//! never block the operation that produced the notification.

pub mod adapters;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// The operation completed.
    Success,
    /// The operation was rejected or failed.
    Error,
}

impl NotificationKind {
    /// Returns the canonical name of the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

/// A message destined for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Severity.
    pub kind: NotificationKind,
    /// Human-readable text.
    pub message: String,
}

impl Notification {
    /// Creates a success notification.
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: message.into(),
        }
    }

    /// Creates an error notification.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            message: message.into(),
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind.as_str(), self.message)
    }
}

/// Destination for user-facing notifications (toast, snackbar, log).
pub trait NotificationSink: Send + Sync {
    /// Delivers a notification.
    fn notify(&self, notification: Notification);
}

/// Reports an operation outcome to `sink`.
///
/// Successes use the message built by `on_success`; failures use the
/// error's display text.
pub fn notify_outcome<T, E>(
    sink: &dyn NotificationSink,
    outcome: &Result<T, E>,
    on_success: impl FnOnce(&T) -> String,
) where
    E: fmt::Display,
{
    let notification = match outcome {
        Ok(value) => Notification::success(on_success(value)),
        Err(err) => Notification::error(err.to_string()),
    };
    sink.notify(notification);
}
