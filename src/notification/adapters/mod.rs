//! Notification sink implementations.

mod log_sink;
mod memory;

pub use log_sink::TracingNotificationSink;
pub use memory::RecordingNotificationSink;
