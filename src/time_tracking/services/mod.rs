//! Application services for time tracking.

mod session;
mod ticker;

pub use session::{
    DurationInput, ManualEntryRequest, StartTimerRequest, TimeTrackingError, TimeTrackingResult,
    TimeTrackingSession,
};
