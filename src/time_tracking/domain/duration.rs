//! Elapsed-time and duration arithmetic.

use super::TimeEntryDomainError;
use chrono::{DateTime, Utc};

const MILLIS_PER_SECOND: i64 = 1_000;
const MILLIS_PER_MINUTE: i64 = 60_000;
const MINUTES_PER_HOUR: u32 = 60;

/// Whole seconds elapsed from `start` to `now`, rounded down.
///
/// Returns 0 when `now` precedes `start`.
#[must_use]
pub fn elapsed_seconds(start: DateTime<Utc>, now: DateTime<Utc>) -> u64 {
    let millis = (now - start).num_milliseconds().max(0);
    u64::try_from(millis.div_euclid(MILLIS_PER_SECOND)).unwrap_or(0)
}

/// Minutes from `start` to `end`, rounded to the nearest minute with
/// halves rounding up.
///
/// Returns 0 when `end` precedes `start`.
#[must_use]
pub fn rounded_minutes(start: DateTime<Utc>, end: DateTime<Utc>) -> u32 {
    let millis = (end - start).num_milliseconds().max(0);
    let half_minute = MILLIS_PER_MINUTE.div_euclid(2);
    let minutes = millis
        .saturating_add(half_minute)
        .div_euclid(MILLIS_PER_MINUTE);
    u32::try_from(minutes).unwrap_or(u32::MAX)
}

/// Validated duration of a manually logged entry, in whole minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ManualDuration(u32);

impl ManualDuration {
    /// Creates a duration from a minute count.
    #[must_use]
    pub const fn from_minutes(minutes: u32) -> Self {
        Self(minutes)
    }

    /// Parses a total-minutes text field.
    ///
    /// # Errors
    ///
    /// Returns [`TimeEntryDomainError::InvalidDuration`] unless the trimmed
    /// text is a non-negative whole number.
    pub fn parse_minutes(text: &str) -> Result<Self, TimeEntryDomainError> {
        parse_component(text, false).map(Self)
    }

    /// Combines split hour and minute text fields.
    ///
    /// A blank field counts as zero; minutes above 59 are accepted and
    /// carried into the total.
    ///
    /// # Errors
    ///
    /// Returns [`TimeEntryDomainError::InvalidDuration`] when either field
    /// is not a non-negative whole number or the total overflows.
    pub fn from_hours_and_minutes(hours: &str, minutes: &str) -> Result<Self, TimeEntryDomainError> {
        let whole_hours = parse_component(hours, true)?;
        let extra_minutes = parse_component(minutes, true)?;
        whole_hours
            .checked_mul(MINUTES_PER_HOUR)
            .and_then(|total| total.checked_add(extra_minutes))
            .map(Self)
            .ok_or_else(|| TimeEntryDomainError::InvalidDuration(format!("{hours}h {minutes}m")))
    }

    /// Returns the duration in minutes.
    #[must_use]
    pub const fn minutes(self) -> u32 {
        self.0
    }

    /// Returns the duration as a `chrono` value.
    #[must_use]
    pub fn as_chrono(self) -> chrono::Duration {
        chrono::Duration::minutes(i64::from(self.0))
    }
}

fn parse_component(text: &str, blank_is_zero: bool) -> Result<u32, TimeEntryDomainError> {
    let trimmed = text.trim();
    if trimmed.is_empty() && blank_is_zero {
        return Ok(0);
    }
    if trimmed.starts_with('+') {
        return Err(TimeEntryDomainError::InvalidDuration(text.to_owned()));
    }
    trimmed
        .parse::<u32>()
        .map_err(|_| TimeEntryDomainError::InvalidDuration(text.to_owned()))
}
