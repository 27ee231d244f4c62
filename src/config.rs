//! Runtime configuration.
//!
//! Settings are layered with the `config` crate: built-in defaults, then an
//! optional file, then `CLIENTDESK__*` environment variables (for example
//! `CLIENTDESK__TIMER__TICK_INTERVAL_MS=500`).

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Environment variable prefix for configuration overrides.
pub const ENV_PREFIX: &str = "CLIENTDESK";

const DEFAULT_TICK_INTERVAL_MS: u64 = 1_000;

/// Top-level configuration for the clientdesk core.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct CoreConfig {
    /// Timer session settings.
    #[serde(default)]
    pub timer: TimerConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Settings for the running-timer elapsed ticker.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TimerConfig {
    /// Milliseconds between elapsed-time recomputations.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
}

impl TimerConfig {
    /// Returns the tick interval as a [`Duration`], never shorter than
    /// one millisecond.
    #[must_use]
    pub const fn tick_interval(&self) -> Duration {
        if self.tick_interval_ms == 0 {
            return Duration::from_millis(1);
        }
        Duration::from_millis(self.tick_interval_ms)
    }
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval_ms(),
        }
    }
}

/// Settings for the `tracing` subscriber.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive string, e.g. `info` or `clientdesk=debug`.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

const fn default_tick_interval_ms() -> u64 {
    DEFAULT_TICK_INTERVAL_MS
}

fn default_log_filter() -> String {
    "info".to_owned()
}

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A source could not be read or deserialized.
    #[error("failed to load configuration: {0}")]
    Load(#[from] ::config::ConfigError),

    /// The timer tick interval is zero.
    #[error("timer.tick_interval_ms must be greater than zero")]
    ZeroTickInterval,
}

impl CoreConfig {
    /// Loads configuration from an optional file plus environment overrides.
    ///
    /// A missing file is not an error; defaults apply.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Load`] when a source is malformed and
    /// [`ConfigError::ZeroTickInterval`] when validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = ::config::Config::builder();
        if let Some(file) = path {
            builder = builder.add_source(::config::File::from(file).required(false));
        }
        let settings = builder
            .add_source(::config::Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?;
        let loaded: Self = settings.try_deserialize()?;
        loaded.validate()
    }

    /// Parses configuration from an in-memory source of the given format.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the text is malformed or invalid.
    pub fn from_text(text: &str, format: ::config::FileFormat) -> Result<Self, ConfigError> {
        let settings = ::config::Config::builder()
            .add_source(::config::File::from_str(text, format))
            .build()?;
        let parsed: Self = settings.try_deserialize()?;
        parsed.validate()
    }

    fn validate(self) -> Result<Self, ConfigError> {
        if self.timer.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroTickInterval);
        }
        Ok(self)
    }
}
