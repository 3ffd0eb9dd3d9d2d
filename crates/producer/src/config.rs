use std::path::PathBuf;
use std::time::Duration;

use tidewatch_core::error::CoreError;
use tidewatch_core::record::{ReadingRange, DEFAULT_READING_MAX, DEFAULT_READING_MIN};

/// Default seconds between producer ticks.
pub const DEFAULT_TICK_INTERVAL_SECS: u64 = 15;

/// Default location of the durable status record.
pub const DEFAULT_STATUS_FILE: &str = "status.json";

/// Producer configuration, shared by the standalone binary and the API
/// server's embedded producer.
#[derive(Debug, Clone)]
pub struct ProducerConfig {
    /// Time between ticks. Always positive.
    pub tick_interval: Duration,
    /// Path of the durable status record.
    pub status_file: PathBuf,
    /// Legal range for generated readings.
    pub range: ReadingRange,
}

impl ProducerConfig {
    /// Build a config, rejecting a zero tick interval.
    pub fn new(
        tick_interval: Duration,
        status_file: impl Into<PathBuf>,
        range: ReadingRange,
    ) -> Result<Self, CoreError> {
        if tick_interval.is_zero() {
            return Err(CoreError::Validation(
                "tick interval must be a positive duration".into(),
            ));
        }
        Ok(Self {
            tick_interval,
            status_file: status_file.into(),
            range,
        })
    }

    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var              | Default       |
    /// |----------------------|---------------|
    /// | `TICK_INTERVAL_SECS` | `15`          |
    /// | `STATUS_FILE`        | `status.json` |
    /// | `READING_MIN`        | `1`           |
    /// | `READING_MAX`        | `100`         |
    ///
    /// Panics on invalid values so misconfiguration fails at startup.
    pub fn from_env() -> Self {
        let tick_interval_secs: u64 = std::env::var("TICK_INTERVAL_SECS")
            .unwrap_or_else(|_| DEFAULT_TICK_INTERVAL_SECS.to_string())
            .parse()
            .expect("TICK_INTERVAL_SECS must be a valid u64");

        let status_file =
            std::env::var("STATUS_FILE").unwrap_or_else(|_| DEFAULT_STATUS_FILE.into());

        let min: i32 = std::env::var("READING_MIN")
            .unwrap_or_else(|_| DEFAULT_READING_MIN.to_string())
            .parse()
            .expect("READING_MIN must be a valid i32");

        let max: i32 = std::env::var("READING_MAX")
            .unwrap_or_else(|_| DEFAULT_READING_MAX.to_string())
            .parse()
            .expect("READING_MAX must be a valid i32");

        let range = ReadingRange::new(min, max).expect("READING_MIN must not exceed READING_MAX");

        Self::new(Duration::from_secs(tick_interval_secs), status_file, range)
            .expect("TICK_INTERVAL_SECS must be greater than zero")
    }
}
