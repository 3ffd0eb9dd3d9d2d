use std::str::FromStr;
use std::time::Duration;

use tidewatch_core::classification::{ChannelBands, ClassificationPolicy};
use tidewatch_core::error::CoreError;
use tidewatch_core::labels::Locale;
use tidewatch_producer::ProducerConfig;

/// Where the status reader takes its record from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReadSource {
    /// The durable status file, so the reader also works against an
    /// out-of-process producer.
    #[default]
    File,
    /// The in-memory snapshot store. Requires the embedded producer.
    Memory,
}

impl FromStr for ReadSource {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "file" => Ok(ReadSource::File),
            "memory" => Ok(ReadSource::Memory),
            other => Err(CoreError::Validation(format!(
                "READ_SOURCE must be 'file' or 'memory', got '{other}'"
            ))),
        }
    }
}

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8080`).
    pub port: u16,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// How long to wait for the producer to stop on shutdown (default: `10`).
    pub shutdown_timeout_secs: u64,
    /// Upper bound on a single durable read (default: 2 s).
    pub read_timeout: Duration,
    pub read_source: ReadSource,
    /// Run the producer inside this process (default: `true`).
    pub embedded_producer: bool,
    /// Label language for the status page.
    pub locale: Locale,
    pub policy: ClassificationPolicy,
    pub producer: ProducerConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                      |
    /// |-------------------------|------------------------------|
    /// | `HOST`                  | `0.0.0.0`                    |
    /// | `PORT`                  | `8080`                       |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`                         |
    /// | `SHUTDOWN_TIMEOUT_SECS` | `10`                         |
    /// | `READ_TIMEOUT_MS`       | `2000`                       |
    /// | `READ_SOURCE`           | `file`                       |
    /// | `EMBEDDED_PRODUCER`     | `true`                       |
    /// | `STATUS_LOCALE`         | `en`                         |
    /// | `WATER_BANDS`           | `4:safe,8:alert,*:danger`    |
    /// | `WIND_BANDS`            | `5:safe,15:alert,*:danger`   |
    ///
    /// Producer settings (`TICK_INTERVAL_SECS`, `STATUS_FILE`, `READING_MIN`,
    /// `READING_MAX`) come from [`ProducerConfig::from_env`].
    ///
    /// Panics on invalid values so misconfiguration fails at startup.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "8080".into())
            .parse()
            .expect("PORT must be a valid u16");

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "10".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        let read_timeout_ms: u64 = std::env::var("READ_TIMEOUT_MS")
            .unwrap_or_else(|_| "2000".into())
            .parse()
            .expect("READ_TIMEOUT_MS must be a valid u64");

        let read_source: ReadSource = std::env::var("READ_SOURCE")
            .unwrap_or_else(|_| "file".into())
            .parse()
            .unwrap_or_else(|e| panic!("{e}"));

        let embedded_producer: bool = std::env::var("EMBEDDED_PRODUCER")
            .unwrap_or_else(|_| "true".into())
            .parse()
            .expect("EMBEDDED_PRODUCER must be 'true' or 'false'");

        let locale: Locale = std::env::var("STATUS_LOCALE")
            .unwrap_or_else(|_| "en".into())
            .parse()
            .unwrap_or_else(|e| panic!("STATUS_LOCALE: {e}"));

        let water: ChannelBands = std::env::var("WATER_BANDS")
            .map(|v| v.parse().unwrap_or_else(|e| panic!("WATER_BANDS: {e}")))
            .unwrap_or_else(|_| ChannelBands::water_baseline());

        let wind: ChannelBands = std::env::var("WIND_BANDS")
            .map(|v| v.parse().unwrap_or_else(|e| panic!("WIND_BANDS: {e}")))
            .unwrap_or_else(|_| ChannelBands::wind_baseline());

        let producer = ProducerConfig::from_env();

        assert!(
            embedded_producer || read_source == ReadSource::File,
            "READ_SOURCE=memory requires EMBEDDED_PRODUCER=true"
        );

        Self {
            host,
            port,
            request_timeout_secs,
            shutdown_timeout_secs,
            read_timeout: Duration::from_millis(read_timeout_ms),
            read_source,
            embedded_producer,
            locale,
            policy: ClassificationPolicy { water, wind },
            producer,
        }
    }

    /// Seconds the status page asks the browser to wait before reloading.
    /// Matches the publish cadence, rounded up to a whole second.
    pub fn refresh_secs(&self) -> u64 {
        let interval = self.producer.tick_interval;
        let secs = interval.as_secs() + u64::from(interval.subsec_nanos() > 0);
        secs.max(1)
    }
}
