//! Periodic measurement producer.
//!
//! Each tick generates a record, publishes it to the [`SnapshotStore`] and
//! exports it to the [`DurableMedium`]. Failures are contained to the tick
//! that hit them: a failed generation skips the tick, a failed export is
//! logged and leaves the published snapshot in place. The loop runs until
//! its [`CancellationToken`] is cancelled.

use std::sync::Arc;
use std::time::Duration;

use tidewatch_core::generator::MeasurementGenerator;
use tidewatch_core::record::{MeasurementRecord, ReadingRange};
use tidewatch_store::{DurableMedium, SnapshotStore};
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::config::ProducerConfig;

/// What a single tick accomplished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Published and exported.
    Published(MeasurementRecord),
    /// Published in memory, but the durable export failed.
    ExportFailed(MeasurementRecord),
    /// Generation failed or produced an out-of-range record; nothing published.
    Skipped,
}

/// Background producer owning the update cadence and the export step.
pub struct Producer {
    store: Arc<SnapshotStore>,
    medium: Arc<dyn DurableMedium>,
    generator: Box<dyn MeasurementGenerator>,
    range: ReadingRange,
    interval: Duration,
}

impl Producer {
    pub fn new(
        config: &ProducerConfig,
        store: Arc<SnapshotStore>,
        medium: Arc<dyn DurableMedium>,
        generator: Box<dyn MeasurementGenerator>,
    ) -> Self {
        Self {
            store,
            medium,
            generator,
            range: config.range,
            interval: config.tick_interval,
        }
    }

    /// Run one generate / publish / export cycle.
    pub async fn tick(&self) -> TickOutcome {
        let record = match self
            .generator
            .generate()
            .and_then(|record| record.validate(&self.range).map(|()| record))
        {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(error = %e, "Skipping tick -- no valid measurement");
                return TickOutcome::Skipped;
            }
        };

        self.store.publish(record).await;

        match self.medium.overwrite_current(&record).await {
            Ok(()) => {
                tracing::debug!(water = record.water, wind = record.wind, "Measurement published");
                TickOutcome::Published(record)
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to export measurement; will retry next tick");
                TickOutcome::ExportFailed(record)
            }
        }
    }

    /// Run the producer loop until `cancel` is triggered.
    ///
    /// The first tick fires immediately. A tick that overruns the interval
    /// delays the next one rather than bursting to catch up.
    pub async fn run(self, cancel: CancellationToken) {
        tracing::info!(
            interval_ms = self.interval.as_millis() as u64,
            "Measurement producer started"
        );

        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    tracing::info!("Measurement producer stopping");
                    break;
                }
                _ = ticker.tick() => {
                    self.tick().await;
                }
            }
        }
    }
}
