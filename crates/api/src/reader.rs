//! Status reader: one durable read plus classification per request.
//!
//! Reads fail closed. A missing, unreadable, malformed, out-of-range or
//! slow record surfaces as a [`ReadError`]; the reader never falls back to a
//! stale or default value.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tidewatch_core::classification::{Classification, ClassificationPolicy};
use tidewatch_core::error::CoreError;
use tidewatch_core::record::{MeasurementRecord, ReadingRange};
use tidewatch_store::{DurableMedium, SnapshotStore, StoreError};

use crate::config::{ReadSource, ServerConfig};

#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    #[error("durable read failed: {0}")]
    Medium(#[from] StoreError),

    #[error("durable record rejected: {0}")]
    OutOfRange(#[source] CoreError),

    #[error("durable read timed out after {0:?}")]
    Timeout(Duration),

    #[error("no snapshot has been published yet")]
    NoSnapshot,
}

/// A record together with its per-channel classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusReport {
    pub record: MeasurementRecord,
    pub classification: Classification,
}

pub struct StatusReader {
    source: ReadSource,
    medium: Arc<dyn DurableMedium>,
    store: Arc<SnapshotStore>,
    policy: ClassificationPolicy,
    range: ReadingRange,
    timeout: Duration,
}

impl StatusReader {
    pub fn new(
        config: &ServerConfig,
        store: Arc<SnapshotStore>,
        medium: Arc<dyn DurableMedium>,
    ) -> Self {
        Self {
            source: config.read_source,
            medium,
            store,
            policy: config.policy.clone(),
            range: config.producer.range,
            timeout: config.read_timeout,
        }
    }

    /// Read the current record and classify it.
    pub async fn read_status(&self) -> Result<StatusReport, ReadError> {
        let record = self.read_record().await?;
        record.validate(&self.range).map_err(ReadError::OutOfRange)?;

        Ok(StatusReport {
            record,
            classification: self.policy.classify(&record),
        })
    }

    async fn read_record(&self) -> Result<MeasurementRecord, ReadError> {
        match self.source {
            ReadSource::File => {
                match tokio::time::timeout(self.timeout, self.medium.read_current()).await {
                    Ok(result) => Ok(result?),
                    Err(_) => Err(ReadError::Timeout(self.timeout)),
                }
            }
            ReadSource::Memory => self
                .store
                .read()
                .await
                .map(|snapshot| snapshot.record)
                .ok_or(ReadError::NoSnapshot),
        }
    }
}
