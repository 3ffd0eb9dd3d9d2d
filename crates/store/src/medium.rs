//! Durable hand-off between the producer and readers.
//!
//! [`DurableMedium`] is the narrow seam: one writer calls
//! [`overwrite_current`](DurableMedium::overwrite_current), any number of
//! readers call [`read_current`](DurableMedium::read_current). Both must be
//! atomic from the caller's point of view: a reader sees the previous record
//! or the new one, never a mix.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Serialize;
use tidewatch_core::record::MeasurementRecord;
use tokio::io::AsyncWriteExt;
use tokio::sync::RwLock;

use crate::error::{StoreError, StoreResult};

/// Indentation used for the on-disk record.
const RECORD_INDENT: &[u8] = b"    ";

/// Persisted copy of the current measurement record.
#[async_trait]
pub trait DurableMedium: Send + Sync {
    /// Atomically replace the persisted record.
    async fn overwrite_current(&self, record: &MeasurementRecord) -> StoreResult<()>;

    /// Read the persisted record.
    async fn read_current(&self) -> StoreResult<MeasurementRecord>;
}

/// Serialize a record as indented JSON.
pub fn encode_record(record: &MeasurementRecord) -> StoreResult<Vec<u8>> {
    let mut buf = Vec::with_capacity(64);
    let formatter = serde_json::ser::PrettyFormatter::with_indent(RECORD_INDENT);
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    record.serialize(&mut ser)?;
    Ok(buf)
}

/// Parse a persisted record. Missing, extra or non-integer fields are errors.
pub fn decode_record(bytes: &[u8]) -> StoreResult<MeasurementRecord> {
    Ok(serde_json::from_slice(bytes)?)
}

// ---------------------------------------------------------------------------
// FileMedium
// ---------------------------------------------------------------------------

/// JSON file on local disk, replaced by write-then-rename.
///
/// The new record is written to a hidden temp file in the same directory,
/// flushed to disk and renamed over the target, so the target path always
/// holds one complete record.
#[derive(Debug, Clone)]
pub struct FileMedium {
    path: PathBuf,
}

impl FileMedium {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sibling temp file; same directory so the rename stays on one filesystem.
    fn temp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("status.json");
        self.path.with_file_name(format!(".{name}.tmp"))
    }

    async fn write_temp(&self, tmp: &Path, bytes: &[u8]) -> std::io::Result<()> {
        let mut file = tokio::fs::File::create(tmp).await?;
        file.write_all(bytes).await?;
        file.sync_all().await
    }
}

#[async_trait]
impl DurableMedium for FileMedium {
    async fn overwrite_current(&self, record: &MeasurementRecord) -> StoreResult<()> {
        let bytes = encode_record(record)?;
        let tmp = self.temp_path();

        if let Err(source) = self.write_temp(&tmp, &bytes).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(StoreError::Io { path: tmp, source });
        }

        if let Err(source) = tokio::fs::rename(&tmp, &self.path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(StoreError::Io {
                path: self.path.clone(),
                source,
            });
        }

        tracing::debug!(path = %self.path.display(), "Durable record overwritten");
        Ok(())
    }

    async fn read_current(&self) -> StoreResult<MeasurementRecord> {
        let bytes = tokio::fs::read(&self.path).await.map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                StoreError::NotFound {
                    path: self.path.clone(),
                }
            } else {
                StoreError::Io {
                    path: self.path.clone(),
                    source,
                }
            }
        })?;
        decode_record(&bytes)
    }
}

// ---------------------------------------------------------------------------
// MemoryMedium
// ---------------------------------------------------------------------------

/// In-process medium for single-process deployments and tests.
#[derive(Debug, Default)]
pub struct MemoryMedium {
    slot: RwLock<Option<MeasurementRecord>>,
}

impl MemoryMedium {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DurableMedium for MemoryMedium {
    async fn overwrite_current(&self, record: &MeasurementRecord) -> StoreResult<()> {
        *self.slot.write().await = Some(*record);
        Ok(())
    }

    async fn read_current(&self) -> StoreResult<MeasurementRecord> {
        (*self.slot.read().await).ok_or(StoreError::Empty)
    }
}
