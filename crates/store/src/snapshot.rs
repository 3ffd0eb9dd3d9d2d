use chrono::Utc;
use tidewatch_core::record::MeasurementRecord;
use tidewatch_core::types::Timestamp;
use tokio::sync::RwLock;

/// The currently visible record plus its recency marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot {
    pub record: MeasurementRecord,
    /// When the record was published.
    pub published_at: Timestamp,
    /// 1 for the first publish, incremented by one on each later publish.
    pub sequence: u64,
}

/// Holds the single current [`Snapshot`].
///
/// Thread-safe via interior `RwLock`; designed to be wrapped in `Arc` and
/// shared between the producer and any number of readers. Both critical
/// sections are a plain copy, so a reader waits at most for one publish.
#[derive(Debug, Default)]
pub struct SnapshotStore {
    current: RwLock<Option<Snapshot>>,
}

impl SnapshotStore {
    /// Create an empty store. Reads return `None` until the first publish.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current snapshot with `record`.
    ///
    /// Every [`read`](Self::read) that starts after this returns observes
    /// this record or a later one.
    pub async fn publish(&self, record: MeasurementRecord) {
        let mut current = self.current.write().await;
        let sequence = current.as_ref().map_or(1, |s| s.sequence + 1);
        *current = Some(Snapshot {
            record,
            published_at: Utc::now(),
            sequence,
        });
    }

    /// Copy of the current snapshot, or `None` before the first publish.
    pub async fn read(&self) -> Option<Snapshot> {
        *self.current.read().await
    }

    /// Time of the last publish, if any.
    pub async fn last_published_at(&self) -> Option<Timestamp> {
        self.read().await.map(|s| s.published_at)
    }
}
