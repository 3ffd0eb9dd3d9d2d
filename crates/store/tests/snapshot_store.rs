//! Concurrency tests for `SnapshotStore`.
//!
//! Publishes records whose two channels carry the same tick number, so any
//! reader that sees `water != wind` has observed a torn record.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tidewatch_core::record::MeasurementRecord;
use tidewatch_store::SnapshotStore;

const TICKS: i32 = 2_000;
const READERS: usize = 8;

// ---------------------------------------------------------------------------
// Test: readers never observe a torn record under concurrent publishes
// ---------------------------------------------------------------------------

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_readers_never_observe_torn_records() {
    let store = Arc::new(SnapshotStore::new());
    let done = Arc::new(AtomicBool::new(false));

    let readers: Vec<_> = (0..READERS)
        .map(|_| {
            let store = Arc::clone(&store);
            let done = Arc::clone(&done);
            tokio::spawn(async move {
                let mut last_sequence = 0u64;
                let mut observed = 0usize;
                while !done.load(Ordering::Acquire) {
                    if let Some(snapshot) = store.read().await {
                        let record = snapshot.record;
                        assert_eq!(record.water, record.wind, "torn record: {record:?}");
                        assert_eq!(i64::from(record.water), snapshot.sequence as i64);
                        assert!(
                            snapshot.sequence >= last_sequence,
                            "sequence went backwards: {} after {last_sequence}",
                            snapshot.sequence
                        );
                        last_sequence = snapshot.sequence;
                        observed += 1;
                    }
                    tokio::task::yield_now().await;
                }
                observed
            })
        })
        .collect();

    for tick in 1..=TICKS {
        store.publish(MeasurementRecord::new(tick, tick)).await;
        if tick % 64 == 0 {
            tokio::task::yield_now().await;
        }
    }
    done.store(true, Ordering::Release);

    for reader in readers {
        reader.await.expect("reader task panicked");
    }

    let last = store.read().await.expect("store should hold a snapshot");
    assert_eq!(last.record, MeasurementRecord::new(TICKS, TICKS));
    assert_eq!(last.sequence, TICKS as u64);
}

// ---------------------------------------------------------------------------
// Test: a read that starts after publish returns sees that publish
// ---------------------------------------------------------------------------

#[tokio::test]
async fn publish_happens_before_subsequent_read() {
    let store = SnapshotStore::new();

    for tick in 1..=100 {
        store.publish(MeasurementRecord::new(tick, 100 - tick)).await;
        let snapshot = store.read().await.unwrap();
        assert_eq!(snapshot.record, MeasurementRecord::new(tick, 100 - tick));
    }
}
