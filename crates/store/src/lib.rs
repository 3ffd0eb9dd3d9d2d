//! Snapshot storage for Tidewatch.
//!
//! Two layers, both shared behind `Arc` by the producer and the readers:
//!
//! - [`SnapshotStore`]: the in-memory current record, guarded by a
//!   read/write lock whose critical sections are a single copy.
//! - [`DurableMedium`]: the persisted copy readers consult, with an atomic
//!   "overwrite current" / "read current" contract.

pub mod error;
pub mod medium;
pub mod snapshot;

pub use error::{StoreError, StoreResult};
pub use medium::{DurableMedium, FileMedium, MemoryMedium};
pub use snapshot::{Snapshot, SnapshotStore};
