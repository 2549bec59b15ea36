///! Shared data model for the snapshot builder
///!
///! Record types consumed by the parsers and the serializable snapshot
///! emitted at the end of a run. Nothing in here performs I/O.

pub mod types;
pub mod snapshot;

pub use types::{RecordUpdate, SatelliteId, SatelliteRecord};
pub use snapshot::{Snapshot, SnapshotEntry};
