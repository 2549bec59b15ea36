///! In-memory record store
///!
///! One record per catalog number. Element-set merges create records;
///! catalog merges only augment existing ones. A merge carrying an epoch
///! older than the stored one is dropped as a whole.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use satsnap_common::{RecordUpdate, SatelliteId, SatelliteRecord};

/// What a call to [`RecordStore::merge`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// New record created and the update applied
    Created,
    /// Existing record updated
    Updated,
    /// Update epoch older than the stored one; nothing changed
    Stale,
    /// Unknown identifier and creation not allowed; nothing changed
    Skipped,
}

/// Satellite records in first-insertion order
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: IndexMap<SatelliteId, SatelliteRecord>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge `update` into the record for `id`
    pub fn merge(&mut self, id: &str, update: RecordUpdate, create_if_absent: bool) -> MergeOutcome {
        match self.records.get_mut(id) {
            Some(record) => {
                if let (Some(incoming), Some(stored)) = (update.epoch, record.epoch) {
                    if incoming < stored {
                        tracing::debug!("Rejected stale element set for {} ({} < {})", id, incoming, stored);
                        return MergeOutcome::Stale;
                    }
                }
                record.apply(update);
                MergeOutcome::Updated
            }
            None if create_if_absent => {
                let mut record = SatelliteRecord::new(id);
                record.apply(update);
                self.records.insert(id.to_string(), record);
                MergeOutcome::Created
            }
            None => MergeOutcome::Skipped,
        }
    }

    pub fn get(&self, id: &str) -> Option<&SatelliteRecord> {
        self.records.get(id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> impl Iterator<Item = &SatelliteRecord> {
        self.records.values()
    }

    /// Latest epoch across all records, if any record has one
    pub fn latest_epoch(&self) -> Option<DateTime<Utc>> {
        self.records().filter_map(|r| r.epoch).max()
    }
}
