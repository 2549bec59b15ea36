///! Consolidated snapshot emitted after propagation
///!
///! Serializes as a single JSON object: the reserved epoch key first, then
///! one array of entries per catalog set, in insertion order.

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::types::SatelliteId;

/// One output tuple
///
/// `[id, inclination, raan, eccentricity, argument_of_perigee,
///   propagated_mean_anomaly, mean_motion, owner]`
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct SnapshotEntry(
    pub SatelliteId,
    pub f64,
    pub f64,
    pub f64,
    pub f64,
    pub f64,
    pub f64,
    pub String,
);

/// All records propagated to a common reference epoch
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    /// Name of the key holding the reference epoch
    pub epoch_key: String,
    /// Reference epoch, milliseconds since the Unix epoch (UTC)
    pub reference_epoch_ms: i64,
    /// Entries grouped by catalog set
    pub sets: IndexMap<String, Vec<SnapshotEntry>>,
}

impl Snapshot {
    pub fn new(epoch_key: impl Into<String>, reference_epoch_ms: i64) -> Self {
        Self {
            epoch_key: epoch_key.into(),
            reference_epoch_ms,
            sets: IndexMap::new(),
        }
    }

    /// Append an entry to the named catalog set, creating the set if needed
    pub fn push(&mut self, catalog_set: &str, entry: SnapshotEntry) {
        self.sets
            .entry(catalog_set.to_string())
            .or_default()
            .push(entry);
    }

    pub fn total_entries(&self) -> usize {
        self.sets.values().map(Vec::len).sum()
    }
}

impl Serialize for Snapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.sets.len() + 1))?;
        map.serialize_entry(&self.epoch_key, &self.reference_epoch_ms)?;
        for (set, entries) in &self.sets {
            map.serialize_entry(set, entries)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, owner: &str) -> SnapshotEntry {
        SnapshotEntry(id.to_string(), 51.6416, 247.4627, 0.25, 130.536, 180.0, 15.5, owner.to_string())
    }

    #[test]
    fn test_snapshot_serializes_epoch_first() {
        let mut snapshot = Snapshot::new("_epoch", 1_600_000_000_123);
        snapshot.push("stations", entry("25544", "ISS"));
        snapshot.push("weather", entry("33591", "?"));
        snapshot.push("stations", entry("48274", "PRC"));

        let json = serde_json::to_string(&snapshot).unwrap();
        assert_eq!(
            json,
            "{\"_epoch\":1600000000123,\
             \"stations\":[[\"25544\",51.6416,247.4627,0.25,130.536,180.0,15.5,\"ISS\"],\
             [\"48274\",51.6416,247.4627,0.25,130.536,180.0,15.5,\"PRC\"]],\
             \"weather\":[[\"33591\",51.6416,247.4627,0.25,130.536,180.0,15.5,\"?\"]]}"
        );
        assert_eq!(snapshot.total_entries(), 3);
    }

    #[test]
    fn test_empty_snapshot_has_only_epoch() {
        let snapshot = Snapshot::new("_epoch", 0);
        assert_eq!(serde_json::to_string(&snapshot).unwrap(), "{\"_epoch\":0}");
    }
}
