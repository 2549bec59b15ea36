///! Snapshot assembly and artifact output

use std::path::Path;

use satsnap_common::{SatelliteRecord, Snapshot, SnapshotEntry};

use super::propagate::{elapsed_days, propagate_mean_anomaly, reference_epoch};
use crate::config::SnapshotConfig;
use crate::error::{Result, SnapshotError};
use crate::module::catalog::RecordStore;

fn compact(value: &str) -> String {
    value.chars().filter(|c| !c.is_whitespace()).collect()
}

fn entry_for(record: &SatelliteRecord, elapsed: f64, unknown_owner: &str) -> SnapshotEntry {
    let owner = match record.owner.as_deref().map(compact) {
        Some(owner) if !owner.is_empty() => owner,
        _ => unknown_owner.to_string(),
    };
    SnapshotEntry(
        compact(&record.id),
        record.inclination,
        record.raan,
        record.eccentricity,
        record.argument_of_perigee,
        propagate_mean_anomaly(record.mean_anomaly, record.mean_motion, elapsed),
        record.mean_motion,
        owner,
    )
}

/// Propagate every record to the reference epoch and group by catalog set
pub fn build_snapshot(store: &RecordStore, config: &SnapshotConfig) -> Result<Snapshot> {
    let reference = reference_epoch(store)?;
    let mut snapshot = Snapshot::new(config.epoch_key.as_str(), reference.timestamp_millis());

    for record in store.records() {
        let Some(epoch) = record.epoch else {
            tracing::warn!("Skipping {}: no epoch to propagate from", record.id);
            continue;
        };
        let elapsed = elapsed_days(epoch, reference);
        snapshot.push(&compact(&record.catalog_set), entry_for(record, elapsed, &config.unknown_owner));
    }

    Ok(snapshot)
}

/// `var <name>=<compact json>;` followed by a newline
pub fn render_artifact(snapshot: &Snapshot, variable_name: &str) -> Result<String> {
    let json = serde_json::to_string(snapshot)?;
    Ok(format!("var {}={};\n", variable_name, json))
}

pub fn write_artifact(path: &Path, contents: &str) -> Result<()> {
    std::fs::write(path, contents).map_err(|e| SnapshotError::io(path, e))
}
