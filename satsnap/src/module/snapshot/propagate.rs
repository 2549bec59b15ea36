///! Mean anomaly propagation
///!
///! Mean anomaly advances at the constant mean motion of each element set.
///! No drag or other perturbation is modelled.

use chrono::{DateTime, Utc};

use crate::error::{Result, SnapshotError};
use crate::module::catalog::RecordStore;

const MICROS_PER_DAY: f64 = 86_400_000_000.0;

/// Latest epoch among all stored records
pub fn reference_epoch(store: &RecordStore) -> Result<DateTime<Utc>> {
    store.latest_epoch().ok_or(SnapshotError::EmptyDataset)
}

/// Fractional days from `from` to `to`
pub fn elapsed_days(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    let delta = to - from;
    match delta.num_microseconds() {
        Some(micros) => micros as f64 / MICROS_PER_DAY,
        None => delta.num_milliseconds() as f64 * 1000.0 / MICROS_PER_DAY,
    }
}

/// Mean anomaly in degrees after `elapsed_days`, normalized to [0, 360)
pub fn propagate_mean_anomaly(mean_anomaly: f64, mean_motion: f64, elapsed_days: f64) -> f64 {
    let m = (mean_anomaly + 360.0 * elapsed_days * mean_motion).rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if m >= 360.0 { 0.0 } else { m }
}
