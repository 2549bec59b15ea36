///! Snapshot module
///!
///! Propagates every stored record to the latest epoch in the store and
///! renders the result as a single variable assignment.

mod propagate;
pub use propagate::{elapsed_days, propagate_mean_anomaly, reference_epoch};

mod writer;
pub use writer::{build_snapshot, render_artifact, write_artifact};
