pub mod config;
pub mod error;
pub mod logging;
pub mod module;
pub mod pipeline;

pub use config::SnapshotConfig;
pub use error::{Result, SnapshotError};
