///! Error kinds for the snapshot pipeline
///!
///! Every variant is fatal: the run stops at the first one and no artifact
///! is written.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("usage: satsnap <file> [file...]")]
    Usage,

    #[error("cannot parse {path:?}: could not guess file type")]
    UnrecognizedFormat { path: PathBuf },

    #[error("checksum fail (expected {expected}, computed {computed}) for TLE line: {line}")]
    Checksum {
        expected: u32,
        computed: u32,
        line: String,
    },

    #[error("invalid TLE line: {line}")]
    InvalidLine { line: String },

    #[error("catalog number mismatch: {expected} vs {found}")]
    IdentifierMismatch { expected: String, found: String },

    #[error("invalid {field} {value:?} in line: {line}")]
    InvalidField {
        field: &'static str,
        value: String,
        line: String,
    },

    #[error("no record carries an epoch, cannot choose a reference epoch")]
    EmptyDataset,

    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize snapshot: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SnapshotError>;

impl SnapshotError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
