///! Batch pipeline: ingest every input, then propagate and write once
///!
///! Files are processed strictly in the order given. The first error of any
///! kind aborts the run before the artifact is written.

use indexmap::IndexMap;
use std::path::{Path, PathBuf};

use crate::config::SnapshotConfig;
use crate::error::{Result, SnapshotError};
use crate::module::catalog::{detect_format, parse_catalog, parse_element_sets, FileFormat, RecordStore};
use crate::module::snapshot::{build_snapshot, render_artifact, write_artifact};

/// Summary of one completed run
#[derive(Debug, Clone)]
pub struct IngestReport {
    pub files: usize,
    /// Entries written per catalog set
    pub sets: IndexMap<String, usize>,
    /// Records carrying an owner code
    pub owners: usize,
    /// Reference epoch, milliseconds since the Unix epoch (UTC)
    pub reference_epoch_ms: i64,
    pub output_path: PathBuf,
}

impl IngestReport {
    pub fn total_entries(&self) -> usize {
        self.sets.values().sum()
    }
}

/// Read a whole file as raw lines, each keeping its terminator
pub fn read_lines(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path).map_err(|e| SnapshotError::io(path, e))?;
    Ok(content.split_inclusive('\n').map(str::to_string).collect())
}

/// Catalog set tag for an element set file: its base name without extension
pub fn catalog_set_for(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Detect the format of `path` and merge its contents into `store`
pub fn ingest_file(store: &mut RecordStore, path: &Path) -> Result<FileFormat> {
    let lines = read_lines(path)?;
    let format = detect_format(path, &lines)?;
    println!("{} {} ...", format.label(), path.display());

    match format {
        FileFormat::ElementSet => {
            let catalog_set = catalog_set_for(path);
            let accepted = parse_element_sets(&lines, &catalog_set, store)?;
            tracing::info!("Loaded {} element sets from {:?} into set '{}'", accepted, path, catalog_set);
        }
        FileFormat::Catalog => {
            let attached = parse_catalog(&lines, store);
            tracing::info!("Attached {} owner codes from {:?}", attached, path);
        }
    }

    Ok(format)
}

/// Ingest `paths` in order, then build and write the snapshot
pub fn run(config: &SnapshotConfig, paths: &[PathBuf]) -> Result<IngestReport> {
    if paths.is_empty() {
        return Err(SnapshotError::Usage);
    }

    let mut store = RecordStore::new();
    for path in paths {
        ingest_file(&mut store, path)?;
    }

    let snapshot = build_snapshot(&store, config)?;
    let artifact = render_artifact(&snapshot, &config.variable_name)?;

    println!("writing {} ...", config.output_path.display());
    write_artifact(&config.output_path, &artifact)?;

    Ok(IngestReport {
        files: paths.len(),
        sets: snapshot
            .sets
            .iter()
            .map(|(set, entries)| (set.clone(), entries.len()))
            .collect(),
        owners: store.records().filter(|r| r.owner.is_some()).count(),
        reference_epoch_ms: snapshot.reference_epoch_ms,
        output_path: config.output_path.clone(),
    })
}
