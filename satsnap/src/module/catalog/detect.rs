///! Input format detection

use std::path::Path;

use super::columns::width;
use crate::error::{Result, SnapshotError};

/// Width of one element set data line
pub const ELEMENT_LINE_WIDTH: usize = 69;

/// Width of one satellite catalog row, line terminator included
pub const CATALOG_LINE_WIDTH: usize = 134;

/// Supported input layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// Name line followed by two fixed-width data lines, repeated
    ElementSet,
    /// Fixed-width satellite catalog rows
    Catalog,
}

impl FileFormat {
    /// Short label used in progress output
    pub fn label(&self) -> &'static str {
        match self {
            FileFormat::ElementSet => "TLE",
            FileFormat::Catalog => "SATCAT",
        }
    }
}

impl std::fmt::Display for FileFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// More than half of the non-empty stripped lines are data-line wide
fn is_element_set(lines: &[String]) -> bool {
    let mut total = 0;
    let mut data_lines = 0;
    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        total += 1;
        if width(line) == ELEMENT_LINE_WIDTH {
            data_lines += 1;
        }
    }
    data_lines * 2 > total
}

/// First and last raw lines are both catalog-row wide
fn is_catalog(lines: &[String]) -> bool {
    match (lines.first(), lines.last()) {
        (Some(first), Some(last)) => {
            width(first) == CATALOG_LINE_WIDTH && width(last) == CATALOG_LINE_WIDTH
        }
        _ => false,
    }
}

/// Classify the raw lines read from `path`
pub fn detect_format(path: &Path, lines: &[String]) -> Result<FileFormat> {
    if is_element_set(lines) {
        Ok(FileFormat::ElementSet)
    } else if is_catalog(lines) {
        Ok(FileFormat::Catalog)
    } else {
        Err(SnapshotError::UnrecognizedFormat {
            path: path.to_path_buf(),
        })
    }
}
