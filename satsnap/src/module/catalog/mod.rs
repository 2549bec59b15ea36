///! Catalog ingestion module
///!
///! Reads the two supported input layouts and folds them into one
///! [`RecordStore`].
///!
///! ## Main Components
///! - `RecordStore`: satellite records keyed by catalog number, with the merge policy
///! - `detect_format`: classifies a file as element sets or satellite catalog
///! - `parse_element_sets`: fixed-column element set parser with checksum validation
///! - `parse_catalog`: attaches owner codes from satellite catalog rows

mod columns;
pub use columns::{column, width};

mod store;
pub use store::{MergeOutcome, RecordStore};

mod detect;
pub use detect::{detect_format, FileFormat, CATALOG_LINE_WIDTH, ELEMENT_LINE_WIDTH};

mod tle;
pub use tle::{checksum, epoch_year, parse_element_sets, LineType};

mod satcat;
pub use satcat::parse_catalog;
