///! Satellite catalog parser
///!
///! Catalog rows only contribute the owner code. Rows whose catalog number
///! has no element set in the store are dropped.

use satsnap_common::RecordUpdate;

use super::columns::column;
use super::store::{MergeOutcome, RecordStore};

/// Attach owner codes from catalog rows, returning how many records were updated
pub fn parse_catalog(lines: &[String], store: &mut RecordStore) -> usize {
    let mut attached = 0;

    for line in lines {
        let id = column(line, 13, 18).trim();
        let owner = column(line, 49, 56).trim();

        match store.merge(id, RecordUpdate::owner(owner), false) {
            MergeOutcome::Skipped => tracing::trace!("No element set for catalog row {:?}", id),
            _ => attached += 1,
        }
    }

    attached
}
