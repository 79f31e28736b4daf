//! Converts a nested bookmark tree into a flat record listing.
//!
//! Traversing the tree in pre-order and tagging every bookmark with its depth
//! gives exactly the listing `flat_to_nested` consumes, so the two functions
//! round-trip: `records_to_tree(&tree_to_records(&doc)) == doc.bookmarks`.

use crate::ir::nodes::Document;
use crate::ir::records::OutlineRecord;

/// Converts a document to a pre-order vector of records with 1-based levels.
pub fn tree_to_records(doc: &Document) -> Vec<OutlineRecord> {
    let mut records = Vec::with_capacity(doc.len());
    doc.walk(|bookmark, depth| {
        records.push(OutlineRecord {
            level: depth,
            title: bookmark.title.clone(),
            page: bookmark.page,
            collapsed: bookmark.collapsed,
        });
    });
    records
}
