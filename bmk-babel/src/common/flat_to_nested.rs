//! Converts a flat record listing back to a nested bookmark tree.
//!
//! # The High-Level Concept
//!
//! A flat outline only says how deep each entry is. Reconstructing the tree
//! means remembering which entries are still "open", i.e. could still receive
//! children. The algorithm keeps those open ancestors on a stack of
//! `(depth, node index)` handles. Nodes live in a flat arena indexed by their
//! position in the listing, so the stack never holds references into the tree
//! being built.
//!
//! # The Algorithm
//!
//! 1. **Closing:** for each record, pop every open node whose depth is greater
//!    than or equal to the record's level. Whatever remains on top is the
//!    parent (or the document root when the stack is empty).
//!
//! 2. **Clamping:** the new node's depth is `parent depth + 1`. A record that
//!    claims to be deeper than that (an over-indented bmk line, a pdftk level
//!    that skips a step) is attached right below its parent instead of
//!    creating phantom intermediate levels. Levels below 1 are treated as 1.
//!
//! 3. **Opening:** record the parent index, push the node as open.
//!
//! 4. **Assembly:** children always come after their parent in the listing,
//!    so walking the arena backwards lets every node be moved into its parent
//!    after all of its own children have been moved into it.
//!
//! Example:
//! ```text
//! level 1  Chapter 1     stack: [C1]
//! level 2  1.1           stack: [C1, 1.1]
//! level 4  1.1.1         clamped to 3, stack: [C1, 1.1, 1.1.1]
//! level 1  Chapter 2     pops three, stack: [C2]
//! ```

use crate::ir::nodes::Bookmark;
use crate::ir::records::OutlineRecord;

/// Converts a pre-order listing of records to the document's top-level bookmarks.
pub fn records_to_tree(records: &[OutlineRecord]) -> Vec<Bookmark> {
    let mut nodes: Vec<Bookmark> = Vec::with_capacity(records.len());
    let mut parents: Vec<Option<usize>> = Vec::with_capacity(records.len());
    let mut open: Vec<(usize, usize)> = Vec::new();

    for record in records {
        while open
            .last()
            .is_some_and(|&(depth, _)| depth >= record.level)
        {
            open.pop();
        }

        let depth = open.last().map_or(1, |&(depth, _)| depth + 1);
        let index = nodes.len();
        nodes.push(Bookmark {
            title: record.title.clone(),
            page: record.page,
            collapsed: record.collapsed,
            children: Vec::new(),
        });
        parents.push(open.last().map(|&(_, parent)| parent));
        open.push((depth, index));
    }

    let mut pending: Vec<Vec<Bookmark>> = vec![Vec::new(); nodes.len()];
    let mut roots = Vec::new();
    while let Some(mut node) = nodes.pop() {
        let index = nodes.len();
        node.children = std::mem::take(&mut pending[index]);
        node.children.reverse();
        match parents[index] {
            Some(parent) => pending[parent].push(node),
            None => roots.push(node),
        }
    }
    roots.reverse();
    roots
}
