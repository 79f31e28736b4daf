//! Core data structures of the bookmark tree.

use crate::numeral::NumberStyle;
use serde::{Deserialize, Serialize};

/// The root of a bookmark outline.
///
/// The document itself is the synthetic root at depth 0; `bookmarks` are its
/// depth-1 children.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub bookmarks: Vec<Bookmark>,
    /// Page-label ranges known for the document, ordered as they were seen
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub page_labels: Vec<PageLabel>,
}

/// A titled entry pointing at a physical page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    pub title: String,
    pub page: u32,
    #[serde(default)]
    pub collapsed: bool,
    #[serde(default)]
    pub children: Vec<Bookmark>,
}

impl Bookmark {
    pub fn new(title: impl Into<String>, page: u32) -> Self {
        Self {
            title: title.into(),
            page,
            collapsed: false,
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<Bookmark>) -> Self {
        self.children = children;
        self
    }

    pub fn collapsed(mut self, collapsed: bool) -> Self {
        self.collapsed = collapsed;
        self
    }
}

/// A page-label range: from physical page `new_index` on, pages are numbered
/// `num_start`, `num_start + 1`, ... in `num_style`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLabel {
    pub new_index: u32,
    pub num_start: u32,
    pub num_style: NumberStyle,
}

impl PageLabel {
    /// Logical page number of `page` under this label, if the label covers it.
    pub fn logical_page(&self, page: u32) -> Option<u32> {
        let logical = i64::from(page) - i64::from(self.new_index) + i64::from(self.num_start);
        if page < self.new_index || logical < 1 {
            return None;
        }
        u32::try_from(logical).ok()
    }
}

impl Document {
    pub fn new(bookmarks: Vec<Bookmark>) -> Self {
        Self {
            bookmarks,
            page_labels: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bookmarks.is_empty()
    }

    /// Visit every bookmark in document order with its depth (top level is 1).
    pub fn walk<'a>(&'a self, mut visit: impl FnMut(&'a Bookmark, usize)) {
        // Explicit stack in reverse so children pop in their original order.
        let mut stack: Vec<(&Bookmark, usize)> =
            self.bookmarks.iter().rev().map(|b| (b, 1)).collect();
        while let Some((bookmark, depth)) = stack.pop() {
            visit(bookmark, depth);
            stack.extend(bookmark.children.iter().rev().map(|c| (c, depth + 1)));
        }
    }

    /// Total number of bookmarks at every depth.
    pub fn len(&self) -> usize {
        let mut count = 0;
        self.walk(|_, _| count += 1);
        count
    }

    /// Deepest depth in the outline, 0 for an empty document.
    pub fn max_depth(&self) -> usize {
        let mut max = 0;
        self.walk(|_, depth| max = max.max(depth));
        max
    }

    /// Recompute every collapse flag from a global collapse level.
    ///
    /// Level 0 expands everything; level `k > 0` collapses exactly the
    /// bookmarks whose depth is `k` or more.
    pub fn apply_collapse_level(&mut self, collapse_level: usize) {
        let mut stack: Vec<(&mut Bookmark, usize)> =
            self.bookmarks.iter_mut().map(|b| (b, 1)).collect();
        while let Some((bookmark, depth)) = stack.pop() {
            let Bookmark {
                collapsed,
                children,
                ..
            } = bookmark;
            *collapsed = collapse_level != 0 && depth >= collapse_level;
            stack.extend(children.iter_mut().map(|c| (c, depth + 1)));
        }
    }

    /// Smallest depth carrying a collapsed bookmark, 0 if nothing is collapsed.
    pub fn inferred_collapse_level(&self) -> usize {
        let mut level: Option<usize> = None;
        self.walk(|bookmark, depth| {
            if bookmark.collapsed {
                level = Some(level.map_or(depth, |l| l.min(depth)));
            }
        });
        level.unwrap_or(0)
    }

    /// The page label covering `page`: the last one whose `new_index` is not past it.
    pub fn page_label_for(&self, page: u32) -> Option<(usize, &PageLabel)> {
        self.page_labels
            .iter()
            .enumerate()
            .filter(|(_, label)| label.new_index <= page)
            .last()
    }

    /// Check the model invariants every serializer relies on.
    pub fn validate(&self) -> Result<(), String> {
        let mut problem = None;
        self.walk(|bookmark, depth| {
            if problem.is_some() {
                return;
            }
            if bookmark.title.trim().is_empty() {
                problem = Some(format!("bookmark at depth {depth} has an empty title"));
            } else if bookmark.page < 1 {
                problem = Some(format!("bookmark '{}' points at page 0", bookmark.title));
            }
        });
        match problem {
            Some(msg) => Err(msg),
            None => Ok(()),
        }
    }
}
