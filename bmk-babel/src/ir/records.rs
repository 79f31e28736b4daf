//! Defines the flat record representation of an outline.

/// A single bookmark in a flat, pre-order listing.
///
/// This is the shape external outline tools exchange (pdftk's
/// `BookmarkTitle` / `BookmarkLevel` / `BookmarkPageNumber` groups) and the
/// intermediate form the bmk parser produces before the tree is assembled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineRecord {
    /// 1-based nesting level
    pub level: usize,
    pub title: String,
    pub page: u32,
    pub collapsed: bool,
}

impl OutlineRecord {
    pub fn new(level: usize, title: impl Into<String>, page: u32) -> Self {
        Self {
            level,
            title: title.into(),
            page,
            collapsed: false,
        }
    }
}
