use crate::directive::DEFAULT_LEVEL_INDENT;
use serde::{Deserialize, Serialize};

/// Minimum run of dots that separates a title from its page.
pub const MIN_SEPARATOR_DOTS: usize = 4;

/// Upper bounds accepted for the indentation and separator widths.
pub const MAX_LEVEL_INDENT: usize = 64;
pub const MAX_SEPARATOR_DOTS: usize = 256;

/// Configuration for the bmk serializer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BmkFormattingRules {
    /// Spaces per nesting level
    pub level_indent: usize,

    /// Number of dots between a title and its page (at least 4)
    pub separator_dots: usize,

    /// Whether to write directives (page labels, collapse level, indentation)
    /// and render pages in their labelled style
    pub directives: bool,
}

impl Default for BmkFormattingRules {
    fn default() -> Self {
        Self {
            level_indent: DEFAULT_LEVEL_INDENT,
            separator_dots: 16,
            directives: false,
        }
    }
}
