//! JSON format implementation
//!
//! Serializes the bookmark [`Document`] as-is with serde:
//!
//! ```json
//! {
//!   "bookmarks": [
//!     { "title": "Chapter 1", "page": 4, "collapsed": false, "children": [] }
//!   ]
//! }
//! ```
//!
//! `page_labels` appears only when the document has any. Parsing checks the
//! same invariants the other readers guarantee (pages ≥ 1).

use crate::error::FormatError;
use crate::format::Format;
use crate::ir::nodes::Document;

/// Format implementation for JSON interchange
#[derive(Debug, Default)]
pub struct JsonFormat;

impl Format for JsonFormat {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "Bookmark tree as JSON"
    }

    fn file_extensions(&self) -> &[&str] {
        &["json"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Document, FormatError> {
        let doc: Document = serde_json::from_str(source)
            .map_err(|e| FormatError::ParseError(format!("invalid JSON outline: {e}")))?;
        doc.validate().map_err(FormatError::InconsistentTree)?;
        Ok(doc)
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        let mut out = serde_json::to_string_pretty(doc)
            .map_err(|e| FormatError::SerializationError(e.to_string()))?;
        out.push('\n');
        Ok(out)
    }
}
