//! Quiet output format
//!
//! Serializes every document to the empty string. Selecting it lets a caller
//! run an import for its side effects (validation, handing the tree to an
//! external tool) without printing anything.

use crate::error::FormatError;
use crate::format::Format;
use crate::ir::nodes::Document;

pub struct NoneFormat;

impl Format for NoneFormat {
    fn name(&self) -> &str {
        "none"
    }

    fn description(&self) -> &str {
        "No output"
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize(&self, _doc: &Document) -> Result<String, FormatError> {
        Ok(String::new())
    }
}
