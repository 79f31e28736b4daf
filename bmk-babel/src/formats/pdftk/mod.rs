//! pdftk format implementation
//!
//! Reads the bookmark and page-label records of `pdftk dump_data` output and
//! writes records that `pdftk update_info_utf8` accepts. Besides pdftk's own
//! fields the writer adds `BookmarkOpen: Yes|No` so collapse flags survive a
//! round trip; pdftk ignores the extra key.

use crate::error::FormatError;
use crate::format::{
    collapse_level_option, parse_option, with_collapse_level, Format, COLLAPSE_LEVEL_OPTION,
};
use crate::ir::nodes::Document;
use std::collections::HashMap;

pub mod parser;
pub mod serializer;

pub use parser::parse_dump_data;
pub use serializer::serialize_update_info;

/// Format implementation for pdftk bookmark listings
#[derive(Debug, Default)]
pub struct PdftkFormat {
    /// Overrides the imported `BookmarkOpen` flags when set
    collapse_level: Option<usize>,
}

impl PdftkFormat {
    pub fn new(collapse_level: Option<usize>) -> Self {
        Self { collapse_level }
    }
}

impl Format for PdftkFormat {
    fn name(&self) -> &str {
        "pdftk"
    }

    fn description(&self) -> &str {
        "pdftk dump_data / update_info bookmark records"
    }

    fn file_extensions(&self) -> &[&str] {
        &["info"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Document, FormatError> {
        let mut doc = parse_dump_data(source)?;
        if let Some(level) = self.collapse_level {
            doc.apply_collapse_level(level);
        }
        Ok(doc)
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        serialize_update_info(doc, false)
    }

    fn serialize_with_options(
        &self,
        doc: &Document,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        let mut ascii_only = false;
        for (key, value) in options {
            match key.as_str() {
                "ascii" => ascii_only = parse_option(key, value)?,
                COLLAPSE_LEVEL_OPTION => {}
                _ => {
                    return Err(FormatError::NotSupported(format!(
                        "Format 'pdftk' does not support option '{key}'"
                    )))
                }
            }
        }

        match collapse_level_option(options)? {
            Some(level) => serialize_update_info(&with_collapse_level(doc, level), ascii_only),
            None => serialize_update_info(doc, ascii_only),
        }
    }
}
