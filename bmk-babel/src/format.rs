//! Format trait definition
//!
//! This module defines the core Format trait that all format implementations must implement.
//! The trait provides a uniform interface for parsing and serializing bookmark outlines.

use crate::error::FormatError;
use crate::ir::nodes::Document;
use std::collections::HashMap;

/// Option key shared by every serializer: recompute collapse flags from this
/// level before emitting.
pub const COLLAPSE_LEVEL_OPTION: &str = "collapse-level";

/// Trait for bookmark formats
///
/// Implementors provide conversion between a textual representation and the
/// bookmark [`Document`]. Formats can support parsing, serialization, or both.
///
/// # Examples
///
/// ```ignore
/// struct MyFormat;
///
/// impl Format for MyFormat {
///     fn name(&self) -> &str {
///         "my-format"
///     }
///
///     fn supports_serialization(&self) -> bool {
///         true
///     }
///
///     fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
///         todo!()
///     }
/// }
/// ```
pub trait Format: Send + Sync {
    /// The name of this format (e.g., "bmk", "pdftk", "json")
    fn name(&self) -> &str;

    /// Optional description of this format
    fn description(&self) -> &str {
        ""
    }

    /// File extensions associated with this format (e.g., ["bmk"], ["pdfmark", "ps"])
    ///
    /// Returns a slice of file extensions without the leading dot.
    /// Used for automatic format detection from filenames.
    fn file_extensions(&self) -> &[&str] {
        &[]
    }

    /// Whether this format supports parsing (source → Document)
    fn supports_parsing(&self) -> bool {
        false
    }

    /// Whether this format supports serialization (Document → source)
    fn supports_serialization(&self) -> bool {
        false
    }

    /// Parse source text into a Document
    ///
    /// Default implementation returns NotSupported error.
    fn parse(&self, _source: &str) -> Result<Document, FormatError> {
        Err(FormatError::NotSupported(format!(
            "Format '{}' does not support parsing",
            self.name()
        )))
    }

    /// Serialize a Document into source text
    ///
    /// Default implementation returns NotSupported error.
    fn serialize(&self, _doc: &Document) -> Result<String, FormatError> {
        Err(FormatError::NotSupported(format!(
            "Format '{}' does not support serialization",
            self.name()
        )))
    }

    /// Serialize a Document, optionally using extra parameters.
    ///
    /// The default implementation understands [`COLLAPSE_LEVEL_OPTION`] and
    /// rejects every other key. Formats with their own knobs override this
    /// and call [`with_collapse_level`] themselves.
    fn serialize_with_options(
        &self,
        doc: &Document,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        if let Some(key) = options.keys().find(|k| *k != COLLAPSE_LEVEL_OPTION) {
            return Err(FormatError::NotSupported(format!(
                "Format '{}' does not support option '{key}'",
                self.name()
            )));
        }
        match collapse_level_option(options)? {
            Some(level) => self.serialize(&with_collapse_level(doc, level)),
            None => self.serialize(doc),
        }
    }
}

/// A copy of `doc` with collapse flags recomputed from `collapse_level`.
pub fn with_collapse_level(doc: &Document, collapse_level: usize) -> Document {
    let mut doc = doc.clone();
    doc.apply_collapse_level(collapse_level);
    doc
}

/// Read the shared collapse-level option, if present.
pub fn collapse_level_option(
    options: &HashMap<String, String>,
) -> Result<Option<usize>, FormatError> {
    options
        .get(COLLAPSE_LEVEL_OPTION)
        .map(|raw| parse_option(COLLAPSE_LEVEL_OPTION, raw))
        .transpose()
}

/// Parse a typed option value, reporting the key on failure.
pub fn parse_option<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T, FormatError> {
    raw.trim().parse().map_err(|_| FormatError::InvalidOption {
        key: key.to_string(),
        value: raw.to_string(),
    })
}
