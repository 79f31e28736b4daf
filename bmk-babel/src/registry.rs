//! Lookup table from format names to [`Format`] implementations.
//!
//! The CLI picks readers and writers by name (`--from`, `--to`) or by the
//! extension of the input and output paths; both go through [`FormatRegistry`].

use crate::error::FormatError;
use crate::format::Format;
use crate::formats::{BmkFormat, JsonFormat, NoneFormat, PdfmarkFormat, PdftkFormat};
use crate::ir::nodes::Document;
use std::collections::HashMap;
use std::path::Path;

/// Bookmark formats keyed by name.
///
/// [`FormatRegistry::with_defaults`] knows bmk, json, none, pdfmark and
/// pdftk. Registering a format under an existing name replaces it, which is
/// how a configured [`BmkFormat`] takes over from the default one.
pub struct FormatRegistry {
    formats: HashMap<String, Box<dyn Format>>,
}

impl FormatRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        FormatRegistry {
            formats: HashMap::new(),
        }
    }

    pub fn register<F: Format + 'static>(&mut self, format: F) {
        self.formats
            .insert(format.name().to_string(), Box::new(format));
    }

    pub fn get(&self, name: &str) -> Result<&dyn Format, FormatError> {
        self.formats
            .get(name)
            .map(|f| f.as_ref())
            .ok_or_else(|| FormatError::FormatNotFound(name.to_string()))
    }

    pub fn has(&self, name: &str) -> bool {
        self.formats.contains_key(name)
    }

    /// Registered format names, sorted.
    pub fn list_formats(&self) -> Vec<String> {
        let mut names: Vec<_> = self.formats.keys().cloned().collect();
        names.sort();
        names
    }

    /// Format whose extensions match `filename`, e.g. `toc.bmk` or `dump.info`.
    ///
    /// Extensions compare case-insensitively. When two formats claim the same
    /// extension the one with the smaller name wins.
    pub fn detect_format_from_filename(&self, filename: &str) -> Option<String> {
        let extension = Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())?
            .to_ascii_lowercase();

        self.list_formats().into_iter().find(|name| {
            self.formats[name]
                .file_extensions()
                .contains(&extension.as_str())
        })
    }

    /// Read an outline with the named format.
    pub fn parse(&self, source: &str, format: &str) -> Result<Document, FormatError> {
        let reader = self.get(format)?;
        if !reader.supports_parsing() {
            return Err(FormatError::NotSupported(format!(
                "Format '{format}' does not support parsing"
            )));
        }
        reader.parse(source)
    }

    /// Write an outline with the named format and its default options.
    pub fn serialize(&self, doc: &Document, format: &str) -> Result<String, FormatError> {
        self.writer(format)?.serialize(doc)
    }

    /// Write an outline with per-call options such as `collapse-level`.
    pub fn serialize_with_options(
        &self,
        doc: &Document,
        format: &str,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        self.writer(format)?.serialize_with_options(doc, options)
    }

    fn writer(&self, format: &str) -> Result<&dyn Format, FormatError> {
        let writer = self.get(format)?;
        if !writer.supports_serialization() {
            return Err(FormatError::NotSupported(format!(
                "Format '{format}' does not support serialization"
            )));
        }
        Ok(writer)
    }

    /// Registry holding every built-in format with its default settings.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(BmkFormat::default());
        registry.register(JsonFormat);
        registry.register(NoneFormat);
        registry.register(PdfmarkFormat);
        registry.register(PdftkFormat::default());
        registry
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
