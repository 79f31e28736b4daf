//! bmk format implementation
//!
//! The bmk format is a plain-text outline, one bookmark per line:
//!
//! ```text
//! !!! num_style = Roman
//! Preface................i
//!
//! !!! new_index = 7
//! !!! num_style = Arabic
//! Chapter 1................1
//!   1.1 Getting started................3
//! ```
//!
//! Indentation gives the nesting, a run of at least four dots separates the
//! title from the page, and `!!!` directives change how page numbers are read.
//! See [`parser`] and [`crate::directive`] for the details.

use crate::error::FormatError;
use crate::format::{collapse_level_option, parse_option, Format, COLLAPSE_LEVEL_OPTION};
use crate::ir::nodes::Document;
use std::collections::HashMap;

pub mod formatting_rules;
pub mod parser;
pub mod serializer;

use formatting_rules::BmkFormattingRules;
use parser::{parse_bmk, ParseOptions};
use serializer::BmkSerializer;

/// Format implementation for bmk text
///
/// Parsing uses the configured [`ParseOptions`]; skipped lines are logged as
/// warnings. Serialization uses [`BmkFormattingRules`], which can be adjusted
/// per call through the `level-indent`, `separator-dots` and `directives`
/// options.
#[derive(Default)]
pub struct BmkFormat {
    rules: BmkFormattingRules,
    parse_options: ParseOptions,
}

impl BmkFormat {
    pub fn new(rules: BmkFormattingRules, parse_options: ParseOptions) -> Self {
        Self {
            rules,
            parse_options,
        }
    }
}

impl Format for BmkFormat {
    fn name(&self) -> &str {
        "bmk"
    }

    fn description(&self) -> &str {
        "Indented bookmark outline with inline directives"
    }

    fn file_extensions(&self) -> &[&str] {
        &["bmk"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Document, FormatError> {
        Ok(parse_bmk(source, &self.parse_options)?.document)
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        BmkSerializer::new(self.rules.clone()).serialize(doc)
    }

    fn serialize_with_options(
        &self,
        doc: &Document,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        let mut rules = self.rules.clone();
        for (key, value) in options {
            match key.as_str() {
                "level-indent" => rules.level_indent = parse_option(key, value)?,
                "separator-dots" => rules.separator_dots = parse_option(key, value)?,
                "directives" => rules.directives = parse_option(key, value)?,
                COLLAPSE_LEVEL_OPTION => {}
                _ => {
                    return Err(FormatError::NotSupported(format!(
                        "Format 'bmk' does not support option '{key}'"
                    )))
                }
            }
        }

        let collapse_level = collapse_level_option(options)?;
        let serializer = BmkSerializer::new(rules).with_collapse_level(collapse_level);
        match collapse_level {
            Some(level) => serializer.serialize(&crate::format::with_collapse_level(doc, level)),
            None => serializer.serialize(doc),
        }
    }
}
