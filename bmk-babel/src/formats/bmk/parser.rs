//! bmk text parser
//!
//! Parsing happens in two passes:
//!
//! 1. [`tokenize`] classifies every line on its own: blank, comment, directive
//!    or entry. Entries are split into indentation, title and raw page token;
//!    nothing is resolved yet because resolution depends on directives seen
//!    earlier in the file.
//! 2. [`parse_bmk`] walks the tokens in order while carrying the current
//!    [`StyleContext`]. Directives produce a new context, entries are resolved
//!    against the context in effect at their line into flat
//!    [`OutlineRecord`]s, and the records are assembled into a tree by
//!    [`records_to_tree`].
//!
//! The collapse level is applied once, after the tree is built.

use crate::common::flat_to_nested::records_to_tree;
use crate::directive::{split_directive, Directive, DirectiveLine, StyleContext};
use crate::error::{ParseError, ParseErrorKind};
use crate::ir::nodes::{Document, PageLabel};
use crate::ir::records::OutlineRecord;
use crate::numeral::{self, NumberStyle};
use serde::{Deserialize, Serialize};

use super::formatting_rules::MIN_SEPARATOR_DOTS;

/// What to do with a line that cannot be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorPolicy {
    /// Stop and return the error, no partial tree
    #[serde(rename = "abort")]
    Abort,
    /// Drop the line, log it and report it as a warning
    #[serde(rename = "warn", alias = "skip")]
    SkipAndWarn,
}

/// Caller-supplied knobs for [`parse_bmk`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Policy for malformed entries and unusable page numbers
    pub entry_errors: ErrorPolicy,
    /// Policy for unknown directives and bad directive values
    pub directive_errors: ErrorPolicy,
    /// Global collapse level; `None` uses the last `collapse_level` directive
    pub collapse_level: Option<usize>,
    /// Context in effect before the first line
    pub initial_context: StyleContext,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            entry_errors: ErrorPolicy::Abort,
            directive_errors: ErrorPolicy::SkipAndWarn,
            collapse_level: None,
            initial_context: StyleContext::default(),
        }
    }
}

/// A successfully parsed bmk file.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseOutcome {
    pub document: Document,
    /// Lines skipped under [`ErrorPolicy::SkipAndWarn`]
    pub warnings: Vec<ParseError>,
    /// Context after the last line
    pub final_context: StyleContext,
}

/// Classification of a single bmk line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineEvent<'a> {
    Blank,
    Comment(&'a str),
    Directive {
        key: &'a str,
        value: &'a str,
    },
    Entry {
        /// Leading space count
        indent: usize,
        title: &'a str,
        page: &'a str,
    },
}

/// A tokenized line with its position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line<'a> {
    /// 1-based line number
    pub number: usize,
    pub text: &'a str,
    pub event: Result<LineEvent<'a>, ParseErrorKind>,
}

/// Classify every line of `source`.
pub fn tokenize(source: &str) -> Vec<Line<'_>> {
    source
        .lines()
        .enumerate()
        .map(|(i, text)| Line {
            number: i + 1,
            text,
            event: classify(text),
        })
        .collect()
}

fn classify(text: &str) -> Result<LineEvent<'_>, ParseErrorKind> {
    if text.trim().is_empty() {
        return Ok(LineEvent::Blank);
    }
    if let Some(directive) = split_directive(text) {
        return directive.map(|d| match d {
            DirectiveLine::Comment(comment) => LineEvent::Comment(comment),
            DirectiveLine::Assignment { key, value } => LineEvent::Directive { key, value },
        });
    }
    split_entry(text)
}

/// Split `<spaces><title><4+ dots><page>` into its parts.
fn split_entry(text: &str) -> Result<LineEvent<'_>, ParseErrorKind> {
    let indent = text.len() - text.trim_start_matches(' ').len();
    let body = &text[indent..];

    let separator = ".".repeat(MIN_SEPARATOR_DOTS);
    let start = body.find(&separator).ok_or(ParseErrorKind::MalformedEntry)?;
    let end = start + body[start..].len() - body[start..].trim_start_matches('.').len();

    let title = body[..start].trim();
    let page = body[end..].trim();
    if title.is_empty() || page.is_empty() {
        return Err(ParseErrorKind::MalformedEntry);
    }

    Ok(LineEvent::Entry {
        indent,
        title,
        page,
    })
}

/// Parse bmk text into a bookmark document.
pub fn parse_bmk(source: &str, options: &ParseOptions) -> Result<ParseOutcome, ParseError> {
    let mut context = options.initial_context;
    let mut records = Vec::new();
    let mut page_labels: Vec<PageLabel> = Vec::new();
    let mut warnings = Vec::new();

    for line in tokenize(source) {
        let outcome = match line.event {
            Ok(LineEvent::Blank) | Ok(LineEvent::Comment(_)) => Ok(()),
            Ok(LineEvent::Directive { key, value }) => {
                Directive::from_key_value(key, value).map(|directive| {
                    context = context.apply(&directive);
                })
            }
            Ok(LineEvent::Entry {
                indent,
                title,
                page,
            }) => resolve_entry(&context, indent, title, page).map(|record| {
                record_page_label(&mut page_labels, &context);
                records.push(record);
            }),
            Err(kind) => Err(kind),
        };

        if let Err(kind) = outcome {
            let policy = if kind.is_directive_error() {
                options.directive_errors
            } else {
                options.entry_errors
            };
            let err = ParseError::new(line.number, line.text, kind);
            match policy {
                ErrorPolicy::Abort => return Err(err),
                ErrorPolicy::SkipAndWarn => {
                    log::warn!("skipping {err}");
                    warnings.push(err);
                }
            }
        }
    }

    let mut document = Document {
        bookmarks: records_to_tree(&records),
        page_labels,
    };
    let collapse_level = options.collapse_level.unwrap_or(context.collapse_level);
    document.apply_collapse_level(collapse_level);

    log::debug!(
        "parsed {} bookmarks ({} skipped lines, collapse level {collapse_level})",
        records.len(),
        warnings.len()
    );

    Ok(ParseOutcome {
        document,
        warnings,
        final_context: context,
    })
}

fn resolve_entry(
    context: &StyleContext,
    indent: usize,
    title: &str,
    page: &str,
) -> Result<OutlineRecord, ParseErrorKind> {
    let logical = numeral::parse(page, context.numbering_style)
        .map_err(|e| ParseErrorKind::InvalidInput(e.to_string()))?;
    let physical = context.resolve_page(logical);
    let physical = u32::try_from(physical)
        .ok()
        .filter(|p| *p >= 1)
        .ok_or(ParseErrorKind::PageOutOfRange(physical))?;

    let level = indent / context.level_indent.max(1) + 1;
    Ok(OutlineRecord::new(level, title, physical))
}

/// Remember the numbering in effect for an entry as a page label.
///
/// Files that never leave plain 1-based Arabic numbering get no labels.
fn record_page_label(labels: &mut Vec<PageLabel>, context: &StyleContext) {
    let label = PageLabel {
        new_index: context.new_index,
        num_start: context.num_start,
        num_style: context.numbering_style,
    };
    let is_default = label.new_index == 1
        && label.num_start == 1
        && label.num_style == NumberStyle::Arabic;

    if let Some(last) = labels.last_mut() {
        if *last == label {
            return;
        }
        if last.new_index == label.new_index {
            *last = label;
            return;
        }
    } else if is_default {
        return;
    }
    labels.push(label);
}
