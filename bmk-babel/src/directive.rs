//! Inline directives and the style context they drive
//!
//! A bmk file can change how the entries that follow it are read with
//! directive lines:
//!
//! ```text
//! !!! num_style = Roman
//! !!! new_index = 3
//! !!! # comments use the same marker
//! ```
//!
//! Every directive updates exactly one field of the [`StyleContext`]. Contexts
//! are values: [`StyleContext::apply`] returns a new snapshot and leaves the
//! current one untouched, so each entry keeps the snapshot it was parsed with.

use crate::error::ParseErrorKind;
use crate::numeral::NumberStyle;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Marker that opens a directive line.
pub const DIRECTIVE_MARKER: &str = "!!!";

/// Default number of spaces per nesting level.
pub const DEFAULT_LEVEL_INDENT: usize = 2;

/// Settings in effect while parsing entry lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleContext {
    pub numbering_style: NumberStyle,
    /// Physical page that the first logical page (`num_start`) maps to
    pub new_index: u32,
    /// Logical page number at `new_index`
    pub num_start: u32,
    /// Depth from which bookmarks are collapsed, 0 expands everything
    pub collapse_level: usize,
    /// Spaces per nesting level
    pub level_indent: usize,
}

impl Default for StyleContext {
    fn default() -> Self {
        Self {
            numbering_style: NumberStyle::Arabic,
            new_index: 1,
            num_start: 1,
            collapse_level: 0,
            level_indent: DEFAULT_LEVEL_INDENT,
        }
    }
}

impl StyleContext {
    /// Return a copy of this context with the directive's field replaced.
    pub fn apply(&self, directive: &Directive) -> StyleContext {
        let mut next = *self;
        match *directive {
            Directive::NumStyle(style) => next.numbering_style = style,
            Directive::NewIndex(index) => next.new_index = index,
            Directive::NumStart(start) => next.num_start = start,
            Directive::CollapseLevel(level) => next.collapse_level = level,
            Directive::LevelIndent(indent) => next.level_indent = indent,
        }
        next
    }

    /// Map a page token written under this context to a physical page.
    ///
    /// Returns the unclamped value so callers can report pages below 1.
    pub fn resolve_page(&self, logical: u32) -> i64 {
        i64::from(self.new_index) + i64::from(logical) - i64::from(self.num_start)
    }
}

/// A single recognized directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    NumStyle(NumberStyle),
    NewIndex(u32),
    NumStart(u32),
    CollapseLevel(usize),
    LevelIndent(usize),
}

impl Directive {
    /// Build a directive from a raw key and value.
    ///
    /// Keys are matched case-insensitively.
    pub fn from_key_value(key: &str, value: &str) -> Result<Directive, ParseErrorKind> {
        let value = value.trim();
        match key.trim().to_ascii_lowercase().as_str() {
            "num_style" => value
                .parse::<NumberStyle>()
                .map(Directive::NumStyle)
                .map_err(|e| ParseErrorKind::InvalidDirectiveValue(e.to_string())),
            "new_index" => parse_count(key, value, 1).map(Directive::NewIndex),
            "num_start" => parse_count(key, value, 1).map(Directive::NumStart),
            "collapse_level" => {
                parse_count(key, value, 0).map(|v| Directive::CollapseLevel(v as usize))
            }
            "level_indent" => parse_count(key, value, 1).map(|v| Directive::LevelIndent(v as usize)),
            _ => Err(ParseErrorKind::UnknownDirective(key.trim().to_string())),
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Directive::NumStyle(_) => "num_style",
            Directive::NewIndex(_) => "new_index",
            Directive::NumStart(_) => "num_start",
            Directive::CollapseLevel(_) => "collapse_level",
            Directive::LevelIndent(_) => "level_indent",
        }
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{DIRECTIVE_MARKER} {} = ", self.key())?;
        match self {
            Directive::NumStyle(style) => write!(f, "{style}"),
            Directive::NewIndex(v) | Directive::NumStart(v) => write!(f, "{v}"),
            Directive::CollapseLevel(v) | Directive::LevelIndent(v) => write!(f, "{v}"),
        }
    }
}

fn parse_count(key: &str, value: &str, min: u32) -> Result<u32, ParseErrorKind> {
    let parsed: u32 = value.parse().map_err(|_| {
        ParseErrorKind::InvalidDirectiveValue(format!(
            "'{}' expects an integer, got '{value}'",
            key.trim()
        ))
    })?;
    if parsed < min {
        return Err(ParseErrorKind::InvalidDirectiveValue(format!(
            "'{}' must be at least {min}, got {parsed}",
            key.trim()
        )));
    }
    Ok(parsed)
}

/// What a directive line contains once the marker is stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectiveLine<'a> {
    Comment(&'a str),
    Assignment { key: &'a str, value: &'a str },
}

/// Recognize a directive line. Returns `None` if the line is not a directive,
/// `Some(Err(..))` if it is one but has no `key = value` shape.
pub fn split_directive(line: &str) -> Option<Result<DirectiveLine<'_>, ParseErrorKind>> {
    let rest = line.trim().strip_prefix(DIRECTIVE_MARKER)?;
    let rest = rest.trim_start();
    if let Some(comment) = rest.strip_prefix('#') {
        return Some(Ok(DirectiveLine::Comment(comment.trim())));
    }
    Some(match rest.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => Ok(DirectiveLine::Assignment {
            key: key.trim(),
            value: value.trim(),
        }),
        _ => Err(ParseErrorKind::InvalidDirectiveValue(format!(
            "expected 'key = value' after '{DIRECTIVE_MARKER}'"
        ))),
    })
}
