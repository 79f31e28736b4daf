//! Error types for parsing and format operations

use std::fmt;

/// Errors that can occur during format operations
#[derive(Debug, Clone, PartialEq)]
pub enum FormatError {
    /// Format not found in registry
    FormatNotFound(String),
    /// Error while parsing bmk text, carrying the offending line
    Parse(ParseError),
    /// Error while parsing a foreign format (pdftk listing, json)
    ParseError(String),
    /// Error during serialization
    SerializationError(String),
    /// Format does not support the requested operation
    NotSupported(String),
    /// A serialization option had a value the format cannot use
    InvalidOption { key: String, value: String },
    /// A serializer was handed a tree that breaks the model invariants
    InconsistentTree(String),
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::FormatNotFound(name) => write!(f, "Format '{name}' not found"),
            FormatError::Parse(err) => write!(f, "Parse error: {err}"),
            FormatError::ParseError(msg) => write!(f, "Parse error: {msg}"),
            FormatError::SerializationError(msg) => write!(f, "Serialization error: {msg}"),
            FormatError::NotSupported(msg) => write!(f, "Operation not supported: {msg}"),
            FormatError::InvalidOption { key, value } => {
                write!(f, "Invalid value '{value}' for option '{key}'")
            }
            FormatError::InconsistentTree(msg) => write!(f, "Inconsistent bookmark tree: {msg}"),
        }
    }
}

impl std::error::Error for FormatError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FormatError::Parse(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ParseError> for FormatError {
    fn from(err: ParseError) -> Self {
        FormatError::Parse(err)
    }
}

/// The reason a line of bmk text was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Entry line without a run of at least four dots, or with an empty title or page
    MalformedEntry,
    /// Directive with a value that cannot be parsed for its key
    InvalidDirectiveValue(String),
    /// Directive naming a key that is not a style field
    UnknownDirective(String),
    /// Page token that is not a valid numeral in the active style
    InvalidInput(String),
    /// Page that resolves below 1 after index remapping
    PageOutOfRange(i64),
}

impl ParseErrorKind {
    /// Whether this error comes from a directive line (as opposed to an entry line).
    pub fn is_directive_error(&self) -> bool {
        matches!(
            self,
            ParseErrorKind::InvalidDirectiveValue(_) | ParseErrorKind::UnknownDirective(_)
        )
    }
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseErrorKind::MalformedEntry => write!(
                f,
                "malformed entry (expected a title, at least four '.' and a page)"
            ),
            ParseErrorKind::InvalidDirectiveValue(msg) => {
                write!(f, "invalid directive value: {msg}")
            }
            ParseErrorKind::UnknownDirective(key) => write!(f, "unknown directive '{key}'"),
            ParseErrorKind::InvalidInput(msg) => write!(f, "invalid page number: {msg}"),
            ParseErrorKind::PageOutOfRange(page) => {
                write!(f, "page resolves to {page}, pages start at 1")
            }
        }
    }
}

/// A rejected line of bmk text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// 1-based line number
    pub line: usize,
    /// The raw line text
    pub text: String,
    pub kind: ParseErrorKind,
}

impl ParseError {
    pub fn new(line: usize, text: impl Into<String>, kind: ParseErrorKind) -> Self {
        Self {
            line,
            text: text.into(),
            kind,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {} in {:?}", self.line, self.kind, self.text)
    }
}

impl std::error::Error for ParseError {}
