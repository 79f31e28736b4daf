//! pdfmark format implementation
//!
//! Emits one Ghostscript `/OUT` pdfmark per bookmark, in pre-order:
//!
//! ```text
//! [/Count -2 /Title (Chapter 1) /Page 4 /OUT pdfmark
//! [/Title (1.1 Section) /Page 6 /OUT pdfmark
//! [/Title (1.2 Section) /Page 8 /OUT pdfmark
//! ```
//!
//! `/Count` gives the number of direct children, negated when the entry starts
//! collapsed. Output only.

use crate::error::FormatError;
use crate::format::Format;
use crate::ir::nodes::{Bookmark, Document};
use std::fmt::Write;

/// Format implementation for pdfmark outline statements
#[derive(Debug, Default)]
pub struct PdfmarkFormat;

impl Format for PdfmarkFormat {
    fn name(&self) -> &str {
        "pdfmark"
    }

    fn description(&self) -> &str {
        "Ghostscript /OUT pdfmark statements"
    }

    fn file_extensions(&self) -> &[&str] {
        &["pdfmark", "ps"]
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        doc.validate().map_err(FormatError::InconsistentTree)?;

        let mut out = String::new();
        let mut result = Ok(());
        doc.walk(|bookmark, _| {
            if result.is_ok() {
                result = write_mark(&mut out, bookmark);
            }
        });
        result.map_err(|e| FormatError::SerializationError(e.to_string()))?;
        Ok(out)
    }
}

fn write_mark(out: &mut String, bookmark: &Bookmark) -> std::fmt::Result {
    out.push('[');
    if !bookmark.children.is_empty() {
        let count = bookmark.children.len();
        if bookmark.collapsed {
            write!(out, "/Count -{count} ")?;
        } else {
            write!(out, "/Count {count} ")?;
        }
    }
    writeln!(
        out,
        "/Title {} /Page {} /OUT pdfmark",
        pdf_string(&bookmark.title),
        bookmark.page
    )
}

/// Encode a title as a PostScript string literal.
///
/// ASCII titles become `(...)` literals with backslash escapes. Anything else
/// becomes a UTF-16BE hex string with a byte order mark, which PDF readers
/// decode as Unicode text.
pub fn pdf_string(title: &str) -> String {
    if title.is_ascii() {
        let mut out = String::with_capacity(title.len() + 2);
        out.push('(');
        for ch in title.chars() {
            match ch {
                '\\' => out.push_str("\\\\"),
                '(' => out.push_str("\\("),
                ')' => out.push_str("\\)"),
                '\n' => out.push_str("\\n"),
                '\r' => out.push_str("\\r"),
                '\t' => out.push_str("\\t"),
                c => out.push(c),
            }
        }
        out.push(')');
        out
    } else {
        let mut out = String::from("<FEFF");
        for unit in title.encode_utf16() {
            out.push_str(&format!("{unit:04X}"));
        }
        out.push('>');
        out
    }
}
