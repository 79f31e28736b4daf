use super::formatting_rules::{
    BmkFormattingRules, MAX_LEVEL_INDENT, MAX_SEPARATOR_DOTS, MIN_SEPARATOR_DOTS,
};
use crate::common::nested_to_flat::tree_to_records;
use crate::directive::{Directive, DEFAULT_LEVEL_INDENT, DIRECTIVE_MARKER};
use crate::error::FormatError;
use crate::ir::nodes::{Document, PageLabel};
use crate::numeral::{self, NumberStyle};

const GENERATED_HEADER: &str = "!!! # Generated bmk file";

/// Writes a bookmark tree back out as bmk text.
pub struct BmkSerializer {
    rules: BmkFormattingRules,
    /// Explicit collapse level to announce, instead of inferring it from the tree
    collapse_level: Option<usize>,
    output: String,
    /// Index into `page_labels` of the numbering currently announced
    current_label: Option<usize>,
}

impl BmkSerializer {
    pub fn new(rules: BmkFormattingRules) -> Self {
        Self {
            rules,
            collapse_level: None,
            output: String::new(),
            current_label: None,
        }
    }

    pub fn with_collapse_level(mut self, collapse_level: Option<usize>) -> Self {
        self.collapse_level = collapse_level;
        self
    }

    pub fn serialize(mut self, doc: &Document) -> Result<String, FormatError> {
        if !(1..=MAX_LEVEL_INDENT).contains(&self.rules.level_indent) {
            return Err(FormatError::SerializationError(format!(
                "bmk level indent must be between 1 and {MAX_LEVEL_INDENT}, got {}",
                self.rules.level_indent
            )));
        }
        if !(MIN_SEPARATOR_DOTS..=MAX_SEPARATOR_DOTS).contains(&self.rules.separator_dots) {
            return Err(FormatError::SerializationError(format!(
                "bmk separator must be between {MIN_SEPARATOR_DOTS} and {MAX_SEPARATOR_DOTS} dots, got {}",
                self.rules.separator_dots
            )));
        }
        doc.validate().map_err(FormatError::InconsistentTree)?;

        if self.rules.directives {
            self.write_header(doc);
        }

        for record in tree_to_records(doc) {
            check_title(&record.title)?;
            let page = if self.rules.directives {
                self.labelled_page(doc, record.page)?
            } else {
                record.page.to_string()
            };
            self.write_entry(record.level, &record.title, &page)?;
        }

        Ok(self.output)
    }

    fn write_header(&mut self, doc: &Document) {
        self.write_line(GENERATED_HEADER);
        if self.rules.level_indent != DEFAULT_LEVEL_INDENT {
            self.write_directive(Directive::LevelIndent(self.rules.level_indent));
        }
        let collapse_level = self
            .collapse_level
            .unwrap_or_else(|| doc.inferred_collapse_level());
        if collapse_level > 0 {
            self.write_directive(Directive::CollapseLevel(collapse_level));
        }
    }

    /// Render `page` in the style of its page label, announcing the label
    /// first if it differs from the one in effect.
    fn labelled_page(&mut self, doc: &Document, page: u32) -> Result<String, FormatError> {
        let Some((index, label)) = doc.page_label_for(page) else {
            if self.current_label.take().is_some() {
                self.write_numbering(&PageLabel {
                    new_index: 1,
                    num_start: 1,
                    num_style: NumberStyle::Arabic,
                });
            }
            return Ok(page.to_string());
        };

        if self.current_label != Some(index) {
            self.write_numbering(label);
            self.current_label = Some(index);
        }

        let logical = label.logical_page(page).ok_or_else(|| {
            FormatError::InconsistentTree(format!("page {page} is not covered by its page label"))
        })?;
        numeral::format(logical, label.num_style)
            .map_err(|e| FormatError::SerializationError(e.to_string()))
    }

    fn write_numbering(&mut self, label: &PageLabel) {
        self.output.push('\n');
        self.write_directive(Directive::NewIndex(label.new_index));
        self.write_directive(Directive::NumStart(label.num_start));
        self.write_directive(Directive::NumStyle(label.num_style));
        self.output.push('\n');
    }

    fn write_directive(&mut self, directive: Directive) {
        self.write_line(&directive.to_string());
    }

    fn write_entry(&mut self, level: usize, title: &str, page: &str) -> Result<(), FormatError> {
        let width = level
            .saturating_sub(1)
            .checked_mul(self.rules.level_indent)
            .ok_or_else(|| {
                FormatError::SerializationError(format!(
                    "indentation for level {level} does not fit in memory"
                ))
            })?;
        let indent = " ".repeat(width);
        // A trailing '.' would merge into the separator run.
        let gap = if title.ends_with('.') { " " } else { "" };
        let dots = ".".repeat(self.rules.separator_dots);
        self.write_line(&format!("{indent}{title}{gap}{dots}{page}"));
        Ok(())
    }

    fn write_line(&mut self, text: &str) {
        self.output.push_str(text);
        self.output.push('\n');
    }
}

/// Titles that would not read back as the same entry.
fn check_title(title: &str) -> Result<(), FormatError> {
    let separator = ".".repeat(MIN_SEPARATOR_DOTS);
    if title.contains(&separator)
        || title.contains(['\n', '\r'])
        || title.trim_start().starts_with(DIRECTIVE_MARKER)
        || title.trim() != title
    {
        return Err(FormatError::InconsistentTree(format!(
            "title {title:?} cannot be written as a bmk entry"
        )));
    }
    Ok(())
}
