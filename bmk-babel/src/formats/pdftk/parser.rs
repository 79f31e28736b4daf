//! Reads the bookmark and page-label sections of a pdftk `dump_data` listing.
//!
//! ```text
//! InfoBegin
//! InfoKey: Title
//! InfoValue: Manual
//! NumberOfPages: 120
//! BookmarkBegin
//! BookmarkTitle: Chapter 1
//! BookmarkLevel: 1
//! BookmarkPageNumber: 5
//! PageLabelBegin
//! PageLabelNewIndex: 1
//! PageLabelStart: 1
//! PageLabelNumStyle: LowercaseRomanNumerals
//! ```
//!
//! Records are delimited by their `*Begin` lines. A field that repeats inside
//! a record also starts a new one, so listings without begin lines still
//! split correctly. Everything that is not a bookmark or page-label field is
//! ignored. Titles are trimmed, and bookmarks whose title is blank are skipped
//! like those without a destination page.

use crate::common::flat_to_nested::records_to_tree;
use crate::error::FormatError;
use crate::ir::nodes::{Document, PageLabel};
use crate::ir::records::OutlineRecord;
use crate::numeral::NumberStyle;

#[derive(Debug, Default)]
struct PendingBookmark {
    line: usize,
    title: Option<String>,
    level: Option<usize>,
    page: Option<u32>,
    open: Option<bool>,
}

#[derive(Debug, Default)]
struct PendingLabel {
    new_index: Option<u32>,
    num_start: Option<u32>,
    num_style: Option<NumberStyle>,
}

#[derive(Default)]
struct Collector {
    bookmark: Option<PendingBookmark>,
    label: Option<PendingLabel>,
    records: Vec<OutlineRecord>,
    labels: Vec<PageLabel>,
}

impl Collector {
    fn bookmark(&mut self, line: usize) -> &mut PendingBookmark {
        self.bookmark.get_or_insert_with(|| PendingBookmark {
            line,
            ..PendingBookmark::default()
        })
    }

    fn label(&mut self) -> &mut PendingLabel {
        self.label.get_or_insert_with(PendingLabel::default)
    }

    fn flush_bookmark(&mut self) {
        let Some(pending) = self.bookmark.take() else {
            return;
        };
        match (pending.title, pending.level, pending.page) {
            (Some(title), Some(_), Some(_)) if title.is_empty() => {
                log::warn!("skipping bookmark with an empty title (line {})", pending.line);
            }
            (Some(title), Some(level), Some(page)) if level >= 1 && page >= 1 => {
                self.records.push(OutlineRecord {
                    level,
                    title,
                    page,
                    collapsed: pending.open == Some(false),
                });
            }
            (Some(title), Some(_), Some(0)) => {
                log::warn!(
                    "skipping bookmark '{title}' (line {}): it has no destination page",
                    pending.line
                );
            }
            _ => log::warn!(
                "skipping incomplete bookmark record starting at line {}",
                pending.line
            ),
        }
    }

    fn flush_label(&mut self) {
        let Some(pending) = self.label.take() else {
            return;
        };
        match pending.new_index {
            Some(new_index) if new_index >= 1 => self.labels.push(PageLabel {
                new_index,
                num_start: pending.num_start.unwrap_or(1).max(1),
                num_style: pending.num_style.unwrap_or_default(),
            }),
            _ => log::warn!("skipping page label without a valid PageLabelNewIndex"),
        }
    }
}

/// Parse a `dump_data` listing into a document.
pub fn parse_dump_data(source: &str) -> Result<Document, FormatError> {
    let mut collector = Collector::default();

    for (index, line) in source.lines().enumerate() {
        let number = index + 1;
        let line = line.trim_end_matches('\r');

        match line.trim() {
            "BookmarkBegin" => {
                collector.flush_bookmark();
                collector.bookmark(number);
                continue;
            }
            "PageLabelBegin" => {
                collector.flush_label();
                collector.label();
                continue;
            }
            _ => {}
        }

        let Some((key, value)) = line.split_once(": ") else {
            continue;
        };

        match key.trim() {
            "BookmarkTitle" => {
                if collector.bookmark(number).title.is_some() {
                    collector.flush_bookmark();
                }
                let title = decode_entities(value).trim().to_string();
                collector.bookmark(number).title = Some(title);
            }
            "BookmarkLevel" => {
                let level = parse_number(key, value, number)?;
                if collector.bookmark(number).level.is_some() {
                    collector.flush_bookmark();
                }
                collector.bookmark(number).level = Some(level as usize);
            }
            "BookmarkPageNumber" => {
                let page = parse_number(key, value, number)?;
                if collector.bookmark(number).page.is_some() {
                    collector.flush_bookmark();
                }
                collector.bookmark(number).page = Some(page);
            }
            "BookmarkOpen" => {
                let open = match value.trim().to_ascii_lowercase().as_str() {
                    "yes" | "true" | "1" => true,
                    "no" | "false" | "0" => false,
                    _ => return Err(invalid_value(key, value, number)),
                };
                collector.bookmark(number).open = Some(open);
            }
            "PageLabelNewIndex" => {
                let new_index = parse_number(key, value, number)?;
                if collector.label().new_index.is_some() {
                    collector.flush_label();
                }
                collector.label().new_index = Some(new_index);
            }
            "PageLabelStart" => {
                collector.label().num_start = Some(parse_number(key, value, number)?);
            }
            "PageLabelNumStyle" => {
                collector.label().num_style = Some(NumberStyle::from_pdftk_name(value.trim()));
            }
            _ => {}
        }
    }

    collector.flush_bookmark();
    collector.flush_label();

    log::debug!(
        "read {} bookmarks and {} page labels from pdftk listing",
        collector.records.len(),
        collector.labels.len()
    );

    Ok(Document {
        bookmarks: records_to_tree(&collector.records),
        page_labels: collector.labels,
    })
}

fn parse_number(key: &str, value: &str, line: usize) -> Result<u32, FormatError> {
    value
        .trim()
        .parse()
        .map_err(|_| invalid_value(key, value, line))
}

fn invalid_value(key: &str, value: &str, line: usize) -> FormatError {
    FormatError::ParseError(format!(
        "line {line}: invalid value '{}' for {key}",
        value.trim()
    ))
}

/// Decode the XML-style entities pdftk writes for non-ASCII and markup characters.
pub fn decode_entities(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find('&') {
        out.push_str(&rest[..start]);
        let candidate = &rest[start..];
        let decoded = candidate.find(';').and_then(|end| {
            let entity = &candidate[1..end];
            let ch = match entity {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                _ => entity
                    .strip_prefix('#')
                    .and_then(|code| match code.strip_prefix(['x', 'X']) {
                        Some(hex) => u32::from_str_radix(hex, 16).ok(),
                        None => code.parse().ok(),
                    })
                    .and_then(char::from_u32),
            };
            ch.map(|c| (c, end))
        });
        match decoded {
            Some((ch, end)) => {
                out.push(ch);
                rest = &candidate[end + 1..];
            }
            None => {
                out.push('&');
                rest = &candidate[1..];
            }
        }
    }
    out.push_str(rest);
    out
}
