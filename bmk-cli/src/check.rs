//! Summary report for `pdf-bookmark check`.

use bmk_babel::{PageLabel, ParseOutcome};

/// Render the human-readable summary of a parsed bmk file.
pub fn summarize(outcome: &ParseOutcome) -> String {
    let doc = &outcome.document;
    let mut lines = vec![
        format!("bookmarks: {}", doc.len()),
        format!("max depth: {}", doc.max_depth()),
        format!("top level: {}", doc.bookmarks.len()),
    ];

    let collapsed = doc.inferred_collapse_level();
    if collapsed > 0 {
        lines.push(format!("collapsed from depth: {collapsed}"));
    }

    if !doc.page_labels.is_empty() {
        lines.push("page labels:".to_string());
        lines.extend(doc.page_labels.iter().map(describe_label));
    }

    if !outcome.warnings.is_empty() {
        lines.push(format!("skipped lines: {}", outcome.warnings.len()));
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn describe_label(label: &PageLabel) -> String {
    format!(
        "  page {} onwards: {} from {}",
        label.new_index, label.num_style, label.num_start
    )
}
