use crate::common::nested_to_flat::tree_to_records;
use crate::error::FormatError;
use crate::ir::nodes::Document;

/// Writes pdftk `update_info` records: page labels first, then one record per
/// bookmark in pre-order.
pub fn serialize_update_info(doc: &Document, ascii_only: bool) -> Result<String, FormatError> {
    doc.validate().map_err(FormatError::InconsistentTree)?;

    let mut out = String::new();
    for label in &doc.page_labels {
        out.push_str("PageLabelBegin\n");
        out.push_str(&format!("PageLabelNewIndex: {}\n", label.new_index));
        out.push_str(&format!("PageLabelStart: {}\n", label.num_start));
        out.push_str(&format!(
            "PageLabelNumStyle: {}\n",
            label.num_style.pdftk_name()
        ));
    }

    for record in tree_to_records(doc) {
        if record.title.contains(['\n', '\r']) {
            return Err(FormatError::InconsistentTree(format!(
                "title {:?} spans several lines",
                record.title
            )));
        }
        out.push_str("BookmarkBegin\n");
        out.push_str(&format!(
            "BookmarkTitle: {}\n",
            encode_entities(&record.title, ascii_only)
        ));
        out.push_str(&format!("BookmarkLevel: {}\n", record.level));
        out.push_str(&format!("BookmarkPageNumber: {}\n", record.page));
        out.push_str(if record.collapsed {
            "BookmarkOpen: No\n"
        } else {
            "BookmarkOpen: Yes\n"
        });
    }
    Ok(out)
}

/// Escape markup characters, and with `ascii_only` every non-ASCII character,
/// as numeric entities.
pub fn encode_entities(text: &str, ascii_only: bool) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            c if ascii_only && !c.is_ascii() => out.push_str(&format!("&#{};", c as u32)),
            c => out.push(c),
        }
    }
    out
}
