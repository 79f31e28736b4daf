//! pdfmark export tests

use bmk_babel::format::Format;
use bmk_babel::formats::PdfmarkFormat;
use bmk_babel::{parse_bmk, FormatRegistry, ParseOptions};
use insta::assert_snapshot;
use std::collections::HashMap;

const SOURCE: &str = "\
Cover................1
Chapter 1 (draft)................4
  1.1 Paths like C:\\tmp................5
  1.2 Ünicode................6
    1.2.1 Deep................7
Chapter 2................9
";

#[test]
fn test_pdfmark_export() {
    let doc = parse_bmk(SOURCE, &ParseOptions::default()).unwrap().document;
    let out = PdfmarkFormat.serialize(&doc).unwrap();
    assert_snapshot!(out, @r"
[/Title (Cover) /Page 1 /OUT pdfmark
[/Count 2 /Title (Chapter 1 \(draft\)) /Page 4 /OUT pdfmark
[/Title (1.1 Paths like C:\\tmp) /Page 5 /OUT pdfmark
[/Count 1 /Title <FEFF0031002E0032002000DC006E00690063006F00640065> /Page 6 /OUT pdfmark
[/Title (1.2.1 Deep) /Page 7 /OUT pdfmark
[/Title (Chapter 2) /Page 9 /OUT pdfmark
");
}

#[test]
fn test_pdfmark_collapse_option() {
    let doc = parse_bmk(SOURCE, &ParseOptions::default()).unwrap().document;
    let mut options = HashMap::new();
    options.insert("collapse-level".to_string(), "2".to_string());
    let out = FormatRegistry::default()
        .serialize_with_options(&doc, "pdfmark", &options)
        .unwrap();
    assert!(out.contains("[/Count 2 /Title (Chapter 1 \\(draft\\))"));
    assert!(out.contains("[/Count -1 /Title <FEFF"));
}

#[test]
fn test_pdfmark_collapse_from_directive() {
    let doc = parse_bmk("!!! collapse_level = 1\nA....1\n  B....2\n  C....3\n", &ParseOptions::default())
        .unwrap()
        .document;
    let out = PdfmarkFormat.serialize(&doc).unwrap();
    assert_eq!(
        out.lines().next(),
        Some("[/Count -2 /Title (A) /Page 1 /OUT pdfmark")
    );
}

#[test]
fn test_pdfmark_empty_document() {
    let doc = parse_bmk("!!! # nothing here\n", &ParseOptions::default())
        .unwrap()
        .document;
    assert_eq!(PdfmarkFormat.serialize(&doc).unwrap(), "");
}
