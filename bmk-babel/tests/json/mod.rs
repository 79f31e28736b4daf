//! JSON interchange tests

use bmk_babel::format::Format;
use bmk_babel::formats::{BmkFormat, JsonFormat};
use bmk_babel::{parse_bmk, Document, FormatError, FormatRegistry, ParseOptions};
use insta::assert_snapshot;

#[test]
fn test_json_export_shape() {
    let doc = parse_bmk(
        "!!! collapse_level = 2\nChapter 1....4\n  1.1 Section....6\n",
        &ParseOptions::default(),
    )
    .unwrap()
    .document;
    let out = JsonFormat.serialize(&doc).unwrap();
    assert_snapshot!(out, @r#"
{
  "bookmarks": [
    {
      "title": "Chapter 1",
      "page": 4,
      "collapsed": false,
      "children": [
        {
          "title": "1.1 Section",
          "page": 6,
          "collapsed": true,
          "children": []
        }
      ]
    }
  ]
}
"#);
}

#[test]
fn test_json_carries_page_labels() {
    let doc = parse_bmk("!!! num_style = Letters\nA....B\n", &ParseOptions::default())
        .unwrap()
        .document;
    let out = JsonFormat.serialize(&doc).unwrap();
    assert!(out.contains("\"page_labels\": ["));
    assert!(out.contains("\"num_style\": \"Letters\""));
    assert_eq!(JsonFormat.parse(&out).unwrap(), doc);
}

#[test]
fn test_json_round_trip_through_registry() {
    let registry = FormatRegistry::default();
    let source = "\
!!! new_index = 3
Part I................1
  Chapter 1................2
    Section 1.1................3
  Chapter 2................8
Part II................20
";
    let doc = registry.parse(source, "bmk").unwrap();
    let json = registry.serialize(&doc, "json").unwrap();
    let back: Document = registry.parse(&json, "json").unwrap();
    assert_eq!(back, doc);

    // json → bmk keeps physical pages
    let bmk = BmkFormat::default().serialize(&back).unwrap();
    assert!(bmk.starts_with("Part I................3\n"));
}

#[test]
fn test_json_padded_titles_are_not_written_as_bmk() {
    let json = r#"{"bookmarks": [
        {"title": "Chapter", "page": 1},
        {"title": "  Appendix", "page": 9}
    ]}"#;
    let doc = JsonFormat.parse(json).unwrap();
    assert!(matches!(
        BmkFormat::default().serialize(&doc),
        Err(FormatError::InconsistentTree(_))
    ));
}
