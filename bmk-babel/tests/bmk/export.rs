//! Export tests for the bmk format (bookmark tree → bmk text)

use bmk_babel::format::Format;
use bmk_babel::formats::bmk::formatting_rules::BmkFormattingRules;
use bmk_babel::formats::BmkFormat;
use bmk_babel::{parse_bmk, Bookmark, Document, ParseOptions};
use insta::assert_snapshot;
use std::collections::HashMap;

const SOURCE: &str = "\
!!! num_style = Roman
Foreword................v

!!! new_index = 11
!!! num_style = Arabic
Chapter 1................1
  1.1 Audience................2
    1.1.1 Readers....3
Chapter 2................9
";

fn parse(source: &str) -> Document {
    parse_bmk(source, &ParseOptions::default())
        .expect("source to parse")
        .document
}

fn directive_format() -> BmkFormat {
    BmkFormat::new(
        BmkFormattingRules {
            directives: true,
            ..BmkFormattingRules::default()
        },
        ParseOptions::default(),
    )
}

#[test]
fn test_plain_export_uses_physical_pages() {
    let out = BmkFormat::default().serialize(&parse(SOURCE)).unwrap();
    assert_snapshot!(out, @r"
Foreword................5
Chapter 1................11
  1.1 Audience................12
    1.1.1 Readers................13
Chapter 2................19
");
}

#[test]
fn test_export_with_directives() {
    let mut doc = parse(SOURCE);
    doc.apply_collapse_level(2);
    let out = directive_format().serialize(&doc).unwrap();
    assert_snapshot!(out, @r"
!!! # Generated bmk file
!!! collapse_level = 2

!!! new_index = 1
!!! num_start = 1
!!! num_style = Roman

Foreword................V

!!! new_index = 11
!!! num_start = 1
!!! num_style = Arabic

Chapter 1................1
  1.1 Audience................2
    1.1.1 Readers................3
Chapter 2................9
");
}

#[test]
fn test_plain_round_trip_preserves_shape() {
    let doc = parse(SOURCE);
    let text = BmkFormat::default().serialize(&doc).unwrap();
    let reparsed = parse(&text);
    assert_eq!(reparsed.bookmarks, doc.bookmarks);
}

#[test]
fn test_directive_round_trip_preserves_labels_and_collapse() {
    let mut doc = parse(SOURCE);
    doc.apply_collapse_level(1);
    let text = directive_format().serialize(&doc).unwrap();
    let reparsed = parse(&text);
    assert_eq!(reparsed, doc);
}

#[test]
fn test_custom_indent_round_trips_through_directive() {
    let doc = parse(SOURCE);
    let format = BmkFormat::new(
        BmkFormattingRules {
            level_indent: 3,
            separator_dots: 8,
            directives: true,
        },
        ParseOptions::default(),
    );
    let text = format.serialize(&doc).unwrap();
    assert!(text.contains("!!! level_indent = 3\n"));
    assert!(text.contains("\n   1.1 Audience........2\n"));
    assert_eq!(parse(&text), doc);
}

#[test]
fn test_collapse_option_on_export() {
    let doc = parse("A....1\n  B....2\n    C....3\n");
    let mut options = HashMap::new();
    options.insert("collapse-level".to_string(), "3".to_string());
    options.insert("directives".to_string(), "true".to_string());
    let out = BmkFormat::default()
        .serialize_with_options(&doc, &options)
        .unwrap();
    assert_snapshot!(out, @r"
!!! # Generated bmk file
!!! collapse_level = 3
A................1
  B................2
    C................3
");
}

#[test]
fn test_titles_with_dots_survive() {
    let doc = Document::new(vec![
        Bookmark::new("Fig. 2.", 4),
        Bookmark::new("Section 3.1 ... overview", 5),
    ]);
    let text = BmkFormat::default().serialize(&doc).unwrap();
    assert_eq!(parse(&text), doc);
}

#[test]
fn test_unicode_titles() {
    let doc = Document::new(vec![Bookmark::new("Глава 1. Введение", 3)
        .with_children(vec![Bookmark::new("第一节", 4)])]);
    let text = BmkFormat::default().serialize(&doc).unwrap();
    assert_eq!(parse(&text), doc);
}
