//! pdftk format tests: dump_data import and update_info export

use bmk_babel::format::Format;
use bmk_babel::formats::{BmkFormat, PdftkFormat};
use bmk_babel::numeral::NumberStyle;
use bmk_babel::{Bookmark, Document, FormatRegistry, PageLabel};
use insta::assert_snapshot;

const DUMP: &str = "\
InfoBegin
InfoKey: Creator
InfoValue: LaTeX with hyperref
InfoBegin
InfoKey: Producer
InfoValue: pdfTeX-1.40.25
PdfID0: 6c3e4a1f
NumberOfPages: 212
BookmarkBegin
BookmarkTitle: Contents
BookmarkLevel: 1
BookmarkPageNumber: 3
BookmarkBegin
BookmarkTitle: 1 Introduction
BookmarkLevel: 1
BookmarkPageNumber: 11
BookmarkBegin
BookmarkTitle: 1.1 Motivation &amp; Scope
BookmarkLevel: 2
BookmarkPageNumber: 12
BookmarkBegin
BookmarkTitle: Broken link
BookmarkLevel: 2
BookmarkPageNumber: 0
BookmarkBegin
BookmarkTitle: 2 R&#233;sum&#233;
BookmarkLevel: 1
BookmarkPageNumber: 30
PageMediaBegin
PageMediaNumber: 1
PageMediaRotation: 0
PageLabelBegin
PageLabelNewIndex: 1
PageLabelStart: 1
PageLabelNumStyle: LowercaseRomanNumerals
PageLabelBegin
PageLabelNewIndex: 11
PageLabelStart: 1
PageLabelNumStyle: DecimalArabicNumerals
";

#[test]
fn test_import_dump_data() {
    let doc = PdftkFormat::default().parse(DUMP).unwrap();
    assert_eq!(
        doc.bookmarks,
        vec![
            Bookmark::new("Contents", 3),
            Bookmark::new("1 Introduction", 11)
                .with_children(vec![Bookmark::new("1.1 Motivation & Scope", 12)]),
            Bookmark::new("2 Résumé", 30),
        ]
    );
    assert_eq!(doc.page_labels.len(), 2);
    assert_eq!(doc.page_labels[0].num_style, NumberStyle::Roman);
}

#[test]
fn test_dump_data_to_bmk_with_directives() {
    let registry = FormatRegistry::default();
    let doc = registry.parse(DUMP, "pdftk").unwrap();

    let mut options = std::collections::HashMap::new();
    options.insert("directives".to_string(), "true".to_string());
    let out = registry.serialize_with_options(&doc, "bmk", &options).unwrap();
    assert_snapshot!(out, @r"
!!! # Generated bmk file

!!! new_index = 1
!!! num_start = 1
!!! num_style = Roman

Contents................III

!!! new_index = 11
!!! num_start = 1
!!! num_style = Arabic

1 Introduction................1
  1.1 Motivation & Scope................2
2 Résumé................20
");
}

#[test]
fn test_export_update_info() {
    let mut doc = Document::new(vec![
        Bookmark::new("Preface", 2),
        Bookmark::new("Chapter <1>", 5)
            .collapsed(true)
            .with_children(vec![Bookmark::new("Über", 6)]),
    ]);
    doc.page_labels.push(PageLabel {
        new_index: 5,
        num_start: 1,
        num_style: NumberStyle::Letters,
    });

    let out = PdftkFormat::default().serialize(&doc).unwrap();
    assert_snapshot!(out, @r"
PageLabelBegin
PageLabelNewIndex: 5
PageLabelStart: 1
PageLabelNumStyle: UppercaseLetters
BookmarkBegin
BookmarkTitle: Preface
BookmarkLevel: 1
BookmarkPageNumber: 2
BookmarkOpen: Yes
BookmarkBegin
BookmarkTitle: Chapter &lt;1&gt;
BookmarkLevel: 1
BookmarkPageNumber: 5
BookmarkOpen: No
BookmarkBegin
BookmarkTitle: Über
BookmarkLevel: 2
BookmarkPageNumber: 6
BookmarkOpen: Yes
");
}

#[test]
fn test_export_then_import_is_lossless() {
    let mut doc = Document::new(vec![Bookmark::new("A & B", 1).with_children(vec![
        Bookmark::new("Ω", 2).collapsed(true).with_children(vec![Bookmark::new("x", 3)]),
    ])]);
    doc.page_labels.push(PageLabel {
        new_index: 1,
        num_start: 3,
        num_style: NumberStyle::Roman,
    });
    let format = PdftkFormat::default();
    assert_eq!(format.parse(&format.serialize(&doc).unwrap()).unwrap(), doc);
}

#[test]
fn test_bmk_to_pdftk_to_bmk() {
    let source = "Chapter 1................4\n  1.1 Section................6\nChapter 2................5\n";
    let bmk = BmkFormat::default();
    let pdftk = PdftkFormat::default();

    let doc = bmk.parse(source).unwrap();
    let back = bmk
        .serialize(&pdftk.parse(&pdftk.serialize(&doc).unwrap()).unwrap())
        .unwrap();
    assert_eq!(back, source);
}

#[test]
fn test_empty_listing() {
    let doc = PdftkFormat::default()
        .parse("InfoBegin\nInfoKey: Title\nInfoValue: Empty\nNumberOfPages: 1\n")
        .unwrap();
    assert!(doc.is_empty());
    assert_eq!(PdftkFormat::default().serialize(&doc).unwrap(), "");
}

#[test]
fn test_padded_and_blank_titles_survive_bmk_round_trip() {
    let dump = "\
BookmarkBegin
BookmarkTitle: Chapter
BookmarkLevel: 1
BookmarkPageNumber: 1
BookmarkBegin
BookmarkTitle: 
BookmarkLevel: 2
BookmarkPageNumber: 3
BookmarkBegin
BookmarkTitle:   Appendix
BookmarkLevel: 1
BookmarkPageNumber: 9
";
    let doc = PdftkFormat::default().parse(dump).unwrap();
    assert_eq!(doc.bookmarks.len(), 2);

    let bmk = BmkFormat::default();
    let out = bmk.serialize(&doc).unwrap();
    assert_eq!(out, "Chapter................1\nAppendix................9\n");

    let reparsed = bmk.parse(&out).unwrap();
    assert_eq!(reparsed, doc);
    assert_eq!(bmk.serialize(&reparsed).unwrap(), out);
}
