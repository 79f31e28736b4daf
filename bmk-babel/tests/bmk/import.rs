//! Import tests for the bmk format (bmk text → bookmark tree)

use bmk_babel::error::ParseErrorKind;
use bmk_babel::numeral::NumberStyle;
use bmk_babel::{parse_bmk, Bookmark, ErrorPolicy, PageLabel, ParseOptions};

const MANUAL: &str = "\
!!! # Table of contents for the user manual
!!! num_style = Roman
Foreword................v
Contents................vii

!!! new_index = 11
!!! num_style = Arabic
Chapter 1 Introduction................1
  1.1 Audience................2
  1.2 Conventions................4
Chapter 2 Installation................9
  2.1 Requirements................9
    2.1.1 Hardware................10
  2.2 Upgrading................15

!!! num_start = 1
!!! new_index = 60
!!! num_style = Letters
Appendix A................A
Appendix B................C
";

#[test]
fn parses_a_realistic_table_of_contents() {
    let outcome = parse_bmk(MANUAL, &ParseOptions::default()).unwrap();
    let doc = &outcome.document;

    assert!(outcome.warnings.is_empty());
    assert_eq!(doc.len(), 11);
    assert_eq!(doc.max_depth(), 3);

    let titles_and_pages: Vec<_> = doc
        .bookmarks
        .iter()
        .map(|b| (b.title.as_str(), b.page))
        .collect();
    assert_eq!(
        titles_and_pages,
        vec![
            ("Foreword", 5),
            ("Contents", 7),
            ("Chapter 1 Introduction", 11),
            ("Chapter 2 Installation", 19),
            ("Appendix A", 60),
            ("Appendix B", 62),
        ]
    );
    assert_eq!(doc.bookmarks[3].children[0].children[0].page, 20);
}

#[test]
fn records_page_labels_for_each_numbering_change() {
    let doc = parse_bmk(MANUAL, &ParseOptions::default()).unwrap().document;
    assert_eq!(
        doc.page_labels,
        vec![
            PageLabel {
                new_index: 1,
                num_start: 1,
                num_style: NumberStyle::Roman
            },
            PageLabel {
                new_index: 11,
                num_start: 1,
                num_style: NumberStyle::Arabic
            },
            PageLabel {
                new_index: 60,
                num_start: 1,
                num_style: NumberStyle::Letters
            },
        ]
    );
}

#[test]
fn plain_files_have_no_page_labels() {
    let doc = parse_bmk("A....1\nB....2\n", &ParseOptions::default())
        .unwrap()
        .document;
    assert!(doc.page_labels.is_empty());
}

#[test]
fn num_start_offsets_the_page_token() {
    let doc = parse_bmk(
        "!!! new_index = 10\n!!! num_start = 5\nLate start....5\nNext....7\n",
        &ParseOptions::default(),
    )
    .unwrap()
    .document;
    assert_eq!(doc.bookmarks[0].page, 10);
    assert_eq!(doc.bookmarks[1].page, 12);
}

#[test]
fn level_indent_directive_changes_depth() {
    let doc = parse_bmk(
        "!!! level_indent = 4\nA....1\n    B....2\n        C....3\n  D....4\n",
        &ParseOptions::default(),
    )
    .unwrap()
    .document;
    assert_eq!(
        doc.bookmarks,
        vec![
            Bookmark::new("A", 1).with_children(vec![
                Bookmark::new("B", 2).with_children(vec![Bookmark::new("C", 3)])
            ]),
            // two spaces is less than one level at indent 4
            Bookmark::new("D", 4),
        ]
    );
}

#[test]
fn over_indented_entries_attach_one_level_down() {
    let doc = parse_bmk("A....1\n      B....2\n  C....3\n", &ParseOptions::default())
        .unwrap()
        .document;
    assert_eq!(
        doc.bookmarks,
        vec![Bookmark::new("A", 1).with_children(vec![
            Bookmark::new("B", 2),
            Bookmark::new("C", 3)
        ])]
    );
}

#[test]
fn collapse_level_zero_expands_everything() {
    let doc = parse_bmk(
        "!!! collapse_level = 0\nA....1\n  B....2\n    C....3\n",
        &ParseOptions::default(),
    )
    .unwrap()
    .document;
    let mut collapsed = Vec::new();
    doc.walk(|b, _| collapsed.push(b.collapsed));
    assert_eq!(collapsed, vec![false, false, false]);
}

#[test]
fn last_collapse_level_directive_wins() {
    let doc = parse_bmk(
        "!!! collapse_level = 1\nA....1\n  B....2\n!!! collapse_level = 2\n    C....3\n",
        &ParseOptions::default(),
    )
    .unwrap()
    .document;
    let mut flags = Vec::new();
    doc.walk(|b, depth| flags.push((depth, b.collapsed)));
    assert_eq!(flags, vec![(1, false), (2, true), (3, true)]);
}

#[test]
fn caller_collapse_level_overrides_directives() {
    let options = ParseOptions {
        collapse_level: Some(1),
        ..ParseOptions::default()
    };
    let doc = parse_bmk("!!! collapse_level = 3\nA....1\n  B....2\n", &options)
        .unwrap()
        .document;
    assert!(doc.bookmarks[0].collapsed);
    assert!(doc.bookmarks[0].children[0].collapsed);
}

#[test]
fn bad_directives_are_skipped_by_default() {
    let outcome = parse_bmk(
        "!!! num_style = Roman\n!!! num_style = Klingon\nA....iv\n!!! paper = a4\n",
        &ParseOptions::default(),
    )
    .unwrap();

    // the Roman context survives the bad value
    assert_eq!(outcome.document.bookmarks[0].page, 4);
    let kinds: Vec<_> = outcome.warnings.iter().map(|w| (w.line, w.kind.clone())).collect();
    assert!(matches!(kinds[0], (2, ParseErrorKind::InvalidDirectiveValue(_))));
    assert_eq!(kinds[1], (4, ParseErrorKind::UnknownDirective("paper".to_string())));
}

#[test]
fn directive_without_assignment_is_invalid() {
    let options = ParseOptions {
        directive_errors: ErrorPolicy::Abort,
        ..ParseOptions::default()
    };
    let err = parse_bmk("!!! new_index 3\n", &options).unwrap_err();
    assert!(matches!(err.kind, ParseErrorKind::InvalidDirectiveValue(_)));
}

#[test]
fn out_of_range_directive_values_are_rejected() {
    let options = ParseOptions {
        directive_errors: ErrorPolicy::Abort,
        ..ParseOptions::default()
    };
    for source in ["!!! new_index = 0\n", "!!! level_indent = 0\n", "!!! num_start = -2\n"] {
        let err = parse_bmk(source, &options).unwrap_err();
        assert!(
            matches!(err.kind, ParseErrorKind::InvalidDirectiveValue(_)),
            "{source:?}"
        );
    }
}

#[test]
fn entry_errors_abort_without_partial_tree() {
    let err = parse_bmk("A....1\nB....x\nC....3\n", &ParseOptions::default()).unwrap_err();
    assert_eq!(err.line, 2);
    assert_eq!(err.text, "B....x");
    assert!(matches!(err.kind, ParseErrorKind::InvalidInput(_)));
}

#[test]
fn entry_errors_can_be_skipped() {
    let options = ParseOptions {
        entry_errors: ErrorPolicy::SkipAndWarn,
        ..ParseOptions::default()
    };
    let outcome = parse_bmk("A....1\nno separator\n!!! num_start = 5\nB....2\nC....9\n", &options)
        .unwrap();
    let titles: Vec<_> = outcome
        .document
        .bookmarks
        .iter()
        .map(|b| b.title.as_str())
        .collect();
    assert_eq!(titles, vec!["A", "C"]);
    assert_eq!(outcome.warnings.len(), 2);
    assert_eq!(outcome.warnings[0].kind, ParseErrorKind::MalformedEntry);
    assert_eq!(outcome.warnings[1].kind, ParseErrorKind::PageOutOfRange(-2));
}

#[test]
fn lowercase_roman_and_letter_tokens_are_accepted() {
    let doc = parse_bmk(
        "!!! num_style = roman\nA....xii\n!!! num_style = letters\nB....ab\n",
        &ParseOptions::default(),
    )
    .unwrap()
    .document;
    assert_eq!(doc.bookmarks[0].page, 12);
    assert_eq!(doc.bookmarks[1].page, 28);
}

#[test]
fn non_canonical_roman_is_rejected() {
    let err = parse_bmk("!!! num_style = Roman\nA....IIII\n", &ParseOptions::default())
        .unwrap_err();
    assert!(matches!(err.kind, ParseErrorKind::InvalidInput(_)));
}

#[test]
fn final_context_is_reported() {
    let outcome = parse_bmk(
        "!!! new_index = 4\n!!! num_style = Letters\nA....A\n",
        &ParseOptions::default(),
    )
    .unwrap();
    assert_eq!(outcome.final_context.new_index, 4);
    assert_eq!(outcome.final_context.numbering_style, NumberStyle::Letters);
}

#[test]
fn crlf_and_blank_lines_are_tolerated() {
    let doc = parse_bmk("\r\nA....1\r\n\r\n  B....2\r\n", &ParseOptions::default())
        .unwrap()
        .document;
    assert_eq!(
        doc.bookmarks,
        vec![Bookmark::new("A", 1).with_children(vec![Bookmark::new("B", 2)])]
    );
}
