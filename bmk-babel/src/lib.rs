//! Multi-format interoperability for PDF bookmark outlines
//!
//!     This crate provides a uniform interface for converting between the bmk outline text format
//!     and the formats PDF tooling consumes (pdftk records, Ghostscript pdfmarks, JSON).
//!
//!     TLDR: For format authors:
//!         - Every format converts to and from the bookmark tree in ./ir/nodes.rs.
//!         - Flat formats build OutlineRecord lists and let ./common assemble or flatten the tree.
//!         - Each format has unit tests next to the code and integration tests under tests/<format>.
//!         - Collapse handling is shared: serializers honour the `collapse-level` option through
//!           the helpers in ./format.rs.
//!
//! Architecture
//!
//!     The common logic for all conversions lives in a format agnostic layer: the tree
//!     (./ir/nodes.rs), its flat form (./ir/records.rs) and the converters between both
//!     (./common). Format specific code is limited to reading and writing text.
//!
//!     This is a pure lib, that is, it powers the pdf-bookmark cli but is shell agnostic: no code
//!     should be written that supposes a shell environment, be it std printing, env vars etc.
//!     Diagnostics go through the `log` facade and are left to the host to display.
//!
//!     The file structure :
//!     .
//!     ├── error.rs
//!     ├── format.rs               # Format trait definition
//!     ├── registry.rs             # FormatRegistry for discovery and selection
//!     ├── numeral.rs              # Arabic / Roman / Letters page numerals
//!     ├── directive.rs            # `!!!` directives and the numbering context
//!     ├── formats
//!     │   ├── <format>
//!     │   │   ├── parser.rs       # Parser implementation
//!     │   │   ├── serializer.rs   # Serializer implementation
//!     │   │   └── mod.rs
//!     ├── lib.rs
//!     ├── ir                      # Bookmark tree and flat records
//!     ├── common                  # Flat <-> nested conversion
//!
//! Testing
//!     tests
//!     └── <format>
//!         └── <testname>.rs
//!
//!     Note that rust does not by default discover tests in subdirectories, so we need to include these
//!     in the mod.
//!
//! Core Algorithms
//!
//!     The most delicate part of the work is rebuilding the nesting from indentation or level
//!     numbers, followed by the reverse operation. Both are implemented once, over the flat
//!     record list (see ./common/flat_to_nested.rs and ./common/nested_to_flat.rs), with an
//!     explicit stack instead of recursion so deep outlines cannot exhaust the call stack.
//!
//! The bmk Format
//!
//!     bmk is the native, human editable format. One bookmark per line, indentation for depth,
//!     a run of dots before the page token:
//!
//!         !!! num_style = Roman
//!         Preface................iii
//!         !!! new_index = 9
//!         !!! num_style = Arabic
//!         Chapter 1................1
//!           1.1 Getting started................4
//!
//!     Directives let the page tokens follow the printed numbering while the tree stores
//!     physical pages. See ./formats/bmk/parser.rs for the full grammar.
//!
//! Formats
//!
//!     Format specific capabilities are implemented with the Format trait. Formats have a
//!     parse() and/or serialize() method, a name and file extensions. See the trait def [./format.rs ]
//!     - bmk: in and out
//!     - none: out, writes nothing (validation only)
//!     - pdftk: in (dump_data) and out (update_info)
//!     - pdfmark: out
//!     - json: in and out, lossless
//!
pub mod error;
pub mod format;
pub mod formats;
pub mod registry;

pub mod common;
pub mod directive;
pub mod ir;
pub mod numeral;

pub use directive::{Directive, StyleContext};
pub use error::{FormatError, ParseError, ParseErrorKind};
pub use format::Format;
pub use formats::bmk::formatting_rules::BmkFormattingRules;
pub use formats::bmk::parser::{parse_bmk, ErrorPolicy, ParseOptions, ParseOutcome};
pub use ir::nodes::{Bookmark, Document, PageLabel};
pub use numeral::NumberStyle;
pub use registry::FormatRegistry;
