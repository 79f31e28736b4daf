//! Intermediate representation of a bookmark outline.
//!
//! Every format converts to and from the nested [`nodes::Document`] tree.
//! Formats that are flat by nature (pdftk listings, bmk lines) go through
//! [`records::OutlineRecord`] and the converters in `crate::common`.

pub mod nodes;
pub mod records;
