//! bmk format tests
//!
//! Parsing with directives and error policies, and writing back.

mod export;
mod import;
