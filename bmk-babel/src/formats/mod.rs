//! Format implementations
//!
//! This module contains all format implementations that convert between
//! the bookmark tree and its text representations.

pub mod bmk;
pub mod json;
pub mod none;
pub mod pdfmark;
pub mod pdftk;

pub use bmk::BmkFormat;
pub use json::JsonFormat;
pub use none::NoneFormat;
pub use pdfmark::PdfmarkFormat;
pub use pdftk::PdftkFormat;
