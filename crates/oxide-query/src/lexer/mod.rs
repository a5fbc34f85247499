//! Lexical analysis of query strings.
//!
//! Nothing here understands the query language itself; it only locates
//! quoted literals and placeholder syntax.

mod pattern;
mod quotation;
mod span;

pub use pattern::{greatest_index, PlaceholderMatch, Placeholders};
pub use quotation::QuotationMap;
pub use span::Span;
