//! Binding extraction.
//!
//! A single left-to-right pass over the placeholders of a query that skips
//! quoted literals, allocates synthetic identifiers for expressions and
//! rewrites the query into canonical form.

mod error;
mod extractor;

pub use error::{BindingError, Result};
pub use extractor::{Extraction, Numbering, Parser, SYNTHETIC_PREFIX};
