//! Detection of quoted literals.

use tracing::trace;

use super::Span;
use crate::parser::{BindingError, Result};

/// Characters that open and close a quoted literal.
const QUOTING_CHARACTERS: [char; 2] = ['"', '\''];

/// The quoted ranges of a query string.
///
/// Placeholder syntax that starts inside one of these ranges is part of a
/// string literal and must not be treated as a parameter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuotationMap {
    /// Quoted ranges in ascending order, each covering both quote characters.
    ranges: Vec<Span>,
}

impl QuotationMap {
    /// Scans `query` for quoted literals.
    ///
    /// A quote character only closes the literal opened by the same
    /// character, so `'` is inert inside `"..."` and vice versa. Doubled
    /// quotes (`'it''s'`) close and reopen the literal, which leaves the
    /// covered offsets unchanged apart from the boundary pair.
    ///
    /// # Errors
    ///
    /// Returns [`BindingError::MalformedQuotation`] when a literal is still
    /// open at the end of the text.
    pub fn new(query: &str) -> Result<Self> {
        let mut ranges = Vec::new();
        let mut open: Option<(char, usize)> = None;

        for (offset, c) in query.char_indices() {
            if !QUOTING_CHARACTERS.contains(&c) {
                continue;
            }
            match open {
                None => open = Some((c, offset)),
                Some((quote, start)) if quote == c => {
                    ranges.push(Span::inclusive(start, offset));
                    open = None;
                }
                Some(_) => {}
            }
        }

        if let Some((_, start)) = open {
            return Err(BindingError::MalformedQuotation {
                query: String::from(query),
                start,
            });
        }

        trace!(quoted_ranges = ranges.len(), "built quotation map");
        Ok(Self { ranges })
    }

    /// Returns true if `offset` lies inside a quoted literal, quote
    /// characters included.
    #[must_use]
    pub fn is_quoted(&self, offset: usize) -> bool {
        // Ranges are sorted and disjoint.
        let idx = self.ranges.partition_point(|r| r.end <= offset);
        self.ranges.get(idx).is_some_and(|r| r.contains(offset))
    }

    /// Returns the quoted ranges in ascending order.
    #[must_use]
    pub fn ranges(&self) -> &[Span] {
        &self.ranges
    }
}
