//! Byte ranges inside a query string.

use serde::Serialize;

/// A half-open byte range `[start, end)` inside the query text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Span {
    /// Start byte offset (inclusive).
    pub start: usize,
    /// End byte offset (exclusive).
    pub end: usize,
}

impl Span {
    /// Creates a new span.
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Creates a span covering the inclusive range `[first, last]`.
    #[must_use]
    pub const fn inclusive(first: usize, last: usize) -> Self {
        Self::new(first, last + 1)
    }

    /// Returns the length of the span in bytes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns true if the span is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns true if `offset` lies inside the span.
    #[must_use]
    pub const fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset < self.end
    }

    /// Returns the text covered by this span.
    ///
    /// # Panics
    ///
    /// Panics if the span does not lie on character boundaries of `text`.
    #[must_use]
    pub fn slice<'a>(&self, text: &'a str) -> &'a str {
        &text[self.start..self.end]
    }
}

impl From<regex::Match<'_>> for Span {
    fn from(m: regex::Match<'_>) -> Self {
        Self::new(m.start(), m.end())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_new() {
        let span = Span::new(5, 10);
        assert_eq!(span.start, 5);
        assert_eq!(span.end, 10);
        assert_eq!(span.len(), 5);
    }

    #[test]
    fn test_span_inclusive() {
        let span = Span::inclusive(3, 7);
        assert_eq!(span, Span::new(3, 8));
        assert!(span.contains(3));
        assert!(span.contains(7));
        assert!(!span.contains(8));
        assert!(!span.contains(2));
    }

    #[test]
    fn test_span_is_empty() {
        assert!(Span::new(5, 5).is_empty());
        assert!(!Span::new(5, 10).is_empty());
        assert!(!Span::new(5, 5).contains(5));
    }

    #[test]
    fn test_span_slice() {
        let text = "where x = ?1";
        assert_eq!(Span::new(10, 12).slice(text), "?1");
    }
}
