//! Placeholder recognition.
//!
//! Two process-wide patterns are compiled on first use and shared
//! read-only afterwards:
//!
//! - the placeholder pattern, which matches one placeholder together with
//!   its optional binding keyword, parentheses and `%` decoration;
//! - the index pattern, a plain `?<digits>` scan over the whole text used to
//!   find the greatest positional index.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::Span;
use crate::parser::{BindingError, Result};

/// Characters allowed in a named parameter: `.`, `_`, `$`, and anything
/// that is not a separator, a control or format character, or ASCII
/// punctuation.
const IDENTIFIER: &str = r"[._$[^\p{Z}\p{Cc}\p{Cf}\x21-\x2F\x3A-\x40\x5B-\x60\x7B-\x7E]]+";

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    let pattern = format!(
        concat!(
            r"(?i)",
            r"(?P<keyword>\b(?:like|in)\s)?",
            r"(?: )?",
            r"\(?",
            r"(?P<placeholder>",
            r"%?(?P<positional>\?(?P<index>[0-9]+))%?",
            r"|%?(?P<named>:(?P<name>{identifier}))%?",
            r"|%?(?P<expression_body>[:?]#\{{(?P<expression>[^}}]+)\}})%?",
            r")",
            r"\)?",
        ),
        identifier = IDENTIFIER,
    );
    Regex::new(&pattern).expect("Invalid placeholder pattern regex")
});

static INDEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\?([0-9]+)").expect("Invalid index pattern regex"));

/// One placeholder occurrence found by [`Placeholders`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderMatch<'a> {
    /// The whole match, keyword and parentheses included.
    pub span: Span,
    /// The binding keyword as written, including its trailing separator.
    pub keyword: Option<&'a str>,
    /// The placeholder including any `%` decoration.
    pub decorated: &'a str,
    /// Location of [`PlaceholderMatch::decorated`] in the query.
    pub decorated_span: Span,
    /// The undecorated placeholder text, e.g. `?1`, `:name` or `?#{expr}`.
    pub body: &'a str,
    /// The digits of a positional placeholder.
    pub index: Option<&'a str>,
    /// The identifier of a named placeholder.
    pub name: Option<&'a str>,
    /// The contents of an expression placeholder.
    pub expression: Option<&'a str>,
}

impl<'a> PlaceholderMatch<'a> {
    fn from_captures(caps: &Captures<'a>) -> Option<Self> {
        let whole = caps.get(0)?;
        let decorated = caps.name("placeholder")?;
        let body = caps
            .name("positional")
            .or_else(|| caps.name("named"))
            .or_else(|| caps.name("expression_body"))?;

        Some(Self {
            span: whole.into(),
            keyword: caps.name("keyword").map(|m| m.as_str()),
            decorated: decorated.as_str(),
            decorated_span: decorated.into(),
            body: body.as_str(),
            index: caps.name("index").map(|m| m.as_str()),
            name: caps.name("name").map(|m| m.as_str()),
            expression: caps.name("expression").map(|m| m.as_str()),
        })
    }

    /// Returns the positional index, if this is a positional placeholder.
    ///
    /// # Errors
    ///
    /// Returns [`BindingError::IndexOutOfRange`] when the digits overflow.
    pub fn position(&self) -> Result<Option<u32>> {
        self.index.map(parse_index).transpose()
    }
}

/// Iterator over the placeholders of a query, left to right.
///
/// A named placeholder whose colon is preceded by another colon (a `::`
/// cast) or a backslash is not a placeholder; the scan resumes one
/// character after the rejected match start.
#[derive(Debug)]
pub struct Placeholders<'a> {
    query: &'a str,
    pos: usize,
}

impl<'a> Placeholders<'a> {
    /// Creates an iterator over the placeholders in `query`.
    #[must_use]
    pub const fn new(query: &'a str) -> Self {
        Self { query, pos: 0 }
    }

    fn is_escaped_colon(&self, caps: &Captures<'_>) -> bool {
        caps.name("named").is_some_and(|named| {
            self.query[..named.start()]
                .chars()
                .next_back()
                .is_some_and(|c| c == ':' || c == '\\')
        })
    }
}

impl<'a> Iterator for Placeholders<'a> {
    type Item = PlaceholderMatch<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.pos <= self.query.len() {
            let caps = PLACEHOLDER.captures_at(self.query, self.pos)?;
            let whole = caps.get(0)?;

            if self.is_escaped_colon(&caps) {
                let skipped = self.query[whole.start()..]
                    .chars()
                    .next()
                    .map_or(1, char::len_utf8);
                self.pos = whole.start() + skipped;
                continue;
            }

            // Every alternative consumes at least two characters.
            self.pos = whole.end();
            return PlaceholderMatch::from_captures(&caps);
        }
        None
    }
}

/// Returns the greatest `?<digits>` index anywhere in `query`, quoted
/// literals included, or `None` if there is none.
///
/// # Errors
///
/// Returns [`BindingError::IndexOutOfRange`] when an index overflows.
pub fn greatest_index(query: &str) -> Result<Option<u32>> {
    INDEX
        .captures_iter(query)
        .filter_map(|caps| caps.get(1))
        .map(|digits| parse_index(digits.as_str()))
        .try_fold(None, |greatest: Option<u32>, index| {
            let index = index?;
            Ok(Some(greatest.map_or(index, |g| g.max(index))))
        })
}

fn parse_index(digits: &str) -> Result<u32> {
    digits
        .parse()
        .map_err(|_| BindingError::IndexOutOfRange(String::from(digits)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matches(query: &str) -> Vec<PlaceholderMatch<'_>> {
        Placeholders::new(query).collect()
    }

    #[test]
    fn test_positional() {
        let found = matches("where a = ?1 and b = ?12");
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].body, "?1");
        assert_eq!(found[0].index, Some("1"));
        assert_eq!(found[1].position().unwrap(), Some(12));
        assert!(found[1].keyword.is_none());
    }

    #[test]
    fn test_named() {
        let found = matches("where u.lastname = :lastname");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].body, ":lastname");
        assert_eq!(found[0].name, Some("lastname"));
        assert_eq!(found[0].index, None);
    }

    #[test]
    fn test_named_identifier_characters() {
        let found = matches("where a = :a.b$c_d and b = :ñame)");
        assert_eq!(found[0].name, Some("a.b$c_d"));
        assert_eq!(found[1].name, Some("ñame"));
    }

    #[test]
    fn test_double_colon_is_not_a_placeholder() {
        assert!(matches("select x::text from t").is_empty());
        assert!(matches(r"select a \:x").is_empty());
    }

    #[test]
    fn test_like_keyword_and_decoration() {
        let found = matches("where a LIKE %:name% and b like ?1%");
        assert_eq!(found[0].keyword, Some("LIKE "));
        assert_eq!(found[0].decorated, "%:name%");
        assert_eq!(found[0].body, ":name");
        assert_eq!(found[1].keyword, Some("like "));
        assert_eq!(found[1].decorated, "?1%");
    }

    #[test]
    fn test_in_keyword_with_parentheses() {
        let query = "where a in (:ids)";
        let found = matches(query);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].keyword, Some("in "));
        assert_eq!(found[0].span.slice(query), "in (:ids)");
        assert_eq!(found[0].decorated_span.slice(query), ":ids");
    }

    #[test]
    fn test_keyword_requires_word_boundary() {
        let found = matches("select j from Join j where j.origin = :o");
        assert_eq!(found.len(), 1);
        assert!(found[0].keyword.is_none());
    }

    #[test]
    fn test_expression() {
        let found = matches("where a = ?#{[0]} and b = :#{#user.name}");
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].expression, Some("[0]"));
        assert_eq!(found[0].body, "?#{[0]}");
        assert_eq!(found[0].index, None);
        assert_eq!(found[1].expression, Some("#user.name"));
        assert_eq!(found[1].name, None);
    }

    #[test]
    fn test_greatest_index() {
        assert_eq!(greatest_index("no parameters").unwrap(), None);
        assert_eq!(greatest_index("?3 ?1 '?7'").unwrap(), Some(7));
        assert_eq!(greatest_index("?#{expr}").unwrap(), None);
    }

    #[test]
    fn test_greatest_index_overflow() {
        let err = greatest_index("?99999999999").unwrap_err();
        assert_eq!(err, BindingError::IndexOutOfRange(String::from("99999999999")));
    }
}
