#![allow(dead_code)]

use oxide_query::{BindingError, ParameterBinding, ParsedQuery};

pub fn parse(query: &str) -> ParsedQuery {
    ParsedQuery::new(query).unwrap_or_else(|e| panic!("Failed to parse: {query}\nError: {e:?}"))
}

pub fn parse_err(query: &str) -> BindingError {
    ParsedQuery::new(query).expect_err(&format!("Expected binding error for: {query}"))
}

pub fn bindings(query: &str) -> Vec<ParameterBinding> {
    parse(query).bindings().to_vec()
}

/// Verifies that re-parsing the cleaned text is a fixed point: the same
/// cleaned text comes back with the same bindings.
pub fn round_trip(query: &str) {
    let first = parse(query);
    let second = parse(first.cleaned_text());
    assert_eq!(
        first.cleaned_text(),
        second.cleaned_text(),
        "Round-trip changed the text.\n  Input:  {query}\n  First:  {}\n  Second: {}",
        first.cleaned_text(),
        second.cleaned_text()
    );
    assert_eq!(
        first.bindings(),
        second.bindings(),
        "Round-trip changed the bindings for: {query}"
    );
}
