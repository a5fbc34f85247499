//! Tests for placeholders without a binding keyword.

mod common;
use common::*;

use oxide_query::{BindingKind, DeclaredQuery, ParameterBinding};

#[test]
fn no_placeholders() {
    let query = "select u from User u where u.active = true";
    let parsed = parse(query);
    assert_eq!(parsed.cleaned_text(), query);
    assert!(parsed.bindings().is_empty());
    assert!(!parsed.has_parameter_bindings());
    assert!(!parsed.has_named_parameter());
}

#[test]
fn positional_placeholders() {
    let query = "select u from User u where u.firstname = ?1 and u.lastname = ?2";
    let parsed = parse(query);
    assert_eq!(parsed.cleaned_text(), query);
    assert_eq!(
        parsed.bindings(),
        [ParameterBinding::positional(1), ParameterBinding::positional(2)]
    );
    assert!(parsed.has_parameter_bindings());
    assert!(!parsed.has_named_parameter());
    round_trip(query);
}

#[test]
fn positional_order_is_first_seen() {
    assert_eq!(
        bindings("where a = ?2 or b = ?1"),
        [ParameterBinding::positional(2), ParameterBinding::positional(1)]
    );
}

#[test]
fn named_placeholder() {
    let parsed = parse("select u from User u where u.lastname = :lastname");
    assert_eq!(parsed.bindings(), [ParameterBinding::named("lastname")]);
    assert_eq!(parsed.bindings()[0].kind(), BindingKind::Plain);
    assert!(parsed.has_named_parameter());
    round_trip("select u from User u where u.lastname = :lastname");
}

#[test]
fn repeated_placeholder_is_deduplicated() {
    let parsed = parse("where u.first = :name or u.last = :name or u.id = ?1 or u.x = ?1");
    assert_eq!(
        parsed.bindings(),
        [ParameterBinding::named("name"), ParameterBinding::positional(1)]
    );
}

#[test]
fn parenthesized_placeholder() {
    let query = "where u.id = (:id) and u.age > (?1)";
    let parsed = parse(query);
    assert_eq!(parsed.cleaned_text(), query);
    assert_eq!(
        parsed.bindings(),
        [ParameterBinding::named("id"), ParameterBinding::positional(1)]
    );
}

#[test]
fn decoration_without_keyword_is_kept() {
    let query = "where u.name = %:name%";
    let parsed = parse(query);
    assert_eq!(parsed.cleaned_text(), query);
    assert_eq!(parsed.bindings(), [ParameterBinding::named("name")]);
}

#[test]
fn double_colon_cast_is_not_a_parameter() {
    let query = "select cast(u.age as text)::varchar from User u where u.id = :id";
    assert_eq!(bindings(query), [ParameterBinding::named("id")]);
}

#[test]
fn named_parameter_with_dotted_identifier() {
    assert_eq!(
        bindings("where u.name = :user.name"),
        [ParameterBinding::named("user.name")]
    );
}
