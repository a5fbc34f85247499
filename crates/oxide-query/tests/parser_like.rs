//! Tests for LIKE bindings and wildcard inference.

mod common;
use common::*;

use oxide_query::{BindValue, BindingKind, ParameterBinding, WildcardType};

fn like_named(name: &str, wildcard: WildcardType) -> ParameterBinding {
    ParameterBinding::like_named(name, wildcard).unwrap()
}

fn like_positional(position: u32, wildcard: WildcardType) -> ParameterBinding {
    ParameterBinding::like_positional(position, wildcard).unwrap()
}

#[test]
fn like_containing() {
    let parsed = parse("select u from User u where u.name like %:x%");
    assert_eq!(parsed.cleaned_text(), "select u from User u where u.name like :x");
    assert_eq!(parsed.bindings(), [like_named("x", WildcardType::Containing)]);
}

#[test]
fn like_starting_with() {
    let parsed = parse("where u.name like :x%");
    assert_eq!(parsed.cleaned_text(), "where u.name like :x");
    assert_eq!(parsed.bindings(), [like_named("x", WildcardType::StartingWith)]);
}

#[test]
fn like_ending_with() {
    let parsed = parse("where u.name like %:x");
    assert_eq!(parsed.cleaned_text(), "where u.name like :x");
    assert_eq!(parsed.bindings(), [like_named("x", WildcardType::EndingWith)]);
}

#[test]
fn like_without_decoration() {
    let parsed = parse("where u.name like :x");
    assert_eq!(parsed.cleaned_text(), "where u.name like :x");
    assert_eq!(parsed.bindings(), [like_named("x", WildcardType::Like)]);
    round_trip("where u.name like :x");
}

#[test]
fn like_positional_decorations() {
    let parsed = parse("where u.first like %?1% and u.last like ?2% and u.nick like %?3");
    assert_eq!(
        parsed.cleaned_text(),
        "where u.first like ?1 and u.last like ?2 and u.nick like ?3"
    );
    assert_eq!(
        parsed.bindings(),
        [
            like_positional(1, WildcardType::Containing),
            like_positional(2, WildcardType::StartingWith),
            like_positional(3, WildcardType::EndingWith),
        ]
    );
}

#[test]
fn like_keyword_is_case_insensitive() {
    let parsed = parse("where u.name LIKE %:x% or u.nick Like :y%");
    assert_eq!(parsed.cleaned_text(), "where u.name LIKE :x or u.nick Like :y");
    assert_eq!(parsed.bindings()[0].wildcard(), Some(WildcardType::Containing));
    assert_eq!(parsed.bindings()[1].wildcard(), Some(WildcardType::StartingWith));
}

#[test]
fn like_with_parentheses() {
    let parsed = parse("where u.name like (%:x%)");
    assert_eq!(parsed.cleaned_text(), "where u.name like (:x)");
    assert_eq!(parsed.bindings(), [like_named("x", WildcardType::Containing)]);
}

#[test]
fn like_repeated_with_same_decoration() {
    let parsed = parse("where u.first like %:x% or u.last like %:x%");
    assert_eq!(parsed.cleaned_text(), "where u.first like :x or u.last like :x");
    assert_eq!(parsed.bindings().len(), 1);
}

#[test]
fn like_expression_positional() {
    let parsed = parse("where u.name like %?#{[0].name}%");
    assert_eq!(parsed.cleaned_text(), "where u.name like ?1");
    let binding = &parsed.bindings()[0];
    assert_eq!(binding.position(), Some(1));
    assert_eq!(binding.expression(), Some("[0].name"));
    assert_eq!(binding.kind(), BindingKind::Like(WildcardType::Containing));
}

#[test]
fn like_expression_named() {
    let parsed = parse("where u.name like :#{#name}% and u.id = :id");
    assert_eq!(
        parsed.cleaned_text(),
        "where u.name like :__synthetic__1 and u.id = :id"
    );
    let binding = &parsed.bindings()[0];
    assert_eq!(binding.name(), Some("__synthetic__1"));
    assert_eq!(binding.wildcard(), Some(WildcardType::StartingWith));
}

#[test]
fn like_prepare_wraps_values() {
    let parsed = parse("where u.name like %?1% and u.code like ?2");
    let containing = &parsed.bindings()[0];
    let verbatim = &parsed.bindings()[1];
    assert_eq!(containing.prepare(BindValue::from("ann")), BindValue::from("%ann%"));
    assert_eq!(containing.prepare(BindValue::Int(7)), BindValue::from("%7%"));
    assert_eq!(containing.prepare(BindValue::Null), BindValue::Null);
    assert_eq!(verbatim.prepare(BindValue::from("a%")), BindValue::from("a%"));
}
