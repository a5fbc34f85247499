//! # oxide-query
//!
//! Parameter binding extraction for object-query language strings.
//!
//! This crate provides:
//! - A quotation-aware, single-pass scanner for positional (`?1`), named
//!   (`:name`) and expression (`?#{...}`, `:#{...}`) placeholders
//! - LIKE wildcard inference from `%` decorations (`like %:name%`)
//! - IN bindings that expand array-like values into collections
//! - Conflict detection for parameters bound more than once
//!
//! ## Cleaning a query
//!
//! Decorated and expression placeholders are rewritten into canonical form;
//! the decoration lives on in the binding and is applied to the runtime value:
//!
//! ```rust
//! use oxide_query::{BindValue, ParsedQuery};
//!
//! let query = ParsedQuery::new(
//!     "select u from User u where u.name like %?1% and u.role = ?#{principal.role}",
//! )
//! .unwrap();
//!
//! assert_eq!(
//!     query.cleaned_text(),
//!     "select u from User u where u.name like ?1 and u.role = ?2",
//! );
//!
//! let name = &query.bindings()[0];
//! assert_eq!(name.prepare(BindValue::from("ann")), BindValue::from("%ann%"));
//!
//! let role = &query.bindings()[1];
//! assert_eq!(role.position(), Some(2));
//! assert_eq!(role.expression(), Some("principal.role"));
//! ```
//!
//! ## String literals
//!
//! Placeholder syntax inside quoted literals is left alone:
//!
//! ```rust
//! use oxide_query::{DeclaredQuery, ParsedQuery};
//!
//! let query = ParsedQuery::new("select u from User u where u.note = '?1 is not a param'").unwrap();
//! assert!(!query.has_parameter_bindings());
//! ```

pub mod binding;
pub mod lexer;
pub mod parser;
pub mod query;

pub use binding::{
    BindValue, BindingKey, BindingKind, BindingRegistry, ParameterBinding, ToBindValue,
    WildcardType,
};
pub use lexer::{QuotationMap, Span};
pub use parser::{BindingError, Parser, Result};
pub use query::{DeclaredQuery, ParsedQuery, QueryAnalyzer};
