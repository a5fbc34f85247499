//! Parsed queries.

use serde::Serialize;

use crate::binding::{BindingRegistry, ParameterBinding};
use crate::parser::{Parser, Result};

/// Query analysis that lives outside this crate.
///
/// Alias detection, projection extraction and count query derivation
/// operate on the cleaned query text and are supplied by the caller.
pub trait QueryAnalyzer {
    /// Returns the alias of the root entity, if any.
    fn detect_alias(&self, query: &str) -> Option<String>;

    /// Returns true if the query selects a constructor expression.
    fn has_constructor_expression(&self, query: &str) -> bool;

    /// Returns the projection clause of the query.
    fn projection(&self, query: &str) -> String;

    /// Derives a count query from `query`, optionally counting
    /// `count_projection` instead of the default.
    fn create_count_query(&self, query: &str, count_projection: Option<&str>) -> String;
}

/// A query whose parameter bindings are known.
pub trait DeclaredQuery {
    /// Returns the query text to execute.
    fn query_string(&self) -> &str;

    /// Returns the parameter bindings in first-seen order.
    fn parameter_bindings(&self) -> &[ParameterBinding];

    /// Returns true if the query has any parameter bindings.
    fn has_parameter_bindings(&self) -> bool {
        !self.parameter_bindings().is_empty()
    }

    /// Returns true if any binding is named.
    fn has_named_parameter(&self) -> bool {
        self.parameter_bindings()
            .iter()
            .any(|b| b.name().is_some())
    }

    /// Returns true if the query refers to the pagination parameter from an
    /// expression.
    fn uses_paging(&self) -> bool;

    /// Returns true if the query uses bare `?` parameters.
    fn uses_jdbc_style_parameters(&self) -> bool;
}

/// A query string together with the bindings extracted from it.
///
/// Construction parses the text eagerly and fails on any malformed
/// placeholder syntax; a `ParsedQuery` is immutable afterwards.
///
/// # Example
///
/// ```
/// use oxide_query::{DeclaredQuery, ParsedQuery, WildcardType};
///
/// let query = ParsedQuery::new("select u from User u where u.name like %:name%").unwrap();
/// assert_eq!(query.cleaned_text(), "select u from User u where u.name like :name");
///
/// let binding = &query.bindings()[0];
/// assert_eq!(binding.name(), Some("name"));
/// assert_eq!(binding.wildcard(), Some(WildcardType::Containing));
/// assert!(query.has_named_parameter());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedQuery {
    query: String,
    #[serde(serialize_with = "serialize_bindings")]
    bindings: BindingRegistry,
    uses_paging: bool,
}

fn serialize_bindings<S: serde::Serializer>(
    bindings: &BindingRegistry,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_seq(bindings)
}

impl ParsedQuery {
    /// Parses `query`.
    ///
    /// # Errors
    ///
    /// Returns a [`BindingError`](crate::BindingError) if the text is blank,
    /// has an unterminated quoted literal, an unsupported binding keyword,
    /// or conflicting placeholders for the same parameter.
    pub fn new(query: &str) -> Result<Self> {
        let extraction = Parser::new(query)?.parse()?;
        Ok(Self {
            query: extraction.query,
            bindings: extraction.bindings,
            uses_paging: query.contains("#pageable"),
        })
    }

    /// Returns the query with canonical placeholders.
    #[must_use]
    pub fn cleaned_text(&self) -> &str {
        &self.query
    }

    /// Returns the bindings in first-seen order.
    #[must_use]
    pub fn bindings(&self) -> &[ParameterBinding] {
        self.bindings.as_slice()
    }

    /// Returns the binding named `name`.
    #[must_use]
    pub fn binding_by_name(&self, name: &str) -> Option<&ParameterBinding> {
        self.bindings.iter().find(|b| b.has_name(name))
    }

    /// Returns the binding at `position`.
    #[must_use]
    pub fn binding_at(&self, position: u32) -> Option<&ParameterBinding> {
        self.bindings.iter().find(|b| b.has_position(position))
    }

    /// Returns the alias of the root entity.
    #[must_use]
    pub fn alias(&self, analyzer: &impl QueryAnalyzer) -> Option<String> {
        analyzer.detect_alias(&self.query)
    }

    /// Returns true if the query selects a constructor expression.
    #[must_use]
    pub fn has_constructor_expression(&self, analyzer: &impl QueryAnalyzer) -> bool {
        analyzer.has_constructor_expression(&self.query)
    }

    /// Returns the projection clause.
    #[must_use]
    pub fn projection(&self, analyzer: &impl QueryAnalyzer) -> String {
        analyzer.projection(&self.query)
    }

    /// Returns true if the query projects its root alias.
    #[must_use]
    pub fn is_default_projection(&self, analyzer: &impl QueryAnalyzer) -> bool {
        self.alias(analyzer)
            .is_some_and(|alias| self.projection(analyzer).eq_ignore_ascii_case(&alias))
    }

    /// Derives the count query used for pagination.
    ///
    /// An explicit `count_query` wins; otherwise the analyzer derives one
    /// from this query's cleaned text.
    ///
    /// # Errors
    ///
    /// Returns an error if the resulting count query fails to parse.
    pub fn derive_count_query(
        &self,
        analyzer: &impl QueryAnalyzer,
        count_query: Option<&str>,
        count_projection: Option<&str>,
    ) -> Result<Self> {
        match count_query {
            Some(count_query) => Self::new(count_query),
            None => Self::new(&analyzer.create_count_query(&self.query, count_projection)),
        }
    }
}

impl DeclaredQuery for ParsedQuery {
    fn query_string(&self) -> &str {
        &self.query
    }

    fn parameter_bindings(&self) -> &[ParameterBinding] {
        self.bindings()
    }

    fn uses_paging(&self) -> bool {
        self.uses_paging
    }

    fn uses_jdbc_style_parameters(&self) -> bool {
        false
    }
}
