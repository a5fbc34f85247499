//! Binding extraction.
//!
//! Walks the placeholders of a query left to right, turns each into a
//! [`ParameterBinding`] and rewrites decorated and expression placeholders
//! into their canonical `?n` / `:name` form.

use tracing::{debug, trace};

use super::error::{BindingError, Result};
use crate::binding::{BindingKind, BindingRegistry, ParameterBinding, WildcardType};
use crate::lexer::{greatest_index, PlaceholderMatch, Placeholders, QuotationMap, Span};

/// Prefix of the names synthesized for expression placeholders when the
/// query binds by name.
pub const SYNTHETIC_PREFIX: &str = "__synthetic__";

/// How synthetic identifiers for expression placeholders are allocated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Numbering {
    /// Expressions become `?n`, numbered after the greatest literal index.
    Positional,
    /// Expressions become `:__synthetic__n`.
    Named,
}

/// Binding type selected by the keyword in front of a placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BindingType {
    Like,
    In,
    AsIs,
}

impl BindingType {
    fn of(keyword: Option<&str>) -> Result<Self> {
        let Some(keyword) = keyword.map(str::trim).filter(|k| !k.is_empty()) else {
            return Ok(Self::AsIs);
        };
        if keyword.eq_ignore_ascii_case("like") {
            Ok(Self::Like)
        } else if keyword.eq_ignore_ascii_case("in") {
            Ok(Self::In)
        } else {
            Err(BindingError::UnsupportedBindingKeyword(String::from(keyword)))
        }
    }
}

/// The outcome of a successful extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    /// The query with canonical placeholders.
    pub query: String,
    /// The bindings in first-seen order.
    pub bindings: BindingRegistry,
    /// How expression placeholders were numbered.
    pub numbering: Numbering,
}

/// Extracts parameter bindings from a query string.
#[derive(Debug)]
pub struct Parser<'a> {
    input: &'a str,
    quotations: QuotationMap,
    numbering: Numbering,
    /// Last synthetic identifier handed out.
    counter: u32,
    registry: BindingRegistry,
    cleaned: String,
    /// Byte offset in `input` up to which `cleaned` has been written.
    copied: usize,
}

impl<'a> Parser<'a> {
    /// Creates a parser for `input`.
    ///
    /// Positional numbering is selected when the text contains a literal
    /// `?<digits>` anywhere, or when it contains `?#{` and no such index.
    /// Synthetic positions then start after the greatest literal index.
    ///
    /// # Errors
    ///
    /// Returns an error if `input` is blank, contains an unterminated
    /// quoted literal, or a positional index that overflows.
    pub fn new(input: &'a str) -> Result<Self> {
        if input.trim().is_empty() {
            return Err(BindingError::EmptyQuery);
        }

        let (numbering, counter) = match greatest_index(input)? {
            Some(index) => (Numbering::Positional, index),
            None if input.contains("?#{") => (Numbering::Positional, 0),
            None => (Numbering::Named, 0),
        };
        let quotations = QuotationMap::new(input)?;

        Ok(Self {
            input,
            quotations,
            numbering,
            counter,
            registry: BindingRegistry::new(),
            cleaned: String::with_capacity(input.len()),
            copied: 0,
        })
    }

    /// Returns how expression placeholders will be numbered.
    #[must_use]
    pub const fn numbering(&self) -> Numbering {
        self.numbering
    }

    /// Runs the extraction.
    ///
    /// # Errors
    ///
    /// Returns an error on an unsupported binding keyword or when two
    /// placeholders for the same parameter disagree.
    pub fn parse(mut self) -> Result<Extraction> {
        for placeholder in Placeholders::new(self.input) {
            if self.quotations.is_quoted(placeholder.span.start) {
                trace!(placeholder = placeholder.body, "skipping quoted placeholder");
                continue;
            }
            self.bind(&placeholder)?;
        }

        self.cleaned.push_str(&self.input[self.copied..]);
        debug!(
            bindings = self.registry.len(),
            numbering = ?self.numbering,
            "extracted parameter bindings"
        );

        Ok(Extraction {
            query: self.cleaned,
            bindings: self.registry,
            numbering: self.numbering,
        })
    }

    fn bind(&mut self, placeholder: &PlaceholderMatch<'_>) -> Result<()> {
        let mut position = placeholder.position()?;
        let mut name = match position {
            Some(_) => None,
            None => placeholder.name.map(String::from),
        };
        let mut expression = None;
        let mut replacement = None;

        if position.is_none() && name.is_none() {
            let (synthetic_position, synthetic_name, token) = self.next_synthetic()?;
            position = synthetic_position;
            name = synthetic_name;
            replacement = Some(token);
            expression = placeholder.expression.map(String::from);
        }

        let kind = match BindingType::of(placeholder.keyword)? {
            BindingType::Like => {
                if replacement.is_none() {
                    replacement = Some(String::from(placeholder.body));
                }
                BindingKind::Like(WildcardType::from_decorated(placeholder.decorated))
            }
            BindingType::In => BindingKind::In,
            BindingType::AsIs => BindingKind::Plain,
        };

        let binding = ParameterBinding::try_new(kind, name, position, expression)?;
        self.registry.register(binding)?;

        if let Some(replacement) = replacement {
            self.replace(placeholder.decorated_span, &replacement);
        }
        Ok(())
    }

    /// Allocates the next synthetic identifier and its placeholder token.
    fn next_synthetic(&mut self) -> Result<(Option<u32>, Option<String>, String)> {
        self.counter = self
            .counter
            .checked_add(1)
            .ok_or_else(|| BindingError::IndexOutOfRange(format!("{}+1", self.counter)))?;

        let synthetic = match self.numbering {
            Numbering::Positional => (Some(self.counter), None, format!("?{}", self.counter)),
            Numbering::Named => {
                let name = format!("{SYNTHETIC_PREFIX}{}", self.counter);
                let token = format!(":{name}");
                (None, Some(name), token)
            }
        };
        trace!(token = %synthetic.2, "synthesized expression parameter");
        Ok(synthetic)
    }

    /// Replaces the placeholder at `span` in the output.
    ///
    /// Replacement is by offset, so an identical placeholder text elsewhere
    /// in the query (inside a literal, for instance) is left untouched.
    fn replace(&mut self, span: Span, replacement: &str) {
        self.cleaned.push_str(&self.input[self.copied..span.start]);
        self.cleaned.push_str(replacement);
        self.copied = span.end;
    }
}
