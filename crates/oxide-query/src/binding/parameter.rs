//! Parameter binding descriptors.

use core::fmt;

use serde::Serialize;

use super::BindValue;
use crate::parser::{BindingError, Result};

/// How a LIKE binding wraps its runtime value with `%`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WildcardType {
    /// `%value%`, written as `like %:x%`.
    Containing,
    /// `value%`, written as `like :x%`.
    StartingWith,
    /// `%value`, written as `like %:x`.
    EndingWith,
    /// The value is used verbatim, written as `like :x`.
    Like,
}

impl WildcardType {
    /// Infers the wildcard type from a decorated placeholder such as `%?1%`.
    #[must_use]
    pub fn from_decorated(decorated: &str) -> Self {
        let leading = decorated.starts_with('%');
        let trailing = decorated.len() > 1 && decorated.ends_with('%');
        match (leading, trailing) {
            (true, true) => Self::Containing,
            (true, false) => Self::EndingWith,
            (false, true) => Self::StartingWith,
            (false, false) => Self::Like,
        }
    }

    /// Wraps `value` with `%` according to this wildcard type.
    #[must_use]
    pub fn apply(self, value: &str) -> String {
        match self {
            Self::Containing => format!("%{value}%"),
            Self::StartingWith => format!("{value}%"),
            Self::EndingWith => format!("%{value}"),
            Self::Like => String::from(value),
        }
    }

    /// Returns the upper-case name of the wildcard type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Containing => "CONTAINING",
            Self::StartingWith => "STARTING_WITH",
            Self::EndingWith => "ENDING_WITH",
            Self::Like => "LIKE",
        }
    }
}

impl fmt::Display for WildcardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The variant of a binding, selected by the keyword preceding the
/// placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "wildcard", rename_all = "lowercase")]
pub enum BindingKind {
    /// No keyword: the value is bound as is.
    Plain,
    /// `like`: the value is wrapped with `%` before binding.
    Like(WildcardType),
    /// `in`: array-like values are expanded into a collection.
    In,
}

/// Identifies the query parameter a binding feeds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BindingKey {
    /// A named parameter, `:name`.
    Name(String),
    /// A positional parameter, `?position`.
    Position(u32),
}

impl fmt::Display for BindingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => write!(f, ":{name}"),
            Self::Position(position) => write!(f, "?{position}"),
        }
    }
}

/// One logical query parameter discovered in a query string.
///
/// Exactly one of name and position is set. Two bindings are equal when
/// their key, expression and kind (wildcard type included) are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ParameterBinding {
    #[serde(flatten)]
    key: BindingKey,
    #[serde(skip_serializing_if = "Option::is_none")]
    expression: Option<String>,
    #[serde(flatten)]
    kind: BindingKind,
}

impl ParameterBinding {
    /// Creates a binding from optional name and position.
    ///
    /// # Errors
    ///
    /// Returns [`BindingError::InvalidBindingConstruction`] if neither or
    /// both of `name` and `position` are set, or if a LIKE binding has a
    /// zero position or a blank name.
    pub fn try_new(
        kind: BindingKind,
        name: Option<String>,
        position: Option<u32>,
        expression: Option<String>,
    ) -> Result<Self> {
        let key = match (name, position) {
            (Some(name), None) => BindingKey::Name(name),
            (None, Some(position)) => BindingKey::Position(position),
            (None, None) => {
                return Err(BindingError::invalid("name or position must be set"));
            }
            (Some(name), Some(position)) => {
                return Err(BindingError::invalid(format!(
                    "name {name} and position {position} are mutually exclusive"
                )));
            }
        };

        if matches!(kind, BindingKind::Like(_)) {
            match &key {
                BindingKey::Position(0) => {
                    return Err(BindingError::invalid("position must be greater than zero"));
                }
                BindingKey::Name(name) if name.trim().is_empty() => {
                    return Err(BindingError::invalid("name must not be empty"));
                }
                _ => {}
            }
        }

        Ok(Self {
            key,
            expression,
            kind,
        })
    }

    /// Creates a plain binding for `?position`.
    #[must_use]
    pub const fn positional(position: u32) -> Self {
        Self {
            key: BindingKey::Position(position),
            expression: None,
            kind: BindingKind::Plain,
        }
    }

    /// Creates a plain binding for `:name`.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            key: BindingKey::Name(name.into()),
            expression: None,
            kind: BindingKind::Plain,
        }
    }

    /// Creates an IN binding for `?position`.
    #[must_use]
    pub const fn in_positional(position: u32) -> Self {
        Self {
            key: BindingKey::Position(position),
            expression: None,
            kind: BindingKind::In,
        }
    }

    /// Creates an IN binding for `:name`.
    #[must_use]
    pub fn in_named(name: impl Into<String>) -> Self {
        Self {
            key: BindingKey::Name(name.into()),
            expression: None,
            kind: BindingKind::In,
        }
    }

    /// Creates a LIKE binding for `?position`.
    ///
    /// # Errors
    ///
    /// Returns [`BindingError::InvalidBindingConstruction`] if `position`
    /// is zero.
    pub fn like_positional(position: u32, wildcard: WildcardType) -> Result<Self> {
        Self::try_new(BindingKind::Like(wildcard), None, Some(position), None)
    }

    /// Creates a LIKE binding for `:name`.
    ///
    /// # Errors
    ///
    /// Returns [`BindingError::InvalidBindingConstruction`] if `name` is
    /// blank.
    pub fn like_named(name: impl Into<String>, wildcard: WildcardType) -> Result<Self> {
        Self::try_new(BindingKind::Like(wildcard), Some(name.into()), None, None)
    }

    /// Attaches the source of the expression whose value feeds this binding.
    #[must_use]
    pub fn with_expression(mut self, expression: impl Into<String>) -> Self {
        self.expression = Some(expression.into());
        self
    }

    /// Returns the key of the binding.
    #[must_use]
    pub const fn key(&self) -> &BindingKey {
        &self.key
    }

    /// Returns the kind of the binding.
    #[must_use]
    pub const fn kind(&self) -> BindingKind {
        self.kind
    }

    /// Returns the parameter name, if the binding is named.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match &self.key {
            BindingKey::Name(name) => Some(name),
            BindingKey::Position(_) => None,
        }
    }

    /// Returns the 1-based position, if the binding is positional.
    #[must_use]
    pub const fn position(&self) -> Option<u32> {
        match self.key {
            BindingKey::Position(position) => Some(position),
            BindingKey::Name(_) => None,
        }
    }

    /// Returns the parameter name.
    ///
    /// # Errors
    ///
    /// Returns [`BindingError::MissingName`] for positional bindings.
    pub fn required_name(&self) -> Result<&str> {
        self.name()
            .ok_or_else(|| BindingError::MissingName(Box::new(self.clone())))
    }

    /// Returns the position.
    ///
    /// # Errors
    ///
    /// Returns [`BindingError::MissingPosition`] for named bindings.
    pub fn required_position(&self) -> Result<u32> {
        self.position()
            .ok_or_else(|| BindingError::MissingPosition(Box::new(self.clone())))
    }

    /// Returns true if this binding is named `name`.
    #[must_use]
    pub fn has_name(&self, name: &str) -> bool {
        self.name() == Some(name)
    }

    /// Returns true if this binding is at `position`.
    #[must_use]
    pub fn has_position(&self, position: u32) -> bool {
        self.position() == Some(position)
    }

    /// Returns the raw expression source, if the value comes from an
    /// expression placeholder.
    #[must_use]
    pub fn expression(&self) -> Option<&str> {
        self.expression.as_deref()
    }

    /// Returns true if the value comes from an expression placeholder.
    #[must_use]
    pub const fn is_expression(&self) -> bool {
        self.expression.is_some()
    }

    /// Returns the wildcard type of a LIKE binding.
    #[must_use]
    pub const fn wildcard(&self) -> Option<WildcardType> {
        match self.kind {
            BindingKind::Like(wildcard) => Some(wildcard),
            BindingKind::Plain | BindingKind::In => None,
        }
    }

    /// Prepares a runtime value for binding to this parameter.
    ///
    /// - plain: the value is returned unchanged;
    /// - LIKE: non-null values are stringified and wrapped with `%`,
    ///   except for [`WildcardType::Like`] which keeps the value as is;
    /// - IN: an [`BindValue::Array`] becomes a [`BindValue::List`] of the
    ///   same elements, anything else is returned unchanged.
    #[must_use]
    pub fn prepare(&self, value: BindValue) -> BindValue {
        match (self.kind, value) {
            (_, BindValue::Null) => BindValue::Null,
            (BindingKind::Like(WildcardType::Like), value) => value,
            (BindingKind::Like(wildcard), value) => {
                BindValue::Text(wildcard.apply(&value.to_string()))
            }
            (BindingKind::In, BindValue::Array(items)) => BindValue::List(items),
            (_, value) => value,
        }
    }
}

impl fmt::Display for ParameterBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            BindingKind::Plain => write!(f, "{}", self.key)?,
            BindingKind::In => write!(f, "in {}", self.key)?,
            BindingKind::Like(wildcard) => {
                let decorated = match wildcard {
                    WildcardType::Containing => format!("%{}%", self.key),
                    WildcardType::StartingWith => format!("{}%", self.key),
                    WildcardType::EndingWith => format!("%{}", self.key),
                    WildcardType::Like => self.key.to_string(),
                };
                write!(f, "like {decorated}")?;
            }
        }
        if let Some(expression) = &self.expression {
            write!(f, " (expression: {expression})")?;
        }
        Ok(())
    }
}
