//! Parser error types.

use thiserror::Error;

use crate::binding::ParameterBinding;

/// Errors raised while extracting parameter bindings from a query.
///
/// Every variant describes an authoring defect in the query text; parsing
/// either succeeds as a whole or fails with one of these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindingError {
    /// The query text is empty or whitespace only.
    #[error("Query must not be empty")]
    EmptyQuery,

    /// A quoted literal is opened but never closed.
    #[error("The string <{query}> starts a quoted range at {start}, but never ends it")]
    MalformedQuotation {
        /// The offending query text.
        query: String,
        /// Byte offset of the opening quote.
        start: usize,
    },

    /// A placeholder is preceded by a keyword other than `like` or `in`.
    #[error("Unsupported parameter binding type {0}")]
    UnsupportedBindingKeyword(String),

    /// Two placeholders share a name or position but bind differently.
    #[error(
        "Already found parameter binding with same index / parameter name but differing binding type! \
         Already have: {existing}, found {found}! \
         If you bind a parameter multiple times make sure they use the same binding"
    )]
    ConflictingBinding {
        /// The binding registered first.
        existing: Box<ParameterBinding>,
        /// The binding that disagrees with it.
        found: Box<ParameterBinding>,
    },

    /// A binding was built from an invalid combination of attributes.
    #[error("Invalid parameter binding: {0}")]
    InvalidBindingConstruction(String),

    /// A positional index does not fit the supported range.
    #[error("Parameter index {0} is out of range")]
    IndexOutOfRange(String),

    /// A name was required from a position keyed binding.
    #[error("Required name for {0} not available")]
    MissingName(Box<ParameterBinding>),

    /// A position was required from a name keyed binding.
    #[error("Required position for {0} not available")]
    MissingPosition(Box<ParameterBinding>),
}

impl BindingError {
    /// Creates an [`BindingError::InvalidBindingConstruction`] error.
    #[must_use]
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidBindingConstruction(reason.into())
    }

    /// Creates a [`BindingError::ConflictingBinding`] error.
    #[must_use]
    pub fn conflict(existing: &ParameterBinding, found: ParameterBinding) -> Self {
        Self::ConflictingBinding {
            existing: Box::new(existing.clone()),
            found: Box::new(found),
        }
    }
}

/// Result type for binding extraction.
pub type Result<T> = std::result::Result<T, BindingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_quotation_message() {
        let err = BindingError::MalformedQuotation {
            query: String::from("select 'x"),
            start: 7,
        };
        assert_eq!(
            err.to_string(),
            "The string <select 'x> starts a quoted range at 7, but never ends it"
        );
    }

    #[test]
    fn test_conflict_message_names_both_bindings() {
        let existing = ParameterBinding::positional(1);
        let found = ParameterBinding::in_positional(1);
        let message = BindingError::conflict(&existing, found).to_string();
        assert!(message.contains("Already have: ?1"));
        assert!(message.contains("found in ?1"));
    }
}
