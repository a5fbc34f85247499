//! Ordered, deduplicated collection of bindings.

use super::ParameterBinding;
use crate::parser::{BindingError, Result};

/// The bindings of one query in first-seen order.
///
/// Registering a binding equal to an existing one is a no-op. Registering
/// a binding that shares a name or position with an existing one but
/// differs from it is an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindingRegistry {
    bindings: Vec<ParameterBinding>,
}

impl BindingRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            bindings: Vec::new(),
        }
    }

    /// Adds `binding` unless an equal binding is already registered.
    ///
    /// # Errors
    ///
    /// Returns [`BindingError::ConflictingBinding`] if a binding with the
    /// same key but a different shape is already registered.
    pub fn register(&mut self, binding: ParameterBinding) -> Result<()> {
        match self.bindings.iter().find(|b| b.key() == binding.key()) {
            Some(existing) if *existing == binding => Ok(()),
            Some(existing) => Err(BindingError::conflict(existing, binding)),
            None => {
                self.bindings.push(binding);
                Ok(())
            }
        }
    }

    /// Returns the registered bindings.
    #[must_use]
    pub fn as_slice(&self) -> &[ParameterBinding] {
        &self.bindings
    }

    /// Returns the number of registered bindings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Returns true if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Returns an iterator over the registered bindings.
    pub fn iter(&self) -> std::slice::Iter<'_, ParameterBinding> {
        self.bindings.iter()
    }

    /// Consumes the registry, returning its bindings.
    #[must_use]
    pub fn into_vec(self) -> Vec<ParameterBinding> {
        self.bindings
    }
}

impl<'a> IntoIterator for &'a BindingRegistry {
    type Item = &'a ParameterBinding;
    type IntoIter = std::slice::Iter<'a, ParameterBinding>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
