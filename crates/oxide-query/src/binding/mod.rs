//! Binding model.
//!
//! A [`ParameterBinding`] describes one parameter of a parsed query and how
//! a runtime [`BindValue`] is prepared before it is handed to the database.

mod parameter;
mod registry;
mod value;

pub use parameter::{BindingKey, BindingKind, ParameterBinding, WildcardType};
pub use registry::BindingRegistry;
pub use value::{BindValue, ToBindValue};
