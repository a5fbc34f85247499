//! Runtime values handed to [`ParameterBinding::prepare`].
//!
//! [`ParameterBinding::prepare`]: super::ParameterBinding::prepare

use core::fmt;

use serde::Serialize;

/// A runtime value supplied for a query parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BindValue {
    /// NULL value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Float value.
    Float(f64),
    /// Text value.
    Text(String),
    /// Binary blob value.
    Blob(Vec<u8>),
    /// An array-like value, bound as one parameter unless expanded.
    Array(Vec<BindValue>),
    /// An ordered collection of values, as produced by IN bindings.
    List(Vec<BindValue>),
}

impl BindValue {
    /// Returns true for [`BindValue::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns true for array-like values.
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, Self::Array(_))
    }
}

/// Stringifies a value the way LIKE bindings need it: text is written
/// verbatim, blobs as upper-case hex.
impl fmt::Display for BindValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Text(s) => f.write_str(s),
            Self::Blob(bytes) => bytes.iter().try_for_each(|byte| write!(f, "{byte:02X}")),
            Self::Array(items) | Self::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
        }
    }
}

impl From<&str> for BindValue {
    fn from(value: &str) -> Self {
        Self::Text(String::from(value))
    }
}

impl From<String> for BindValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Trait for types that can be converted to bind values.
pub trait ToBindValue {
    /// Converts the value to a `BindValue`.
    fn to_bind_value(self) -> BindValue;
}

impl ToBindValue for BindValue {
    fn to_bind_value(self) -> BindValue {
        self
    }
}

impl ToBindValue for bool {
    fn to_bind_value(self) -> BindValue {
        BindValue::Bool(self)
    }
}

impl ToBindValue for i64 {
    fn to_bind_value(self) -> BindValue {
        BindValue::Int(self)
    }
}

impl ToBindValue for i32 {
    fn to_bind_value(self) -> BindValue {
        BindValue::Int(i64::from(self))
    }
}

impl ToBindValue for u32 {
    fn to_bind_value(self) -> BindValue {
        BindValue::Int(i64::from(self))
    }
}

impl ToBindValue for f64 {
    fn to_bind_value(self) -> BindValue {
        BindValue::Float(self)
    }
}

impl ToBindValue for String {
    fn to_bind_value(self) -> BindValue {
        BindValue::Text(self)
    }
}

impl ToBindValue for &str {
    fn to_bind_value(self) -> BindValue {
        BindValue::Text(String::from(self))
    }
}

impl<T: ToBindValue> ToBindValue for Option<T> {
    fn to_bind_value(self) -> BindValue {
        self.map_or(BindValue::Null, ToBindValue::to_bind_value)
    }
}

impl ToBindValue for Vec<u8> {
    fn to_bind_value(self) -> BindValue {
        BindValue::Blob(self)
    }
}

impl<T: ToBindValue, const N: usize> ToBindValue for [T; N] {
    fn to_bind_value(self) -> BindValue {
        BindValue::Array(self.into_iter().map(ToBindValue::to_bind_value).collect())
    }
}

/// JSON arrays are array-like; objects are bound as their JSON text.
impl ToBindValue for serde_json::Value {
    fn to_bind_value(self) -> BindValue {
        use serde_json::Value;

        match self {
            Value::Null => BindValue::Null,
            Value::Bool(b) => BindValue::Bool(b),
            Value::Number(n) => n
                .as_i64()
                .map_or_else(|| BindValue::Float(n.as_f64().unwrap_or(f64::NAN)), BindValue::Int),
            Value::String(s) => BindValue::Text(s),
            Value::Array(items) => {
                BindValue::Array(items.into_iter().map(ToBindValue::to_bind_value).collect())
            }
            object @ Value::Object(_) => BindValue::Text(object.to_string()),
        }
    }
}
