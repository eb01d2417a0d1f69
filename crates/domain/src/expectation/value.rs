//! Untyped expectation values.

use serde::Serialize;

use super::canonical::to_canonical_value;

/// One argument of an expectation declaration.
///
/// The variant is the runtime shape the classifier dispatches on.
#[derive(Debug, Clone, PartialEq)]
pub enum ExpectValue {
    /// An integer, read as a status code in first position.
    Int(i64),
    /// Text: a header name, a header value, or a literal body.
    Text(String),
    /// Structured data compared as canonical JSON.
    Structured(serde_json::Value),
    /// A value whose JSON serialization failed; holds the error message.
    Unserializable(String),
}

impl ExpectValue {
    /// Captures any serializable value as structured data.
    ///
    /// Map keys are sorted and struct fields keep their order. Serialization
    /// errors are kept and reported when the body is checked, so declaring
    /// never fails.
    #[must_use]
    pub fn structured<T: Serialize + ?Sized>(value: &T) -> Self {
        match to_canonical_value(value) {
            Ok(value) => Self::from(value),
            Err(e) => Self::Unserializable(e.to_string()),
        }
    }

    /// Short name of the runtime shape, used in log events.
    #[must_use]
    pub const fn shape(&self) -> &'static str {
        match self {
            Self::Int(_) => "int",
            Self::Text(_) => "text",
            Self::Structured(_) => "structured",
            Self::Unserializable(_) => "unserializable",
        }
    }
}

macro_rules! int_value {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for ExpectValue {
                fn from(value: $ty) -> Self {
                    Self::Int(i64::from(value))
                }
            }

            impl From<$ty> for Expectation {
                fn from(value: $ty) -> Self {
                    Self::new(vec![ExpectValue::from(value)])
                }
            }
        )*
    };
}

int_value!(i8, i16, i32, i64, u8, u16, u32);

// Values above `i64::MAX` saturate; no status code or JSON integer body can match them.
macro_rules! wide_int_value {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for ExpectValue {
                fn from(value: $ty) -> Self {
                    Self::Int(i64::try_from(value).unwrap_or(i64::MAX))
                }
            }

            impl From<$ty> for Expectation {
                fn from(value: $ty) -> Self {
                    Self::new(vec![ExpectValue::from(value)])
                }
            }
        )*
    };
}

wide_int_value!(u64, usize);

impl From<&str> for ExpectValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ExpectValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<serde_json::Value> for ExpectValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::String(text) => Self::Text(text),
            other => Self::Structured(other),
        }
    }
}

/// The values of one `expect` call, in declaration order.
///
/// Well-formed expectations hold one or two values; the length is checked when
/// the expectation is classified, not when it is declared.
#[derive(Debug, Clone, PartialEq)]
pub struct Expectation {
    args: Vec<ExpectValue>,
}

impl Expectation {
    /// Creates an expectation from raw values of any length.
    #[must_use]
    pub const fn new(args: Vec<ExpectValue>) -> Self {
        Self { args }
    }

    /// Expects an exact status code.
    #[must_use]
    pub fn status(code: u16) -> Self {
        Self::new(vec![ExpectValue::from(code)])
    }

    /// Expects a header to equal `value`.
    #[must_use]
    pub fn header(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(vec![
            ExpectValue::Text(name.into()),
            ExpectValue::Text(value.into()),
        ])
    }

    /// Expects the body to match a literal string.
    #[must_use]
    pub fn body(literal: impl Into<String>) -> Self {
        Self::new(vec![ExpectValue::Text(literal.into())])
    }

    /// Expects the body to match the canonical JSON form of `value`.
    #[must_use]
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Self {
        Self::new(vec![ExpectValue::structured(value)])
    }

    /// Expects a status code and a body, checked in that order.
    #[must_use]
    pub fn status_and_body(code: u16, body: impl Into<ExpectValue>) -> Self {
        Self::new(vec![ExpectValue::from(code), body.into()])
    }

    /// Returns the declared values.
    #[must_use]
    pub fn args(&self) -> &[ExpectValue] {
        &self.args
    }

    /// Consumes the expectation, returning its values.
    #[must_use]
    pub fn into_args(self) -> Vec<ExpectValue> {
        self.args
    }
}

impl From<ExpectValue> for Expectation {
    fn from(value: ExpectValue) -> Self {
        Self::new(vec![value])
    }
}

impl From<&str> for Expectation {
    fn from(value: &str) -> Self {
        Self::new(vec![ExpectValue::from(value)])
    }
}

impl From<String> for Expectation {
    fn from(value: String) -> Self {
        Self::new(vec![ExpectValue::from(value)])
    }
}

impl From<serde_json::Value> for Expectation {
    fn from(value: serde_json::Value) -> Self {
        Self::new(vec![ExpectValue::from(value)])
    }
}

impl<A, B> From<(A, B)> for Expectation
where
    A: Into<ExpectValue>,
    B: Into<ExpectValue>,
{
    fn from((first, second): (A, B)) -> Self {
        Self::new(vec![first.into(), second.into()])
    }
}
