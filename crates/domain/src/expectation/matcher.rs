//! Body matchers.

use super::ExpectValue;

/// The expected side of a body expectation.
#[derive(Debug, Clone, PartialEq)]
pub enum Matcher {
    /// Compared verbatim for text bodies, used as-is for JSON bodies.
    Literal(String),
    /// Serialized to canonical JSON before comparison.
    Structured(serde_json::Value),
    /// A value whose serialization failed at declaration time.
    Unserializable(String),
}

impl Matcher {
    /// Returns the JSON text this matcher is compared as.
    ///
    /// # Errors
    ///
    /// Returns the serialization error message for unserializable matchers.
    pub fn json_text(&self) -> Result<String, String> {
        match self {
            Self::Literal(text) => Ok(text.clone()),
            Self::Structured(value) => serde_json::to_string(value).map_err(|e| e.to_string()),
            Self::Unserializable(error) => Err(error.clone()),
        }
    }

    /// Returns the literal text, if this is a literal matcher.
    #[must_use]
    pub fn as_literal(&self) -> Option<&str> {
        match self {
            Self::Literal(text) => Some(text),
            _ => None,
        }
    }
}

impl From<ExpectValue> for Matcher {
    fn from(value: ExpectValue) -> Self {
        match value {
            ExpectValue::Text(text) => Self::Literal(text),
            ExpectValue::Int(n) => Self::Structured(serde_json::Value::from(n)),
            ExpectValue::Structured(value) => Self::Structured(value),
            ExpectValue::Unserializable(error) => Self::Unserializable(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_json_text() {
        let literal = Matcher::Literal("{ \"a\": 1 }".to_string());
        assert_eq!(literal.json_text(), Ok("{ \"a\": 1 }".to_string()));

        let structured = Matcher::Structured(json!({"b": [1, 2], "a": null}));
        assert_eq!(structured.json_text(), Ok(r#"{"b":[1,2],"a":null}"#.to_string()));

        let broken = Matcher::Unserializable("key must be a string".to_string());
        assert_eq!(broken.json_text(), Err("key must be a string".to_string()));
    }

    #[test]
    fn test_int_becomes_json_number() {
        let matcher = Matcher::from(ExpectValue::Int(201));
        assert_eq!(matcher.json_text(), Ok("201".to_string()));
        assert_eq!(matcher.as_literal(), None);
    }
}
