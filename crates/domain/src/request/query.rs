//! Query parameter types

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// A query parameter key-value pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryParam {
    /// The parameter key
    pub key: String,
    /// The parameter value
    pub value: String,
}

impl QueryParam {
    /// Creates a new query parameter.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// An ordered collection of query parameters.
///
/// Repeated keys are allowed and sent in order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueryParams {
    items: Vec<QueryParam>,
}

impl QueryParams {
    /// Creates an empty query parameter collection.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Adds a query parameter to the collection.
    pub fn add(&mut self, param: QueryParam) {
        self.items.push(param);
    }

    /// Parses an url-encoded string such as `name=test&page=2` and appends its pairs.
    ///
    /// A leading `?` is ignored.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidQuery` if the string is not url-encoded pairs.
    pub fn extend_from_str(&mut self, raw: &str) -> DomainResult<()> {
        let raw = raw.strip_prefix('?').unwrap_or(raw);
        let pairs: Vec<(String, String)> = serde_urlencoded::from_str(raw)
            .map_err(|e| DomainError::InvalidQuery(format!("{e}: {raw}")))?;
        self.items
            .extend(pairs.into_iter().map(|(k, v)| QueryParam::new(k, v)));
        Ok(())
    }

    /// Serializes a flat struct or map into pairs and appends them.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidQuery` if the value is not a flat key-value shape.
    pub fn extend_from_serialize<T: Serialize + ?Sized>(&mut self, value: &T) -> DomainResult<()> {
        let encoded = serde_urlencoded::to_string(value)
            .map_err(|e| DomainError::InvalidQuery(e.to_string()))?;
        self.extend_from_str(&encoded)
    }

    /// Returns the parameters as `(key, value)` pairs.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.items.iter().map(|p| (p.key.as_str(), p.value.as_str()))
    }

    /// Returns all parameters.
    #[must_use]
    pub fn all(&self) -> &[QueryParam] {
        &self.items
    }

    /// Returns the number of parameters.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if there are no parameters.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl FromIterator<QueryParam> for QueryParams {
    fn from_iter<T: IntoIterator<Item = QueryParam>>(iter: T) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::BTreeMap;

    #[test]
    fn test_extend_from_str() {
        let mut params = QueryParams::new();
        params.extend_from_str("?name=test&tag=a&tag=b").unwrap();

        let pairs: Vec<_> = params.pairs().collect();
        assert_eq!(pairs, vec![("name", "test"), ("tag", "a"), ("tag", "b")]);
    }

    #[test]
    fn test_extend_from_str_decodes() {
        let mut params = QueryParams::new();
        params.extend_from_str("q=hello+world&x=%2F").unwrap();

        assert_eq!(params.all()[0].value, "hello world");
        assert_eq!(params.all()[1].value, "/");
    }

    #[test]
    fn test_extend_from_serialize() {
        let mut map = BTreeMap::new();
        map.insert("page", 2);
        map.insert("limit", 10);

        let mut params = QueryParams::new();
        params.extend_from_serialize(&map).unwrap();

        let pairs: Vec<_> = params.pairs().collect();
        assert_eq!(pairs, vec![("limit", "10"), ("page", "2")]);
    }

    #[test]
    fn test_extend_from_serialize_rejects_nested() {
        let value = serde_json::json!({"outer": {"inner": 1}});
        let mut params = QueryParams::new();
        assert!(matches!(
            params.extend_from_serialize(&value),
            Err(DomainError::InvalidQuery(_))
        ));
    }
}
