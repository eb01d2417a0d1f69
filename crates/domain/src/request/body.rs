//! HTTP Request body types

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Content type used when a body is sent without an explicit type.
pub const DEFAULT_CONTENT_TYPE: &str = "application/json";

const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

/// Resolves a content type alias (`json`, `form`, ...) or a full MIME type.
///
/// # Errors
///
/// Returns `DomainError::InvalidContentType` for unknown aliases and malformed MIME types.
pub fn resolve_content_type(kind: &str) -> DomainResult<String> {
    let kind = kind.trim();
    let resolved = match kind.to_ascii_lowercase().as_str() {
        "json" => mime::APPLICATION_JSON.to_string(),
        "text" => mime::TEXT_PLAIN.to_string(),
        "html" => mime::TEXT_HTML.to_string(),
        "xml" => mime::TEXT_XML.to_string(),
        "form" | "urlencoded" | "form-data" => mime::APPLICATION_WWW_FORM_URLENCODED.to_string(),
        "multipart" => mime::MULTIPART_FORM_DATA.to_string(),
        _ if kind.contains('/') => mime::Mime::from_str(kind)
            .map(|m| m.to_string())
            .map_err(|e| DomainError::InvalidContentType(format!("{kind}: {e}")))?,
        _ => return Err(DomainError::InvalidContentType(kind.to_string())),
    };
    Ok(resolved)
}

/// A payload passed to `send`, before it is rendered for a content type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum SendBody {
    /// Raw text, sent verbatim.
    Text(String),
    /// Structured JSON data.
    Json(serde_json::Value),
}

impl SendBody {
    /// Combines a previously sent payload with a new one.
    ///
    /// Two JSON objects merge key by key, the newer value winning. Any other
    /// combination replaces the earlier payload.
    #[must_use]
    pub fn merge(self, next: Self) -> Self {
        use serde_json::Value;

        match (self, next) {
            (Self::Json(Value::Object(mut base)), Self::Json(Value::Object(extra))) => {
                base.extend(extra);
                Self::Json(Value::Object(base))
            }
            (_, next) => next,
        }
    }
}

impl From<&str> for SendBody {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for SendBody {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<serde_json::Value> for SendBody {
    fn from(value: serde_json::Value) -> Self {
        Self::Json(value)
    }
}

/// HTTP request body as it goes over the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RequestBody {
    /// The content type, if a body is present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    /// The body content as a string
    #[serde(default)]
    pub content: String,
}

impl RequestBody {
    /// Creates an empty body.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            content_type: None,
            content: String::new(),
        }
    }

    /// Renders a sent payload for the given content type.
    ///
    /// Text is sent verbatim. JSON is serialized, except under a form content type
    /// where a JSON object is url-encoded.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidBody` when a JSON payload cannot be form-encoded.
    pub fn render(body: &SendBody, content_type: &str) -> DomainResult<Self> {
        let content = match body {
            SendBody::Text(text) => text.clone(),
            SendBody::Json(value) if content_type.starts_with(FORM_URLENCODED) => {
                match value {
                    serde_json::Value::Object(map) => serde_urlencoded::to_string(map)
                        .map_err(|e| DomainError::InvalidBody(e.to_string()))?,
                    other => {
                        return Err(DomainError::InvalidBody(format!(
                            "form bodies must be JSON objects, got {other}"
                        )));
                    }
                }
            }
            SendBody::Json(value) => value.to_string(),
        };

        Ok(Self {
            content_type: Some(content_type.to_string()),
            content,
        })
    }

    /// Returns whether the body is empty or none.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // String::is_empty is not const
    pub fn is_empty(&self) -> bool {
        self.content_type.is_none() || self.content.is_empty()
    }
}
