//! Request specification type

use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

use super::{Headers, HttpMethod, QueryParams, RequestBody};
use crate::error::{DomainError, DomainResult};

/// Resolves `path` against `host` as a relative reference.
///
/// `http://api.test/v1/` joined with `users` gives `http://api.test/v1/users`;
/// an absolute path such as `/users` replaces the host's path.
///
/// # Errors
///
/// Returns `DomainError::InvalidUrl` when the host is not an absolute URL or the
/// joined result cannot be parsed.
pub fn resolve_url(host: &str, path: &str) -> DomainResult<Url> {
    let base = Url::parse(host).map_err(|e| DomainError::InvalidUrl(format!("{e}: {host}")))?;
    base.join(path)
        .map_err(|e| DomainError::InvalidUrl(format!("{e}: {path}")))
}

/// Everything the transport needs to send one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestSpec {
    /// Identifier used to correlate log events for this request
    pub id: Uuid,
    /// HTTP method
    pub method: HttpMethod,
    /// Fully resolved target URL, without the declared query parameters
    pub url: String,
    /// HTTP headers
    #[serde(default)]
    pub headers: Headers,
    /// Query parameters appended by the transport
    #[serde(default)]
    pub query: QueryParams,
    /// Request body
    #[serde(default)]
    pub body: RequestBody,
}

impl RequestSpec {
    /// Creates a request with no headers, query or body.
    #[must_use]
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            method,
            url: url.into(),
            headers: Headers::new(),
            query: QueryParams::new(),
            body: RequestBody::none(),
        }
    }

    /// Returns the URL with the query parameters appended.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is malformed.
    pub fn full_url(&self) -> Result<Url, url::ParseError> {
        let mut url = Url::parse(&self.url)?;
        if !self.query.is_empty() {
            url.query_pairs_mut().extend_pairs(self.query.pairs());
        }
        Ok(url)
    }
}
