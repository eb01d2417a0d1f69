//! Domain error types

use thiserror::Error;

/// Domain-level errors raised while declaring a request.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The host or path could not be resolved into a URL.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The content type is neither a known alias nor a MIME type.
    #[error("invalid content type: {0}")]
    InvalidContentType(String),

    /// A query string or query value could not be encoded.
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// The request body is invalid for the given content type.
    #[error("invalid body: {0}")]
    InvalidBody(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
