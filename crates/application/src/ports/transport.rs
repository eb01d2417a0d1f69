//! Transport port

use async_trait::async_trait;
use thiserror::Error;
use vouch_domain::{DomainError, RequestSpec, ResponseSnapshot};

/// Reasons a request produced no response.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    /// The request could not be built from its declarations.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The resolved URL is malformed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// No response arrived within the configured timeout.
    #[error("request timed out after {timeout_ms}ms")]
    Timeout {
        /// Timeout that elapsed.
        timeout_ms: u64,
    },

    /// The host could not be resolved.
    #[error("DNS lookup failed for {host}: {message}")]
    DnsError {
        /// Host that failed to resolve.
        host: String,
        /// Resolver message.
        message: String,
    },

    /// The server refused the connection.
    #[error("connection refused by {host}:{port}")]
    ConnectionRefused {
        /// Target host.
        host: String,
        /// Target port.
        port: u16,
    },

    /// The connection failed for another reason.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// The redirect limit was exceeded.
    #[error("too many redirects (max {max})")]
    TooManyRedirects {
        /// Configured redirect limit.
        max: usize,
    },

    /// The response body could not be read.
    #[error("failed to read body: {0}")]
    Body(String),

    /// Any other transport failure.
    #[error("{0}")]
    Other(String),
}

impl From<DomainError> for TransportError {
    fn from(error: DomainError) -> Self {
        Self::InvalidRequest(error.to_string())
    }
}

/// Port for executing one HTTP request.
///
/// The transport owns connection handling, TLS, redirects and timeouts. The
/// evaluation driver only sees the resulting snapshot or error.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends the request and captures the response.
    ///
    /// # Errors
    ///
    /// Returns a `TransportError` when no response could be obtained.
    async fn send(&self, request: &RequestSpec) -> Result<ResponseSnapshot, TransportError>;
}
