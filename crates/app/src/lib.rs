//! Vouch - fluent HTTP expectations for Rust tests
//!
//! Declare a request, chain expectations on its status, headers and body,
//! then `end()` it: the request is sent once and every expectation is checked
//! in declaration order.
//!
//! ```ignore
//! #[tokio::test]
//! async fn lists_users() {
//!     vouch::request("http://localhost:8080")
//!         .get("/users")
//!         .query("page=2")
//!         .expect(200)
//!         .expect(("Content-Type", "application/json"))
//!         .end()
//!         .await;
//! }
//! ```
//!
//! `request` panics on the first failed expectation. `request_with_reporter`
//! routes failures to a [`Reporter`] instead, so a test can collect them all;
//! [`TestReporter`] fails the test when it is dropped.

use std::sync::Arc;

pub use vouch_application::{
    Agent, ApplicationError, ApplicationResult, FailureChannel, Reporter, Transport,
    TransportError,
};
pub use vouch_domain::{
    Cookie, EvaluationReport, ExpectValue, Expectation, Failure, FailureKind, HttpMethod,
    ResponseSnapshot, SendBody, Verdict,
};
pub use vouch_infrastructure::{
    ConfigError, RecordingReporter, ReqwestTransport, TestReporter, TracingReporter,
    TransportConfig, init_tracing,
};

/// Builds the reqwest transport from `VOUCH_*` environment variables.
///
/// # Errors
///
/// Returns `ApplicationError::Config` for malformed variables and
/// `ApplicationError::Transport` if the HTTP client cannot be created.
pub fn transport_from_env() -> ApplicationResult<Arc<dyn Transport>> {
    let config =
        TransportConfig::from_env().map_err(|e| ApplicationError::Config(e.to_string()))?;
    let transport =
        ReqwestTransport::new(&config).map_err(|e| ApplicationError::Transport(e.to_string()))?;
    Ok(Arc::new(transport))
}

/// Creates an agent for `host` that panics on the first failure.
///
/// # Errors
///
/// See [`transport_from_env`].
pub fn try_request(host: &str) -> ApplicationResult<Agent> {
    Ok(Agent::new(host, transport_from_env()?, FailureChannel::Abort))
}

/// Creates an agent for `host` that forwards failures to `reporter`.
///
/// # Errors
///
/// See [`transport_from_env`].
pub fn try_request_with_reporter(
    host: &str,
    reporter: Arc<dyn Reporter>,
) -> ApplicationResult<Agent> {
    Ok(Agent::new(
        host,
        transport_from_env()?,
        FailureChannel::report(reporter),
    ))
}

/// Creates an agent for `host` that panics on the first failure.
///
/// # Panics
///
/// Panics if the transport cannot be configured.
#[must_use]
#[allow(clippy::panic)]
pub fn request(host: &str) -> Agent {
    try_request(host).unwrap_or_else(|e| panic!("{e}"))
}

/// Creates an agent for `host` that forwards failures to `reporter`.
///
/// # Panics
///
/// Panics if the transport cannot be configured.
#[must_use]
#[allow(clippy::panic)]
pub fn request_with_reporter(host: &str, reporter: Arc<dyn Reporter>) -> Agent {
    try_request_with_reporter(host, reporter).unwrap_or_else(|e| panic!("{e}"))
}
