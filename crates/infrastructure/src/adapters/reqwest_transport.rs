//! Transport implementation using reqwest.
//!
//! This adapter implements the `Transport` port: it sends one `RequestSpec`
//! and captures status, headers and body into a `ResponseSnapshot`.

use std::time::Instant;

use async_trait::async_trait;
use reqwest::{Client, Method};
use tracing::debug;
use vouch_application::ports::{Transport, TransportError};
use vouch_domain::{HttpMethod, RequestSpec, ResponseSnapshot};

use crate::config::TransportConfig;

/// Transport backed by `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
    timeout_ms: u64,
    max_redirects: usize,
}

impl ReqwestTransport {
    /// Creates a transport from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns `TransportError::Other` if the client cannot be created.
    pub fn new(config: &TransportConfig) -> Result<Self, TransportError> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .build()
            .map_err(|e| TransportError::Other(e.to_string()))?;

        Ok(Self {
            client,
            timeout_ms: config.timeout_ms(),
            max_redirects: config.max_redirects,
        })
    }

    /// Creates a transport around an existing reqwest client.
    ///
    /// `config` is only used to describe timeouts and redirect failures.
    #[must_use]
    pub fn with_client(client: Client, config: &TransportConfig) -> Self {
        Self {
            client,
            timeout_ms: config.timeout_ms(),
            max_redirects: config.max_redirects,
        }
    }

    const fn to_reqwest_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Patch => Method::PATCH,
            HttpMethod::Delete => Method::DELETE,
            HttpMethod::Head => Method::HEAD,
            HttpMethod::Options => Method::OPTIONS,
        }
    }

    fn map_error(&self, error: &reqwest::Error) -> TransportError {
        if error.is_timeout() {
            return TransportError::Timeout {
                timeout_ms: self.timeout_ms,
            };
        }

        if error.is_redirect() {
            return TransportError::TooManyRedirects {
                max: self.max_redirects,
            };
        }

        let host = || {
            error
                .url()
                .and_then(|u| u.host_str())
                .unwrap_or("unknown")
                .to_string()
        };

        if error.is_connect() {
            let message = error_chain(error);
            let lower = message.to_lowercase();
            if lower.contains("dns") || lower.contains("resolve") {
                return TransportError::DnsError {
                    host: host(),
                    message,
                };
            }
            if lower.contains("refused") {
                return TransportError::ConnectionRefused {
                    host: host(),
                    port: error
                        .url()
                        .and_then(reqwest::Url::port_or_known_default)
                        .unwrap_or(80),
                };
            }
            return TransportError::ConnectionFailed(message);
        }

        if error.is_body() || error.is_decode() {
            return TransportError::Body(error_chain(error));
        }

        TransportError::Other(error_chain(error))
    }
}

/// Joins an error with its sources; reqwest keeps the useful detail there.
fn error_chain(error: &dyn std::error::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: &RequestSpec) -> Result<ResponseSnapshot, TransportError> {
        let url = request
            .full_url()
            .map_err(|e| TransportError::InvalidUrl(format!("{e}: {}", request.url)))?;

        let mut builder = self
            .client
            .request(Self::to_reqwest_method(request.method), url);

        for header in request.headers.iter() {
            builder = builder.header(header.name.as_str(), header.value.as_str());
        }

        if !request.body.is_empty() {
            builder = builder.body(request.body.content.clone());
        }

        let start = Instant::now();
        let response = builder.send().await.map_err(|e| self.map_error(&e))?;

        let status = response.status().as_u16();
        let headers: Vec<(String, String)> = response
            .headers()
            .iter()
            .map(|(k, v)| {
                (
                    k.to_string(),
                    String::from_utf8_lossy(v.as_bytes()).into_owned(),
                )
            })
            .collect();

        let body = response
            .bytes()
            .await
            .map_err(|e| self.map_error(&e))?
            .to_vec();
        let duration = start.elapsed();

        debug!(
            request_id = %request.id,
            status,
            elapsed_ms = duration.as_millis(),
            bytes = body.len(),
            "transport round-trip"
        );

        Ok(ResponseSnapshot::new(status, headers, body, duration))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    #[test]
    fn test_to_reqwest_method() {
        assert_eq!(
            ReqwestTransport::to_reqwest_method(HttpMethod::Get),
            Method::GET
        );
        assert_eq!(
            ReqwestTransport::to_reqwest_method(HttpMethod::Post),
            Method::POST
        );
        assert_eq!(
            ReqwestTransport::to_reqwest_method(HttpMethod::Head),
            Method::HEAD
        );
        assert_eq!(
            ReqwestTransport::to_reqwest_method(HttpMethod::Options),
            Method::OPTIONS
        );
    }

    #[test]
    fn test_transport_creation() {
        let transport = ReqwestTransport::new(&TransportConfig::default()).unwrap();
        assert_eq!(transport.timeout_ms, 30_000);
        assert_eq!(transport.max_redirects, 10);
    }

    #[test]
    fn test_with_client_uses_config_limits() {
        let config = TransportConfig {
            timeout: Duration::from_millis(250),
            max_redirects: 3,
            ..TransportConfig::default()
        };
        let transport = ReqwestTransport::with_client(Client::new(), &config);
        assert_eq!(transport.timeout_ms, 250);
        assert_eq!(transport.max_redirects, 3);
    }

    #[tokio::test]
    async fn test_invalid_url_is_not_sent() {
        let transport = ReqwestTransport::new(&TransportConfig::default()).unwrap();
        let request = RequestSpec::new(HttpMethod::Get, "::not a url::");

        let result = transport.send(&request).await;
        assert!(matches!(result, Err(TransportError::InvalidUrl(_))));
    }
}
