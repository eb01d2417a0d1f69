//! Evaluation driver.
//!
//! An [`Agent`] collects one request's declarations and expectations, sends the
//! request once through a [`Transport`], and checks every expectation against
//! the response in declaration order.
//!
//! # Example
//!
//! ```ignore
//! let transport = Arc::new(ReqwestTransport::new(&TransportConfig::default())?);
//! let report = Agent::new("http://localhost:8080", transport, FailureChannel::Abort)
//!     .get("/users")
//!     .query("page=2")
//!     .expect(200)
//!     .expect(("Content-Type", "application/json"))
//!     .end()
//!     .await;
//! ```

use std::sync::Arc;

use base64::Engine;
use base64::prelude::BASE64_STANDARD;
use serde::Serialize;
use tracing::{Instrument, debug, warn};
use vouch_domain::request::{
    DEFAULT_CONTENT_TYPE, Headers, QueryParams, RequestBody, resolve_content_type, resolve_url,
};
use vouch_domain::{
    Cookie, DomainError, EvaluationReport, Expectation, Failure, HttpMethod, RequestSpec,
    ResponseChecker, ResponseSnapshot, SendBody,
};

use crate::channel::FailureChannel;
use crate::ports::{Transport, TransportError};

/// Builds one request, sends it, and evaluates its expectations.
///
/// Declaration methods take and return the agent by value. `end` consumes it,
/// so nothing can be declared once evaluation has started.
pub struct Agent {
    host: String,
    transport: Arc<dyn Transport>,
    channel: FailureChannel,
    checker: ResponseChecker,
    method: HttpMethod,
    url: Option<String>,
    headers: Headers,
    query: QueryParams,
    cookies: Vec<Cookie>,
    content_type: Option<String>,
    body: Option<SendBody>,
    expectations: Vec<Expectation>,
    errors: Vec<DomainError>,
}

impl Agent {
    /// Creates an agent for requests against `host`.
    #[must_use]
    pub fn new(
        host: impl Into<String>,
        transport: Arc<dyn Transport>,
        channel: FailureChannel,
    ) -> Self {
        Self {
            host: host.into(),
            transport,
            channel,
            checker: ResponseChecker::new(),
            method: HttpMethod::default(),
            url: None,
            headers: Headers::new(),
            query: QueryParams::new(),
            cookies: Vec::new(),
            content_type: None,
            body: None,
            expectations: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Selects the HTTP method and resolves `path` against the host.
    #[must_use]
    pub fn request(mut self, method: HttpMethod, path: &str) -> Self {
        self.method = method;
        match resolve_url(&self.host, path) {
            Ok(url) => self.url = Some(url.into()),
            Err(e) => self.errors.push(e),
        }
        self
    }

    /// `GET path`
    #[must_use]
    pub fn get(self, path: &str) -> Self {
        self.request(HttpMethod::Get, path)
    }

    /// `POST path`
    #[must_use]
    pub fn post(self, path: &str) -> Self {
        self.request(HttpMethod::Post, path)
    }

    /// `PUT path`
    #[must_use]
    pub fn put(self, path: &str) -> Self {
        self.request(HttpMethod::Put, path)
    }

    /// `PATCH path`
    #[must_use]
    pub fn patch(self, path: &str) -> Self {
        self.request(HttpMethod::Patch, path)
    }

    /// `DELETE path`
    #[must_use]
    pub fn delete(self, path: &str) -> Self {
        self.request(HttpMethod::Delete, path)
    }

    /// `HEAD path`
    #[must_use]
    pub fn head(self, path: &str) -> Self {
        self.request(HttpMethod::Head, path)
    }

    /// `OPTIONS path`
    #[must_use]
    pub fn options(self, path: &str) -> Self {
        self.request(HttpMethod::Options, path)
    }

    /// Sets a request header, replacing any previous value.
    #[must_use]
    pub fn set(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.set(name, value);
        self
    }

    /// Sets HTTP basic authentication.
    #[must_use]
    pub fn set_basic_auth(self, username: &str, password: &str) -> Self {
        let token = BASE64_STANDARD.encode(format!("{username}:{password}"));
        self.set("Authorization", format!("Basic {token}"))
    }

    /// Adds a cookie.
    #[must_use]
    pub fn add_cookie(mut self, cookie: Cookie) -> Self {
        self.cookies.push(cookie);
        self
    }

    /// Adds several cookies, in order.
    #[must_use]
    pub fn add_cookies(mut self, cookies: impl IntoIterator<Item = Cookie>) -> Self {
        self.cookies.extend(cookies);
        self
    }

    /// Sets the request content type from an alias (`json`, `form`, `text`, ...)
    /// or a full MIME type.
    #[must_use]
    pub fn content_type(mut self, kind: &str) -> Self {
        match resolve_content_type(kind) {
            Ok(content_type) => self.content_type = Some(content_type),
            Err(e) => self.errors.push(e),
        }
        self
    }

    /// Appends query parameters from an url-encoded string such as `name=test`.
    #[must_use]
    pub fn query(mut self, raw: &str) -> Self {
        if let Err(e) = self.query.extend_from_str(raw) {
            self.errors.push(e);
        }
        self
    }

    /// Appends query parameters from a flat struct or map.
    #[must_use]
    pub fn query_params<T: Serialize + ?Sized>(mut self, value: &T) -> Self {
        if let Err(e) = self.query.extend_from_serialize(value) {
            self.errors.push(e);
        }
        self
    }

    /// Sends a body. JSON objects sent in sequence are merged.
    #[must_use]
    pub fn send(mut self, body: impl Into<SendBody>) -> Self {
        let body = body.into();
        self.body = Some(match self.body.take() {
            Some(previous) => previous.merge(body),
            None => body,
        });
        self
    }

    /// Serializes `value` and sends it as JSON.
    #[must_use]
    pub fn send_json<T: Serialize + ?Sized>(mut self, value: &T) -> Self {
        match serde_json::to_value(value) {
            Ok(json) => self.send(SendBody::Json(json)),
            Err(e) => {
                self.errors.push(DomainError::InvalidBody(e.to_string()));
                self
            }
        }
    }

    /// Declares an expectation.
    ///
    /// An integer checks the status, a `(name, value)` text pair checks a header,
    /// an `(integer, body)` pair checks status then body, and any other single
    /// value checks the body.
    #[must_use]
    pub fn expect(mut self, expectation: impl Into<Expectation>) -> Self {
        self.expectations.push(expectation.into());
        self
    }

    /// Declares a status code expectation.
    #[must_use]
    pub fn expect_status(self, code: u16) -> Self {
        self.expect(Expectation::status(code))
    }

    /// Declares a header expectation.
    #[must_use]
    pub fn expect_header(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.expect(Expectation::header(name, value))
    }

    /// Declares a literal body expectation.
    #[must_use]
    pub fn expect_body(self, literal: impl Into<String>) -> Self {
        self.expect(Expectation::body(literal))
    }

    /// Declares a body expectation compared as the canonical JSON of `value`.
    #[must_use]
    pub fn expect_json<T: Serialize + ?Sized>(self, value: &T) -> Self {
        self.expect(Expectation::json(value))
    }

    /// Returns the number of declared expectations.
    #[must_use]
    pub fn expectation_count(&self) -> usize {
        self.expectations.len()
    }

    /// Builds the request the transport will send.
    ///
    /// # Errors
    ///
    /// Returns one `TransportError::InvalidRequest` per declaration that could
    /// not be applied.
    pub fn build_request(&self) -> Result<RequestSpec, Vec<TransportError>> {
        let mut errors: Vec<TransportError> =
            self.errors.iter().cloned().map(TransportError::from).collect();

        let url = match &self.url {
            Some(url) => Some(url.clone()),
            None => resolve_url(&self.host, "")
                .map(String::from)
                .map_err(|e| errors.push(e.into()))
                .ok(),
        };

        let content_type = self.content_type.as_deref();
        let body = match &self.body {
            Some(body) => {
                RequestBody::render(body, content_type.unwrap_or(DEFAULT_CONTENT_TYPE))
                    .map_err(|e| errors.push(e.into()))
                    .ok()
            }
            None => Some(RequestBody::none()),
        };

        let (Some(url), Some(body)) = (url, body) else {
            return Err(errors);
        };
        if !errors.is_empty() {
            return Err(errors);
        }

        let mut request = RequestSpec::new(self.method, url);
        request.headers = self.headers.clone();
        request.query = self.query.clone();

        if let Some(cookies) = Cookie::header_value(&self.cookies) {
            let value = match request.headers.get("Cookie") {
                Some(existing) => format!("{existing}; {cookies}"),
                None => cookies,
            };
            request.headers.set("Cookie", value);
        }

        let declared_type = body.content_type.as_deref().or(content_type);
        if let Some(declared_type) = declared_type
            && !request.headers.contains("Content-Type")
        {
            request.headers.set("Content-Type", declared_type);
        }
        request.body = body;

        Ok(request)
    }

    /// Sends the request and evaluates every expectation.
    pub async fn end(self) -> EvaluationReport {
        self.end_with(|_, _, _| {}).await
    }

    /// Sends the request, evaluates every expectation, then hands the response
    /// to `callback`.
    ///
    /// The callback runs exactly once, after all expectations, whether or not
    /// they failed. When no response was obtained it receives `None`, an empty
    /// body and the transport errors, and no expectation is evaluated.
    pub async fn end_with<F>(self, callback: F) -> EvaluationReport
    where
        F: FnOnce(Option<&ResponseSnapshot>, &str, &[TransportError]),
    {
        let request = match self.build_request() {
            Ok(request) => request,
            Err(errors) => return self.fail_transport(errors, callback),
        };

        let span = tracing::debug_span!(
            "vouch.evaluate",
            request_id = %request.id,
            method = %request.method,
            url = %request.url,
        );
        let outcome = self
            .transport
            .send(&request)
            .instrument(span.clone())
            .await;
        span.in_scope(|| match outcome {
            Ok(response) => {
                debug!(
                    status = response.status(),
                    elapsed_ms = response.duration().as_millis(),
                    expectations = self.expectations.len(),
                    "response received"
                );
                let report = self.evaluate(&response);
                callback(Some(&response), response.body(), &[]);
                report
            }
            Err(error) => self.fail_transport(vec![error], callback),
        })
    }

    fn evaluate(self, response: &ResponseSnapshot) -> EvaluationReport {
        let mut verdicts = Vec::new();

        for (index, expectation) in self.expectations.into_iter().enumerate() {
            let classified = expectation.classify();
            for verdict in self.checker.check(&classified, response) {
                match &verdict.failure {
                    Some(failure) => {
                        warn!(index, kind = ?failure.kind(), check = %verdict.description, "{failure}");
                        self.channel.raise(failure);
                    }
                    None => debug!(index, check = %verdict.description, "passed"),
                }
                verdicts.push(verdict);
            }
        }

        EvaluationReport::new(verdicts)
    }

    fn fail_transport<F>(&self, errors: Vec<TransportError>, callback: F) -> EvaluationReport
    where
        F: FnOnce(Option<&ResponseSnapshot>, &str, &[TransportError]),
    {
        let failures: Vec<Failure> = errors
            .iter()
            .map(|e| Failure::Transport(e.to_string()))
            .collect();

        for failure in &failures {
            warn!(host = %self.host, "{failure}");
            self.channel.raise(failure);
        }
        callback(None, "", &errors);

        EvaluationReport::transport_failed(failures)
    }
}
