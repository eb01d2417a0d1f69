//! Response snapshot type
//!
//! An immutable capture of one HTTP response: status, headers, body and timing.

use std::time::Duration;

use crate::request::Header;

/// The response an agent evaluates its expectations against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseSnapshot {
    status: u16,
    headers: Vec<Header>,
    body: String,
    body_bytes: Vec<u8>,
    duration: Duration,
}

impl ResponseSnapshot {
    /// Creates a snapshot from raw response data.
    ///
    /// Header order is kept, duplicates included. Bodies that are not valid UTF-8
    /// are decoded lossily for text comparison; the raw bytes stay available.
    #[must_use]
    pub fn new<I, K, V>(status: u16, headers: I, body: Vec<u8>, duration: Duration) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let headers = headers
            .into_iter()
            .map(|(name, value)| Header::new(name, value))
            .collect();
        let body_text = String::from_utf8(body.clone())
            .unwrap_or_else(|_| String::from_utf8_lossy(&body).into_owned());

        Self {
            status,
            headers,
            body: body_text,
            body_bytes: body,
            duration,
        }
    }

    /// Returns the HTTP status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Returns the first value of a header, matching the name case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|h| h.name.eq_ignore_ascii_case(name))
            .map(|h| h.value.as_str())
    }

    /// Returns every value of a header, in the order received.
    pub fn header_values<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.headers
            .iter()
            .filter(move |h| h.name.eq_ignore_ascii_case(name))
            .map(|h| h.value.as_str())
    }

    /// Returns all headers in the order received.
    #[must_use]
    pub fn headers(&self) -> &[Header] {
        &self.headers
    }

    /// Returns the `Content-Type` header value, or an empty string if absent.
    #[must_use]
    pub fn content_type(&self) -> &str {
        self.header("content-type").unwrap_or_default()
    }

    /// Returns the body as text.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Returns the raw body bytes.
    #[must_use]
    pub fn body_bytes(&self) -> &[u8] {
        &self.body_bytes
    }

    /// Returns how long the round trip took.
    #[must_use]
    pub const fn duration(&self) -> Duration {
        self.duration
    }
}
