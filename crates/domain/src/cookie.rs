//! Request cookies.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A cookie sent with a request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Cookie {
    /// Cookie name.
    pub name: String,
    /// Cookie value.
    pub value: String,
}

impl Cookie {
    /// Create a new cookie.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Builds a `Cookie` request header value from cookies in order.
    ///
    /// Returns `None` when there are no cookies.
    #[must_use]
    pub fn header_value(cookies: &[Self]) -> Option<String> {
        if cookies.is_empty() {
            return None;
        }
        let pairs: Vec<String> = cookies.iter().map(ToString::to_string).collect();
        Some(pairs.join("; "))
    }
}

impl fmt::Display for Cookie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.value)
    }
}
