//! Transport configuration.
//!
//! Defaults can be overridden through the environment:
//!
//! | Variable              | Meaning                          | Default          |
//! |-----------------------|----------------------------------|------------------|
//! | `VOUCH_USER_AGENT`    | `User-Agent` sent with requests  | `vouch/<version>`|
//! | `VOUCH_TIMEOUT_MS`    | Whole-request timeout in ms      | `30000`          |
//! | `VOUCH_MAX_REDIRECTS` | Redirects followed before error  | `10`             |

use std::time::Duration;

use thiserror::Error;

/// Environment variable for the user agent.
pub const USER_AGENT_VAR: &str = "VOUCH_USER_AGENT";
/// Environment variable for the request timeout, in milliseconds.
pub const TIMEOUT_MS_VAR: &str = "VOUCH_TIMEOUT_MS";
/// Environment variable for the redirect limit.
pub const MAX_REDIRECTS_VAR: &str = "VOUCH_MAX_REDIRECTS";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_MAX_REDIRECTS: usize = 10;

/// Errors raised while loading configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable was set to a value that could not be parsed.
    #[error("invalid value for {key}: {value:?} ({message})")]
    InvalidValue {
        /// Variable name.
        key: String,
        /// Raw value.
        value: String,
        /// Parser message.
        message: String,
    },
}

/// Settings for the reqwest transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportConfig {
    /// `User-Agent` header value.
    pub user_agent: String,
    /// Timeout for a whole request, including reading the body.
    pub timeout: Duration,
    /// Maximum number of redirects to follow.
    pub max_redirects: usize,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            user_agent: concat!("vouch/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: DEFAULT_TIMEOUT,
            max_redirects: DEFAULT_MAX_REDIRECTS,
        }
    }
}

impl TransportConfig {
    /// Loads the configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if a numeric variable does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads the configuration through `lookup`, falling back to defaults for
    /// unset or blank variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if a numeric variable does not parse.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(user_agent) = get(USER_AGENT_VAR) {
            config.user_agent = user_agent;
        }
        if let Some(raw) = get(TIMEOUT_MS_VAR) {
            config.timeout = Duration::from_millis(parse(TIMEOUT_MS_VAR, &raw)?);
        }
        if let Some(raw) = get(MAX_REDIRECTS_VAR) {
            config.max_redirects = parse(MAX_REDIRECTS_VAR, &raw)?;
        }

        Ok(config)
    }

    /// Returns the timeout in whole milliseconds.
    #[must_use]
    pub fn timeout_ms(&self) -> u64 {
        u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX)
    }
}

fn parse<T>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e: T::Err| ConfigError::InvalidValue {
            key: key.to_string(),
            value: raw.to_string(),
            message: e.to_string(),
        })
}
