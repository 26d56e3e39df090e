//! Client configuration.
//!
//! [`ClientConfig`] carries the connection settings for one client instance.
//! Defaults are supplied by [`ClientConfig::default`]; each value can be
//! overridden per instance or from the environment.

use std::time::Duration;

use url::Url;

use crate::error::ConfigError;

/// Default API host.
pub const DEFAULT_BASE_URL: &str = "https://api.idibon.com";

/// Default request timeout in milliseconds (5 minutes).
pub const DEFAULT_TIMEOUT_MS: u64 = 5 * 60 * 1000;

/// Default number of concurrent requests per client.
pub const DEFAULT_MAX_SOCKETS: usize = 1;

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "IDIBON_API_KEY";

/// Environment variable overriding the API host.
pub const BASE_URL_ENV: &str = "IDIBON_API_URL";

/// Environment variable overriding the request timeout, in milliseconds.
pub const TIMEOUT_ENV: &str = "IDIBON_TIMEOUT_MS";

/// Environment variable overriding the concurrent request cap.
pub const MAX_SOCKETS_ENV: &str = "IDIBON_MAX_SOCKETS";

/// Content type sent with every request.
pub const CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Returns the `User-Agent` header value: `IdibonAPI:<version>-Rust:<rust-version>`.
pub fn default_user_agent() -> String {
    format!(
        "IdibonAPI:{}-Rust:{}",
        env!("CARGO_PKG_VERSION"),
        env!("CARGO_PKG_RUST_VERSION")
    )
}

/// Connection settings for an [`IdibonClient`](crate::IdibonClient).
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Host that request paths are appended to.
    pub base_url: Url,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Maximum number of requests in flight at once.
    pub max_sockets: usize,
    /// `User-Agent` header value.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            max_sockets: DEFAULT_MAX_SOCKETS,
            user_agent: default_user_agent(),
        }
    }
}

impl ClientConfig {
    /// Builds a configuration from the defaults and the `IDIBON_*` environment
    /// variables.
    ///
    /// ## Errors
    ///
    /// Returns an error if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a configuration using `lookup` to read variables.
    pub(crate) fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(url) = lookup(BASE_URL_ENV) {
            config.base_url = Url::parse(&url)?;
        }

        if let Some(raw) = lookup(TIMEOUT_ENV) {
            let millis = raw
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::invalid_value("timeout", raw.clone()))?;
            config.timeout = Duration::from_millis(millis);
        }

        if let Some(raw) = lookup(MAX_SOCKETS_ENV) {
            config.max_sockets = match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => return Err(ConfigError::invalid_value("max_sockets", raw)),
            };
        }

        Ok(config)
    }
}
