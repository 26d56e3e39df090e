//! The HTTP client and the operations it exposes.
//!
//! [`IdibonClient`] owns one `reqwest::Client` and a request semaphore. All
//! operations go through [`IdibonClient::call_api`], which serializes the body,
//! authenticates, and turns the response into a JSON value.

mod pagination;
mod rename;
mod resources;
mod transport;

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use tokio::sync::Semaphore;
use url::Url;

use crate::config::{self, API_KEY_ENV, ClientConfig};
use crate::error::{ApiError, ClientError, ConfigError};

pub use pagination::{DEFAULT_PAGE_SIZE, FetchSummary};
pub use rename::LabelRename;

/// Builder for configuring an [`IdibonClient`].
#[derive(Debug)]
pub struct IdibonClientBuilder {
    api_key: String,
    config: ClientConfig,
}

impl IdibonClientBuilder {
    fn new(api_key: String) -> Self {
        Self {
            api_key,
            config: ClientConfig::default(),
        }
    }

    /// Replaces every setting with `config`.
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the API host.
    ///
    /// ## Errors
    ///
    /// Returns an error if `url` does not parse.
    pub fn base_url(mut self, url: impl AsRef<str>) -> Result<Self, ApiError> {
        self.config.base_url = Url::parse(url.as_ref()).map_err(ConfigError::from)?;
        Ok(self)
    }

    /// Sets the per-request timeout.
    ///
    /// ## Examples
    ///
    /// ```rust
    /// use std::time::Duration;
    /// use idibon::IdibonClient;
    ///
    /// let client = IdibonClient::builder("MY_API_KEY")
    ///     .timeout(Duration::from_secs(30))
    ///     .build()?;
    /// assert_eq!(client.config().timeout, Duration::from_secs(30));
    /// # Ok::<(), idibon::ApiError>(())
    /// ```
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Sets how many requests may be in flight at once. Values below 1 are
    /// raised to 1.
    pub fn max_sockets(mut self, max_sockets: usize) -> Self {
        self.config.max_sockets = max_sockets.max(1);
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Builds the [`IdibonClient`].
    ///
    /// ## Errors
    ///
    /// Returns an error if the user agent is not a valid header value or the
    /// HTTP client cannot be constructed.
    pub fn build(self) -> Result<IdibonClient, ApiError> {
        let user_agent = HeaderValue::from_str(&self.config.user_agent)
            .map_err(|_| ConfigError::invalid_value("user_agent", &self.config.user_agent))?;

        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, user_agent);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(config::CONTENT_TYPE));

        let max_sockets = self.config.max_sockets.max(1);
        let http = reqwest::Client::builder()
            .timeout(self.config.timeout)
            .default_headers(headers)
            .pool_max_idle_per_host(max_sockets)
            .build()
            .map_err(ClientError::Request)?;

        Ok(IdibonClient {
            http,
            api_key: self.api_key,
            permits: Arc::new(Semaphore::new(max_sockets)),
            config: self.config,
        })
    }
}

/// Async client for the Idibon API.
///
/// Cloning is cheap; clones share the connection pool and the request limit.
///
/// ## Examples
///
/// ```rust,no_run
/// use idibon::IdibonClient;
/// use idibon::builders::DocumentQuery;
///
/// # async fn example() -> Result<(), idibon::ApiError> {
/// let client = IdibonClient::from_env()?;
/// let query = DocumentQuery::new().in_ascending_order().to_options()?;
///
/// let summary = client
///     .fetch_documents("reviews", Some(&query), |item| match item {
///         Ok(document) => println!("{}", document["name"]),
///         Err(err) => eprintln!("fetch failed: {err}"),
///     })
///     .await?;
/// println!("{} documents", summary.documents);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct IdibonClient {
    http: reqwest::Client,
    api_key: String,
    config: ClientConfig,
    permits: Arc<Semaphore>,
}

impl IdibonClient {
    /// Creates a new builder authenticating with `api_key`.
    pub fn builder(api_key: impl Into<String>) -> IdibonClientBuilder {
        IdibonClientBuilder::new(api_key.into())
    }

    /// Creates a client with default settings.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ApiError> {
        Self::builder(api_key).build()
    }

    /// Creates a client from `IDIBON_API_KEY` and the other `IDIBON_*`
    /// variables read by [`ClientConfig::from_env`].
    ///
    /// ## Errors
    ///
    /// Returns [`ConfigError::MissingApiKey`] if the key is unset or empty.
    pub fn from_env() -> Result<Self, ApiError> {
        let api_key = std::env::var(API_KEY_ENV)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::MissingApiKey { env_var: API_KEY_ENV })?;
        let config = ClientConfig::from_env()?;
        Self::builder(api_key).config(config).build()
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}

impl fmt::Debug for IdibonClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdibonClient")
            .field("api_key", &"<redacted>")
            .field("config", &self.config)
            .finish()
    }
}
