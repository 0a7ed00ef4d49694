//! Client configuration
//!
//! Describes where the Overseerr instance lives and how requests against it
//! behave. Built with [`OverseerrConfig::new`] and the chained `with_*`
//! setters, then handed to [`crate::Overseerr::new`].

use crate::http::{DEFAULT_TIMEOUT, RetryPolicy};
use std::fmt;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Path of the versioned API below the instance root
pub const API_URI: &str = "api/v1";

/// Errors raised while setting up a client
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No API key was given
    #[error("No API key provided")]
    MissingApiKey,

    /// The API key does not have the structure Overseerr generates
    #[error("API key is not valid")]
    InvalidApiKey,

    /// The host cannot form a URL
    #[error("Invalid host: {0}")]
    InvalidHost(String),

    /// The underlying HTTP client could not be created
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Connection and behaviour settings for an Overseerr client
#[derive(Clone)]
pub struct OverseerrConfig {
    /// Host name or address of the instance
    pub host: String,
    /// API key sent with every request
    pub api_key: String,
    /// Port, if not the scheme default
    pub port: Option<u16>,
    /// Use `https` when true, `http` otherwise
    pub tls: bool,
    /// Path prefix when the instance sits behind a reverse proxy
    pub base_path: String,
    /// Deadline for a single request
    pub timeout: Duration,
    /// Backoff applied to connection failures
    pub retry_policy: RetryPolicy,
    /// Instance-wide raw response default; `None` defers to the library default
    pub raw_response: Option<bool>,
}

impl OverseerrConfig {
    pub fn new(host: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            api_key: api_key.into(),
            port: None,
            tls: true,
            base_path: String::new(),
            timeout: DEFAULT_TIMEOUT,
            retry_policy: RetryPolicy::default(),
            raw_response: None,
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn with_tls(mut self, tls: bool) -> Self {
        self.tls = tls;
        self
    }

    pub fn with_base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = base_path.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_retry_policy(mut self, retry_policy: RetryPolicy) -> Self {
        self.retry_policy = retry_policy;
        self
    }

    pub fn with_raw_response(mut self, raw_response: bool) -> Self {
        self.raw_response = Some(raw_response);
        self
    }

    /// Builds `<scheme>://<host>[:<port>]/<base_path>/api/v1`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidHost`] if the host is empty, contains a
    /// path or does not parse as a URL host.
    pub fn base_url(&self) -> Result<Url, ConfigError> {
        let invalid_host = || ConfigError::InvalidHost(self.host.clone());

        if self.host.is_empty() || self.host.contains('/') {
            return Err(invalid_host());
        }

        let scheme = if self.tls { "https" } else { "http" };
        let mut url = Url::parse(&format!("{scheme}://{}", self.host)).map_err(|_| invalid_host())?;
        url.set_port(self.port).map_err(|()| invalid_host())?;

        {
            let mut segments = url.path_segments_mut().map_err(|()| invalid_host())?;
            segments.clear();
            segments.extend(self.base_path.split('/').filter(|s| !s.is_empty()));
            segments.extend(API_URI.split('/'));
        }

        Ok(url)
    }
}

impl fmt::Debug for OverseerrConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OverseerrConfig")
            .field("host", &self.host)
            .field("api_key", &"<redacted>")
            .field("port", &self.port)
            .field("tls", &self.tls)
            .field("base_path", &self.base_path)
            .field("timeout", &self.timeout)
            .field("retry_policy", &self.retry_policy)
            .field("raw_response", &self.raw_response)
            .finish()
    }
}
