//! The Overseerr client
//!
//! [`Overseerr`] owns the connection pool and configuration. Resource
//! operations are reached through lightweight handles borrowed from it,
//! e.g. `client.tv().get(1399, "en")`.

use crate::OverseerrError;
use crate::api_key::is_valid_api_key;
use crate::apis::{
    DiscoverApi, MediaApi, MovieApi, RequestApi, SearchApi, StatusApi, TvApi, UserApi,
};
use crate::config::{ConfigError, OverseerrConfig};
use crate::decode::{decode_typed, resolve_raw_mode};
use crate::http::{self, API_KEY_HEADER, RequestSpec};
use crate::models::Status;
use moka::future::Cache;
use reqwest::Method;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// How long the server version stays cached
const VERSION_TTL: Duration = Duration::from_secs(2 * 60 * 60);

/// Upper bound on cached version entries
const VERSION_CACHE_CAPACITY: u64 = 16;

/// Client for a single Overseerr instance
///
/// The underlying connection pool is released when the last clone of the
/// client is dropped.
#[derive(Debug, Clone)]
pub struct Overseerr {
    http: reqwest::Client,
    base_url: Url,
    config: OverseerrConfig,
    version_cache: Cache<String, String>,
}

impl Overseerr {
    /// Creates a client with its own connection pool
    ///
    /// # Errors
    ///
    /// Fails if the API key is missing or malformed, the host does not form
    /// a valid URL, or the HTTP client cannot be built.
    pub fn new(config: OverseerrConfig) -> Result<Self, ConfigError> {
        let http = reqwest::Client::builder().build()?;
        Self::with_http_client(config, http)
    }

    /// Creates a client that shares an existing connection pool
    ///
    /// # Errors
    ///
    /// Fails if the API key is missing or malformed or the host does not
    /// form a valid URL.
    pub fn with_http_client(
        config: OverseerrConfig,
        http: reqwest::Client,
    ) -> Result<Self, ConfigError> {
        if config.api_key.is_empty() {
            return Err(ConfigError::MissingApiKey);
        }
        if !is_valid_api_key(&config.api_key) {
            return Err(ConfigError::InvalidApiKey);
        }

        let base_url = config.base_url()?;

        Ok(Self {
            http,
            base_url,
            config,
            version_cache: version_cache(VERSION_TTL),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn config(&self) -> &OverseerrConfig {
        &self.config
    }

    pub fn status(&self) -> StatusApi<'_> {
        StatusApi::new(self)
    }

    pub fn search(&self) -> SearchApi<'_> {
        SearchApi::new(self)
    }

    pub fn discover(&self) -> DiscoverApi<'_> {
        DiscoverApi::new(self)
    }

    pub fn media(&self) -> MediaApi<'_> {
        MediaApi::new(self)
    }

    pub fn movie(&self) -> MovieApi<'_> {
        MovieApi::new(self)
    }

    pub fn tv(&self) -> TvApi<'_> {
        TvApi::new(self)
    }

    pub fn request(&self) -> RequestApi<'_> {
        RequestApi::new(self)
    }

    pub fn user(&self) -> UserApi<'_> {
        UserApi::new(self)
    }

    /// Version string of the server, cached for two hours
    ///
    /// # Errors
    ///
    /// Propagates transport and decode errors from `GET /status`.
    pub async fn version(&self) -> Result<String, OverseerrError> {
        let cache_key = self.base_url.to_string();

        if let Some(version) = self.version_cache.get(&cache_key).await {
            debug!(%version, "server version served from cache");
            return Ok(version);
        }

        let payload = self.execute(self.get(&["status"])).await?;
        let status: Status = decode_typed(payload)?;

        self.version_cache
            .insert(cache_key, status.version.clone())
            .await;
        Ok(status.version)
    }

    /// URL of an endpoint below the API root
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // http(s) URLs always have path segments
        if let Ok(mut path) = url.path_segments_mut() {
            path.extend(segments);
        }
        url
    }

    /// Starts a request carrying the API key and the configured timeout
    pub(crate) fn build(&self, method: Method, segments: &[&str]) -> RequestSpec {
        RequestSpec::new(method, self.endpoint(segments))
            .header(API_KEY_HEADER, &self.config.api_key)
            .timeout(self.config.timeout)
    }

    pub(crate) fn get(&self, segments: &[&str]) -> RequestSpec {
        self.build(Method::GET, segments)
    }

    pub(crate) async fn execute(&self, request: RequestSpec) -> Result<Value, OverseerrError> {
        Ok(http::send(&self.http, &request, &self.config.retry_policy).await?)
    }

    pub(crate) fn resolve_raw(&self, call: Option<bool>) -> bool {
        resolve_raw_mode(call, self.config.raw_response)
    }
}

fn version_cache(ttl: Duration) -> Cache<String, String> {
    Cache::builder()
        .max_capacity(VERSION_CACHE_CAPACITY)
        .time_to_live(ttl)
        .build()
}
