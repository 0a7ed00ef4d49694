//! overseerr_client - Typed async client for the Overseerr media request API
//!
//! This library wraps Overseerr's REST API: server status, search and
//! discovery, media, movie and TV details, requests and users. Every
//! operation returns either the validated model or, in raw mode, the JSON
//! payload exactly as the server sent it.
//!
//! # Examples
//!
//! ```no_run
//! use overseerr_client::{Overseerr, OverseerrConfig, models::{MediaKind, SeasonSelection}};
//!
//! # async fn run() -> Result<(), overseerr_client::OverseerrError> {
//! let config = OverseerrConfig::new("requests.example.com", "MTcwMDAwMDAwMDAwMD...")
//!     .with_port(5055);
//! let client = Overseerr::new(config)?;
//!
//! let status = client.status().get_status().await?;
//! println!("{status:?}");
//!
//! // Request the latest season of a show
//! client
//!     .request()
//!     .create(1399, MediaKind::Tv, SeasonSelection::Latest)
//!     .await?;
//! # Ok(())
//! # }
//! ```

mod api_key;
mod apis;
mod client;
mod config;
mod decode;
mod http;
pub mod models;

pub use api_key::is_valid_api_key;
pub use apis::{
    DEFAULT_LANGUAGE, DiscoverApi, MediaApi, MediaQuery, MovieApi, RequestApi, RequestQuery,
    SearchApi, StatusApi, TvApi, UserApi, UserQuery,
};
pub use client::Overseerr;
pub use config::{API_URI, ConfigError, OverseerrConfig};
pub use decode::{
    ApiResponse, DEFAULT_RAW_RESPONSE, DecodeError, decode, decode_typed, resolve_raw_mode,
};
pub use http::{
    API_KEY_HEADER, Body, DEFAULT_TIMEOUT, HttpError, QueryValue, RequestSpec, RetryPolicy, send,
};

use reqwest::StatusCode;
use thiserror::Error;

/// Top-level error type for Overseerr operations
#[derive(Debug, Error)]
pub enum OverseerrError {
    /// Error while talking to the server
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    /// Error while validating a response
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    /// A request body could not be serialized
    #[error("Failed to encode request body: {0}")]
    Encode(#[from] serde_json::Error),

    /// A request was made for something other than a movie or show
    #[error("Unknown media type `{0}`, use either movie or tv")]
    UnsupportedMediaType(String),

    /// Error while setting up the client
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),
}

impl OverseerrError {
    /// True if the request ran into its deadline
    pub fn is_timeout(&self) -> bool {
        matches!(self, OverseerrError::Http(HttpError::Timeout { .. }))
    }

    /// True if the server could not be reached after all retries
    pub fn is_connection(&self) -> bool {
        matches!(self, OverseerrError::Http(HttpError::Connection { .. }))
    }

    /// HTTP status of a 4xx/5xx response
    pub fn server_status(&self) -> Option<StatusCode> {
        match self {
            OverseerrError::Http(HttpError::Server { status, .. }) => Some(*status),
            _ => None,
        }
    }
}
