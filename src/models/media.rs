use super::common::PageInfo;
use super::request::MediaRequest;
use serde::{Deserialize, Serialize};

/// Filter for media listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaFilter {
    All,
    Available,
    Partial,
    AllAvailable,
    Pending,
    Processing,
}

impl MediaFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaFilter::All => "all",
            MediaFilter::Available => "available",
            MediaFilter::Partial => "partial",
            MediaFilter::AllAvailable => "allavailable",
            MediaFilter::Pending => "pending",
            MediaFilter::Processing => "processing",
        }
    }
}

/// Availability status that can be set on a media item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaStatus {
    Available,
    Partial,
    Pending,
    Processing,
    Unknown,
}

impl MediaStatus {
    /// The path segment used by `POST /media/{id}/{status}`
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaStatus::Available => "available",
            MediaStatus::Partial => "partial",
            MediaStatus::Pending => "pending",
            MediaStatus::Processing => "processing",
            MediaStatus::Unknown => "unknown",
        }
    }
}

/// Overseerr's record of a movie or show and its requests
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaInfo {
    pub id: u32,
    pub media_type: Option<String>,
    pub tmdb_id: Option<u32>,
    pub tvdb_id: Option<u32>,
    pub imdb_id: Option<String>,
    /// Numeric availability status (1 unknown .. 5 available)
    pub status: u8,
    pub status4k: Option<u8>,
    #[serde(default)]
    pub requests: Vec<MediaRequest>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// Paginated media listing from `GET /media`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaPage {
    pub page_info: PageInfo,
    pub results: Vec<MediaInfo>,
}
