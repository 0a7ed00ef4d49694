use super::common::PageInfo;
use super::media::MediaInfo;
use super::tv::Season;
use super::user::User;
use crate::OverseerrError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Season number Overseerr uses for specials; never requested
const SPECIALS_SEASON: u32 = 0;

/// Filter for request listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestFilter {
    All,
    Approved,
    Available,
    Pending,
    Processing,
    Unavailable,
    Failed,
}

impl RequestFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestFilter::All => "all",
            RequestFilter::Approved => "approved",
            RequestFilter::Available => "available",
            RequestFilter::Pending => "pending",
            RequestFilter::Processing => "processing",
            RequestFilter::Unavailable => "unavailable",
            RequestFilter::Failed => "failed",
        }
    }
}

/// A user's request for a movie or show
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaRequest {
    pub id: u32,
    /// Numeric approval status (1 pending, 2 approved, 3 declined)
    pub status: u8,
    pub media: Option<Box<MediaInfo>>,
    pub created_at: String,
    pub updated_at: String,
    pub requested_by: Option<User>,
    pub modified_by: Option<User>,
    #[serde(default)]
    pub is4k: bool,
    pub server_id: Option<u32>,
    pub profile_id: Option<u32>,
    pub root_folder: Option<String>,
    #[serde(default)]
    pub seasons: Vec<RequestedSeason>,
}

/// A season attached to a TV request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestedSeason {
    pub id: u32,
    pub season_number: u32,
    pub status: u8,
}

/// Paginated request listing from `GET /request`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestPage {
    pub page_info: PageInfo,
    pub results: Vec<MediaRequest>,
}

/// Kind of media a request is made for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Movie,
    Tv,
}

impl MediaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Movie => "movie",
            MediaKind::Tv => "tv",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaKind {
    type Err = OverseerrError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "movie" => Ok(MediaKind::Movie),
            "tv" => Ok(MediaKind::Tv),
            other => Err(OverseerrError::UnsupportedMediaType(other.to_string())),
        }
    }
}

/// Which seasons of a show a TV request covers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SeasonSelection {
    /// Every season except specials
    #[default]
    All,
    /// Season 1 only
    First,
    /// The last season in the order the server lists them
    Latest,
}

impl SeasonSelection {
    /// Derives the season numbers to request from a show's season list
    ///
    /// Specials (season 0) are never included. `Latest` takes the final
    /// entry as listed rather than the numerically highest one.
    pub fn select(&self, seasons: &[Season]) -> Vec<u32> {
        let mut numbers = seasons
            .iter()
            .map(|season| season.season_number)
            .filter(|&number| number != SPECIALS_SEASON);

        match self {
            SeasonSelection::All => numbers.collect(),
            SeasonSelection::First => vec![1],
            SeasonSelection::Latest => numbers.next_back().into_iter().collect(),
        }
    }
}

/// Body of `POST /request`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaRequestPayload {
    pub media_type: MediaKind,
    pub media_id: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tvdb_id: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seasons: Option<Vec<u32>>,
}

impl MediaRequestPayload {
    pub fn movie(media_id: u32) -> Self {
        Self {
            media_type: MediaKind::Movie,
            media_id,
            tvdb_id: None,
            seasons: None,
        }
    }

    pub fn tv(media_id: u32, tvdb_id: Option<u32>, seasons: Vec<u32>) -> Self {
        Self {
            media_type: MediaKind::Tv,
            media_id,
            tvdb_id,
            seasons: Some(seasons),
        }
    }
}
