//! Types shared across several resources: pagination envelopes, sort
//! orders and the sub-objects movie and TV details have in common.

use serde::{Deserialize, Serialize};

/// Sort order for media and request listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    #[serde(rename = "added")]
    Added,
    #[serde(rename = "modified")]
    Modified,
    #[serde(rename = "mediaAdded")]
    MediaAdded,
}

impl SortOrder {
    /// The value sent in the `sort` query parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Added => "added",
            SortOrder::Modified => "modified",
            SortOrder::MediaAdded => "mediaAdded",
        }
    }
}

/// Pagination metadata of the `pageInfo` style listings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub page: u32,
    pub pages: u32,
    pub results: u32,
    pub page_size: Option<u32>,
}

/// A page of results as returned by search and discover endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub page: u32,
    pub total_pages: u32,
    pub total_results: u32,
    /// Results in the order the server returned them
    pub results: Vec<T>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Genre {
    pub id: u32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductionCompany {
    pub id: u32,
    pub name: String,
    pub logo_path: Option<String>,
    pub origin_country: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionCountry {
    pub iso_3166_1: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpokenLanguage {
    pub english_name: Option<String>,
    #[serde(rename = "iso_639_1")]
    pub iso_639_1: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keyword {
    pub id: u32,
    pub name: String,
}

/// Identifiers of the same title in other databases
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalIds {
    pub imdb_id: Option<String>,
    pub tvdb_id: Option<u32>,
    pub tvrage_id: Option<u32>,
    pub facebook_id: Option<String>,
    pub freebase_id: Option<String>,
    pub freebase_mid: Option<String>,
    pub instagram_id: Option<String>,
    pub twitter_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CastMember {
    pub id: u32,
    pub cast_id: Option<u32>,
    pub character: Option<String>,
    pub credit_id: Option<String>,
    pub gender: Option<u8>,
    pub name: String,
    pub order: Option<u32>,
    pub profile_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrewMember {
    pub id: u32,
    pub credit_id: Option<String>,
    pub gender: Option<u8>,
    pub name: String,
    pub job: Option<String>,
    pub department: Option<String>,
    pub profile_path: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Credits {
    #[serde(default)]
    pub cast: Vec<CastMember>,
    #[serde(default)]
    pub crew: Vec<CrewMember>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelatedVideo {
    pub url: Option<String>,
    pub key: String,
    pub name: String,
    pub size: Option<u32>,
    #[serde(rename = "type")]
    pub kind: String,
    pub site: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchProvider {
    pub id: u32,
    pub name: String,
    pub logo_path: Option<String>,
    pub display_priority: Option<u32>,
}

/// Streaming and purchase options for one region
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchProviderRegion {
    pub iso_3166_1: String,
    pub link: Option<String>,
    #[serde(default)]
    pub buy: Vec<WatchProvider>,
    #[serde(default)]
    pub flatrate: Vec<WatchProvider>,
}
