//! Search and discover results.
//!
//! Result lists mix movies, shows and people; the `mediaType` field of each
//! entry decides which shape it is decoded into.

use super::media::MediaInfo;
use crate::decode::{DecodeError, TaggedUnion, decode_typed, deserialize_tagged};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieResult {
    pub id: u32,
    pub media_type: String,
    pub title: String,
    pub original_title: Option<String>,
    pub overview: Option<String>,
    pub original_language: Option<String>,
    pub release_date: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub popularity: Option<f64>,
    pub vote_count: Option<u32>,
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub genre_ids: Vec<u32>,
    #[serde(default)]
    pub adult: bool,
    #[serde(default)]
    pub video: bool,
    pub media_info: Option<MediaInfo>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TvResult {
    pub id: u32,
    pub media_type: String,
    pub name: String,
    pub original_name: Option<String>,
    pub overview: Option<String>,
    pub original_language: Option<String>,
    pub first_air_date: Option<String>,
    #[serde(default)]
    pub origin_country: Vec<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub popularity: Option<f64>,
    pub vote_count: Option<u32>,
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub genre_ids: Vec<u32>,
    pub media_info: Option<MediaInfo>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonResult {
    pub id: u32,
    pub media_type: String,
    pub name: String,
    pub profile_path: Option<String>,
    pub popularity: Option<f64>,
    #[serde(default)]
    pub adult: bool,
    #[serde(default)]
    pub known_for: Vec<KnownFor>,
}

/// An entry of a search or discover listing
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SearchResult {
    Movie(MovieResult),
    Tv(TvResult),
    Person(PersonResult),
}

impl TaggedUnion for SearchResult {
    const TAG_FIELD: &'static str = "mediaType";
    const VARIANTS: &'static [&'static str] = &["movie", "tv", "person"];

    fn dispatch(tag: &str, object: Value) -> Option<Result<Self, DecodeError>> {
        match tag {
            "movie" => Some(decode_typed(object).map(SearchResult::Movie)),
            "tv" => Some(decode_typed(object).map(SearchResult::Tv)),
            "person" => Some(decode_typed(object).map(SearchResult::Person)),
            _ => None,
        }
    }
}

impl<'de> Deserialize<'de> for SearchResult {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserialize_tagged(deserializer)
    }
}

impl SearchResult {
    pub fn id(&self) -> u32 {
        match self {
            SearchResult::Movie(movie) => movie.id,
            SearchResult::Tv(tv) => tv.id,
            SearchResult::Person(person) => person.id,
        }
    }

    /// Title for movies, name for shows and people
    pub fn title(&self) -> &str {
        match self {
            SearchResult::Movie(movie) => &movie.title,
            SearchResult::Tv(tv) => &tv.name,
            SearchResult::Person(person) => &person.name,
        }
    }
}

/// A title a person is known for
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum KnownFor {
    Movie(MovieResult),
    Tv(TvResult),
}

impl TaggedUnion for KnownFor {
    const TAG_FIELD: &'static str = "mediaType";
    const VARIANTS: &'static [&'static str] = &["movie", "tv"];

    fn dispatch(tag: &str, object: Value) -> Option<Result<Self, DecodeError>> {
        match tag {
            "movie" => Some(decode_typed(object).map(KnownFor::Movie)),
            "tv" => Some(decode_typed(object).map(KnownFor::Tv)),
            _ => None,
        }
    }
}

impl<'de> Deserialize<'de> for KnownFor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserialize_tagged(deserializer)
    }
}

/// An entry of the Plex watchlist from `GET /discover/watchlist`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchlistItem {
    pub rating_key: String,
    pub title: String,
    pub media_type: String,
    pub tmdb_id: u32,
}
