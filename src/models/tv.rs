use super::common::{
    Credits, ExternalIds, Genre, Keyword, ProductionCompany, ProductionCountry, SpokenLanguage,
    WatchProviderRegion,
};
use super::media::MediaInfo;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Episode {
    pub id: u32,
    pub name: String,
    pub air_date: Option<String>,
    pub episode_number: u32,
    pub overview: Option<String>,
    pub production_code: Option<String>,
    pub season_number: u32,
    pub show_id: Option<u32>,
    pub still_path: Option<String>,
    pub vote_average: Option<f64>,
    pub vote_count: Option<u32>,
}

/// One season as listed in a show's details
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Season {
    pub id: u32,
    pub name: String,
    /// 0 for the specials season
    pub season_number: u32,
    pub episode_count: Option<u32>,
    pub air_date: Option<String>,
    pub overview: Option<String>,
    pub poster_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedBy {
    pub id: u32,
    pub name: String,
    pub gender: Option<u8>,
    pub profile_path: Option<String>,
}

/// Full details of a show from `GET /tv/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TvDetails {
    pub id: u32,
    pub name: String,
    pub original_name: Option<String>,
    pub overview: Option<String>,
    pub tagline: Option<String>,
    pub status: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub backdrop_path: Option<String>,
    pub poster_path: Option<String>,
    pub homepage: Option<String>,
    pub first_air_date: Option<String>,
    pub last_air_date: Option<String>,
    #[serde(default)]
    pub in_production: bool,
    pub number_of_episodes: Option<u32>,
    pub number_of_seasons: Option<u32>,
    #[serde(default)]
    pub episode_run_time: Vec<u32>,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub origin_country: Vec<String>,
    pub original_language: Option<String>,
    pub popularity: Option<f64>,
    pub vote_average: Option<f64>,
    pub vote_count: Option<u32>,
    #[serde(default)]
    pub created_by: Vec<CreatedBy>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub networks: Vec<ProductionCompany>,
    #[serde(default)]
    pub production_companies: Vec<ProductionCompany>,
    #[serde(default)]
    pub production_countries: Vec<ProductionCountry>,
    #[serde(default)]
    pub spoken_languages: Vec<SpokenLanguage>,
    #[serde(default)]
    pub keywords: Vec<Keyword>,
    pub last_episode_to_air: Option<Episode>,
    pub next_episode_to_air: Option<Episode>,
    /// Seasons in the order the server lists them
    pub seasons: Vec<Season>,
    #[serde(default)]
    pub credits: Credits,
    pub external_ids: ExternalIds,
    pub media_info: Option<MediaInfo>,
    #[serde(default)]
    pub watch_providers: Vec<WatchProviderRegion>,
}
