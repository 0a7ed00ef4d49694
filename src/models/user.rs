use super::common::PageInfo;
use serde::{Deserialize, Serialize};

/// Sort order for user listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserSort {
    Created,
    Updated,
    Requests,
    Displayname,
}

impl UserSort {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserSort::Created => "created",
            UserSort::Updated => "updated",
            UserSort::Requests => "requests",
            UserSort::Displayname => "displayname",
        }
    }
}

/// An Overseerr user account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u32,
    pub display_name: String,
    pub email: String,
    pub username: Option<String>,
    pub plex_username: Option<String>,
    pub plex_id: Option<u64>,
    pub user_type: u8,
    pub permissions: u64,
    pub avatar: String,
    #[serde(default)]
    pub request_count: u32,
    pub movie_quota_limit: Option<u32>,
    pub movie_quota_days: Option<u32>,
    pub tv_quota_limit: Option<u32>,
    pub tv_quota_days: Option<u32>,
    pub settings: Option<UserSettings>,
    pub created_at: String,
    pub updated_at: String,
}

/// Per-user preferences; notification agent credentials are left out
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSettings {
    pub id: u32,
    pub locale: Option<String>,
    pub region: Option<String>,
    pub original_language: Option<String>,
    pub discord_id: Option<String>,
    pub telegram_chat_id: Option<String>,
    pub telegram_send_silently: Option<bool>,
    pub watchlist_sync_movies: Option<bool>,
    pub watchlist_sync_tv: Option<bool>,
}

/// Paginated user listing from `GET /user`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPage {
    pub page_info: PageInfo,
    pub results: Vec<User>,
}

/// Outcome of a user lookup: one record by id, or the listing
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum UserLookup {
    Single(User),
    List(Vec<User>),
}
