use serde::{Deserialize, Serialize};

/// Server build and update information from `GET /status`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Status {
    pub version: String,
    pub commit_tag: Option<String>,
    #[serde(default)]
    pub update_available: bool,
    #[serde(default)]
    pub commits_behind: u32,
    #[serde(default)]
    pub restart_required: bool,
}

/// Configuration volume information from `GET /status/appdata`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppData {
    pub app_data: bool,
    pub app_data_path: String,
    #[serde(default)]
    pub app_data_permissions: bool,
}
