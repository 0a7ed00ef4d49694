//! Shared setup for tests running against a mocked Overseerr instance
#![allow(dead_code)]

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use overseerr_client::{Overseerr, OverseerrConfig, RetryPolicy};
use serde_json::{Value, json};
use std::time::Duration;
use wiremock::MockServer;

/// Structurally valid key: 13 digit timestamp followed by a UUID
pub fn api_key() -> String {
    STANDARD.encode("1700000000000550e8400-e29b-41d4-a716-446655440000")
}

/// Retries quickly so exhaustion tests stay fast
pub fn fast_retry() -> RetryPolicy {
    RetryPolicy::new(5, Duration::from_millis(1), Duration::from_millis(5))
}

/// Plain http config pointing at `host:port`
pub fn config(host: &str, port: u16) -> OverseerrConfig {
    OverseerrConfig::new(host, api_key())
        .with_port(port)
        .with_tls(false)
        .with_timeout(Duration::from_secs(2))
        .with_retry_policy(fast_retry())
}

pub fn config_for(server: &MockServer) -> OverseerrConfig {
    let address = server.address();
    config(&address.ip().to_string(), address.port())
}

/// Starts a mock server and a client talking to it
pub async fn start() -> (MockServer, Overseerr) {
    let server = MockServer::start().await;
    let client = Overseerr::new(config_for(&server)).expect("client should build");
    (server, client)
}

pub fn status_json(version: &str) -> Value {
    json!({
        "version": version,
        "commitTag": "v1.33.2",
        "updateAvailable": false,
        "commitsBehind": 0,
        "restartRequired": false
    })
}

pub fn user_json(id: u32) -> Value {
    json!({
        "id": id,
        "displayName": format!("user{id}"),
        "email": format!("user{id}@example.com"),
        "username": null,
        "userType": 1,
        "permissions": 32,
        "avatar": "/avatar.png",
        "requestCount": 3,
        "createdAt": "2024-01-01T00:00:00.000Z",
        "updatedAt": "2024-02-01T00:00:00.000Z"
    })
}

pub fn media_info_json(id: u32, status: u8) -> Value {
    json!({
        "id": id,
        "mediaType": "movie",
        "tmdbId": 603,
        "status": status,
        "status4k": 1,
        "requests": [],
        "createdAt": "2024-01-01T00:00:00.000Z",
        "updatedAt": "2024-01-01T00:00:00.000Z"
    })
}

pub fn media_request_json(id: u32) -> Value {
    json!({
        "id": id,
        "status": 1,
        "createdAt": "2024-03-01T00:00:00.000Z",
        "updatedAt": "2024-03-01T00:00:00.000Z",
        "requestedBy": user_json(1),
        "is4k": false,
        "seasons": [{ "id": 9, "seasonNumber": 3, "status": 1 }]
    })
}

/// Show details listing the given season numbers in that order
pub fn tv_json(id: u32, tvdb_id: u32, season_numbers: &[u32]) -> Value {
    let seasons: Vec<Value> = season_numbers
        .iter()
        .map(|number| {
            json!({
                "id": 1000 + number,
                "name": format!("Season {number}"),
                "seasonNumber": number,
                "episodeCount": 10,
                "airDate": null
            })
        })
        .collect();

    json!({
        "id": id,
        "name": "Game of Thrones",
        "overview": "Seven noble families fight for control of Westeros.",
        "inProduction": false,
        "numberOfSeasons": season_numbers.len(),
        "seasons": seasons,
        "externalIds": { "imdbId": "tt0944947", "tvdbId": tvdb_id },
        "genres": [{ "id": 18, "name": "Drama" }]
    })
}
