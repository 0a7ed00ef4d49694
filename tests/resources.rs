//! Resource operations end to end: paths, queries, bodies and decoding.

mod common;

use common::{media_info_json, media_request_json, start, status_json, tv_json, user_json};
use overseerr_client::models::{
    MediaKind, MediaStatus, RequestFilter, SearchResult, SeasonSelection, UserLookup, UserSort,
};
use overseerr_client::{RequestQuery, UserQuery};
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_tv_request_uses_latest_season() {
    let (server, client) = start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/tv/1399"))
        .and(query_param("language", "en"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(tv_json(1399, 121361, &[0, 1, 2, 3])),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/request"))
        .and(body_json(json!({
            "mediaType": "tv",
            "mediaId": 1399,
            "tvdbId": 121361,
            "seasons": [3]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(media_request_json(77)))
        .expect(1)
        .mount(&server)
        .await;

    let request = client
        .request()
        .create(1399, MediaKind::Tv, SeasonSelection::Latest)
        .await
        .unwrap()
        .typed()
        .unwrap();

    assert_eq!(request.id, 77);
    assert_eq!(request.seasons[0].season_number, 3);
}

#[tokio::test]
async fn test_tv_request_all_seasons_skips_specials() {
    let (server, client) = start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/tv/1399"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(tv_json(1399, 121361, &[0, 1, 2, 3])),
        )
        .mount(&server)
        .await;

    let payload = client
        .request()
        .build_payload(1399, MediaKind::Tv, SeasonSelection::All)
        .await
        .unwrap();

    assert_eq!(payload.seasons, Some(vec![1, 2, 3]));
    assert_eq!(payload.tvdb_id, Some(121361));
}

#[tokio::test]
async fn test_tv_request_in_raw_mode_still_reads_details() {
    let (server, client) = start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/tv/1399"))
        .respond_with(ResponseTemplate::new(200).set_body_json(tv_json(1399, 121361, &[1, 2])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/request"))
        .and(body_json(json!({
            "mediaType": "tv",
            "mediaId": 1399,
            "tvdbId": 121361,
            "seasons": [1]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(media_request_json(78)))
        .expect(1)
        .mount(&server)
        .await;

    let response = client
        .request()
        .raw_response(true)
        .create(1399, MediaKind::Tv, SeasonSelection::First)
        .await
        .unwrap();

    assert_eq!(response.raw().unwrap()["id"], 78);
}

#[tokio::test]
async fn test_movie_request_skips_details_lookup() {
    let (server, client) = start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/movie/603"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/request"))
        .and(body_json(json!({ "mediaType": "movie", "mediaId": 603 })))
        .respond_with(ResponseTemplate::new(201).set_body_json(media_request_json(5)))
        .expect(1)
        .mount(&server)
        .await;

    let response = client
        .request()
        .create(603, MediaKind::Movie, SeasonSelection::All)
        .await
        .unwrap();

    assert_eq!(response.typed().unwrap().id, 5);
}

#[tokio::test]
async fn test_request_listing_query() {
    let (server, client) = start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/request"))
        .and(query_param("take", "10"))
        .and(query_param("skip", "20"))
        .and(query_param("filter", "approved"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "pageInfo": { "page": 3, "pages": 3, "results": 21, "pageSize": 10 },
            "results": [media_request_json(21)]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let query = RequestQuery {
        take: 10,
        skip: 20,
        filter: Some(RequestFilter::Approved),
        ..RequestQuery::default()
    };
    let page = client.request().list(&query).await.unwrap().typed().unwrap();

    assert_eq!(page.page_info.results, 21);
    assert_eq!(page.results.len(), 1);
}

#[tokio::test]
async fn test_media_status_bodies() {
    let (server, client) = start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/media/42/available"))
        .and(body_json(json!({})))
        .respond_with(ResponseTemplate::new(200).set_body_json(media_info_json(42, 5)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/media/42/pending"))
        .and(body_json(json!({ "is4k": true })))
        .respond_with(ResponseTemplate::new(200).set_body_json(media_info_json(42, 2)))
        .expect(1)
        .mount(&server)
        .await;

    let media = client.media();
    let available = media
        .set_status(42, MediaStatus::Available, None)
        .await
        .unwrap()
        .typed()
        .unwrap();
    let pending = media
        .set_status(42, MediaStatus::Pending, Some(true))
        .await
        .unwrap()
        .typed()
        .unwrap();

    assert_eq!(available.status, 5);
    assert_eq!(pending.status, 2);
}

#[tokio::test]
async fn test_media_delete() {
    let (server, client) = start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/v1/media/42"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client.media().delete(42).await.unwrap();
}

#[tokio::test]
async fn test_search_results_dispatch_on_media_type() {
    let (server, client) = start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/search"))
        .and(query_param("query", "matrix"))
        .and(query_param("page", "1"))
        .and(query_param("language", "en"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "page": 1,
            "totalPages": 1,
            "totalResults": 3,
            "results": [
                { "id": 603, "mediaType": "movie", "title": "The Matrix" },
                { "id": 6473, "mediaType": "person", "name": "Keanu Reeves", "knownFor": [
                    { "id": 603, "mediaType": "movie", "title": "The Matrix" }
                ] },
                { "id": 32770, "mediaType": "tv", "name": "The Matrix Reloaded Revisited" }
            ]
        })))
        .mount(&server)
        .await;

    let page = client
        .search()
        .search("matrix", 1, "en")
        .await
        .unwrap()
        .typed()
        .unwrap();

    assert_eq!(page.total_results, 3);
    assert!(matches!(page.results[0], SearchResult::Movie(_)));
    assert!(matches!(page.results[1], SearchResult::Person(_)));
    assert!(matches!(page.results[2], SearchResult::Tv(_)));
    assert_eq!(page.results[1].title(), "Keanu Reeves");
}

#[tokio::test]
async fn test_search_rejects_unknown_media_type() {
    let (server, client) = start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/discover/trending"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "page": 1,
            "totalPages": 1,
            "totalResults": 1,
            "results": [{ "id": 1, "mediaType": "collection", "name": "Box set" }]
        })))
        .mount(&server)
        .await;

    let error = client.discover().trending(1, "en").await.unwrap_err();
    assert!(matches!(error, overseerr_client::OverseerrError::Decode(_)));

    // The same payload passes through untouched in raw mode
    let raw = client
        .discover()
        .raw_response(true)
        .trending(1, "en")
        .await
        .unwrap();
    assert_eq!(raw.raw().unwrap()["results"][0]["mediaType"], "collection");
}

#[tokio::test]
async fn test_version_is_cached() {
    let (server, client) = start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(status_json("1.33.2")))
        .expect(1)
        .mount(&server)
        .await;

    assert_eq!(client.version().await.unwrap(), "1.33.2");
    assert_eq!(client.version().await.unwrap(), "1.33.2");

    // Clones share the cache
    let clone = client.clone();
    assert_eq!(clone.version().await.unwrap(), "1.33.2");
}

#[tokio::test]
async fn test_user_lookup_single_and_list() {
    let (server, client) = start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/user/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json(7)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/user"))
        .and(query_param("take", "20"))
        .and(query_param("skip", "0"))
        .and(query_param("sort", "created"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "pageInfo": { "page": 1, "pages": 1, "results": 2, "pageSize": 20 },
            "results": [user_json(1), user_json(2)]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let users = client.user();
    let single = users
        .lookup(Some(7), &UserQuery::default())
        .await
        .unwrap()
        .typed()
        .unwrap();
    let list = users
        .lookup(
            None,
            &UserQuery {
                sort: Some(UserSort::Created),
                ..UserQuery::default()
            },
        )
        .await
        .unwrap()
        .typed()
        .unwrap();

    match single {
        UserLookup::Single(user) => assert_eq!(user.email, "user7@example.com"),
        other => panic!("expected a single user, got {other:?}"),
    }
    match list {
        UserLookup::List(users) => {
            assert_eq!(users.iter().map(|u| u.id).collect::<Vec<_>>(), vec![1, 2]);
        }
        other => panic!("expected a user list, got {other:?}"),
    }
}

#[tokio::test]
async fn test_user_create_and_bulk_update() {
    let (server, client) = start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/user"))
        .and(body_json(json!({
            "email": "user9@example.com",
            "username": "user9",
            "permissions": 32
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(user_json(9)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/v1/user"))
        .and(body_json(json!({ "ids": [1, 2], "permissions": 2 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([user_json(1), user_json(2)])))
        .expect(1)
        .mount(&server)
        .await;

    let created = client
        .user()
        .create("user9@example.com", "user9", 32)
        .await
        .unwrap()
        .typed()
        .unwrap();
    let updated = client
        .user()
        .bulk_update(&[1, 2], 2)
        .await
        .unwrap()
        .typed()
        .unwrap();

    assert_eq!(created.id, 9);
    assert_eq!(updated.len(), 2);
}
