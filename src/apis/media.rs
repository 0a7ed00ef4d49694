use crate::OverseerrError;
use crate::client::Overseerr;
use crate::decode::{ApiResponse, decode};
use crate::http::RequestSpec;
use crate::models::{MediaFilter, MediaInfo, MediaPage, MediaStatus, SortOrder};
use reqwest::Method;
use serde_json::{Map, Value};

/// Paging and filtering for `GET /media`
///
/// Unset `filter` and `sort` are left off the query so the server applies
/// its own defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaQuery {
    pub take: u32,
    pub skip: u32,
    pub filter: Option<MediaFilter>,
    pub sort: Option<SortOrder>,
}

impl Default for MediaQuery {
    fn default() -> Self {
        Self {
            take: 20,
            skip: 0,
            filter: None,
            sort: None,
        }
    }
}

impl MediaQuery {
    fn apply(&self, request: RequestSpec) -> RequestSpec {
        request
            .query("take", self.take)
            .query("skip", self.skip)
            .query_opt("filter", self.filter.map(|filter| filter.as_str()))
            .query_opt("sort", self.sort.map(|sort| sort.as_str()))
    }
}

/// Media library endpoints
#[derive(Debug, Clone, Copy)]
pub struct MediaApi<'a> {
    client: &'a Overseerr,
    raw_response: Option<bool>,
}

impl<'a> MediaApi<'a> {
    pub(crate) fn new(client: &'a Overseerr) -> Self {
        Self {
            client,
            raw_response: None,
        }
    }

    pub fn raw_response(mut self, raw_response: bool) -> Self {
        self.raw_response = Some(raw_response);
        self
    }

    /// `GET /media`
    pub async fn list(
        &self,
        query: &MediaQuery,
    ) -> Result<ApiResponse<MediaPage>, OverseerrError> {
        let request = query.apply(self.client.get(&["media"]));
        let payload = self.client.execute(request).await?;
        Ok(decode(payload, self.client.resolve_raw(self.raw_response))?)
    }

    /// `POST /media/{id}/{status}`
    ///
    /// The 4K flag is only sent when `is4k` is `Some(true)`.
    pub async fn set_status(
        &self,
        media_id: u32,
        status: MediaStatus,
        is4k: Option<bool>,
    ) -> Result<ApiResponse<MediaInfo>, OverseerrError> {
        let payload = self
            .client
            .execute(status_request(self.client, media_id, status, is4k))
            .await?;
        Ok(decode(payload, self.client.resolve_raw(self.raw_response))?)
    }

    /// `DELETE /media/{id}`
    pub async fn delete(&self, media_id: u32) -> Result<(), OverseerrError> {
        let id = media_id.to_string();
        self.client
            .execute(self.client.build(Method::DELETE, &["media", &id]))
            .await?;
        Ok(())
    }
}

fn status_request(
    client: &Overseerr,
    media_id: u32,
    status: MediaStatus,
    is4k: Option<bool>,
) -> RequestSpec {
    let id = media_id.to_string();
    let mut body = Map::new();
    if is4k == Some(true) {
        body.insert("is4k".to_string(), Value::Bool(true));
    }

    client
        .build(Method::POST, &["media", &id, status.as_str()])
        .json(Value::Object(body))
}
