use super::DEFAULT_LANGUAGE;
use crate::OverseerrError;
use crate::client::Overseerr;
use crate::decode::{ApiResponse, decode};
use crate::http::RequestSpec;
use crate::models::{
    MediaKind, MediaRequest, MediaRequestPayload, RequestFilter, RequestPage, SeasonSelection,
    SortOrder,
};
use reqwest::Method;
use tracing::debug;

/// Paging and filtering for `GET /request`
///
/// Unset fields are left off the query so the server applies its own
/// defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestQuery {
    pub take: u32,
    pub skip: u32,
    pub filter: Option<RequestFilter>,
    pub sort: Option<SortOrder>,
    /// Only requests made by this user id
    pub requested_by: Option<u32>,
}

impl Default for RequestQuery {
    fn default() -> Self {
        Self {
            take: 20,
            skip: 0,
            filter: None,
            sort: None,
            requested_by: None,
        }
    }
}

impl RequestQuery {
    fn apply(&self, request: RequestSpec) -> RequestSpec {
        request
            .query("take", self.take)
            .query("skip", self.skip)
            .query_opt("filter", self.filter.map(|filter| filter.as_str()))
            .query_opt("sort", self.sort.map(|sort| sort.as_str()))
            .query_opt("requestedBy", self.requested_by)
    }
}

/// Media request endpoints
#[derive(Debug, Clone, Copy)]
pub struct RequestApi<'a> {
    client: &'a Overseerr,
    raw_response: Option<bool>,
}

impl<'a> RequestApi<'a> {
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

    /// `GET /request`
    pub async fn list(
        &self,
        query: &RequestQuery,
    ) -> Result<ApiResponse<RequestPage>, OverseerrError> {
        let request = query.apply(self.client.get(&["request"]));
        let payload = self.client.execute(request).await?;
        Ok(decode(payload, self.client.resolve_raw(self.raw_response))?)
    }

    /// Builds the body for a new request
    ///
    /// Movies need nothing but their id. For shows the details are fetched
    /// first to learn the TVDB id and the season list, which `seasons`
    /// narrows down.
    ///
    /// # Errors
    ///
    /// Propagates transport and decode errors from `GET /tv/{id}`.
    pub async fn build_payload(
        &self,
        media_id: u32,
        kind: MediaKind,
        seasons: SeasonSelection,
    ) -> Result<MediaRequestPayload, OverseerrError> {
        match kind {
            MediaKind::Movie => Ok(MediaRequestPayload::movie(media_id)),
            MediaKind::Tv => {
                let show = self.client.tv().details(media_id, DEFAULT_LANGUAGE).await?;
                let selected = seasons.select(&show.seasons);
                debug!(media_id, ?seasons, ?selected, "derived seasons for request");

                Ok(MediaRequestPayload::tv(
                    media_id,
                    show.external_ids.tvdb_id,
                    selected,
                ))
            }
        }
    }

    /// `POST /request` for a movie or show
    ///
    /// `seasons` is ignored for movies.
    pub async fn create(
        &self,
        media_id: u32,
        kind: MediaKind,
        seasons: SeasonSelection,
    ) -> Result<ApiResponse<MediaRequest>, OverseerrError> {
        let draft = self.build_payload(media_id, kind, seasons).await?;
        let body = serde_json::to_value(&draft)?;

        let request = self.client.build(Method::POST, &["request"]).json(body);
        let payload = self.client.execute(request).await?;
        Ok(decode(payload, self.client.resolve_raw(self.raw_response))?)
    }
}
