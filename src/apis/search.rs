use crate::OverseerrError;
use crate::client::Overseerr;
use crate::decode::{ApiResponse, decode};
use crate::models::{Page, SearchResult, WatchlistItem};

/// Free text search across movies, shows and people
#[derive(Debug, Clone, Copy)]
pub struct SearchApi<'a> {
    client: &'a Overseerr,
    raw_response: Option<bool>,
}

impl<'a> SearchApi<'a> {
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

    /// `GET /search`
    ///
    /// Results mix movies, shows and people in the order the server ranks them.
    pub async fn search(
        &self,
        query: &str,
        page: u32,
        language: &str,
    ) -> Result<ApiResponse<Page<SearchResult>>, OverseerrError> {
        let request = self
            .client
            .get(&["search"])
            .query("query", query)
            .query("page", page)
            .query("language", language);

        let payload = self.client.execute(request).await?;
        Ok(decode(payload, self.client.resolve_raw(self.raw_response))?)
    }
}

/// Discovery listings
#[derive(Debug, Clone, Copy)]
pub struct DiscoverApi<'a> {
    client: &'a Overseerr,
    raw_response: Option<bool>,
}

impl<'a> DiscoverApi<'a> {
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

    /// `GET /discover/trending`
    pub async fn trending(
        &self,
        page: u32,
        language: &str,
    ) -> Result<ApiResponse<Page<SearchResult>>, OverseerrError> {
        let request = self
            .client
            .get(&["discover", "trending"])
            .query("page", page)
            .query("language", language);

        let payload = self.client.execute(request).await?;
        Ok(decode(payload, self.client.resolve_raw(self.raw_response))?)
    }

    /// `GET /discover/watchlist`: the Plex watchlist of the key's owner
    pub async fn watchlist(
        &self,
        page: u32,
    ) -> Result<ApiResponse<Page<WatchlistItem>>, OverseerrError> {
        let request = self
            .client
            .get(&["discover", "watchlist"])
            .query("page", page);

        let payload = self.client.execute(request).await?;
        Ok(decode(payload, self.client.resolve_raw(self.raw_response))?)
    }
}
