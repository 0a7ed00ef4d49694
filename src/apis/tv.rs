use crate::OverseerrError;
use crate::client::Overseerr;
use crate::decode::{ApiResponse, decode, decode_typed};
use crate::models::TvDetails;
use serde_json::Value;

/// TV show details
#[derive(Debug, Clone, Copy)]
pub struct TvApi<'a> {
    client: &'a Overseerr,
    raw_response: Option<bool>,
}

impl<'a> TvApi<'a> {
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

    /// `GET /tv/{id}` with details localized to `language`
    pub async fn get(
        &self,
        tv_id: u32,
        language: &str,
    ) -> Result<ApiResponse<TvDetails>, OverseerrError> {
        let payload = self.fetch(tv_id, language).await?;
        Ok(decode(payload, self.client.resolve_raw(self.raw_response))?)
    }

    /// Show details decoded regardless of any raw mode setting
    pub(crate) async fn details(
        &self,
        tv_id: u32,
        language: &str,
    ) -> Result<TvDetails, OverseerrError> {
        let payload = self.fetch(tv_id, language).await?;
        Ok(decode_typed(payload)?)
    }

    async fn fetch(&self, tv_id: u32, language: &str) -> Result<Value, OverseerrError> {
        let id = tv_id.to_string();
        let request = self.client.get(&["tv", &id]).query("language", language);
        self.client.execute(request).await
    }
}
