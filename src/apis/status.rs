use crate::OverseerrError;
use crate::client::Overseerr;
use crate::decode::{ApiResponse, decode};
use crate::models::{AppData, Status};

/// Server status endpoints
#[derive(Debug, Clone, Copy)]
pub struct StatusApi<'a> {
    client: &'a Overseerr,
    raw_response: Option<bool>,
}

impl<'a> StatusApi<'a> {
    pub(crate) fn new(client: &'a Overseerr) -> Self {
        Self {
            client,
            raw_response: None,
        }
    }

    /// Overrides the raw mode for calls made through this handle
    pub fn raw_response(mut self, raw_response: bool) -> Self {
        self.raw_response = Some(raw_response);
        self
    }

    /// `GET /status`: version and update information
    pub async fn get_status(&self) -> Result<ApiResponse<Status>, OverseerrError> {
        let payload = self.client.execute(self.client.get(&["status"])).await?;
        Ok(decode(payload, self.client.resolve_raw(self.raw_response))?)
    }

    /// `GET /status/appdata`: configuration volume information
    pub async fn get_appdata(&self) -> Result<ApiResponse<AppData>, OverseerrError> {
        let payload = self
            .client
            .execute(self.client.get(&["status", "appdata"]))
            .await?;
        Ok(decode(payload, self.client.resolve_raw(self.raw_response))?)
    }
}
