use crate::OverseerrError;
use crate::client::Overseerr;
use crate::decode::{ApiResponse, decode};
use crate::models::MovieDetails;

/// Movie details
#[derive(Debug, Clone, Copy)]
pub struct MovieApi<'a> {
    client: &'a Overseerr,
    raw_response: Option<bool>,
}

impl<'a> MovieApi<'a> {
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

    /// `GET /movie/{id}` with details localized to `language`
    pub async fn get(
        &self,
        movie_id: u32,
        language: &str,
    ) -> Result<ApiResponse<MovieDetails>, OverseerrError> {
        let id = movie_id.to_string();
        let request = self.client.get(&["movie", &id]).query("language", language);

        let payload = self.client.execute(request).await?;
        Ok(decode(payload, self.client.resolve_raw(self.raw_response))?)
    }
}
