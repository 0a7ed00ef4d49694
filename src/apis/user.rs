use crate::OverseerrError;
use crate::client::Overseerr;
use crate::decode::{ApiResponse, DecodeError, decode, decode_typed};
use crate::models::{User, UserLookup, UserPage, UserSort};
use reqwest::Method;
use serde_json::{Value, json};

/// Paging for `GET /user`
#[derive(Debug, Clone, PartialEq)]
pub struct UserQuery {
    pub take: u32,
    pub skip: u32,
    /// Left off the query when unset
    pub sort: Option<UserSort>,
}

impl Default for UserQuery {
    fn default() -> Self {
        Self {
            take: 20,
            skip: 0,
            sort: None,
        }
    }
}

/// User management endpoints
#[derive(Debug, Clone, Copy)]
pub struct UserApi<'a> {
    client: &'a Overseerr,
    raw_response: Option<bool>,
}

impl<'a> UserApi<'a> {
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

    /// A single user when `user_id` is given, the listing otherwise
    ///
    /// Listings are accepted both as `{pageInfo, results}` and as a bare
    /// array.
    pub async fn lookup(
        &self,
        user_id: Option<u32>,
        query: &UserQuery,
    ) -> Result<ApiResponse<UserLookup>, OverseerrError> {
        let request = match user_id {
            Some(user_id) => self.client.get(&["user", &user_id.to_string()]),
            None => self
                .client
                .get(&["user"])
                .query("take", query.take)
                .query("skip", query.skip)
                .query_opt("sort", query.sort.map(|sort| sort.as_str())),
        };

        let payload = self.client.execute(request).await?;
        if self.client.resolve_raw(self.raw_response) {
            return Ok(ApiResponse::Raw(payload));
        }

        let lookup = match user_id {
            Some(_) => UserLookup::Single(decode_typed(payload)?),
            None => UserLookup::List(decode_user_list(payload)?),
        };
        Ok(ApiResponse::Typed(lookup))
    }

    /// `POST /user`
    pub async fn create(
        &self,
        email: &str,
        username: &str,
        permissions: u64,
    ) -> Result<ApiResponse<User>, OverseerrError> {
        let body = json!({
            "email": email,
            "username": username,
            "permissions": permissions,
        });
        let request = self.client.build(Method::POST, &["user"]).json(body);

        let payload = self.client.execute(request).await?;
        Ok(decode(payload, self.client.resolve_raw(self.raw_response))?)
    }

    /// `PUT /user`: sets `permissions` on every user in `user_ids`
    pub async fn bulk_update(
        &self,
        user_ids: &[u32],
        permissions: u64,
    ) -> Result<ApiResponse<Vec<User>>, OverseerrError> {
        let body = json!({
            "ids": user_ids,
            "permissions": permissions,
        });
        let request = self.client.build(Method::PUT, &["user"]).json(body);

        let payload = self.client.execute(request).await?;
        Ok(decode(payload, self.client.resolve_raw(self.raw_response))?)
    }
}

fn decode_user_list(payload: Value) -> Result<Vec<User>, DecodeError> {
    if payload.is_array() {
        decode_typed(payload)
    } else {
        decode_typed::<UserPage>(payload).map(|page| page.results)
    }
}
