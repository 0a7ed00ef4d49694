//! Resource operations of the Overseerr API.
//!
//! Each handle borrows the client, builds the path and query for one group
//! of endpoints and decodes the response into that endpoint's model. Every
//! handle accepts `raw_response(bool)` to override the raw mode for the
//! calls made through it.

mod media;
mod movie;
mod request;
mod search;
mod status;
mod tv;
mod user;

pub use media::{MediaApi, MediaQuery};
pub use movie::MovieApi;
pub use request::{RequestApi, RequestQuery};
pub use search::{DiscoverApi, SearchApi};
pub use status::StatusApi;
pub use tv::TvApi;
pub use user::{UserApi, UserQuery};

/// Language used for localized details when the caller has no preference
pub const DEFAULT_LANGUAGE: &str = "en";
