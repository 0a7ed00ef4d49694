//! Response and request schemas for the Overseerr API
//!
//! These mirror the JSON documents the server exchanges. Fields the client
//! does not know about are ignored, so newer server versions keep decoding.

mod common;
mod media;
mod movie;
mod request;
mod search;
mod status;
mod tv;
mod user;

pub use common::{
    CastMember, Credits, CrewMember, ExternalIds, Genre, Keyword, Page, PageInfo,
    ProductionCompany, ProductionCountry, RelatedVideo, SortOrder, SpokenLanguage, WatchProvider,
    WatchProviderRegion,
};
pub use media::{MediaFilter, MediaInfo, MediaPage, MediaStatus};
pub use movie::{Collection, MovieDetails};
pub use request::{
    MediaKind, MediaRequest, MediaRequestPayload, RequestFilter, RequestPage, RequestedSeason,
    SeasonSelection,
};
pub use search::{KnownFor, MovieResult, PersonResult, SearchResult, TvResult, WatchlistItem};
pub use status::{AppData, Status};
pub use tv::{CreatedBy, Episode, Season, TvDetails};
pub use user::{User, UserLookup, UserPage, UserSettings, UserSort};
