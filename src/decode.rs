//! Turning JSON payloads into typed models
//!
//! Payloads either pass through untouched (raw mode) or are validated into
//! a model. Validation errors carry the path of the offending field so a
//! change in the upstream API can be pinpointed.

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Raw mode used when neither the call site nor the client configures one
pub const DEFAULT_RAW_RESPONSE: bool = false;

/// A payload could not be validated against its model
#[derive(Debug, Error)]
#[error("Failed to decode {target} at `{path}`: {message}")]
pub struct DecodeError {
    /// Name of the model being decoded
    pub target: &'static str,
    /// Location of the offending field, e.g. `results[2].mediaType`
    pub path: String,
    /// What went wrong at that location
    pub message: String,
}

/// Result of an API operation: the untouched payload or the decoded model
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ApiResponse<T> {
    /// Payload exactly as the server sent it
    Raw(Value),
    /// Payload validated into its model
    Typed(T),
}

impl<T> ApiResponse<T> {
    pub fn is_raw(&self) -> bool {
        matches!(self, ApiResponse::Raw(_))
    }

    /// Returns the model, or `None` in raw mode
    pub fn typed(self) -> Option<T> {
        match self {
            ApiResponse::Typed(model) => Some(model),
            ApiResponse::Raw(_) => None,
        }
    }

    /// Returns the payload, or `None` when it was decoded
    pub fn raw(self) -> Option<Value> {
        match self {
            ApiResponse::Raw(value) => Some(value),
            ApiResponse::Typed(_) => None,
        }
    }
}

/// Picks the raw mode for a call: call site first, then the client
/// configuration, then [`DEFAULT_RAW_RESPONSE`].
pub fn resolve_raw_mode(call: Option<bool>, instance: Option<bool>) -> bool {
    call.or(instance).unwrap_or(DEFAULT_RAW_RESPONSE)
}

/// Decodes `raw` into `T`, or hands it back untouched in raw mode
///
/// # Errors
///
/// Returns a [`DecodeError`] when not in raw mode and the payload does not
/// match the model.
pub fn decode<T: DeserializeOwned>(
    raw: Value,
    raw_mode: bool,
) -> Result<ApiResponse<T>, DecodeError> {
    if raw_mode {
        return Ok(ApiResponse::Raw(raw));
    }
    decode_typed(raw).map(ApiResponse::Typed)
}

/// Decodes `raw` into `T` unconditionally
///
/// # Errors
///
/// Returns a [`DecodeError`] naming the first field that failed validation.
pub fn decode_typed<T: DeserializeOwned>(raw: Value) -> Result<T, DecodeError> {
    serde_path_to_error::deserialize(raw).map_err(|error| DecodeError {
        target: short_type_name::<T>(),
        path: error.path().to_string(),
        message: error.inner().to_string(),
    })
}

fn short_type_name<T>() -> &'static str {
    let name = std::any::type_name::<T>();
    name.rsplit("::").next().unwrap_or(name)
}

/// A record whose concrete shape depends on a tag field
///
/// Implementors provide the dispatch table in [`TaggedUnion::dispatch`] and
/// route their `Deserialize` impl through [`deserialize_tagged`].
pub(crate) trait TaggedUnion: Sized {
    /// Name of the discriminator field
    const TAG_FIELD: &'static str;
    /// Tag values present in the dispatch table
    const VARIANTS: &'static [&'static str];

    /// Decodes `object` with the shape registered for `tag`; `None` when the
    /// tag has no entry.
    fn dispatch(tag: &str, object: Value) -> Option<Result<Self, DecodeError>>;
}

pub(crate) fn deserialize_tagged<'de, D, U>(deserializer: D) -> Result<U, D::Error>
where
    D: Deserializer<'de>,
    U: TaggedUnion,
{
    let object = Value::deserialize(deserializer)?;

    let tag = match object.get(U::TAG_FIELD) {
        Some(Value::String(tag)) => tag.clone(),
        Some(other) => {
            return Err(D::Error::custom(format!(
                "`{}` must be a string, got {other}",
                U::TAG_FIELD
            )));
        }
        None => return Err(D::Error::missing_field(U::TAG_FIELD)),
    };

    match U::dispatch(&tag, object) {
        Some(decoded) => decoded.map_err(D::Error::custom),
        None => Err(D::Error::unknown_variant(&tag, U::VARIANTS)),
    }
}
