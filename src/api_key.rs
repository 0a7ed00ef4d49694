//! Structural validation of Overseerr API keys
//!
//! Overseerr issues keys as base64 encoded strings containing a 13 digit
//! millisecond timestamp immediately followed by a UUID. Only the shape is
//! checked here; whether the server accepts the key is a separate matter.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// Number of leading characters holding the creation timestamp in milliseconds
const TIMESTAMP_DIGITS: usize = 13;

/// Checks that an API key has the structure Overseerr generates
///
/// Returns `false` for anything that is not valid base64, not UTF-8 once
/// decoded, lacks a numeric timestamp prefix or is not followed by a UUID.
pub fn is_valid_api_key(api_key: &str) -> bool {
    let Ok(decoded) = STANDARD.decode(api_key.as_bytes()) else {
        return false;
    };
    let Ok(decoded) = String::from_utf8(decoded) else {
        return false;
    };

    let (Some(timestamp), Some(uuid)) = (
        decoded.get(..TIMESTAMP_DIGITS),
        decoded.get(TIMESTAMP_DIGITS..),
    ) else {
        return false;
    };

    timestamp.parse::<i64>().is_ok() && uuid::Uuid::parse_str(uuid).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(raw: &str) -> String {
        STANDARD.encode(raw)
    }

    #[test]
    fn test_accepts_generated_key() {
        let key = encode("1700000000000550e8400-e29b-41d4-a716-446655440000");
        assert!(is_valid_api_key(&key));
    }

    #[test]
    fn test_rejects_non_base64() {
        assert!(!is_valid_api_key("not base64 at all!"));
    }

    #[test]
    fn test_rejects_bad_timestamp() {
        let key = encode("17000000000x0550e8400-e29b-41d4-a716-446655440000");
        assert!(!is_valid_api_key(&key));
    }

    #[test]
    fn test_rejects_bad_uuid() {
        let key = encode("1700000000000not-a-uuid");
        assert!(!is_valid_api_key(&key));
    }

    #[test]
    fn test_rejects_short_and_empty() {
        assert!(!is_valid_api_key(&encode("12345")));
        assert!(!is_valid_api_key(""));
    }
}
