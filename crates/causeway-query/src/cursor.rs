// SPDX-License-Identifier: Apache-2.0

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use causeway_model::{format_timestamp, parse_timestamp, PostId, Timestamp};
use serde::{Deserialize, Serialize};

const MAX_CURSOR_TOKEN_LEN: usize = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum CursorErrorCode {
    InvalidFormat,
    InvalidPayload,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CursorError {
    pub code: CursorErrorCode,
    pub message: String,
}

impl CursorError {
    #[must_use]
    pub fn new(code: CursorErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for CursorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.code, self.message)
    }
}

impl std::error::Error for CursorError {}

/// Resume position: the `(created_at, id)` of the last entry on the
/// previous page. Pure data, no server-side state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedCursor {
    pub created_at: Timestamp,
    pub id: PostId,
}

/// Wire payload: `{"createdAt": "<RFC 3339>", "id": "<uuid>"}`.
#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct CursorPayload {
    #[serde(rename = "createdAt")]
    created_at: String,
    id: String,
}

pub fn encode_cursor(cursor: &FeedCursor) -> Result<String, CursorError> {
    let payload = CursorPayload {
        created_at: format_timestamp(&cursor.created_at),
        id: cursor.id.to_string(),
    };
    let bytes = serde_json::to_vec(&payload)
        .map_err(|e| CursorError::new(CursorErrorCode::InvalidPayload, e.to_string()))?;
    Ok(URL_SAFE_NO_PAD.encode(bytes))
}

pub fn decode_cursor(token: &str) -> Result<FeedCursor, CursorError> {
    if token.is_empty() {
        return Err(CursorError::new(
            CursorErrorCode::InvalidFormat,
            "cursor must not be empty",
        ));
    }
    if token.len() > MAX_CURSOR_TOKEN_LEN {
        return Err(CursorError::new(
            CursorErrorCode::InvalidFormat,
            "cursor exceeds max length",
        ));
    }
    let bytes = URL_SAFE_NO_PAD
        .decode(token)
        .map_err(|e| CursorError::new(CursorErrorCode::InvalidFormat, e.to_string()))?;
    let payload: CursorPayload = serde_json::from_slice(&bytes)
        .map_err(|e| CursorError::new(CursorErrorCode::InvalidPayload, e.to_string()))?;
    let created_at = parse_timestamp(&payload.created_at)
        .map_err(|e| CursorError::new(CursorErrorCode::InvalidPayload, e.to_string()))?;
    let id = PostId::parse(&payload.id)
        .map_err(|e| CursorError::new(CursorErrorCode::InvalidPayload, e.to_string()))?;
    Ok(FeedCursor { created_at, id })
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use base64::Engine;
    use chrono::TimeZone;

    fn sample_cursor() -> FeedCursor {
        FeedCursor {
            created_at: chrono::Utc
                .with_ymd_and_hms(2026, 2, 14, 17, 39, 21)
                .unwrap(),
            id: PostId::parse("3e7c51f0-1111-4222-8333-444455556666").expect("id"),
        }
    }

    #[test]
    fn encode_decode_round_trips_exactly() {
        let cursor = sample_cursor();
        let token = encode_cursor(&cursor).expect("encode");
        let decoded = decode_cursor(&token).expect("decode");
        assert_eq!(decoded, cursor);
    }

    #[test]
    fn rejects_non_base64() {
        let err = decode_cursor("not!!valid!!base64").expect_err("garbage");
        assert_eq!(err.code, CursorErrorCode::InvalidFormat);
    }

    #[test]
    fn rejects_non_json_payload() {
        let token = URL_SAFE_NO_PAD.encode(b"plain text");
        let err = decode_cursor(&token).expect_err("non-json");
        assert_eq!(err.code, CursorErrorCode::InvalidPayload);
    }

    #[test]
    fn rejects_missing_fields() {
        let token = URL_SAFE_NO_PAD.encode(br#"{"createdAt":"2026-01-01T00:00:00Z"}"#);
        let err = decode_cursor(&token).expect_err("missing id");
        assert_eq!(err.code, CursorErrorCode::InvalidPayload);
    }

    #[test]
    fn rejects_unknown_fields() {
        let token = URL_SAFE_NO_PAD.encode(
            br#"{"createdAt":"2026-01-01T00:00:00Z","id":"3e7c51f0-1111-4222-8333-444455556666","extra":1}"#,
        );
        let err = decode_cursor(&token).expect_err("unknown field");
        assert_eq!(err.code, CursorErrorCode::InvalidPayload);
    }

    #[test]
    fn rejects_unparseable_timestamp_or_id() {
        let bad_ts = URL_SAFE_NO_PAD
            .encode(br#"{"createdAt":"yesterday","id":"3e7c51f0-1111-4222-8333-444455556666"}"#);
        assert_eq!(
            decode_cursor(&bad_ts).expect_err("bad ts").code,
            CursorErrorCode::InvalidPayload
        );
        let bad_id =
            URL_SAFE_NO_PAD.encode(br#"{"createdAt":"2026-01-01T00:00:00Z","id":"nope"}"#);
        assert_eq!(
            decode_cursor(&bad_id).expect_err("bad id").code,
            CursorErrorCode::InvalidPayload
        );
    }

    #[test]
    fn rejects_oversized_token() {
        let token = "A".repeat(MAX_CURSOR_TOKEN_LEN + 1);
        let err = decode_cursor(&token).expect_err("oversized");
        assert_eq!(err.code, CursorErrorCode::InvalidFormat);
    }
}
