// SPDX-License-Identifier: Apache-2.0

use causeway_model::PostId;
use causeway_query::{decode_cursor, encode_cursor, FeedCursor};
use chrono::{DateTime, Utc};
use proptest::prelude::*;
use uuid::Uuid;

fn arb_timestamp() -> impl Strategy<Value = DateTime<Utc>> {
    // Microsecond granularity, matching the canonical storage form.
    (0_i64..4_102_444_800, 0_i64..1_000_000).prop_map(|(secs, micros)| {
        DateTime::<Utc>::from_timestamp(secs, (micros * 1000) as u32).expect("in range")
    })
}

fn arb_post_id() -> impl Strategy<Value = PostId> {
    (any::<u128>()).prop_map(|bits| PostId::from_uuid(Uuid::from_u128(bits)))
}

proptest! {
    #[test]
    fn cursor_round_trips_for_arbitrary_pairs(created_at in arb_timestamp(), id in arb_post_id()) {
        let cursor = FeedCursor { created_at, id };
        let token = encode_cursor(&cursor).expect("encode");
        let decoded = decode_cursor(&token).expect("decode");
        prop_assert_eq!(decoded, cursor);
    }

    #[test]
    fn tokens_are_url_safe(created_at in arb_timestamp(), id in arb_post_id()) {
        let token = encode_cursor(&FeedCursor { created_at, id }).expect("encode");
        prop_assert!(token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[test]
    fn truncated_tokens_never_decode_to_a_different_cursor(
        created_at in arb_timestamp(),
        id in arb_post_id(),
        cut in 1_usize..10,
    ) {
        let cursor = FeedCursor { created_at, id };
        let token = encode_cursor(&cursor).expect("encode");
        let truncated = &token[..token.len().saturating_sub(cut)];
        if let Ok(decoded) = decode_cursor(truncated) {
            // A shorter token that still decodes must decode losslessly.
            prop_assert_eq!(decoded, cursor);
        }
    }
}
