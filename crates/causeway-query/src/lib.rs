#![forbid(unsafe_code)]
//! The feed query engine.
//!
//! Read-only keyset pagination over the content store: eligibility gate,
//! strict `(created_at DESC, id DESC)` total order, `limit + 1` fetch, and
//! the opaque cursor codec that resumes a page sequence across stateless
//! requests.

pub mod cursor;
mod db;
mod executor;
mod query_error;

pub use cursor::{decode_cursor, encode_cursor, CursorError, CursorErrorCode, FeedCursor};
pub use db::{create_content_schema, list_categories};
pub use executor::{execute_feed_query, FeedQueryRequest, FeedQueryResponse};
pub use query_error::QueryError;

/// Engine-side page size bounds, asserted again below the HTTP parse layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryLimits {
    pub min_limit: usize,
    pub max_limit: usize,
}

impl Default for QueryLimits {
    fn default() -> Self {
        Self {
            min_limit: 1,
            max_limit: 20,
        }
    }
}
