// SPDX-License-Identifier: Apache-2.0

use crate::errors::ApiError;
use std::collections::BTreeMap;

pub const DEFAULT_LIMIT: usize = 10;
pub const MAX_LIMIT: usize = 20;
pub const MAX_CURSOR_BYTES: usize = 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedParams {
    pub limit: usize,
    pub cursor: Option<String>,
}

pub fn parse_feed_params(query: &BTreeMap<String, String>) -> Result<FeedParams, ApiError> {
    parse_feed_params_with_limit(query, DEFAULT_LIMIT, MAX_LIMIT)
}

pub fn parse_feed_params_with_limit(
    query: &BTreeMap<String, String>,
    default_limit: usize,
    max_limit: usize,
) -> Result<FeedParams, ApiError> {
    let limit = if let Some(raw) = query.get("limit") {
        let value = raw
            .parse::<usize>()
            .map_err(|_| ApiError::invalid_limit(raw))?;
        if value == 0 || value > max_limit {
            return Err(ApiError::invalid_limit(raw));
        }
        value
    } else {
        default_limit
    };

    let cursor = query.get("cursor").cloned();
    if let Some(value) = &cursor {
        if value.is_empty() {
            return Err(ApiError::invalid_cursor("cursor must not be empty"));
        }
        if value.len() > MAX_CURSOR_BYTES {
            return Err(ApiError::invalid_cursor("cursor exceeds max length"));
        }
    }

    Ok(FeedParams { limit, cursor })
}
