// SPDX-License-Identifier: Apache-2.0

use rusqlite::{params_from_iter, types::Value, Connection};

use crate::cursor::{decode_cursor, encode_cursor, FeedCursor};
use crate::db::{attach_media, build_feed_sql, parse_feed_row};
use crate::query_error::QueryError;
use crate::QueryLimits;
use causeway_model::PostRow;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedQueryRequest {
    pub cursor: Option<String>,
    pub limit: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedQueryResponse {
    pub entries: Vec<PostRow>,
    pub next_cursor: Option<String>,
    pub has_more: bool,
}

pub fn execute_feed_query(
    conn: &Connection,
    req: &FeedQueryRequest,
    limits: &QueryLimits,
) -> Result<FeedQueryResponse, QueryError> {
    if req.limit < limits.min_limit || req.limit > limits.max_limit {
        return Err(QueryError::Validation(format!(
            "limit must be within {}..={}, got {}",
            limits.min_limit, limits.max_limit, req.limit
        )));
    }

    let decoded = match &req.cursor {
        Some(token) => Some(decode_cursor(token).map_err(|e| QueryError::Cursor(e.to_string()))?),
        None => None,
    };

    let (sql, mut params) = build_feed_sql(decoded.as_ref());
    params.push(Value::Integer((req.limit as i64) + 1));

    let mut stmt = conn
        .prepare_cached(&sql)
        .map_err(|e| QueryError::Store(e.to_string()))?;
    let mapped = stmt
        .query_map(params_from_iter(params.iter()), parse_feed_row)
        .map_err(|e| QueryError::Store(e.to_string()))?;
    let mut entries: Vec<PostRow> = mapped
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| QueryError::Store(e.to_string()))?;

    let has_more = entries.len() > req.limit;
    if has_more {
        entries.truncate(req.limit);
    }

    attach_media(conn, &mut entries).map_err(|e| QueryError::Store(e.to_string()))?;

    let next_cursor = if has_more {
        let last = entries
            .last()
            .ok_or_else(|| QueryError::Store("pagination invariant violated".to_string()))?;
        Some(
            encode_cursor(&FeedCursor {
                created_at: last.created_at,
                id: last.id,
            })
            .map_err(|e| QueryError::Store(e.to_string()))?,
        )
    } else {
        None
    };

    Ok(FeedQueryResponse {
        entries,
        next_cursor,
        has_more,
    })
}
