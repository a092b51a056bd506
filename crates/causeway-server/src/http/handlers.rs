// SPDX-License-Identifier: Apache-2.0

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use causeway_api::{
    params::parse_feed_params, ApiError, ApiErrorCode, CategoryDto, CategoryListDto, FeedItemDto,
    FeedPageDto, FieldError,
};
use causeway_query::{execute_feed_query, FeedQueryRequest, QueryError};
use serde_json::json;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::Ordering;
use std::time::Instant;
use tokio::time::timeout;
use tracing::{info, warn};

use crate::http::response_contract::api_error_response;
use crate::AppState;

pub(crate) async fn healthz_handler() -> Response {
    (StatusCode::OK, "ok").into_response()
}

pub(crate) async fn readyz_handler(State(state): State<AppState>) -> Response {
    match state.store.probe().await {
        Ok(()) => {
            state.ready.store(true, Ordering::Relaxed);
            (StatusCode::OK, "ready").into_response()
        }
        Err(e) => {
            state.ready.store(false, Ordering::Relaxed);
            warn!("readiness probe failed: {e}");
            (StatusCode::SERVICE_UNAVAILABLE, "not ready").into_response()
        }
    }
}

pub(crate) async fn version_handler() -> Response {
    Json(json!({
        "name": crate::CRATE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
    }))
    .into_response()
}

pub(crate) async fn feed_handler(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let started = Instant::now();
    if !state.accepting_requests.load(Ordering::Relaxed) {
        return api_error_response(ApiError::dependency_unavailable(
            "server draining; refusing new requests",
        ));
    }

    let parse_map: BTreeMap<String, String> = params.into_iter().collect();
    let parsed = match parse_feed_params(&parse_map) {
        Ok(v) => v,
        Err(e) => return api_error_response(e),
    };
    let req = FeedQueryRequest {
        cursor: parsed.cursor,
        limit: parsed.limit,
    };

    let limits = state.limits;
    let store = state.store.clone();
    let work = async move {
        let conn = store
            .open_connection()
            .await
            .map_err(|e| QueryError::Store(e.to_string()))?;
        tokio::task::spawn_blocking(move || execute_feed_query(&conn, &req, &limits))
            .await
            .map_err(|e| QueryError::Store(e.to_string()))?
    };

    match timeout(state.api.request_timeout, work).await {
        Ok(Ok(page)) => {
            info!(
                entries = page.entries.len(),
                has_more = page.has_more,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "feed page served"
            );
            let dto = FeedPageDto {
                data: page.entries.into_iter().map(FeedItemDto::from).collect(),
                cursor: page.next_cursor,
                has_more: page.has_more,
            };
            Json(dto).into_response()
        }
        Ok(Err(QueryError::Cursor(msg))) => api_error_response(ApiError::invalid_cursor(&msg)),
        Ok(Err(QueryError::Validation(msg))) => api_error_response(ApiError::new(
            ApiErrorCode::ValidationError,
            "Validation failed.",
            vec![FieldError {
                field: "limit".to_string(),
                message: msg,
            }],
        )),
        Ok(Err(QueryError::Store(msg))) => {
            warn!("feed query store failure: {msg}");
            api_error_response(ApiError::dependency_unavailable("content store unavailable"))
        }
        Err(_) => {
            warn!("feed request timed out");
            api_error_response(ApiError::dependency_unavailable("request timed out"))
        }
    }
}

pub(crate) async fn categories_handler(State(state): State<AppState>) -> Response {
    let store = state.store.clone();
    let work = async move {
        let conn = store
            .open_connection()
            .await
            .map_err(|e| e.to_string())?;
        tokio::task::spawn_blocking(move || {
            causeway_query::list_categories(&conn).map_err(|e| e.to_string())
        })
        .await
        .map_err(|e| e.to_string())?
    };

    match timeout(state.api.request_timeout, work).await {
        Ok(Ok(categories)) => Json(CategoryListDto {
            data: categories.into_iter().map(CategoryDto::from).collect(),
        })
        .into_response(),
        Ok(Err(msg)) => {
            warn!("category listing store failure: {msg}");
            api_error_response(ApiError::dependency_unavailable("content store unavailable"))
        }
        Err(_) => api_error_response(ApiError::dependency_unavailable("request timed out")),
    }
}
