#![forbid(unsafe_code)]
//! Causeway HTTP service.
//!
//! A thin axum surface over the feed query engine: parse, execute under a
//! timeout, map errors to the wire contract. The content store is read-only
//! and the feed endpoint is publicly readable.

use axum::routing::get;
use axum::Router;
use causeway_query::QueryLimits;
use std::sync::atomic::{AtomicBool, AtomicU64};
use std::sync::Arc;

mod config;
mod http;
mod middleware;
mod store;

pub use config::{validate_startup_config, ApiConfig};
pub use store::{ContentDb, StoreError};

pub const CRATE_NAME: &str = "causeway-server";

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ContentDb>,
    pub api: ApiConfig,
    pub limits: QueryLimits,
    pub ready: Arc<AtomicBool>,
    pub accepting_requests: Arc<AtomicBool>,
    pub(crate) request_id_seed: Arc<AtomicU64>,
}

impl AppState {
    #[must_use]
    pub fn new(api: ApiConfig) -> Self {
        let store = Arc::new(ContentDb::new(
            api.content_db_path.clone(),
            api.store_open_timeout,
            api.sqlite_pragma_cache_kib,
        ));
        Self {
            store,
            api,
            limits: QueryLimits::default(),
            ready: Arc::new(AtomicBool::new(false)),
            accepting_requests: Arc::new(AtomicBool::new(true)),
            request_id_seed: Arc::new(AtomicU64::new(1)),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(http::handlers::healthz_handler))
        .route("/readyz", get(http::handlers::readyz_handler))
        .route("/v1/version", get(http::handlers::version_handler))
        .route("/api/v1/feed", get(http::handlers::feed_handler))
        .route("/api/v1/categories", get(http::handlers::categories_handler))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::request_tracing_middleware,
        ))
        .with_state(state)
}
