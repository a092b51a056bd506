// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use causeway_api::{ApiError, ApiErrorCode, ErrorEnvelope, FeedPageDto};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{Mutex, Semaphore};

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ClientError {
    /// The request itself is wrong (bad limit, corrupted cursor). Never
    /// retried; the caller must fix the request.
    Validation(ApiError),
    /// The server or the network failed. Retryable with backoff.
    Dependency(String),
}

impl ClientError {
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Dependency(_))
    }
}

impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Dependency(msg) => f.write_str(msg),
        }
    }
}

impl std::error::Error for ClientError {}

/// One page fetch against the feed endpoint.
#[async_trait]
pub trait FeedTransport: Send + Sync + 'static {
    async fn fetch_page(
        &self,
        cursor: Option<&str>,
        limit: usize,
    ) -> Result<FeedPageDto, ClientError>;
}

pub struct HttpTransport {
    base_url: String,
    client: reqwest::Client,
}

impl HttpTransport {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl FeedTransport for HttpTransport {
    async fn fetch_page(
        &self,
        cursor: Option<&str>,
        limit: usize,
    ) -> Result<FeedPageDto, ClientError> {
        let mut url = format!(
            "{}/api/v1/feed?limit={limit}",
            self.base_url.trim_end_matches('/')
        );
        if let Some(token) = cursor {
            // Cursor tokens are URL-safe base64; no extra escaping needed.
            url.push_str("&cursor=");
            url.push_str(token);
        }
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ClientError::Dependency(e.to_string()))?;
        let status = resp.status();
        if status.is_success() {
            return resp
                .json::<FeedPageDto>()
                .await
                .map_err(|e| ClientError::Dependency(e.to_string()));
        }
        match resp.json::<ErrorEnvelope>().await {
            Ok(envelope) if envelope.error.code == ApiErrorCode::ValidationError => {
                Err(ClientError::Validation(envelope.error))
            }
            Ok(envelope) => Err(ClientError::Dependency(envelope.error.message)),
            Err(_) => Err(ClientError::Dependency(format!(
                "feed endpoint returned {status}"
            ))),
        }
    }
}

/// Test transport: replays a scripted sequence of responses. An optional
/// gate semaphore holds each fetch open until the test releases it, which
/// is how in-flight overlap gets exercised deterministically.
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<Result<FeedPageDto, ClientError>>>,
    pub calls: AtomicU64,
    gate: Option<Arc<Semaphore>>,
}

impl ScriptedTransport {
    #[must_use]
    pub fn new(responses: Vec<Result<FeedPageDto, ClientError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            calls: AtomicU64::new(0),
            gate: None,
        }
    }

    #[must_use]
    pub fn gated(responses: Vec<Result<FeedPageDto, ClientError>>, gate: Arc<Semaphore>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            calls: AtomicU64::new(0),
            gate: Some(gate),
        }
    }

    #[must_use]
    pub fn call_count(&self) -> u64 {
        self.calls.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl FeedTransport for ScriptedTransport {
    async fn fetch_page(
        &self,
        _cursor: Option<&str>,
        _limit: usize,
    ) -> Result<FeedPageDto, ClientError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        if let Some(gate) = &self.gate {
            let permit = gate
                .acquire()
                .await
                .map_err(|e| ClientError::Dependency(e.to_string()))?;
            permit.forget();
        }
        self.responses
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Err(ClientError::Dependency("script exhausted".to_string())))
    }
}
