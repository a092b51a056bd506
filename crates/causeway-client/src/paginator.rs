// SPDX-License-Identifier: Apache-2.0

use crate::transport::{ClientError, FeedTransport};
use causeway_api::{FeedItemDto, FeedPageDto};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::warn;

/// Bounded backoff for dependency failures inside one logical fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: usize,
    pub base_backoff_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_backoff_ms: 120,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Loading,
    Ready,
    Error,
}

struct ClientFeedState {
    items: Arc<Vec<FeedItemDto>>,
    cursor: Option<String>,
    has_more: bool,
    in_flight: bool,
    phase: Phase,
    last_error: Option<ClientError>,
    torn_down: bool,
}

impl ClientFeedState {
    fn new() -> Self {
        Self {
            items: Arc::new(Vec::new()),
            cursor: None,
            has_more: false,
            in_flight: false,
            phase: Phase::Idle,
            last_error: None,
            torn_down: false,
        }
    }
}

/// Read-only snapshot of the paginator, mirroring the view a feed surface
/// binds to.
#[derive(Debug, Clone)]
pub struct FeedView {
    pub items: Arc<Vec<FeedItemDto>>,
    pub is_loading: bool,
    pub is_success: bool,
    pub is_error: bool,
    pub error: Option<String>,
    pub has_next_page: bool,
    pub is_fetching_next_page: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// A page arrived; that many entries were appended.
    Appended(usize),
    /// The call was ignored: a fetch is already in flight, the feed is
    /// exhausted, or the session is torn down.
    NoOp,
    /// The fetch failed after retries; previously loaded items remain.
    Failed,
    /// The response arrived after the session was torn down.
    Discarded,
}

/// The pagination state machine: one in-flight fetch per session, strictly
/// sequential cursors, append-only accumulation modeled as a reducer over
/// an immutable list.
pub struct FeedPaginator<T: FeedTransport> {
    transport: Arc<T>,
    limit: usize,
    retry: RetryPolicy,
    state: Mutex<ClientFeedState>,
    epoch: AtomicU64,
}

impl<T: FeedTransport> FeedPaginator<T> {
    #[must_use]
    pub fn new(transport: Arc<T>, limit: usize) -> Self {
        Self {
            transport,
            limit,
            retry: RetryPolicy::default(),
            state: Mutex::new(ClientFeedState::new()),
            epoch: AtomicU64::new(0),
        }
    }

    #[must_use]
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub async fn view(&self) -> FeedView {
        let st = self.state.lock().await;
        FeedView {
            items: Arc::clone(&st.items),
            is_loading: st.phase == Phase::Loading,
            is_success: st.phase == Phase::Ready,
            is_error: st.phase == Phase::Error || st.last_error.is_some(),
            error: st.last_error.as_ref().map(ToString::to_string),
            has_next_page: st.has_more,
            is_fetching_next_page: st.in_flight && st.phase == Phase::Ready,
        }
    }

    /// Idle → Loading → Ready | Error. A failed initial load keeps zero
    /// items; calling again retries from scratch.
    pub async fn load_initial(&self) -> FetchOutcome {
        let epoch = {
            let mut st = self.state.lock().await;
            if st.torn_down || st.in_flight || !matches!(st.phase, Phase::Idle | Phase::Error) {
                return FetchOutcome::NoOp;
            }
            st.phase = Phase::Loading;
            st.in_flight = true;
            st.last_error = None;
            self.epoch.load(Ordering::Relaxed)
        };

        let result = self.fetch_with_retry(None).await;

        let mut st = self.state.lock().await;
        if st.torn_down || self.epoch.load(Ordering::Relaxed) != epoch {
            st.in_flight = false;
            return FetchOutcome::Discarded;
        }
        st.in_flight = false;
        match result {
            Ok(page) => {
                let appended = page.data.len();
                st.items = Arc::new(page.data);
                st.cursor = page.cursor;
                st.has_more = page.has_more;
                st.phase = Phase::Ready;
                FetchOutcome::Appended(appended)
            }
            Err(e) => {
                st.items = Arc::new(Vec::new());
                st.phase = Phase::Error;
                st.last_error = Some(e);
                FetchOutcome::Failed
            }
        }
    }

    /// Ready → FetchingMore → Ready. No-ops while a fetch is in flight or
    /// the feed is exhausted, so rapid double-calls issue exactly one
    /// network request. A trailing failure leaves the accumulated items and
    /// cursor untouched; calling again retries from the same position.
    pub async fn fetch_next_page(&self) -> FetchOutcome {
        let (cursor, epoch) = {
            let mut st = self.state.lock().await;
            if st.torn_down || st.in_flight || st.phase != Phase::Ready || !st.has_more {
                return FetchOutcome::NoOp;
            }
            st.in_flight = true;
            st.last_error = None;
            (st.cursor.clone(), self.epoch.load(Ordering::Relaxed))
        };

        let result = self.fetch_with_retry(cursor).await;

        let mut st = self.state.lock().await;
        if st.torn_down || self.epoch.load(Ordering::Relaxed) != epoch {
            st.in_flight = false;
            return FetchOutcome::Discarded;
        }
        st.in_flight = false;
        match result {
            Ok(page) => {
                let appended = page.data.len();
                let mut next: Vec<FeedItemDto> = st.items.as_ref().clone();
                next.extend(page.data);
                st.items = Arc::new(next);
                st.cursor = page.cursor;
                st.has_more = page.has_more;
                FetchOutcome::Appended(appended)
            }
            Err(e) => {
                st.last_error = Some(e);
                FetchOutcome::Failed
            }
        }
    }

    /// Tears the session down: further calls no-op and any in-flight
    /// response is discarded on arrival.
    pub async fn shutdown(&self) {
        self.epoch.fetch_add(1, Ordering::Relaxed);
        let mut st = self.state.lock().await;
        st.torn_down = true;
    }

    async fn fetch_with_retry(&self, cursor: Option<String>) -> Result<FeedPageDto, ClientError> {
        let mut attempt = 1;
        loop {
            match self
                .transport
                .fetch_page(cursor.as_deref(), self.limit)
                .await
            {
                Ok(page) => return Ok(page),
                Err(e) if e.is_retryable() && attempt < self.retry.max_attempts => {
                    let backoff_ms = self
                        .retry
                        .base_backoff_ms
                        .saturating_mul(1_u64 << (attempt - 1));
                    warn!(attempt, backoff_ms, "feed fetch failed, retrying: {e}");
                    tokio::time::sleep(Duration::from_millis(backoff_ms)).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::ScriptedTransport;
    use causeway_api::{ApiError, FeedOrganizationDto};
    use tokio::sync::Semaphore;

    fn item(n: u32) -> FeedItemDto {
        FeedItemDto {
            post_id: format!("00000000-0000-4000-8000-{n:012}"),
            title: format!("Post {n}"),
            description: None,
            media_type: "video".to_string(),
            created_at: format!("2026-03-01T12:00:{:02}.000000Z", n % 60),
            media: Vec::new(),
            organization: FeedOrganizationDto {
                id: "11111111-1111-4111-8111-111111111111".to_string(),
                name: "Org".to_string(),
                logo_url: None,
                is_verified: true,
            },
            opportunity: None,
        }
    }

    fn page(ids: &[u32], cursor: Option<&str>, has_more: bool) -> FeedPageDto {
        FeedPageDto {
            data: ids.iter().copied().map(item).collect(),
            cursor: cursor.map(ToString::to_string),
            has_more,
        }
    }

    fn dependency_err() -> ClientError {
        ClientError::Dependency("store unavailable".to_string())
    }

    #[tokio::test]
    async fn initial_load_reaches_ready() {
        let transport = Arc::new(ScriptedTransport::new(vec![Ok(page(
            &[1, 2],
            Some("c1"),
            true,
        ))]));
        let paginator = FeedPaginator::new(transport, 10);

        let outcome = paginator.load_initial().await;
        assert_eq!(outcome, FetchOutcome::Appended(2));
        let view = paginator.view().await;
        assert_eq!(view.items.len(), 2);
        assert!(view.is_success);
        assert!(!view.is_error);
        assert!(view.has_next_page);
        assert!(!view.is_fetching_next_page);
    }

    #[tokio::test]
    async fn failed_initial_load_keeps_zero_items() {
        let transport = Arc::new(ScriptedTransport::new(vec![Err(ClientError::Validation(
            ApiError::invalid_cursor("corrupted"),
        ))]));
        let paginator = FeedPaginator::new(transport, 10);

        assert_eq!(paginator.load_initial().await, FetchOutcome::Failed);
        let view = paginator.view().await;
        assert!(view.items.is_empty());
        assert!(view.is_error);
        assert!(!view.is_success);
    }

    #[tokio::test]
    async fn pages_append_in_arrival_order_without_resorting() {
        let transport = Arc::new(ScriptedTransport::new(vec![
            Ok(page(&[5, 4], Some("c1"), true)),
            Ok(page(&[3, 2], Some("c2"), true)),
            Ok(page(&[1], None, false)),
        ]));
        let paginator = FeedPaginator::new(transport, 2);

        paginator.load_initial().await;
        paginator.fetch_next_page().await;
        paginator.fetch_next_page().await;

        let view = paginator.view().await;
        let titles: Vec<&str> = view.items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["Post 5", "Post 4", "Post 3", "Post 2", "Post 1"]);
        assert!(!view.has_next_page);
        assert_eq!(paginator.fetch_next_page().await, FetchOutcome::NoOp);
    }

    #[tokio::test]
    async fn concurrent_fetch_next_page_issues_exactly_one_call() {
        let gate = Arc::new(Semaphore::new(1));
        let transport = Arc::new(ScriptedTransport::gated(
            vec![
                Ok(page(&[2, 1], Some("c1"), true)),
                Ok(page(&[0], None, false)),
            ],
            Arc::clone(&gate),
        ));
        let paginator = Arc::new(FeedPaginator::new(Arc::clone(&transport), 2));
        paginator.load_initial().await;
        assert_eq!(transport.call_count(), 1);

        let background = {
            let paginator = Arc::clone(&paginator);
            tokio::spawn(async move { paginator.fetch_next_page().await })
        };
        // Let the background fetch reach the gate, then call again while it
        // is still in flight.
        tokio::task::yield_now().await;
        assert_eq!(paginator.fetch_next_page().await, FetchOutcome::NoOp);

        gate.add_permits(1);
        assert_eq!(
            background.await.expect("background fetch"),
            FetchOutcome::Appended(1)
        );
        assert_eq!(transport.call_count(), 2);
        assert_eq!(paginator.view().await.items.len(), 3);
    }

    #[tokio::test]
    async fn trailing_failure_keeps_items_and_allows_retry_from_same_cursor() {
        let transport = Arc::new(ScriptedTransport::new(vec![
            Ok(page(&[2, 1], Some("c1"), true)),
            Err(dependency_err()),
            Ok(page(&[0], None, false)),
        ]));
        let paginator = FeedPaginator::new(Arc::clone(&transport), 2).with_retry(RetryPolicy {
            max_attempts: 1,
            base_backoff_ms: 1,
        });

        paginator.load_initial().await;
        assert_eq!(paginator.fetch_next_page().await, FetchOutcome::Failed);

        let view = paginator.view().await;
        assert_eq!(view.items.len(), 2, "loaded items survive a trailing failure");
        assert!(view.is_error);
        assert!(view.has_next_page);

        assert_eq!(paginator.fetch_next_page().await, FetchOutcome::Appended(1));
        let view = paginator.view().await;
        assert_eq!(view.items.len(), 3);
        assert!(!view.is_error);
    }

    #[tokio::test]
    async fn dependency_failures_retry_with_backoff_then_succeed() {
        let transport = Arc::new(ScriptedTransport::new(vec![
            Err(dependency_err()),
            Err(dependency_err()),
            Ok(page(&[1], None, false)),
        ]));
        let paginator = FeedPaginator::new(Arc::clone(&transport), 10).with_retry(RetryPolicy {
            max_attempts: 3,
            base_backoff_ms: 1,
        });

        assert_eq!(paginator.load_initial().await, FetchOutcome::Appended(1));
        assert_eq!(transport.call_count(), 3);
    }

    #[tokio::test]
    async fn validation_failures_are_never_retried() {
        let transport = Arc::new(ScriptedTransport::new(vec![Err(ClientError::Validation(
            ApiError::invalid_limit("50"),
        ))]));
        let paginator = FeedPaginator::new(Arc::clone(&transport), 10).with_retry(RetryPolicy {
            max_attempts: 5,
            base_backoff_ms: 1,
        });

        assert_eq!(paginator.load_initial().await, FetchOutcome::Failed);
        assert_eq!(transport.call_count(), 1);
    }

    #[tokio::test]
    async fn late_response_after_shutdown_is_discarded() {
        let gate = Arc::new(Semaphore::new(1));
        let transport = Arc::new(ScriptedTransport::gated(
            vec![
                Ok(page(&[2, 1], Some("c1"), true)),
                Ok(page(&[0], None, false)),
            ],
            Arc::clone(&gate),
        ));
        let paginator = Arc::new(FeedPaginator::new(transport, 2));
        paginator.load_initial().await;

        let background = {
            let paginator = Arc::clone(&paginator);
            tokio::spawn(async move { paginator.fetch_next_page().await })
        };
        tokio::task::yield_now().await;
        paginator.shutdown().await;
        gate.add_permits(1);

        assert_eq!(
            background.await.expect("background fetch"),
            FetchOutcome::Discarded
        );
        let view = paginator.view().await;
        assert_eq!(view.items.len(), 2, "torn-down session state is untouched");
        assert_eq!(paginator.fetch_next_page().await, FetchOutcome::NoOp);
    }
}
