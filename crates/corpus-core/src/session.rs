//! Search session with simulated latency
//!
//! Each submission takes a request token, waits out the configured latency
//! and only then runs the matcher. The session keeps a single "current
//! result" slot; a result is published only if its token is still the most
//! recent one, so the last submission wins even when an earlier request
//! finishes later.
//!
//! A submission dropped before it completes (a timeout or a losing
//! `select!` branch) puts its `Loading` slot back to `Idle`.

use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::config::SearchConfig;
use crate::search::{normalize_query, QueryMatcher, SearchFilters, SearchOutcome};

/// Contents of the current result slot
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SessionSlot {
    Idle,
    Loading { request: u64 },
    Ready { request: u64, outcome: SearchOutcome },
}

#[derive(Debug)]
struct SessionInner {
    latest_request: u64,
    slot: SessionSlot,
}

/// Clears the `Loading` slot of a submission that never completed
struct PendingRequest<'a> {
    inner: &'a RwLock<SessionInner>,
    request: u64,
    settled: bool,
}

impl Drop for PendingRequest<'_> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        // The lock is never held across an await, so it is only briefly busy.
        // If it is, the next submission replaces the slot anyway.
        if let Ok(mut inner) = self.inner.try_write() {
            if inner.slot == (SessionSlot::Loading { request: self.request }) {
                inner.slot = SessionSlot::Idle;
                info!(request = self.request, "Search abandoned before completion");
            }
        }
    }
}

/// Serializes query submissions into one visible result
pub struct SearchSession {
    matcher: Arc<QueryMatcher>,
    latency: Duration,
    inner: RwLock<SessionInner>,
}

impl SearchSession {
    pub fn new(matcher: Arc<QueryMatcher>, latency: Duration) -> Self {
        Self {
            matcher,
            latency,
            inner: RwLock::new(SessionInner {
                latest_request: 0,
                slot: SessionSlot::Idle,
            }),
        }
    }

    /// Session over the configured corpus and latency
    pub fn from_config(config: &SearchConfig) -> anyhow::Result<Self> {
        let corpus = config.load_corpus()?;
        Ok(Self::new(Arc::new(QueryMatcher::new(corpus)), config.latency))
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }

    /// Snapshot of the current result slot
    pub async fn current(&self) -> SessionSlot {
        self.inner.read().await.slot.clone()
    }

    /// Submit a query
    ///
    /// Returns the outcome if this submission is still the latest when it
    /// completes, `None` if a later submission superseded it. A blank query
    /// resolves immediately to [`SearchOutcome::EmptyQuery`].
    pub async fn submit(&self, query: &str, filters: SearchFilters) -> Option<SearchOutcome> {
        if normalize_query(query).is_empty() {
            let mut inner = self.inner.write().await;
            inner.latest_request += 1;
            inner.slot = SessionSlot::Ready {
                request: inner.latest_request,
                outcome: SearchOutcome::EmptyQuery,
            };
            return Some(SearchOutcome::EmptyQuery);
        }

        let request = {
            let mut inner = self.inner.write().await;
            inner.latest_request += 1;
            inner.slot = SessionSlot::Loading {
                request: inner.latest_request,
            };
            inner.latest_request
        };
        debug!(request, query, "Search submitted");
        let mut pending = PendingRequest {
            inner: &self.inner,
            request,
            settled: false,
        };

        tokio::time::sleep(self.latency).await;
        let outcome = self.matcher.match_query(query, &filters);

        let mut inner = self.inner.write().await;
        pending.settled = true;
        if inner.latest_request != request {
            info!(
                request,
                latest = inner.latest_request,
                "Discarding superseded search result"
            );
            return None;
        }
        inner.slot = SessionSlot::Ready {
            request,
            outcome: outcome.clone(),
        };
        Some(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::Jurisdiction;

    fn session(latency_ms: u64) -> Arc<SearchSession> {
        Arc::new(SearchSession::new(
            Arc::new(QueryMatcher::builtin()),
            Duration::from_millis(latency_ms),
        ))
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_waits_for_latency() {
        let session = session(800);
        assert_eq!(session.current().await, SessionSlot::Idle);

        let started = tokio::time::Instant::now();
        let outcome = session.submit("estate tax", SearchFilters::new()).await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(800));
        assert_eq!(outcome.count(), 3);

        match session.current().await {
            SessionSlot::Ready { request, outcome: stored } => {
                assert_eq!(request, 1);
                assert_eq!(stored, outcome);
            }
            other => panic!("Expected ready slot, got {:?}", other),
        }
    }

    #[test]
    fn test_from_config() {
        let config = SearchConfig::default().with_latency(Duration::from_millis(5));
        let session = SearchSession::from_config(&config).unwrap();
        assert_eq!(session.latency(), Duration::from_millis(5));
    }

    #[tokio::test(start_paused = true)]
    async fn test_loading_state_while_pending() {
        let session = session(800);
        let pending = {
            let session = Arc::clone(&session);
            tokio::spawn(async move { session.submit("depreciation", SearchFilters::new()).await })
        };

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(session.current().await, SessionSlot::Loading { request: 1 });

        assert!(pending.await.unwrap().is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_submission_clears_loading() {
        let session = session(800);
        let timed_out = tokio::time::timeout(
            Duration::from_millis(100),
            session.submit("capital gains", SearchFilters::new()),
        )
        .await;
        assert!(timed_out.is_err());
        assert_eq!(session.current().await, SessionSlot::Idle);

        let outcome = session.submit("capital gains", SearchFilters::new()).await;
        assert!(outcome.is_some());
        assert!(matches!(
            session.current().await,
            SessionSlot::Ready { request: 2, .. }
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_submission_keeps_newer_slot() {
        let session = session(800);
        let abandoned = {
            let session = Arc::clone(&session);
            tokio::spawn(async move { session.submit("form 1040", SearchFilters::new()).await })
        };
        tokio::time::sleep(Duration::from_millis(10)).await;
        let newer = {
            let session = Arc::clone(&session);
            tokio::spawn(async move { session.submit("estate tax", SearchFilters::new()).await })
        };
        tokio::time::sleep(Duration::from_millis(10)).await;

        abandoned.abort();
        let _ = abandoned.await;
        assert_eq!(session.current().await, SessionSlot::Loading { request: 2 });
        assert!(newer.await.unwrap().is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_last_submission_wins() {
        let session = session(800);

        let first = {
            let session = Arc::clone(&session);
            tokio::spawn(async move { session.submit("form 1040", SearchFilters::new()).await })
        };
        tokio::time::sleep(Duration::from_millis(300)).await;
        let second = {
            let session = Arc::clone(&session);
            tokio::spawn(async move { session.submit("estate tax", SearchFilters::new()).await })
        };

        assert_eq!(first.await.unwrap(), None);
        let winner = second.await.unwrap().unwrap();

        match session.current().await {
            SessionSlot::Ready { request, outcome } => {
                assert_eq!(request, 2);
                assert_eq!(outcome, winner);
                assert_eq!(outcome.source().and_then(|s| s.key()), Some("estate tax"));
            }
            other => panic!("Expected ready slot, got {:?}", other),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_query_resolves_immediately_and_supersedes() {
        let session = session(800);
        let pending = {
            let session = Arc::clone(&session);
            tokio::spawn(async move {
                session
                    .submit("form 1040", SearchFilters::new().with_jurisdiction(Jurisdiction::State))
                    .await
            })
        };
        tokio::time::sleep(Duration::from_millis(10)).await;

        let started = tokio::time::Instant::now();
        assert_eq!(
            session.submit("   ", SearchFilters::new()).await,
            Some(SearchOutcome::EmptyQuery)
        );
        assert_eq!(started.elapsed(), Duration::ZERO);

        assert_eq!(pending.await.unwrap(), None);
        assert_eq!(
            session.current().await,
            SessionSlot::Ready {
                request: 2,
                outcome: SearchOutcome::EmptyQuery
            }
        );
    }
}
