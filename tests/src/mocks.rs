//! Mock implementations for testing.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;

use analytics_core::{Error, Interaction, Result, SectionDwell, Session, View};
use event_store::{EventStore, MemoryStore};

/// Store wrapper that injects transient failures before delegating.
///
/// Implements the same `EventStore` trait as the real store, so tests
/// exercise the production retry path without a real outage.
pub struct FlakyStore {
    inner: Arc<MemoryStore>,
    /// Remaining calls that fail before the store recovers.
    failures_left: Mutex<u32>,
}

impl FlakyStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(MemoryStore::new()),
            failures_left: Mutex::new(0),
        }
    }

    /// Make the next `n` store calls fail with a transient error.
    pub fn fail_next(&self, n: u32) {
        *self.failures_left.lock() = n;
    }

    /// Direct handle to the wrapped store for row inspection.
    pub fn inner(&self) -> &MemoryStore {
        &self.inner
    }

    fn take_failure(&self) -> Result<()> {
        let mut left = self.failures_left.lock();
        if *left > 0 {
            *left -= 1;
            return Err(Error::unavailable("injected store outage"));
        }
        Ok(())
    }
}

impl Default for FlakyStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventStore for FlakyStore {
    async fn insert_view(&self, view: View) -> Result<()> {
        self.take_failure()?;
        self.inner.insert_view(view).await
    }

    async fn insert_interaction(&self, interaction: Interaction) -> Result<()> {
        self.take_failure()?;
        self.inner.insert_interaction(interaction).await
    }

    async fn insert_dwell(&self, dwell: SectionDwell) -> Result<()> {
        self.take_failure()?;
        self.inner.insert_dwell(dwell).await
    }

    async fn record_view(
        &self,
        owner_id: &str,
        visitor_id: &str,
        duration_secs: u64,
        now: DateTime<Utc>,
    ) -> Result<Session> {
        self.take_failure()?;
        self.inner
            .record_view(owner_id, visitor_id, duration_secs, now)
            .await
    }

    async fn views_in_window(
        &self,
        owner_id: &str,
        since: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> Result<Vec<View>> {
        self.take_failure()?;
        self.inner.views_in_window(owner_id, since, until).await
    }

    async fn interactions_in_window(
        &self,
        owner_id: &str,
        since: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> Result<Vec<Interaction>> {
        self.take_failure()?;
        self.inner
            .interactions_in_window(owner_id, since, until)
            .await
    }

    async fn sessions_in_window(
        &self,
        owner_id: &str,
        since: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> Result<Vec<Session>> {
        self.take_failure()?;
        self.inner.sessions_in_window(owner_id, since, until).await
    }

    async fn dwells_in_window(
        &self,
        owner_id: &str,
        since: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> Result<Vec<SectionDwell>> {
        self.take_failure()?;
        self.inner.dwells_in_window(owner_id, since, until).await
    }

    async fn ping(&self) -> Result<()> {
        self.take_failure()?;
        self.inner.ping().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn flaky_store_fails_then_recovers() {
        let store = FlakyStore::new();
        store.fail_next(2);

        assert!(store.ping().await.is_err());
        assert!(store.ping().await.is_err());
        assert!(store.ping().await.is_ok());
    }

    #[tokio::test]
    async fn injected_failures_are_transient() {
        let store = FlakyStore::new();
        store.fail_next(1);

        let err = store.ping().await.unwrap_err();
        assert!(err.is_transient());
        assert_eq!(err.error_code(), Some("STORE_002"));
    }
}
