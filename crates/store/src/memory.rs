//! In-memory event store.
//!
//! Raw rows are append-only vectors; sessions live in a map keyed by
//! (owner, visitor, day). All mutation happens under one write lock, so
//! the session transition in `record_view` is a single atomic
//! upsert-with-increment rather than a read-then-write across calls.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::collections::HashMap;

use analytics_core::{Interaction, Result, SectionDwell, Session, SessionKey, View};

use crate::EventStore;

#[derive(Default)]
struct Tables {
    views: Vec<View>,
    interactions: Vec<Interaction>,
    dwells: Vec<SectionDwell>,
    sessions: HashMap<SessionKey, Session>,
}

/// Thread-safe in-memory store.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Row counts (views, interactions, dwells, sessions), for tests.
    pub fn counts(&self) -> (usize, usize, usize, usize) {
        let tables = self.inner.read();
        (
            tables.views.len(),
            tables.interactions.len(),
            tables.dwells.len(),
            tables.sessions.len(),
        )
    }
}

#[async_trait]
impl EventStore for MemoryStore {
    async fn insert_view(&self, view: View) -> Result<()> {
        self.inner.write().views.push(view);
        Ok(())
    }

    async fn insert_interaction(&self, interaction: Interaction) -> Result<()> {
        self.inner.write().interactions.push(interaction);
        Ok(())
    }

    async fn insert_dwell(&self, dwell: SectionDwell) -> Result<()> {
        self.inner.write().dwells.push(dwell);
        Ok(())
    }

    async fn record_view(
        &self,
        owner_id: &str,
        visitor_id: &str,
        duration_secs: u64,
        now: DateTime<Utc>,
    ) -> Result<Session> {
        let key = SessionKey::for_instant(owner_id, visitor_id, now);
        let mut tables = self.inner.write();

        // Day-boundary transition: previous-day sessions for this
        // visitor stop being active once a new day's view arrives.
        for (other, session) in tables.sessions.iter_mut() {
            if other.owner_id == owner_id
                && other.visitor_id == visitor_id
                && other.day != key.day
                && session.active
            {
                session.close();
            }
        }

        let session = tables
            .sessions
            .entry(key.clone())
            .and_modify(|s| s.absorb_view(duration_secs, now))
            .or_insert_with(|| Session::open(&key, duration_secs, now));

        Ok(session.clone())
    }

    async fn views_in_window(
        &self,
        owner_id: &str,
        since: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> Result<Vec<View>> {
        Ok(self
            .inner
            .read()
            .views
            .iter()
            .filter(|v| v.owner_id == owner_id && v.viewed_at >= since && v.viewed_at < until)
            .cloned()
            .collect())
    }

    async fn interactions_in_window(
        &self,
        owner_id: &str,
        since: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> Result<Vec<Interaction>> {
        Ok(self
            .inner
            .read()
            .interactions
            .iter()
            .filter(|i| i.owner_id == owner_id && i.occurred_at >= since && i.occurred_at < until)
            .cloned()
            .collect())
    }

    async fn sessions_in_window(
        &self,
        owner_id: &str,
        since: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> Result<Vec<Session>> {
        Ok(self
            .inner
            .read()
            .sessions
            .values()
            .filter(|s| s.owner_id == owner_id && s.started_at >= since && s.started_at < until)
            .cloned()
            .collect())
    }

    async fn dwells_in_window(
        &self,
        owner_id: &str,
        since: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> Result<Vec<SectionDwell>> {
        Ok(self
            .inner
            .read()
            .dwells
            .iter()
            .filter(|d| d.owner_id == owner_id && d.recorded_at >= since && d.recorded_at < until)
            .cloned()
            .collect())
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}
