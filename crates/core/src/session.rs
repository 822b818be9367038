//! Session types and the day-bucket reconciliation transition.
//!
//! A session is the same-day activity window for one (visitor, owner)
//! pair. There is no explicit close event from the client; the session
//! state machine has exactly two states, no-session and open-session
//! (day-bucketed), and the day boundary is decided by comparing the
//! write-time UTC calendar date against the session's bucket.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Key for session reconciliation: one session per visitor, owner and
/// UTC calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionKey {
    pub owner_id: String,
    pub visitor_id: String,
    pub day: NaiveDate,
}

impl SessionKey {
    pub fn new(owner_id: impl Into<String>, visitor_id: impl Into<String>, day: NaiveDate) -> Self {
        Self {
            owner_id: owner_id.into(),
            visitor_id: visitor_id.into(),
            day,
        }
    }

    /// Day bucket for a write happening at `now`.
    pub fn for_instant(
        owner_id: impl Into<String>,
        visitor_id: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self::new(owner_id, visitor_id, now.date_naive())
    }
}

/// A reconciled same-day activity window. Mutated in place as further
/// views arrive the same day; never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: Uuid,
    pub owner_id: String,
    pub visitor_id: String,
    /// UTC calendar day this session is bucketed into
    pub day: NaiveDate,
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
    pub pages_viewed: u64,
    /// Running sum of self-reported client durations, not a wall-clock
    /// span.
    pub total_duration_secs: u64,
    pub active: bool,
}

impl Session {
    /// Opens a session for the first view of the day.
    pub fn open(key: &SessionKey, duration_secs: u64, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner_id: key.owner_id.clone(),
            visitor_id: key.visitor_id.clone(),
            day: key.day,
            started_at: now,
            ended_at: now,
            pages_viewed: 1,
            total_duration_secs: duration_secs,
            active: true,
        }
    }

    /// Folds a further same-day view into the session. Totals saturate:
    /// ingest caps the per-view duration, but the running sum must never
    /// wrap regardless of what reaches the store.
    pub fn absorb_view(&mut self, duration_secs: u64, now: DateTime<Utc>) {
        self.pages_viewed += 1;
        self.total_duration_secs = self.total_duration_secs.saturating_add(duration_secs);
        self.ended_at = now;
    }

    /// Day-boundary transition: the session stops accepting views once
    /// the write-time date has moved past its bucket.
    pub fn close(&mut self) {
        self.active = false;
    }

    /// A session that saw exactly one page counts as a bounce.
    pub fn is_bounce(&self) -> bool {
        self.pages_viewed == 1
    }
}
