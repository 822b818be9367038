//! Storage seam for the analytics service.
//!
//! The relational datastore itself is an external collaborator; handlers
//! program against the [`EventStore`] trait. [`MemoryStore`] is the
//! default implementation and the one the test suite runs against.

pub mod memory;
pub mod retry;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use analytics_core::{Interaction, Result, SectionDwell, Session, View};

pub use memory::MemoryStore;
pub use retry::{with_retry, RetryPolicy};

/// Storage operations the ingest and report paths need.
///
/// Reads are half-open windows `[since, until)`. `record_view` applies
/// the whole session transition atomically; implementations must not
/// expose an intermediate read-then-write state.
#[async_trait]
pub trait EventStore: Send + Sync {
    async fn insert_view(&self, view: View) -> Result<()>;

    async fn insert_interaction(&self, interaction: Interaction) -> Result<()>;

    async fn insert_dwell(&self, dwell: SectionDwell) -> Result<()>;

    /// Finds or creates the same-day session for (visitor, owner) and
    /// folds the view in. Returns the session after the transition.
    async fn record_view(
        &self,
        owner_id: &str,
        visitor_id: &str,
        duration_secs: u64,
        now: DateTime<Utc>,
    ) -> Result<Session>;

    async fn views_in_window(
        &self,
        owner_id: &str,
        since: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> Result<Vec<View>>;

    async fn interactions_in_window(
        &self,
        owner_id: &str,
        since: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> Result<Vec<Interaction>>;

    async fn sessions_in_window(
        &self,
        owner_id: &str,
        since: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> Result<Vec<Session>>;

    async fn dwells_in_window(
        &self,
        owner_id: &str,
        since: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> Result<Vec<SectionDwell>>;

    /// Connectivity probe for health reporting.
    async fn ping(&self) -> Result<()>;
}
