//! Application state shared across handlers.

use std::sync::Arc;

use enrich::{GeoClient, UaEnricher};
use event_store::{EventStore, RetryPolicy};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Event store (in-memory by default, trait object for tests)
    pub store: Arc<dyn EventStore>,
    /// Geo-IP client (mock mode when unconfigured)
    pub geo: GeoClient,
    /// User-agent enricher
    pub ua: Arc<UaEnricher>,
    /// Retry policy for store operations
    pub retry: RetryPolicy,
}

impl AppState {
    pub fn new(store: Arc<dyn EventStore>, geo_url: impl Into<String>) -> Self {
        Self {
            store,
            geo: GeoClient::new(geo_url),
            ua: Arc::new(UaEnricher::new()),
            retry: RetryPolicy::default(),
        }
    }

    /// Create with a custom retry policy.
    pub fn with_retry_policy(
        store: Arc<dyn EventStore>,
        geo_url: impl Into<String>,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            store,
            geo: GeoClient::new(geo_url),
            ua: Arc::new(UaEnricher::new()),
            retry,
        }
    }
}
