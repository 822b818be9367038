//! Common test setup functions.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum_test::TestServer;

use api::{router, AppState};
use event_store::{EventStore, MemoryStore, RetryPolicy};

use crate::mocks::FlakyStore;

/// Test context with the real router over an in-memory store.
///
/// This exercises the same production code paths by:
/// - Using the real Axum router with all middleware
/// - Using the default MemoryStore via the EventStore trait
/// - Running the geo client in mock mode (no network)
pub struct TestContext {
    pub store: Arc<MemoryStore>,
    pub router: Router,
}

impl TestContext {
    /// Create a new test context with all components initialized.
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let state = AppState::new(store.clone() as Arc<dyn EventStore>, "mock");
        let router = router(state);
        Self { store, router }
    }

    pub fn server(&self) -> TestServer {
        TestServer::new(self.router.clone()).expect("Failed to create test server")
    }

    /// Row counts (views, interactions, dwells, sessions).
    pub fn counts(&self) -> (usize, usize, usize, usize) {
        self.store.counts()
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Test context whose store injects transient failures, with a fast
/// retry backoff so exhaustion tests stay quick.
pub struct FlakyContext {
    pub store: Arc<FlakyStore>,
    pub router: Router,
}

impl FlakyContext {
    pub fn new() -> Self {
        let store = Arc::new(FlakyStore::new());
        let retry = RetryPolicy {
            max_attempts: 3,
            backoff: Duration::from_millis(1),
        };
        let state =
            AppState::with_retry_policy(store.clone() as Arc<dyn EventStore>, "mock", retry);
        let router = router(state);
        Self { store, router }
    }

    pub fn server(&self) -> TestServer {
        TestServer::new(self.router.clone()).expect("Failed to create test server")
    }
}

impl Default for FlakyContext {
    fn default() -> Self {
        Self::new()
    }
}
