//! Health endpoint tests.
//!
//! Component health lives in a process-wide registry, so the readiness
//! transitions are exercised in a single test to keep them ordered.

use axum::http::StatusCode;

use integration_tests::setup::TestContext;
use telemetry::health;

#[tokio::test]
async fn liveness_readiness_and_summary() {
    let ctx = TestContext::new();
    let server = ctx.server();

    // Liveness only means the process is serving requests.
    server.get("/health/live").await.assert_status_ok();

    // Nothing has marked the store healthy yet.
    server
        .get("/health/ready")
        .await
        .assert_status(StatusCode::SERVICE_UNAVAILABLE);

    // Startup marks the store reachable; geo stays degraded.
    health().store.set_healthy();
    health().geoip.set_unhealthy("Connection failed");

    server.get("/health/ready").await.assert_status_ok();

    let response = server.get("/health").await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["store_connected"], true);
    assert_eq!(body["geoip_connected"], false);

    // Geo recovery upgrades the summary.
    health().geoip.set_healthy();
    let body: serde_json::Value = server.get("/health").await.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["geoip_connected"], true);
}
