//! End-to-end tests for the report endpoints.
//!
//! Rows are seeded through the real tracking endpoints, then the GET
//! handlers aggregate them on read.

use axum::http::StatusCode;

use event_store::EventStore;
use integration_tests::{fixtures, setup::TestContext};

/// Returning visitors and referrer classification over a small
/// mixed-source window.
#[tokio::test]
async fn traffic_report_counts_and_referrers() {
    let ctx = TestContext::new();
    let server = ctx.server();

    // v1 arrives three times via Google, v2 once directly.
    for _ in 0..3 {
        server
            .post("/track-view")
            .json(&fixtures::view_payload_full(
                "u1",
                "v1",
                "https://www.google.com/search?q=portfolio",
                30,
            ))
            .await
            .assert_status_ok();
    }
    server
        .post("/track-view")
        .json(&fixtures::view_payload("u1", "v2"))
        .await
        .assert_status_ok();

    let response = server
        .get("/track-view")
        .add_query_param("ownerId", "u1")
        .await;
    response.assert_status_ok();
    let report: serde_json::Value = response.json();

    assert_eq!(report["totalViews"], 4);
    assert_eq!(report["uniqueVisitors"], 2);
    assert_eq!(report["returningVisitors"], 2);
    assert_eq!(report["referrerStats"]["Google"], 3);
    assert_eq!(report["referrerStats"]["Direct"], 1);
    // One same-day session per visitor; v1's has three pages.
    assert_eq!(report["bounceRate"], 50.0);
    assert_eq!(report["avgPagesPerSession"], 2.0);
}

/// Device breakdown sums match the view total.
#[tokio::test]
async fn breakdowns_sum_to_total_views() {
    let ctx = TestContext::new();
    let server = ctx.server();

    server
        .post("/track-view")
        .add_header("User-Agent", fixtures::chrome_ua())
        .json(&fixtures::view_payload("u1", "v1"))
        .await
        .assert_status_ok();
    server
        .post("/track-view")
        .add_header("User-Agent", fixtures::iphone_ua())
        .json(&fixtures::view_payload("u1", "v2"))
        .await
        .assert_status_ok();

    let report: serde_json::Value = server
        .get("/track-view")
        .add_query_param("ownerId", "u1")
        .await
        .json();

    assert_eq!(report["deviceStats"]["desktop"], 1);
    assert_eq!(report["deviceStats"]["mobile"], 1);
    let device_sum: u64 = report["deviceStats"]
        .as_object()
        .unwrap()
        .values()
        .map(|v| v.as_u64().unwrap())
        .sum();
    assert_eq!(device_sum, report["totalViews"].as_u64().unwrap());
}

/// Reading a report twice over unchanged rows returns byte-identical
/// bodies.
#[tokio::test]
async fn repeated_reads_are_idempotent() {
    let ctx = TestContext::new();
    let server = ctx.server();

    for visitor in ["v1", "v2", "v3"] {
        server
            .post("/track-view")
            .json(&fixtures::view_payload_full(
                "u1",
                visitor,
                "https://news.ycombinator.com/item",
                5,
            ))
            .await
            .assert_status_ok();
    }

    let first: serde_json::Value = server
        .get("/track-view")
        .add_query_param("ownerId", "u1")
        .await
        .json();
    let second: serde_json::Value = server
        .get("/track-view")
        .add_query_param("ownerId", "u1")
        .await
        .json();
    assert_eq!(first, second);
    assert_eq!(first["referrerStats"]["news.ycombinator.com"], 3);
}

/// Section report aggregates dwell rows and ranks sections.
#[tokio::test]
async fn section_report_ranks_sections() {
    let ctx = TestContext::new();
    let server = ctx.server();

    // "projects" wins on raw time; "contact" on the engagement score.
    server
        .post("/section-time")
        .json(&fixtures::section_payload("u1", "v1", "projects", 300, 10.0, 0))
        .await
        .assert_status_ok();
    server
        .post("/section-time")
        .json(&fixtures::section_payload("u1", "v1", "contact", 20, 90.0, 5))
        .await
        .assert_status_ok();

    let report: serde_json::Value = server
        .get("/section-time")
        .add_query_param("ownerId", "u1")
        .await
        .json();

    assert_eq!(report["mostPopularSection"], "projects");
    assert_eq!(report["mostEngagingSection"], "contact");
    assert_eq!(report["sectionAnalytics"][0]["sectionName"], "projects");
    assert_eq!(report["visitorJourneys"][0]["visitorId"], "v1");
    assert_eq!(
        report["visitorJourneys"][0]["path"],
        serde_json::json!(["projects", "contact"])
    );
}

/// The documented score example: 60s dwell, 80% scroll, 2 interactions
/// scores 108.
#[tokio::test]
async fn section_engagement_score_matches_formula() {
    let ctx = TestContext::new();
    let server = ctx.server();

    server
        .post("/section-time")
        .json(&fixtures::section_payload("u1", "v1", "about", 60, 80.0, 2))
        .await
        .assert_status_ok();

    let report: serde_json::Value = server
        .get("/section-time")
        .add_query_param("ownerId", "u1")
        .await
        .json();
    assert_eq!(report["sectionAnalytics"][0]["engagementScore"], 108);
}

/// Reports are tenant-scoped; an owner with no rows gets an empty
/// report, not an error.
#[tokio::test]
async fn empty_window_reports_zeroes() {
    let ctx = TestContext::new();
    let server = ctx.server();

    server
        .post("/track-view")
        .json(&fixtures::view_payload("u1", "v1"))
        .await
        .assert_status_ok();

    let report: serde_json::Value = server
        .get("/track-view")
        .add_query_param("ownerId", "someone-else")
        .await
        .json();
    assert_eq!(report["totalViews"], 0);
    assert_eq!(report["uniqueVisitors"], 0);
    assert_eq!(report["growthRate"], 0.0);
    assert_eq!(report["bounceRate"], 0.0);

    let sections: serde_json::Value = server
        .get("/section-time")
        .add_query_param("ownerId", "someone-else")
        .await
        .json();
    assert!(sections["sectionAnalytics"].as_array().unwrap().is_empty());
    assert!(sections["mostPopularSection"].is_null());
}

/// The growth rate compares against the immediately preceding window
/// of equal length, with no overlap.
#[tokio::test]
async fn growth_rate_compares_adjacent_windows() {
    let ctx = TestContext::new();
    let server = ctx.server();

    // Previous window [now-60d, now-30d): ten views, 35 days old.
    for i in 0..10 {
        ctx.store
            .insert_view(fixtures::view_row("u1", &format!("prev{}", i), 35))
            .await
            .unwrap();
    }
    // Current window [now-30d, now): five views, 5 days old.
    for i in 0..5 {
        ctx.store
            .insert_view(fixtures::view_row("u1", &format!("cur{}", i), 5))
            .await
            .unwrap();
    }
    // Older than both windows; must count nowhere.
    ctx.store
        .insert_view(fixtures::view_row("u1", "ancient", 65))
        .await
        .unwrap();

    let report: serde_json::Value = server
        .get("/track-view")
        .add_query_param("ownerId", "u1")
        .add_query_param("days", "30")
        .await
        .json();

    assert_eq!(report["totalViews"], 5);
    // (5 - 10) / 10 * 100
    assert_eq!(report["growthRate"], -50.0);

    // A shorter window shifts both edges: only the current views remain
    // and the preceding ten days are empty.
    let report: serde_json::Value = server
        .get("/track-view")
        .add_query_param("ownerId", "u1")
        .add_query_param("days", "10")
        .await
        .json();
    assert_eq!(report["totalViews"], 5);
    assert_eq!(report["growthRate"], 100.0);
}

/// ownerId is mandatory on report reads.
#[tokio::test]
async fn report_requires_owner_id() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server.get("/track-view").await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "VALID_001");
}

/// The window length is bounded on both sides.
#[tokio::test]
async fn report_window_is_bounded() {
    let ctx = TestContext::new();
    let server = ctx.server();

    for days in ["0", "366"] {
        let response = server
            .get("/track-view")
            .add_query_param("ownerId", "u1")
            .add_query_param("days", days)
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: serde_json::Value = response.json();
        assert_eq!(body["code"], "VALID_003");
    }

    // The bounds themselves are accepted.
    for days in ["1", "365"] {
        server
            .get("/track-view")
            .add_query_param("ownerId", "u1")
            .add_query_param("days", days)
            .await
            .assert_status_ok();
    }
}
