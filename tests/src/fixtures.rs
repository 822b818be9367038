//! Test fixtures and payload generators.

use chrono::{Duration, Utc};
use uuid::Uuid;

use analytics_core::View;

/// A fresh random visitor id.
pub fn visitor_id() -> String {
    Uuid::new_v4().to_string()
}

/// Minimal valid `POST /track-view` payload.
pub fn view_payload(owner: &str, visitor: &str) -> serde_json::Value {
    serde_json::json!({
        "ownerId": owner,
        "visitorId": visitor,
    })
}

/// View payload with referrer and self-reported duration.
pub fn view_payload_full(
    owner: &str,
    visitor: &str,
    referrer: &str,
    duration_secs: u64,
) -> serde_json::Value {
    serde_json::json!({
        "ownerId": owner,
        "visitorId": visitor,
        "referrer": referrer,
        "sessionDuration": duration_secs,
    })
}

/// Valid `POST /track-interaction` payload.
pub fn interaction_payload(owner: &str, visitor: &str, kind: &str) -> serde_json::Value {
    serde_json::json!({
        "ownerId": owner,
        "visitorId": visitor,
        "interactionType": kind,
        "targetElement": "#cv-download",
    })
}

/// Valid `POST /section-time` payload.
pub fn section_payload(
    owner: &str,
    visitor: &str,
    section: &str,
    time_spent: u64,
    scroll_depth: f64,
    interaction_count: u32,
) -> serde_json::Value {
    serde_json::json!({
        "ownerId": owner,
        "visitorId": visitor,
        "sectionName": section,
        "timeSpent": time_spent,
        "scrollDepth": scroll_depth,
        "interactionCount": interaction_count,
        "deviceType": "desktop",
    })
}

/// A stored view row backdated by `days_ago`, for seeding report
/// windows directly through the store.
pub fn view_row(owner: &str, visitor: &str, days_ago: i64) -> View {
    View {
        id: Uuid::new_v4(),
        owner_id: owner.to_string(),
        visitor_id: visitor.to_string(),
        country: "Unknown".to_string(),
        city: "Unknown".to_string(),
        device_type: "desktop".to_string(),
        browser: "Chrome".to_string(),
        os: "Linux".to_string(),
        referrer: String::new(),
        viewed_at: Utc::now() - Duration::days(days_ago),
        session_duration_secs: 0,
    }
}

/// Interaction metadata larger than the 16KB limit.
pub fn oversized_metadata() -> serde_json::Value {
    serde_json::json!({ "blob": "x".repeat(20_000) })
}

/// A desktop Chrome user-agent string.
pub fn chrome_ua() -> &'static str {
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
}

/// An iPhone Safari user-agent string.
pub fn iphone_ua() -> &'static str {
    "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) AppleWebKit/605.1.15 \
     (KHTML, like Gecko) Version/17.0 Mobile/15E148 Safari/604.1"
}
