//! Event row definitions and ingest payloads.
//!
//! Ingest payloads arrive in camelCase from the tracking snippet and are
//! validated before any row is written. Rows are immutable once stored
//! (sessions are the exception, see [`crate::session`]).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::error::{Error, Result, ValidationErrorCode};
use crate::limits::MAX_METADATA_BYTES;

/// One row per page load. Immutable once written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct View {
    pub id: Uuid,
    /// Tenant whose profile page was loaded
    pub owner_id: String,
    /// Anonymous client-generated visitor id
    pub visitor_id: String,
    /// IP-derived geo, "Unknown" when the lookup fails
    pub country: String,
    pub city: String,
    /// User-agent derived, "unknown" when parsing fails
    pub device_type: String,
    pub browser: String,
    pub os: String,
    /// Raw referrer string, empty for direct traffic
    pub referrer: String,
    pub viewed_at: DateTime<Utc>,
    /// Self-reported client duration in seconds
    pub session_duration_secs: u64,
}

/// One row per click/scroll/custom event. Immutable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interaction {
    pub id: Uuid,
    pub owner_id: String,
    pub visitor_id: String,
    /// Free-form type string ("click", "scroll", "download_cv", ...)
    pub interaction_type: String,
    pub target_element: Option<String>,
    pub target_id: Option<String>,
    pub metadata: Option<serde_json::Value>,
    pub occurred_at: DateTime<Utc>,
}

/// One row per section-visibility interval. Immutable.
///
/// A visitor produces many rows per section across a visit, one per
/// visibility entry/exit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionDwell {
    pub id: Uuid,
    pub owner_id: String,
    pub visitor_id: String,
    /// Client-side session correlation id, opaque
    pub session_id: Option<String>,
    pub section_name: String,
    pub time_spent_secs: u64,
    /// Percentage in [0, 100]
    pub scroll_depth: f64,
    /// Interactions within this visibility interval
    pub interaction_count: u32,
    pub device_type: String,
    pub recorded_at: DateTime<Utc>,
}

/// `POST /track-view` payload.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TrackViewRequest {
    #[serde(default)]
    #[validate(length(max = 128))]
    pub owner_id: String,
    #[serde(default)]
    #[validate(length(max = 128))]
    pub visitor_id: String,
    #[serde(default)]
    #[validate(length(max = 2048))]
    pub referrer: String,
    /// Self-reported duration in seconds, capped at one day
    #[serde(default)]
    #[validate(range(max = 86400))]
    pub session_duration: u64,
}

/// `POST /track-interaction` payload.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TrackInteractionRequest {
    #[serde(default)]
    #[validate(length(max = 128))]
    pub owner_id: String,
    #[serde(default)]
    #[validate(length(max = 128))]
    pub visitor_id: String,
    #[serde(default)]
    #[validate(length(min = 1, max = 64))]
    pub interaction_type: String,
    #[validate(length(max = 256))]
    pub target_element: Option<String>,
    #[validate(length(max = 128))]
    pub target_id: Option<String>,
    /// Arbitrary properties (max 16KB)
    #[validate(custom(function = "validate_metadata_size"))]
    pub metadata: Option<serde_json::Value>,
}

/// `POST /section-time` payload.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SectionTimeRequest {
    #[serde(default)]
    #[validate(length(max = 128))]
    pub owner_id: String,
    #[serde(default)]
    #[validate(length(max = 128))]
    pub visitor_id: String,
    #[validate(length(max = 128))]
    pub session_id: Option<String>,
    #[serde(default)]
    #[validate(length(min = 1, max = 128))]
    pub section_name: String,
    /// Seconds spent while the section was visible, capped at one day
    #[serde(default)]
    #[validate(range(max = 86400))]
    pub time_spent: u64,
    /// Scroll depth percentage (0-100)
    #[serde(default)]
    #[validate(range(min = 0.0, max = 100.0))]
    pub scroll_depth: f64,
    #[serde(default)]
    pub interaction_count: u32,
    #[serde(default)]
    #[validate(length(max = 32))]
    pub device_type: String,
}

/// Validates interaction metadata JSON size.
fn validate_metadata_size(props: &serde_json::Value) -> std::result::Result<(), ValidationError> {
    if props.is_null() {
        return Ok(());
    }

    let size = serde_json::to_vec(props).map(|v| v.len()).unwrap_or(0);

    if size > MAX_METADATA_BYTES {
        let mut err = ValidationError::new("metadata_too_large");
        err.message = Some(
            format!(
                "metadata {}KB exceeds {}KB limit",
                size / 1024,
                MAX_METADATA_BYTES / 1024
            )
            .into(),
        );
        return Err(err);
    }
    Ok(())
}

/// Checks that both tenant-scoping identifiers are present.
///
/// Absent JSON fields deserialize to empty strings, so presence and
/// non-emptiness are the same check.
pub fn require_identifiers(owner_id: &str, visitor_id: &str) -> Result<()> {
    if owner_id.trim().is_empty() {
        return Err(Error::missing_identifier("ownerId"));
    }
    if visitor_id.trim().is_empty() {
        return Err(Error::missing_identifier("visitorId"));
    }
    Ok(())
}

/// Runs derive validations and maps failures to a coded error.
pub fn validate_payload<T: Validate>(payload: &T) -> Result<()> {
    payload
        .validate()
        .map_err(|e| Error::validation(ValidationErrorCode::InvalidField, format!("{}", e)))
}
