//! Report endpoint handlers.
//!
//! Each request recomputes its report from raw rows in the requested
//! window. If any store read fails after retries, the whole report
//! fails; there is no partial-aggregation fallback.

use std::time::Instant;

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{Duration, Utc};
use serde::Deserialize;
use tracing::{error, info};

use aggregation_engine::{assemble_report, section_report, AnalyticsReport, SectionReport};
use analytics_core::limits::{DEFAULT_WINDOW_DAYS, MAX_WINDOW_DAYS};
use analytics_core::{Error, ValidationErrorCode};
use event_store::with_retry;
use telemetry::metrics;

use crate::response::ApiError;
use crate::state::AppState;

/// Query parameters shared by both report endpoints.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportQuery {
    #[serde(default)]
    pub owner_id: String,
    pub days: Option<u32>,
}

impl ReportQuery {
    /// Validates the query and returns the window length in days.
    fn window_days(&self) -> Result<u32, ApiError> {
        if self.owner_id.trim().is_empty() {
            return Err(ApiError::from(Error::missing_identifier("ownerId")));
        }
        let days = self.days.unwrap_or(DEFAULT_WINDOW_DAYS);
        if days == 0 || days > MAX_WINDOW_DAYS {
            return Err(ApiError::from(Error::validation(
                ValidationErrorCode::InvalidWindow,
                format!("days must be between 1 and {}", MAX_WINDOW_DAYS),
            )));
        }
        Ok(days)
    }
}

/// GET /track-view?ownerId&days - full traffic report.
pub async fn traffic_report_handler(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<AnalyticsReport>, ApiError> {
    let start = Instant::now();
    let days = query.window_days()?;
    let owner_id = query.owner_id.as_str();

    let until = Utc::now();
    let since = until - Duration::days(days as i64);
    // Comparator window: same length, immediately preceding, no overlap.
    let prev_since = since - Duration::days(days as i64);

    let store = &state.store;

    let views = with_retry(state.retry, "views_in_window", || {
        store.views_in_window(owner_id, since, until)
    })
    .await
    .map_err(|e| report_failed(owner_id, "views", e))?;

    let interactions = with_retry(state.retry, "interactions_in_window", || {
        store.interactions_in_window(owner_id, since, until)
    })
    .await
    .map_err(|e| report_failed(owner_id, "interactions", e))?;

    let sessions = with_retry(state.retry, "sessions_in_window", || {
        store.sessions_in_window(owner_id, since, until)
    })
    .await
    .map_err(|e| report_failed(owner_id, "sessions", e))?;

    let previous_views = with_retry(state.retry, "previous_views_in_window", || {
        store.views_in_window(owner_id, prev_since, since)
    })
    .await
    .map_err(|e| report_failed(owner_id, "previous views", e))?;

    let report = assemble_report(&views, &interactions, &sessions, previous_views.len() as u64);

    metrics().traffic_reports.inc();
    metrics()
        .report_latency_ms
        .observe(start.elapsed().as_millis() as u64);

    info!(
        owner_id = owner_id,
        days = days,
        total_views = report.total_views,
        latency_ms = start.elapsed().as_millis() as u64,
        "Traffic report generated"
    );

    Ok(Json(report))
}

/// GET /section-time?ownerId&days - section engagement report.
pub async fn section_report_handler(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<SectionReport>, ApiError> {
    let start = Instant::now();
    let days = query.window_days()?;
    let owner_id = query.owner_id.as_str();

    let until = Utc::now();
    let since = until - Duration::days(days as i64);

    let store = &state.store;
    let dwells = with_retry(state.retry, "dwells_in_window", || {
        store.dwells_in_window(owner_id, since, until)
    })
    .await
    .map_err(|e| report_failed(owner_id, "section dwells", e))?;

    let report = section_report(&dwells);

    metrics().section_reports.inc();
    metrics()
        .report_latency_ms
        .observe(start.elapsed().as_millis() as u64);

    info!(
        owner_id = owner_id,
        days = days,
        sections = report.section_analytics.len(),
        "Section report generated"
    );

    Ok(Json(report))
}

fn report_failed(owner_id: &str, what: &str, err: Error) -> ApiError {
    error!(owner_id = owner_id, error = %err, "Failed to fetch {} for report", what);
    ApiError::from(err)
}
