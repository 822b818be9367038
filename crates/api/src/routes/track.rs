//! Ingest endpoint handlers.
//!
//! All three track endpoints share the same policy: validate the
//! tenant-scoping identifiers first (no write on failure), enrich
//! best-effort, then persist with bounded retries on transient store
//! errors. On success the caller gets a bare `{"success":true}`.

use std::time::Instant;

use axum::{extract::State, Json};
use chrono::Utc;
use tracing::{error, info};
use uuid::Uuid;

use analytics_core::events::{require_identifiers, validate_payload};
use analytics_core::{
    Interaction, SectionDwell, SectionTimeRequest, TrackInteractionRequest, TrackViewRequest, View,
};
use event_store::with_retry;
use telemetry::metrics;

use crate::extractors::{ClientIp, UserAgent};
use crate::response::{ApiError, TrackResponse};
use crate::state::AppState;

/// POST /track-view - records a page load and reconciles the visitor's
/// same-day session.
pub async fn track_view_handler(
    State(state): State<AppState>,
    ClientIp(client_ip): ClientIp,
    UserAgent(user_agent): UserAgent,
    Json(req): Json<TrackViewRequest>,
) -> Result<Json<TrackResponse>, ApiError> {
    let start = Instant::now();
    metrics().views_received.inc();

    validate(&req, &req.owner_id, &req.visitor_id)?;

    // Best-effort enrichment; neither lookup can fail the request.
    let profile = state.ua.profile(&user_agent);
    let remote_lookup = !state.geo.is_mock() && client_ip.is_some();
    if remote_lookup {
        metrics().geo_lookups.inc();
    }
    let location = state.geo.lookup(client_ip.as_deref()).await;
    if remote_lookup && location == enrich::GeoLocation::unknown() {
        metrics().geo_failures.inc();
    }

    let now = Utc::now();
    let view = View {
        id: Uuid::new_v4(),
        owner_id: req.owner_id.clone(),
        visitor_id: req.visitor_id.clone(),
        country: location.country,
        city: location.city,
        device_type: profile.device_type,
        browser: profile.browser,
        os: profile.os,
        referrer: req.referrer.clone(),
        viewed_at: now,
        session_duration_secs: req.session_duration,
    };

    let store = state.store.clone();
    persist("insert_view", || {
        let store = store.clone();
        let view = view.clone();
        async move { store.insert_view(view).await }
    }, &state)
    .await?;

    // Session reconciliation rides on the same view write path.
    let store = state.store.clone();
    let session = with_retry(state.retry, "record_view", || {
        let store = store.clone();
        let owner = req.owner_id.clone();
        let visitor = req.visitor_id.clone();
        async move {
            store
                .record_view(&owner, &visitor, req.session_duration, now)
                .await
        }
    })
    .await
    .map_err(|e| {
        error!(owner_id = %req.owner_id, error = %e, "Session reconciliation failed");
        metrics().store_write_errors.inc();
        ApiError::from(e)
    })?;

    metrics().ingest_latency_ms.observe(start.elapsed().as_millis() as u64);

    info!(
        owner_id = %req.owner_id,
        pages_viewed = session.pages_viewed,
        latency_ms = start.elapsed().as_millis() as u64,
        "View tracked"
    );

    Ok(Json(TrackResponse::ok()))
}

/// POST /track-interaction - records a click/scroll/custom event.
pub async fn track_interaction_handler(
    State(state): State<AppState>,
    Json(req): Json<TrackInteractionRequest>,
) -> Result<Json<TrackResponse>, ApiError> {
    let start = Instant::now();
    metrics().interactions_received.inc();

    validate(&req, &req.owner_id, &req.visitor_id)?;

    let interaction = Interaction {
        id: Uuid::new_v4(),
        owner_id: req.owner_id.clone(),
        visitor_id: req.visitor_id.clone(),
        interaction_type: req.interaction_type.clone(),
        target_element: req.target_element.clone(),
        target_id: req.target_id.clone(),
        metadata: req.metadata.clone(),
        occurred_at: Utc::now(),
    };

    let store = state.store.clone();
    persist("insert_interaction", || {
        let store = store.clone();
        let interaction = interaction.clone();
        async move { store.insert_interaction(interaction).await }
    }, &state)
    .await?;

    metrics().ingest_latency_ms.observe(start.elapsed().as_millis() as u64);

    info!(
        owner_id = %req.owner_id,
        interaction_type = %req.interaction_type,
        "Interaction tracked"
    );

    Ok(Json(TrackResponse::ok()))
}

/// POST /section-time - records one section-visibility interval.
pub async fn section_time_handler(
    State(state): State<AppState>,
    Json(req): Json<SectionTimeRequest>,
) -> Result<Json<TrackResponse>, ApiError> {
    let start = Instant::now();
    metrics().dwells_received.inc();

    validate(&req, &req.owner_id, &req.visitor_id)?;

    let dwell = SectionDwell {
        id: Uuid::new_v4(),
        owner_id: req.owner_id.clone(),
        visitor_id: req.visitor_id.clone(),
        session_id: req.session_id.clone(),
        section_name: req.section_name.clone(),
        time_spent_secs: req.time_spent,
        scroll_depth: req.scroll_depth,
        interaction_count: req.interaction_count,
        device_type: req.device_type.clone(),
        recorded_at: Utc::now(),
    };

    let store = state.store.clone();
    persist("insert_dwell", || {
        let store = store.clone();
        let dwell = dwell.clone();
        async move { store.insert_dwell(dwell).await }
    }, &state)
    .await?;

    metrics().ingest_latency_ms.observe(start.elapsed().as_millis() as u64);

    info!(
        owner_id = %req.owner_id,
        section = %req.section_name,
        "Section dwell tracked"
    );

    Ok(Json(TrackResponse::ok()))
}

/// Identifier + schema validation shared by the track endpoints.
fn validate<T: validator::Validate>(
    payload: &T,
    owner_id: &str,
    visitor_id: &str,
) -> Result<(), ApiError> {
    require_identifiers(owner_id, visitor_id)
        .and_then(|_| validate_payload(payload))
        .map_err(|e| {
            metrics().events_failed_validation.inc();
            ApiError::from(e)
        })
}

/// Persists one row with bounded retries on transient errors.
async fn persist<F, Fut>(op_name: &str, op: F, state: &AppState) -> Result<(), ApiError>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = analytics_core::Result<()>>,
{
    match with_retry(state.retry, op_name, op).await {
        Ok(()) => {
            metrics().store_writes.inc();
            Ok(())
        }
        Err(e) => {
            error!(op = op_name, error = %e, "Store write failed");
            metrics().store_write_errors.inc();
            Err(ApiError::from(e))
        }
    }
}
