//! Traffic report assembly.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use analytics_core::{Interaction, Session, View};

use crate::growth::growth_rate;
use crate::referrer::classify_referrer;
use crate::timeseries::{daily_views, hourly_views, weekly_views};

/// One bucket of a daily or weekly series.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub period: String,
    pub views: u64,
}

/// One hour-of-day bucket.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HourlyPoint {
    pub hour: u32,
    pub views: u64,
}

/// Full traffic report returned by `GET /track-view`.
///
/// Maps are BTreeMaps so repeated reads over unchanged rows serialize
/// byte-identically.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsReport {
    pub total_views: u64,
    pub unique_visitors: u64,
    /// totalViews - uniqueVisitors: additional views by known visitors,
    /// a view-level (not cross-session) definition.
    pub returning_visitors: u64,
    /// Percent change vs the immediately preceding window
    pub growth_rate: f64,

    pub device_stats: BTreeMap<String, u64>,
    pub browser_stats: BTreeMap<String, u64>,
    pub os_stats: BTreeMap<String, u64>,
    pub country_stats: BTreeMap<String, u64>,
    pub city_stats: BTreeMap<String, u64>,
    pub referrer_stats: BTreeMap<String, u64>,

    pub daily_views: Vec<SeriesPoint>,
    pub weekly_views: Vec<SeriesPoint>,
    pub hourly_views: Vec<HourlyPoint>,

    pub interaction_stats: BTreeMap<String, u64>,
    /// Interaction counts per target element
    pub element_engagement: BTreeMap<String, u64>,
    /// interactions / max(totalViews, 1) * 100
    pub click_through_rate: f64,

    /// Mean of session total durations in seconds
    pub avg_session_duration: f64,
    /// Percent of sessions that viewed exactly one page
    pub bounce_rate: f64,
    pub avg_pages_per_session: f64,
}

/// Single-pass grouping of a view dimension.
fn breakdown<'a>(views: &'a [View], dimension: impl Fn(&'a View) -> &'a str) -> BTreeMap<String, u64> {
    let mut buckets: BTreeMap<String, u64> = BTreeMap::new();
    for view in views {
        *buckets.entry(dimension(view).to_string()).or_default() += 1;
    }
    buckets
}

/// Builds the complete traffic report from rows fetched for the window.
///
/// `previous_views` is the view total of the immediately preceding
/// window of equal length, computed by the caller.
pub fn assemble_report(
    views: &[View],
    interactions: &[Interaction],
    sessions: &[Session],
    previous_views: u64,
) -> AnalyticsReport {
    let total_views = views.len() as u64;

    let mut visitors: Vec<&str> = views.iter().map(|v| v.visitor_id.as_str()).collect();
    visitors.sort_unstable();
    visitors.dedup();
    let unique_visitors = visitors.len() as u64;

    let mut referrer_stats: BTreeMap<String, u64> = BTreeMap::new();
    for view in views {
        *referrer_stats
            .entry(classify_referrer(&view.referrer))
            .or_default() += 1;
    }

    let mut interaction_stats: BTreeMap<String, u64> = BTreeMap::new();
    let mut element_engagement: BTreeMap<String, u64> = BTreeMap::new();
    for interaction in interactions {
        *interaction_stats
            .entry(interaction.interaction_type.clone())
            .or_default() += 1;
        if let Some(element) = &interaction.target_element {
            *element_engagement.entry(element.clone()).or_default() += 1;
        }
    }
    let click_through_rate =
        interactions.len() as f64 / total_views.max(1) as f64 * 100.0;

    let session_count = sessions.len() as u64;
    let (avg_session_duration, bounce_rate, avg_pages_per_session) = if session_count == 0 {
        (0.0, 0.0, 0.0)
    } else {
        let total_duration = sessions
            .iter()
            .fold(0u64, |acc, s| acc.saturating_add(s.total_duration_secs));
        let bounces = sessions.iter().filter(|s| s.is_bounce()).count() as u64;
        let total_pages: u64 = sessions.iter().map(|s| s.pages_viewed).sum();
        (
            total_duration as f64 / session_count as f64,
            bounces as f64 / session_count as f64 * 100.0,
            total_pages as f64 / session_count as f64,
        )
    };

    AnalyticsReport {
        total_views,
        unique_visitors,
        returning_visitors: total_views - unique_visitors,
        growth_rate: growth_rate(total_views, previous_views),

        device_stats: breakdown(views, |v| &v.device_type),
        browser_stats: breakdown(views, |v| &v.browser),
        os_stats: breakdown(views, |v| &v.os),
        country_stats: breakdown(views, |v| &v.country),
        city_stats: breakdown(views, |v| &v.city),
        referrer_stats,

        daily_views: daily_views(views),
        weekly_views: weekly_views(views),
        hourly_views: hourly_views(views),

        interaction_stats,
        element_engagement,
        click_through_rate,

        avg_session_duration,
        bounce_rate,
        avg_pages_per_session,
    }
}
