//! Section-dwell analytics: per-section engagement and visitor journeys.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use analytics_core::limits::MAX_JOURNEYS;
use analytics_core::SectionDwell;

/// Aggregated engagement for one named content section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionStats {
    pub section_name: String,
    /// Total dwell seconds across all rows
    pub total_time: u64,
    /// Row count (one row per visibility interval)
    pub views: u64,
    pub avg_time: f64,
    pub unique_visitors: u64,
    pub avg_scroll_depth: f64,
    pub avg_interactions: f64,
    /// Fixed-weight blend of time, scroll and interactions. The raw
    /// avg_time term is not normalized across sections; long-dwell
    /// sections dominate by construction.
    pub engagement_score: i64,
}

/// One visitor's ordered path through the page's sections.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitorJourney {
    pub visitor_id: String,
    /// Section names in timestamp order, one entry per dwell row
    pub path: Vec<String>,
    pub total_time: u64,
    pub section_count: usize,
}

/// Section report returned by `GET /section-time`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionReport {
    /// Per-section stats, busiest (by total time) first
    pub section_analytics: Vec<SectionStats>,
    /// Top journeys by total dwell time
    pub visitor_journeys: Vec<VisitorJourney>,
    pub most_popular_section: Option<String>,
    pub most_engaging_section: Option<String>,
}

/// Engagement score: round(avgTime*0.4 + avgScrollDepth*0.3 +
/// avgInteractions*100*0.3).
///
/// The weights and the unnormalized seconds term are kept exactly as
/// the dashboard has always computed them; recalibrating changes every
/// historical score.
fn engagement_score(avg_time: f64, avg_scroll_depth: f64, avg_interactions: f64) -> i64 {
    (avg_time * 0.4 + avg_scroll_depth * 0.3 + avg_interactions * 100.0 * 0.3).round() as i64
}

/// Builds the full section report from dwell rows in the window.
pub fn section_report(dwells: &[SectionDwell]) -> SectionReport {
    let section_analytics = per_section_stats(dwells);
    let visitor_journeys = top_journeys(dwells);

    // Popularity and engagement are ranked independently; the winners
    // can differ.
    let most_popular_section = section_analytics.first().map(|s| s.section_name.clone());
    let most_engaging_section = section_analytics
        .iter()
        .max_by(|a, b| {
            a.engagement_score
                .cmp(&b.engagement_score)
                .then_with(|| b.section_name.cmp(&a.section_name))
        })
        .map(|s| s.section_name.clone());

    SectionReport {
        section_analytics,
        visitor_journeys,
        most_popular_section,
        most_engaging_section,
    }
}

fn per_section_stats(dwells: &[SectionDwell]) -> Vec<SectionStats> {
    let mut groups: BTreeMap<&str, Vec<&SectionDwell>> = BTreeMap::new();
    for dwell in dwells {
        groups.entry(dwell.section_name.as_str()).or_default().push(dwell);
    }

    let mut stats: Vec<SectionStats> = groups
        .into_iter()
        .map(|(name, rows)| {
            let views = rows.len() as u64;
            let total_time = rows
                .iter()
                .fold(0u64, |acc, r| acc.saturating_add(r.time_spent_secs));
            let avg_time = total_time as f64 / views as f64;
            let avg_scroll_depth =
                rows.iter().map(|r| r.scroll_depth).sum::<f64>() / views as f64;
            let avg_interactions =
                rows.iter().map(|r| r.interaction_count as f64).sum::<f64>() / views as f64;

            let mut visitors: Vec<&str> = rows.iter().map(|r| r.visitor_id.as_str()).collect();
            visitors.sort_unstable();
            visitors.dedup();

            SectionStats {
                section_name: name.to_string(),
                total_time,
                views,
                avg_time,
                unique_visitors: visitors.len() as u64,
                avg_scroll_depth,
                avg_interactions,
                engagement_score: engagement_score(avg_time, avg_scroll_depth, avg_interactions),
            }
        })
        .collect();

    // Busiest first; name breaks ties so reports are byte-stable.
    stats.sort_by(|a, b| {
        b.total_time
            .cmp(&a.total_time)
            .then_with(|| a.section_name.cmp(&b.section_name))
    });
    stats
}

fn top_journeys(dwells: &[SectionDwell]) -> Vec<VisitorJourney> {
    let mut groups: BTreeMap<&str, Vec<&SectionDwell>> = BTreeMap::new();
    for dwell in dwells {
        groups.entry(dwell.visitor_id.as_str()).or_default().push(dwell);
    }

    let mut journeys: Vec<VisitorJourney> = groups
        .into_iter()
        .map(|(visitor, mut rows)| {
            rows.sort_by_key(|r| r.recorded_at);
            let path: Vec<String> = rows.iter().map(|r| r.section_name.clone()).collect();
            let total_time = rows
                .iter()
                .fold(0u64, |acc, r| acc.saturating_add(r.time_spent_secs));
            VisitorJourney {
                visitor_id: visitor.to_string(),
                section_count: path.len(),
                path,
                total_time,
            }
        })
        .collect();

    journeys.sort_by(|a, b| {
        b.total_time
            .cmp(&a.total_time)
            .then_with(|| a.visitor_id.cmp(&b.visitor_id))
    });
    journeys.truncate(MAX_JOURNEYS);
    journeys
}
