//! View-count time series: daily, weekly, and hour-of-day.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate, Timelike};

use analytics_core::View;

use crate::report::{HourlyPoint, SeriesPoint};

/// Week-of-year label with weeks starting on Sunday.
///
/// The week number is derived from the day of year plus the weekday
/// offset of January 1st, so January 1st always lands in week 1.
pub fn week_label(date: NaiveDate) -> String {
    let offset = date
        .with_ordinal(1)
        .map(|jan1| jan1.weekday().num_days_from_sunday())
        .unwrap_or(0);
    let week = (date.ordinal0() + offset) / 7 + 1;
    format!("{}-W{:02}", date.year(), week)
}

/// Per-day view counts, ascending by date. Days without views are
/// omitted.
pub fn daily_views(views: &[View]) -> Vec<SeriesPoint> {
    let mut buckets: BTreeMap<String, u64> = BTreeMap::new();
    for view in views {
        let day = view.viewed_at.date_naive().format("%Y-%m-%d").to_string();
        *buckets.entry(day).or_default() += 1;
    }
    buckets
        .into_iter()
        .map(|(period, views)| SeriesPoint { period, views })
        .collect()
}

/// Per-week view counts, ascending by week label.
pub fn weekly_views(views: &[View]) -> Vec<SeriesPoint> {
    let mut buckets: BTreeMap<String, u64> = BTreeMap::new();
    for view in views {
        *buckets
            .entry(week_label(view.viewed_at.date_naive()))
            .or_default() += 1;
    }
    buckets
        .into_iter()
        .map(|(period, views)| SeriesPoint { period, views })
        .collect()
}

/// Hour-of-day view counts, dense over all 24 hours.
pub fn hourly_views(views: &[View]) -> Vec<HourlyPoint> {
    let mut buckets = [0u64; 24];
    for view in views {
        buckets[view.viewed_at.hour() as usize] += 1;
    }
    buckets
        .iter()
        .enumerate()
        .map(|(hour, &views)| HourlyPoint {
            hour: hour as u32,
            views,
        })
        .collect()
}
