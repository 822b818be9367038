//! Aggregation engine for the Vitrine analytics service.
//!
//! Everything in this crate is a pure function over row slices already
//! fetched from the store. Each report request recomputes from raw rows;
//! there is no cross-request memoization.

pub mod growth;
pub mod referrer;
pub mod report;
pub mod sections;
pub mod timeseries;

pub use growth::growth_rate;
pub use referrer::classify_referrer;
pub use report::{assemble_report, AnalyticsReport, HourlyPoint, SeriesPoint};
pub use sections::{section_report, SectionReport, SectionStats, VisitorJourney};
pub use timeseries::{daily_views, hourly_views, week_label, weekly_views};
