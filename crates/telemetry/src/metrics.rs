//! Internal metrics collection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// A counter metric.
#[derive(Debug, Default)]
pub struct Counter(AtomicU64);

impl Counter {
    pub fn new() -> Self {
        Self(AtomicU64::new(0))
    }

    pub fn inc(&self) {
        self.0.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_by(&self, n: u64) {
        self.0.fetch_add(n, Ordering::Relaxed);
    }

    pub fn get(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }

    pub fn reset(&self) -> u64 {
        self.0.swap(0, Ordering::Relaxed)
    }
}

/// Histogram for latency tracking.
#[derive(Debug)]
pub struct Histogram {
    /// Buckets: 1ms, 5ms, 10ms, 25ms, 50ms, 100ms, 250ms, 500ms, 1s, 5s, 10s
    buckets: [AtomicU64; 11],
    sum: AtomicU64,
    count: AtomicU64,
}

impl Default for Histogram {
    fn default() -> Self {
        Self::new()
    }
}

impl Histogram {
    const BUCKET_BOUNDS: [u64; 11] = [1, 5, 10, 25, 50, 100, 250, 500, 1000, 5000, 10000];

    pub fn new() -> Self {
        Self {
            buckets: Default::default(),
            sum: AtomicU64::new(0),
            count: AtomicU64::new(0),
        }
    }

    /// Records a value in milliseconds.
    pub fn observe(&self, ms: u64) {
        self.sum.fetch_add(ms, Ordering::Relaxed);
        self.count.fetch_add(1, Ordering::Relaxed);

        for (i, &bound) in Self::BUCKET_BOUNDS.iter().enumerate() {
            if ms <= bound {
                self.buckets[i].fetch_add(1, Ordering::Relaxed);
                return;
            }
        }
        // Value exceeds all buckets, add to last
        self.buckets[10].fetch_add(1, Ordering::Relaxed);
    }

    pub fn count(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }

    pub fn sum(&self) -> u64 {
        self.sum.load(Ordering::Relaxed)
    }

    pub fn mean(&self) -> f64 {
        let count = self.count();
        if count == 0 {
            0.0
        } else {
            self.sum() as f64 / count as f64
        }
    }

    /// Returns bucket counts.
    pub fn buckets(&self) -> Vec<(u64, u64)> {
        Self::BUCKET_BOUNDS
            .iter()
            .zip(self.buckets.iter())
            .map(|(&bound, count)| (bound, count.load(Ordering::Relaxed)))
            .collect()
    }
}

/// Collected metrics for the analytics service.
#[derive(Debug, Default)]
pub struct Metrics {
    // Ingest metrics
    pub views_received: Counter,
    pub interactions_received: Counter,
    pub dwells_received: Counter,
    pub events_failed_validation: Counter,

    // Store metrics
    pub store_writes: Counter,
    pub store_write_errors: Counter,
    pub store_retries: Counter,

    // Enrichment metrics
    pub geo_lookups: Counter,
    pub geo_failures: Counter,

    // Report metrics
    pub traffic_reports: Counter,
    pub section_reports: Counter,

    // Latency histograms
    pub ingest_latency_ms: Histogram,
    pub report_latency_ms: Histogram,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }
}

/// A snapshot of metrics at a point in time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub timestamp: DateTime<Utc>,
    pub views_received: u64,
    pub interactions_received: u64,
    pub dwells_received: u64,
    pub events_failed_validation: u64,
    pub store_writes: u64,
    pub store_write_errors: u64,
    pub store_retries: u64,
    pub geo_lookups: u64,
    pub geo_failures: u64,
    pub traffic_reports: u64,
    pub section_reports: u64,
    pub ingest_latency_mean_ms: f64,
    pub report_latency_mean_ms: f64,
}

impl Metrics {
    /// Takes a snapshot of current metrics.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            timestamp: Utc::now(),
            views_received: self.views_received.get(),
            interactions_received: self.interactions_received.get(),
            dwells_received: self.dwells_received.get(),
            events_failed_validation: self.events_failed_validation.get(),
            store_writes: self.store_writes.get(),
            store_write_errors: self.store_write_errors.get(),
            store_retries: self.store_retries.get(),
            geo_lookups: self.geo_lookups.get(),
            geo_failures: self.geo_failures.get(),
            traffic_reports: self.traffic_reports.get(),
            section_reports: self.section_reports.get(),
            ingest_latency_mean_ms: self.ingest_latency_ms.mean(),
            report_latency_mean_ms: self.report_latency_ms.mean(),
        }
    }
}

/// Global metrics registry.
pub static METRICS: std::sync::LazyLock<Metrics> = std::sync::LazyLock::new(Metrics::new);

/// Get the global metrics instance.
pub fn metrics() -> &'static Metrics {
    &METRICS
}
