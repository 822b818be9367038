//! Internal telemetry for the Vitrine analytics service.
//!
//! Metrics are collected in-memory; nothing is shipped to an external
//! metrics system.

pub mod health;
pub mod metrics;
pub mod tracing_setup;

pub use health::*;
pub use metrics::*;
pub use tracing_setup::*;
