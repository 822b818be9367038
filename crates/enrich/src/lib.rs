//! Best-effort enrichment of incoming views.
//!
//! Neither lookup is allowed to fail an ingest request: user-agent
//! parsing falls back to "unknown" fields and geo lookups to the
//! "Unknown" sentinel.

pub mod geo;
pub mod ua;

pub use geo::{GeoClient, GeoLocation};
pub use ua::{UaEnricher, UaProfile};
