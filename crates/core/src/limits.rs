//! Field and query limits for the analytics service.
//!
//! # Usage Note
//!
//! The `#[validate]` derive macro requires literal values in attributes,
//! so field limits are duplicated there. Keep both in sync when modifying.

// === Identifier Limits (chars) ===

/// Owner and visitor id max length.
/// Visitor ids are client-generated UUIDs (36 chars); owner ids can be
/// account slugs up to 128.
pub const MAX_ID_LEN: usize = 128;

/// Referrer URL max length.
/// Matches HTTP Referer header limit.
pub const MAX_REFERRER_LEN: usize = 2048;

/// Interaction type max length (free-form strings like "click", "scroll").
pub const MAX_INTERACTION_TYPE_LEN: usize = 64;

/// Target element selector max length.
pub const MAX_TARGET_ELEMENT_LEN: usize = 256;

/// Content section name max length.
pub const MAX_SECTION_NAME_LEN: usize = 128;

/// Device type string max length ("desktop", "mobile", "tablet").
pub const MAX_DEVICE_TYPE_LEN: usize = 32;

// === Duration Limits (seconds) ===

/// Cap on client-reported durations (`sessionDuration`, `timeSpent`).
///
/// One UTC day: a session is day-bucketed, so no honest client can
/// report more, and the cap keeps accumulated totals far from overflow.
pub const MAX_DURATION_SECS: u64 = 86_400;

// === Payload Limits ===

/// Maximum interaction metadata JSON size in bytes (16KB).
///
/// Most real-world interaction metadata is under 1KB.
pub const MAX_METADATA_BYTES: usize = 16 * 1024;

// === Report Window Limits ===

/// Default report window in days when the caller omits `days`.
pub const DEFAULT_WINDOW_DAYS: u32 = 30;

/// Maximum report window in days.
///
/// Caps the raw-row scan a single dashboard request can trigger.
pub const MAX_WINDOW_DAYS: u32 = 365;

/// Number of visitor journeys returned by the section report.
pub const MAX_JOURNEYS: usize = 20;

// === Retry Limits ===

/// Maximum attempts for a store operation before surfacing the error.
pub const MAX_STORE_ATTEMPTS: u32 = 3;

/// Fixed backoff between store retries in milliseconds.
pub const STORE_RETRY_BACKOFF_MS: u64 = 50;
