//! Best-effort geo-IP lookups.
//!
//! Calls an external ip-api-style JSON endpoint and caches responses
//! per IP. Any failure falls back to the "Unknown" sentinel; the ingest
//! path never fails because of geo.

use std::time::Duration;

use moka::future::Cache;
use serde::Deserialize;
use tracing::{debug, warn};

/// Cache TTL for geo responses (1 hour; IP geolocation is slow-moving).
const GEO_CACHE_TTL: Duration = Duration::from_secs(3600);

/// Maximum cached IPs.
const GEO_CACHE_MAX_CAPACITY: u64 = 50_000;

/// Request timeout for the geo service.
const GEO_TIMEOUT: Duration = Duration::from_secs(3);

/// Country/city pair derived from a caller IP.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeoLocation {
    pub country: String,
    pub city: String,
}

impl GeoLocation {
    /// Sentinel used whenever the lookup cannot be performed.
    pub fn unknown() -> Self {
        Self {
            country: "Unknown".to_string(),
            city: "Unknown".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct GeoResponse {
    country: Option<String>,
    city: Option<String>,
}

/// Geo-IP service client.
///
/// Caches responses per IP to avoid hammering the external service on
/// bursts from one visitor.
#[derive(Clone)]
pub struct GeoClient {
    /// Geo service URL (e.g. "http://ip-api.com")
    base_url: String,
    http_client: reqwest::Client,
    cache: Cache<String, GeoLocation>,
    /// Whether to skip remote lookups (for testing/development)
    mock_mode: bool,
}

impl GeoClient {
    /// Creates a new geo client. An empty or "mock" URL disables remote
    /// lookups entirely.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        let mock_mode = base_url.is_empty() || base_url == "mock";

        Self {
            base_url,
            http_client: reqwest::Client::builder()
                .timeout(GEO_TIMEOUT)
                .build()
                .unwrap_or_default(),
            cache: Cache::builder()
                .max_capacity(GEO_CACHE_MAX_CAPACITY)
                .time_to_live(GEO_CACHE_TTL)
                .build(),
            mock_mode,
        }
    }

    pub fn is_mock(&self) -> bool {
        self.mock_mode
    }

    /// Resolve an IP to a location. Never fails; missing IPs, service
    /// outages and malformed responses all yield the Unknown sentinel.
    pub async fn lookup(&self, ip: Option<&str>) -> GeoLocation {
        let Some(ip) = ip.filter(|ip| !ip.is_empty()) else {
            return GeoLocation::unknown();
        };

        if self.mock_mode {
            return GeoLocation::unknown();
        }

        if let Some(cached) = self.cache.get(ip).await {
            debug!(ip = ip, "Geo cache hit");
            return cached;
        }

        let location = match self.remote_lookup(ip).await {
            Ok(location) => location,
            Err(e) => {
                warn!(ip = ip, error = %e, "Geo lookup failed, using Unknown");
                GeoLocation::unknown()
            }
        };

        self.cache.insert(ip.to_string(), location.clone()).await;
        location
    }

    async fn remote_lookup(&self, ip: &str) -> Result<GeoLocation, reqwest::Error> {
        let url = format!("{}/json/{}?fields=country,city", self.base_url, ip);

        let response = self.http_client.get(&url).send().await?;
        let geo: GeoResponse = response.error_for_status()?.json().await?;

        Ok(GeoLocation {
            country: geo
                .country
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| "Unknown".to_string()),
            city: geo
                .city
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| "Unknown".to_string()),
        })
    }

    /// Startup connectivity probe for health reporting.
    pub async fn probe(&self) -> bool {
        if self.mock_mode {
            return true;
        }
        self.http_client
            .get(format!("{}/json/8.8.8.8?fields=country", self.base_url))
            .send()
            .await
            .map(|r| r.status().is_success())
            .unwrap_or(false)
    }
}
