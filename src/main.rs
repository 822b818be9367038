//! Vitrine Analytics Service
//!
//! Traffic analytics for multi-tenant portfolio sites:
//! - Tracking endpoints for page views, interactions, and section dwells
//! - Same-day session reconciliation on the view write path
//! - Window-scoped traffic and engagement reports computed on read

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::{info, warn};

use api::{router, AppState};
use event_store::{EventStore, MemoryStore};
use telemetry::{health, init_tracing_from_env};

/// Application configuration.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
struct Config {
    #[serde(default = "default_host")]
    host: String,
    #[serde(default = "default_port")]
    port: u16,

    /// Geo-IP service base URL. "mock" (or empty) disables remote
    /// lookups and resolves every address to Unknown/Unknown.
    #[serde(default = "default_geoip_url")]
    geoip_url: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_geoip_url() -> String {
    "mock".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            geoip_url: default_geoip_url(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    init_tracing_from_env();

    info!("Starting Vitrine Analytics v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = load_config()?;

    // Initialize the event store
    let store: Arc<dyn EventStore> = Arc::new(MemoryStore::new());

    // Create application state
    let state = AppState::new(store.clone(), config.geoip_url.clone());

    // Check health and update status
    check_health(&store, &state).await;

    // Create router
    let app = router(state);

    // Start HTTP server
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("Invalid server address")?;

    info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Shutdown complete");
    Ok(())
}

/// Load configuration from files and environment.
fn load_config() -> Result<Config> {
    let config = config::Config::builder()
        // Start with defaults
        .add_source(config::Config::try_from(&Config::default())?)
        // Load from config file if exists
        .add_source(
            config::File::with_name("config/default")
                .required(false)
                .format(config::FileFormat::Toml),
        )
        // Override with environment variables
        .add_source(
            config::Environment::default()
                .separator("__")
                .prefix("VITRINE")
                .try_parsing(true),
        )
        .build()
        .context("Failed to build configuration")?;

    let mut config: Config = config
        .try_deserialize()
        .context("Failed to deserialize configuration")?;

    // Manual overrides for underscored field names the config crate's
    // env parsing does not map reliably
    if let Ok(url) = std::env::var("VITRINE_GEOIP_URL") {
        config.geoip_url = url;
    }

    Ok(config)
}

/// Check component health on startup.
async fn check_health(store: &Arc<dyn EventStore>, state: &AppState) {
    // Check the event store
    match store.ping().await {
        Ok(()) => {
            health().store.set_healthy();
            info!("Event store: healthy");
        }
        Err(e) => {
            health().store.set_unhealthy(e.to_string());
            warn!("Event store: unhealthy ({})", e);
        }
    }

    // Check the geo-IP service; mock mode counts as healthy
    if state.geo.probe().await {
        health().geoip.set_healthy();
        info!("Geo-IP service: healthy");
    } else {
        health().geoip.set_unhealthy("Connection failed");
        warn!("Geo-IP service: unhealthy, enrichment degrades to Unknown");
    }
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        }
        _ = terminate => {
            info!("Received terminate signal");
        }
    }
}
