//! Hippocache demo host
//!
//! Runs the cache the way an embedding application would: initialize on
//! startup, use it, tear it down on shutdown.

use std::time::Duration;

use anyhow::Context;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hippocache::value::{Color, Vector3};
use hippocache::{Config, Hippocache, Outcome};

/// Main entry point for the demo host.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Initialize the cache and its expiry reaper
/// 4. Store a few sample values
/// 5. Wait for SIGINT/SIGTERM, then tear the cache down
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hippocache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Hippocache demo host");

    let config = Config::from_env();
    info!(
        "Configuration loaded: cleanup_interval={}s, reaper_enabled={}",
        config.cleanup_interval, config.reaper_enabled
    );

    let cache = Hippocache::initialize(&config);

    seed(&cache).context("failed to seed demo values")?;

    let spawn = cache.get::<Vector3>("World", "spawn_point")?;
    info!("World/spawn_point = {:?}", spawn);

    let mismatch = cache.get::<String>("World", "spawn_point");
    let outcome = Outcome::from(&mismatch);
    info!(
        "Reading World/spawn_point as String: {} ({})",
        outcome.error_code, outcome.error_message
    );

    info!("Cache ready: {:?}", cache.stats());

    shutdown_signal().await;

    cache.deinitialize();
    info!("Hippocache demo host shutdown complete");
    Ok(())
}

fn seed(cache: &Hippocache) -> hippocache::Result<()> {
    cache.set("World", "spawn_point", Vector3::new(0.0, 0.0, 120.0))?;
    cache.set("World", "fog_color", Color::new(180, 190, 200, 255))?;
    cache.set_with_ttl("Session", "motd", "Welcome back".to_string(), Duration::from_secs(30))?;
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", err);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                warn!("Failed to install SIGTERM handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }
}
