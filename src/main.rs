//! Banner Stats - banner click tracking behind an in-memory TTL cache

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use banner_stats::api::{create_router, AppState};
use banner_stats::{Cache, CachedBannerRepository, Config, InMemoryBannerRepository, InMemoryCache};

/// Main entry point for the banner stats server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the backing repository and the cache with its reaper
/// 4. Optionally warm the cache
/// 5. Serve HTTP until SIGINT/SIGTERM, then stop the reaper
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "banner_stats=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Banner Stats Server");

    let config = Config::from_env();
    info!(
        port = config.server_port,
        cleanup_interval = ?config.cache.cleanup_interval,
        banner_ttl = ?config.cache.banner_ttl,
        click_stats_ttl = ?config.cache.click_stats_ttl,
        banner_stats_ttl = ?config.cache.banner_stats_ttl,
        top_banners_ttl = ?config.cache.top_banners_ttl,
        "Configuration loaded"
    );

    let backing = Arc::new(InMemoryBannerRepository::new());
    let cache = Arc::new(InMemoryCache::start(config.cache.clone()));
    info!("Cache initialized, background cleanup task started");

    let repo = CachedBannerRepository::new(backing, cache.clone())
        .with_warm_top_limit(config.cache.warm_top_limit);

    if config.warm_on_startup {
        if let Err(err) = repo.warm_cache().await {
            warn!(error = %err, "Cache warm-up failed, continuing with a cold cache");
        }
    }

    let app = create_router(AppState::new(repo));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error");

    cache.stop().await;
    info!("Cache cleanup task stopped");

    served?;
    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!(error = %err, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                warn!(error = %err, "Failed to install SIGTERM handler");
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
