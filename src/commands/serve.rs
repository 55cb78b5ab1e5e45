use anyhow::{Context, Result};
use std::sync::Arc;

use concursos::cache::SnapshotCache;
use concursos::config::Config;
use concursos::crawler::RegionFetcher;
use concursos::metrics;
use concursos::refresh::RefreshEngine;
use concursos::scheduler::RefreshScheduler;
use concursos::server::{ApiServer, AppState};

/// Apply `--port` and `--interval` on top of the loaded configuration
fn apply_cli_overrides(
    mut config: Config,
    port: Option<u16>,
    interval: Option<u64>,
) -> Result<Config> {
    if let Some(port) = port {
        config.server.bind_address.set_port(port);
    }
    if let Some(interval) = interval {
        config.refresh.interval_secs = interval;
    }
    config.validate().context("Invalid command-line override")?;
    Ok(config)
}

/// Run the refresh scheduler and the API server until Ctrl+C
pub async fn serve(config: Config, port: Option<u16>, interval: Option<u64>) -> Result<()> {
    let config = apply_cli_overrides(config, port, interval)?;

    if let Err(e) = metrics::init_metrics() {
        tracing::warn!(error = %e, "Metrics initialization failed, continuing without metrics");
    }

    let cache = Arc::new(SnapshotCache::default());
    let fetcher =
        RegionFetcher::from_config(&config.refresh).context("Failed to create HTTP client")?;
    let engine = Arc::new(RefreshEngine::new(Arc::new(fetcher), cache.clone()));

    let scheduler = Arc::new(
        RefreshScheduler::new(engine, config.refresh_interval())
            .context("Failed to create refresh scheduler")?,
    );

    let state = AppState::new(cache, config.server.clone())
        .context("Failed to create server state")?
        .with_scheduler(scheduler.clone());
    let server = ApiServer::new(state);

    println!("Starting concursos API");
    println!("======================");
    println!("  Bind Address: {}", server.bind_address());
    println!("  Source: {}", config.refresh.base_url);
    println!("  Refresh Interval: {}s", config.refresh.interval_secs);
    println!("  Request Timeout: {}s", config.refresh.request_timeout_secs);
    println!();
    println!("API Endpoints:");
    println!("  GET  /             - Documentation page");
    println!("  GET  /{{uf}}         - Listings for one state");
    println!("  GET  /api/health   - Health check");
    println!("  GET  /api/regions  - Region codes and names");
    println!("  GET  /api/metrics  - Prometheus metrics endpoint");
    println!();
    println!("Press Ctrl+C to stop.\n");

    let refresh_handle = scheduler.start()?;

    // Start with graceful shutdown
    let token = scheduler.token();
    let result = server
        .start_with_shutdown(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    tracing::info!("Shutdown signal received");
                }
                Err(e) => {
                    tracing::error!("Failed to wait for Ctrl+C: {}", e);
                }
            }
            token.cancel();
        })
        .await;

    scheduler.shutdown();
    refresh_handle
        .await
        .context("Refresh scheduler task failed")?;
    result?;

    println!("concursos API stopped.");
    Ok(())
}
