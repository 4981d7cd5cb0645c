use anyhow::Result;
use std::net::SocketAddr;
use std::time::Duration;
use tracing::{info, warn};

use deen_api::app::{build_rate_limiter, create_app_with_limiter};
use deen_api::config::Config;
use deen_api::jobs::{JobScheduler, PoolMetricsJob, RateLimiterCleanupJob, SeoLogCleanupJob};
use deen_api::middleware::{init_metrics, logging::init_logging};
use deen_api::services::OutboundClients;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let config = Config::load()?;
    init_logging(&config.logging);

    info!("Starting Deen API v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = init_metrics() {
        warn!(error = %e, "Prometheus recorder not installed, /metrics will be unavailable");
    }

    let pool = persistence::db::create_pool(&config.database.pool_config()).await?;

    info!("Running database migrations...");
    persistence::db::run_migrations(&pool).await?;
    info!("Migrations completed");

    let mut scheduler = JobScheduler::new();
    scheduler.register(PoolMetricsJob::new(pool.clone()));
    if config.seo.log_retention_days > 0 {
        scheduler.register(SeoLogCleanupJob::new(
            pool.clone(),
            config.seo.log_retention_days,
        ));
    }
    let rate_limiter = build_rate_limiter(&config);
    if let Some(limiter) = &rate_limiter {
        scheduler.register(RateLimiterCleanupJob::new(limiter.clone()));
    }
    scheduler.start();

    let outbound = OutboundClients::http(&config.seo)?;
    let addr = config.socket_addr()?;
    let app = create_app_with_limiter(config, pool, outbound, rate_limiter);

    info!("Server listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    scheduler.shutdown();
    scheduler.wait_for_shutdown(Duration::from_secs(10)).await;
    info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
