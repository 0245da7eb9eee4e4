//! # Product Catalog API Server
//!
//! Binary entry point for the catalog REST service.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use catalog_api::{build_router, ApiContext, Config};
use catalog_persistence::{CacheConfig, CacheTtl, PgClient, PgConfig, RedisCache};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Config::from_env();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    tracing::info!(version = catalog_api::VERSION, "Starting Product Catalog API");

    // Initialize Postgres
    tracing::info!(url = %config.postgres.url, "Connecting to Postgres");

    let pg_config = PgConfig {
        url: config.postgres.url.clone(),
        max_connections: config.postgres.max_connections,
    };

    let pg = Arc::new(PgClient::new(pg_config).await?);
    pg.run_migrations().await?;
    tracing::info!("Postgres connected, migrations applied");

    // Initialize Redis cache
    tracing::info!(url = %config.redis.url, "Connecting to Redis");

    let cache_config = CacheConfig {
        url: config.redis.url.clone(),
        ttl: CacheTtl {
            leaderboard: config.leaderboard_ttl,
        },
    };

    let cache = Arc::new(RedisCache::new(cache_config).await?);
    tracing::info!(ttl_secs = config.leaderboard_ttl.as_secs(), "Redis connected");

    // Build API context and router
    let ctx = ApiContext::new(pg, cache, config.leaderboard_ttl);
    let app = build_router(ctx, &config.cors_origins);

    // Start server
    let addr = config.server_addr;
    tracing::info!(%addr, "Starting HTTP server");

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shut down gracefully");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down");
        }
    }
}
