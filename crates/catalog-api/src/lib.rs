//! # Product Catalog REST API
//!
//! REST API service for the product catalog and order system.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Axum HTTP Server                         │
//! │       (/product, /product/{id}, /product/top-ordered/      │
//! │                   {area}, /order, /health)                 │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    ApiContext                               │
//! │      (repositories + cache-aside LeaderboardService)        │
//! └─────────────────────────────────────────────────────────────┘
//!                    │                   │
//!                    ▼                   ▼
//! ┌─────────────────────────┐   ┌──────────────────────────────┐
//! │     Redis Cache         │   │        Postgres              │
//! │  (leaderboard entries)  │   │   (Source of Truth)          │
//! └─────────────────────────┘   └──────────────────────────────┘
//! ```

pub mod config;
pub mod context;
pub mod error;
pub mod handlers;

use axum::{
    http::{HeaderValue, Method},
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use config::Config;
pub use context::ApiContext;
pub use error::{ApiError, ApiResult};

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    "OK"
}

/// CORS layer from the configured origin list; `*` allows any origin.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    if origins.iter().any(|origin| origin == "*") {
        cors.allow_origin(Any)
    } else {
        let allowed: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        cors.allow_origin(AllowOrigin::list(allowed))
    }
}

/// Build the Axum router
pub fn build_router(ctx: ApiContext, cors_origins: &[String]) -> Router {
    let cors = cors_layer(cors_origins);

    Router::new()
        // Catalog
        .route("/product", get(handlers::products::list_products))
        .route("/product/{id}", get(handlers::products::get_product))
        .route(
            "/product/top-ordered/{area}",
            get(handlers::products::top_ordered_products),
        )
        // Orders
        .route("/order", post(handlers::orders::create_order))
        // Health check
        .route("/health", get(health_check))
        .route("/", get(|| async { "Product Catalog API" }))
        // State and middleware
        .with_state(ctx)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
