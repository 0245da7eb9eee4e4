//! # Catalog Persistence Library
//!
//! Persistence layer for the Product Catalog Service.
//!
//! ## Architecture
//!
//! This crate implements the Repository pattern with a cache-aside service
//! fronting the expensive leaderboard aggregation:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Application Layer                        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   Repository Traits                          │
//! │   (ProductRepository, OrderRepository, LeaderboardRepository)│
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  LeaderboardService                          │
//! │          (cache-aside: lookup → miss → compute →             │
//! │                   populate → return)                         │
//! └─────────────────────────────────────────────────────────────┘
//!                    │                   │
//!                    ▼                   ▼
//! ┌─────────────────────────┐   ┌──────────────────────────────┐
//! │     Redis Cache         │   │        Postgres              │
//! │  (leaderboard entries)  │   │   (Source of Truth)          │
//! └─────────────────────────┘   └──────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use catalog_persistence::{
//!     cache::{CacheConfig, RedisCache},
//!     leaderboard::LeaderboardService,
//!     repository::{PgClient, PgConfig, PgLeaderboardRepository},
//! };
//!
//! // Initialize clients
//! let pg = Arc::new(PgClient::new(PgConfig::default()).await?);
//! let cache = Arc::new(RedisCache::new(CacheConfig::default()).await?);
//!
//! // Create the cache-aside leaderboard
//! let leaderboard = LeaderboardService::new(
//!     Arc::new(PgLeaderboardRepository::new(pg)),
//!     cache.clone(),
//!     cache.ttl().leaderboard,
//! );
//!
//! let top = leaderboard.get_top_ordered_products("Nasr city").await?;
//! ```

pub mod cache;
pub mod error;
pub mod leaderboard;
pub mod repository;

// Re-export commonly used types
pub use cache::{CacheConfig, CacheStore, CacheTtl, RedisCache, SharedCacheStore};
pub use error::{LeaderboardError, PersistenceError, Result};
pub use leaderboard::{cache_key, LeaderboardService, TOP_PRODUCTS_LIMIT};
pub use repository::{
    LeaderboardRepository, OrderRepository, PgClient, PgConfig, PgLeaderboardRepository,
    PgOrderRepository, PgProductRepository, ProductRepository,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
