//! # API Context
//!
//! Application state and dependency injection for REST handlers.
//!
//! Store clients are constructed once at startup and passed in explicitly;
//! handlers only ever see the repository traits, so tests can swap in mocks.

use std::sync::Arc;
use std::time::Duration;

use catalog_persistence::{
    LeaderboardService, OrderRepository, PgClient, PgLeaderboardRepository, PgOrderRepository,
    PgProductRepository, ProductRepository, RedisCache,
};

/// Application context shared across all handlers
#[derive(Clone)]
pub struct ApiContext {
    /// Product repository
    pub products: Arc<dyn ProductRepository>,

    /// Order repository
    pub orders: Arc<dyn OrderRepository>,

    /// Cache-aside leaderboard
    pub leaderboard: Arc<LeaderboardService>,
}

impl ApiContext {
    /// Create a new API context backed by Postgres and Redis
    pub fn new(pg: Arc<PgClient>, cache: Arc<RedisCache>, leaderboard_ttl: Duration) -> Self {
        let leaderboard_repo = Arc::new(PgLeaderboardRepository::new(pg.clone()));

        Self {
            products: Arc::new(PgProductRepository::new(pg.clone())),
            orders: Arc::new(PgOrderRepository::new(pg)),
            leaderboard: Arc::new(LeaderboardService::new(
                leaderboard_repo,
                cache,
                leaderboard_ttl,
            )),
        }
    }

    /// Assemble a context from pre-built parts (mock repositories in tests)
    pub fn from_parts(
        products: Arc<dyn ProductRepository>,
        orders: Arc<dyn OrderRepository>,
        leaderboard: Arc<LeaderboardService>,
    ) -> Self {
        Self {
            products,
            orders,
            leaderboard,
        }
    }
}
