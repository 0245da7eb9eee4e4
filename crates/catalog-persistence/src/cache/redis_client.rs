//! # Redis Cache Layer
//!
//! Redis client wrapper backing the [`CacheStore`] trait.

use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::cache::CacheStore;
use crate::error::Result;

/// Cache TTL configuration
#[derive(Debug, Clone, Copy)]
pub struct CacheTtl {
    pub leaderboard: Duration,
}

impl CacheTtl {
    /// Canonical leaderboard TTL. Deployments historically disagreed between
    /// one and two hours; one hour is the value this service standardizes on.
    pub const DEFAULT_LEADERBOARD_SECS: u64 = 3600;
}

impl Default for CacheTtl {
    fn default() -> Self {
        Self {
            leaderboard: Duration::from_secs(Self::DEFAULT_LEADERBOARD_SECS),
        }
    }
}

/// Redis cache configuration
#[derive(Debug, Clone)]
pub struct CacheConfig {
    pub url: String,
    pub ttl: CacheTtl,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            url: "redis://127.0.0.1:6379".to_string(),
            ttl: CacheTtl::default(),
        }
    }
}

/// Redis cache client over a shared multiplexed connection.
///
/// The connection manager is constructed once and injected wherever a cache
/// handle is needed; cloning is cheap and shares the underlying connection.
#[derive(Clone)]
pub struct RedisCache {
    conn: ConnectionManager,
    config: CacheConfig,
}

impl RedisCache {
    /// Create a new cache client
    pub async fn new(config: CacheConfig) -> Result<Self> {
        let client = Client::open(config.url.as_str())?;
        let conn = ConnectionManager::new(client).await?;

        Ok(Self { conn, config })
    }

    /// TTL configuration this client was built with
    pub fn ttl(&self) -> CacheTtl {
        self.config.ttl
    }
}

#[async_trait]
impl CacheStore for RedisCache {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.conn.clone();
        let value: Option<String> = conn.get(key).await?;
        Ok(value)
    }

    async fn set_ex(&self, key: &str, value: &str, ttl: Duration) -> Result<()> {
        let mut conn = self.conn.clone();
        let _: () = conn.set_ex(key, value, ttl.as_secs()).await?;
        Ok(())
    }
}

/// Shared cache store handle
pub type SharedCacheStore = Arc<dyn CacheStore>;
