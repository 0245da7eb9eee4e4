//! # Cache Module
//!
//! Redis cache layer for the leaderboard read path.

pub mod redis_client;

use std::time::Duration;

use async_trait::async_trait;

use crate::error::Result;

pub use redis_client::{CacheConfig, CacheTtl, RedisCache, SharedCacheStore};

/// Key/value store with per-key expiration, accessed by exact key.
///
/// Implementations can be swapped for different backends (Redis, mock, etc.)
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Get the raw value stored under `key`, if any
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, expiring after `ttl`
    async fn set_ex(&self, key: &str, value: &str, ttl: Duration) -> Result<()>;
}
