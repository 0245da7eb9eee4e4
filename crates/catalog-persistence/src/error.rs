//! Persistence layer error types

use thiserror::Error;

/// Persistence layer errors
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Postgres error: {0}")]
    Database(String),

    #[error("Redis error: {0}")]
    Cache(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Entity not found: {entity_type} with key {key}")]
    NotFound { entity_type: String, key: String },

    #[error("Invalid query parameters: {0}")]
    InvalidQuery(String),
}

impl From<sqlx::Error> for PersistenceError {
    fn from(err: sqlx::Error) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<sqlx::migrate::MigrateError> for PersistenceError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<redis::RedisError> for PersistenceError {
    fn from(err: redis::RedisError) -> Self {
        Self::Cache(err.to_string())
    }
}

impl From<serde_json::Error> for PersistenceError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Errors surfaced by the leaderboard read path.
///
/// Cache store failures are deliberately distinct from aggregation failures
/// so an outage is never mistaken for a cold cache.
#[derive(Debug, Error)]
pub enum LeaderboardError {
    #[error("Leaderboard aggregation failed: {0}")]
    ComputationFailed(#[source] PersistenceError),

    #[error("Cache store unavailable: {0}")]
    CacheUnavailable(#[source] PersistenceError),
}

pub type Result<T> = std::result::Result<T, PersistenceError>;
