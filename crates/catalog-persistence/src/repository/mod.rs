//! # Repository Module
//!
//! Repository pattern implementations for domain entity persistence.

pub mod postgres;
pub mod traits;

pub use postgres::{
    PgClient, PgConfig, PgLeaderboardRepository, PgOrderRepository, PgProductRepository,
};
pub use traits::{LeaderboardRepository, OrderRepository, ProductRepository};
