//! # REST Handlers
//!
//! Axum handlers for the catalog, order, and leaderboard routes.

pub mod orders;
pub mod products;
