//! # Repository Traits
//!
//! Abstract repository interfaces for domain entities.
//! Implementations can be swapped for different backends (Postgres, mock, etc.)

use async_trait::async_trait;

use crate::error::Result;
use catalog_domain::{
    LeaderboardEntry, NewOrder, Order, Page, Pagination, Product, ProductFilter,
};

// =============================================================================
// PRODUCT REPOSITORY
// =============================================================================

/// Repository for Product entity operations
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Get product by ID
    async fn get_by_id(&self, id: i64) -> Result<Option<Product>>;

    /// List products matching a filter, one page at a time
    async fn list(&self, filter: &ProductFilter, page: Pagination) -> Result<Page<Product>>;
}

// =============================================================================
// ORDER REPOSITORY
// =============================================================================

/// Repository for Order entity operations
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Create an order with its line items in one transaction
    async fn create(&self, order: &NewOrder) -> Result<Order>;
}

// =============================================================================
// LEADERBOARD REPOSITORY
// =============================================================================

/// The aggregation query behind the leaderboard: products joined to order
/// items, quantities summed per product within an area, top N descending.
#[async_trait]
pub trait LeaderboardRepository: Send + Sync {
    /// Top `limit` products in `area` ranked by summed order-item quantity.
    ///
    /// Products with no matching order items are excluded (inner join).
    /// Tie order between equal totals is whatever the store yields.
    async fn top_by_area(&self, area: &str, limit: i64) -> Result<Vec<LeaderboardEntry>>;
}
