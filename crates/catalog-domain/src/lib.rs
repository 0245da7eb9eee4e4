//! # Product Catalog Service - Domain Model
//!
//! Core domain entities, filters, and pagination types for the product
//! catalog and order subsystem. These types are the single source of truth
//! across all layers: persistence, cache, and API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// ENTITY TYPES
// =============================================================================

/// Product entity - catalog item, owned by the relational store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub area: String,
    pub created_at: DateTime<Utc>,
}

/// Order line item - references a product and a quantity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: i64,
    pub quantity: i32,
}

/// Order entity - customer order with its line items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub customer_id: i64,
    pub items: Vec<OrderItem>,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// CREATION PAYLOADS
// =============================================================================

/// Line item in an order creation request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOrderItem {
    pub product_id: i64,
    pub quantity: i32,
}

/// Order creation request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOrder {
    pub customer_id: i64,
    pub items: Vec<NewOrderItem>,
}

impl NewOrder {
    /// Validate the payload: at least one item, every quantity positive.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.items.is_empty() {
            return Err(DomainError::EmptyOrder);
        }
        for item in &self.items {
            if item.quantity < 1 {
                return Err(DomainError::InvalidQuantity {
                    product_id: item.product_id,
                    quantity: item.quantity,
                });
            }
        }
        Ok(())
    }
}

// =============================================================================
// LEADERBOARD TYPES
// =============================================================================

/// Leaderboard row - a product ranked by summed order-item quantity within
/// an area. Derived on demand, never persisted outside the cache.
///
/// Field names are the wire format for cached entries; renaming one breaks
/// round-trips with previously cached values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub area: String,
    pub total_quantity: i64,
}

// =============================================================================
// QUERY/FILTER TYPES
// =============================================================================

/// Catalog listing filter
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductFilter {
    /// Match any of these categories (IN-list)
    pub categories: Option<Vec<String>>,
    /// Case-insensitive substring match on name
    pub name: Option<String>,
    /// Exact match on area
    pub area: Option<String>,
}

/// Pagination parameters, clamped to sane bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub page_size: u32,
}

impl Pagination {
    pub const DEFAULT_PAGE_SIZE: u32 = 10;
    pub const MAX_PAGE_SIZE: u32 = 100;

    /// Build pagination from raw request values, clamping page to >= 1 and
    /// page_size to 1..=100.
    #[must_use]
    pub fn clamped(page: u32, page_size: u32) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.clamp(1, Self::MAX_PAGE_SIZE),
        }
    }

    /// Row offset for the current page
    #[must_use]
    pub const fn offset(&self) -> i64 {
        (self.page as i64 - 1) * self.page_size as i64
    }

    /// Row limit for the current page
    #[must_use]
    pub const fn limit(&self) -> i64 {
        self.page_size as i64
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: Self::DEFAULT_PAGE_SIZE,
        }
    }
}

/// One page of results plus paging metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub page: u32,
    pub page_size: u32,
    pub total: i64,
}

// =============================================================================
// ERRORS
// =============================================================================

/// Domain-level errors
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("Order must contain at least one item")]
    EmptyOrder,

    #[error("Invalid quantity {quantity} for product {product_id}")]
    InvalidQuantity { product_id: i64, quantity: i32 },
}
