//! Postgres repository implementation.

use chrono::{DateTime, Utc};
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Postgres, QueryBuilder};
use std::sync::Arc;

use crate::error::Result;
use catalog_domain::{
    LeaderboardEntry, NewOrder, Order, OrderItem, Page, Pagination, Product, ProductFilter,
};

use super::{LeaderboardRepository, OrderRepository, ProductRepository};

// =============================================================================
// POSTGRES CONFIGURATION
// =============================================================================

/// Postgres connection configuration.
#[derive(Debug, Clone)]
pub struct PgConfig {
    pub url: String,
    pub max_connections: u32,
}

impl Default for PgConfig {
    fn default() -> Self {
        Self {
            url: "postgres://localhost:5432/catalog".to_string(),
            max_connections: 10,
        }
    }
}

// =============================================================================
// POSTGRES CLIENT
// =============================================================================

/// Postgres client wrapper.
pub struct PgClient {
    pool: PgPool,
    pub config: PgConfig,
}

impl PgClient {
    /// Create a new Postgres client.
    pub async fn new(config: PgConfig) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.url)
            .await?;

        Ok(Self { pool, config })
    }

    /// Apply pending schema migrations.
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    /// Get pool reference.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

// =============================================================================
// ROW TYPES
// =============================================================================

#[derive(sqlx::FromRow)]
struct ProductRow {
    id: i64,
    name: String,
    category: String,
    area: String,
    created_at: DateTime<Utc>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            category: row.category,
            area: row.area,
            created_at: row.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct LeaderboardRow {
    id: i64,
    name: String,
    category: String,
    area: String,
    total_quantity: i64,
}

impl From<LeaderboardRow> for LeaderboardEntry {
    fn from(row: LeaderboardRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            category: row.category,
            area: row.area,
            total_quantity: row.total_quantity,
        }
    }
}

#[derive(sqlx::FromRow)]
struct OrderItemRow {
    product_id: i64,
    quantity: i32,
}

// =============================================================================
// PRODUCT REPOSITORY
// =============================================================================

/// Postgres-backed product repository.
pub struct PgProductRepository {
    client: Arc<PgClient>,
}

impl PgProductRepository {
    pub fn new(client: Arc<PgClient>) -> Self {
        Self { client }
    }
}

/// Escape LIKE wildcards so user input matches literally.
fn escape_like(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Append WHERE clauses for a product filter to a query builder.
fn push_filter(qb: &mut QueryBuilder<'_, Postgres>, filter: &ProductFilter) {
    let mut prefix = " WHERE ";

    if let Some(categories) = filter.categories.as_ref().filter(|c| !c.is_empty()) {
        qb.push(prefix).push("category = ANY(");
        qb.push_bind(categories.clone());
        qb.push(")");
        prefix = " AND ";
    }

    if let Some(name) = filter.name.as_deref().filter(|n| !n.is_empty()) {
        qb.push(prefix).push("name ILIKE ");
        qb.push_bind(format!("%{}%", escape_like(name)));
        prefix = " AND ";
    }

    if let Some(area) = filter.area.as_deref() {
        qb.push(prefix).push("area = ");
        qb.push_bind(area.to_string());
    }
}

#[async_trait::async_trait]
impl ProductRepository for PgProductRepository {
    async fn get_by_id(&self, id: i64) -> Result<Option<Product>> {
        let row: Option<ProductRow> = sqlx::query_as(
            "SELECT id, name, category, area, created_at FROM products WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.client.pool())
        .await?;

        Ok(row.map(Product::from))
    }

    async fn list(&self, filter: &ProductFilter, page: Pagination) -> Result<Page<Product>> {
        let mut count_qb = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM products");
        push_filter(&mut count_qb, filter);
        let total: i64 = count_qb
            .build_query_scalar()
            .fetch_one(self.client.pool())
            .await?;

        let mut qb = QueryBuilder::<Postgres>::new(
            "SELECT id, name, category, area, created_at FROM products",
        );
        push_filter(&mut qb, filter);
        qb.push(" ORDER BY id");
        qb.push(" LIMIT ").push_bind(page.limit());
        qb.push(" OFFSET ").push_bind(page.offset());

        let rows: Vec<ProductRow> = qb.build_query_as().fetch_all(self.client.pool()).await?;

        Ok(Page {
            data: rows.into_iter().map(Product::from).collect(),
            page: page.page,
            page_size: page.page_size,
            total,
        })
    }
}

// =============================================================================
// ORDER REPOSITORY
// =============================================================================

/// Postgres-backed order repository.
pub struct PgOrderRepository {
    client: Arc<PgClient>,
}

impl PgOrderRepository {
    pub fn new(client: Arc<PgClient>) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl OrderRepository for PgOrderRepository {
    async fn create(&self, order: &NewOrder) -> Result<Order> {
        let mut tx = self.client.pool().begin().await?;

        let (order_id, created_at): (i64, DateTime<Utc>) = sqlx::query_as(
            "INSERT INTO orders (customer_id) VALUES ($1) RETURNING id, created_at",
        )
        .bind(order.customer_id)
        .fetch_one(&mut *tx)
        .await?;

        let mut items = Vec::with_capacity(order.items.len());
        for item in &order.items {
            let row: OrderItemRow = sqlx::query_as(
                "INSERT INTO order_items (order_id, product_id, quantity) \
                 VALUES ($1, $2, $3) RETURNING product_id, quantity",
            )
            .bind(order_id)
            .bind(item.product_id)
            .bind(item.quantity)
            .fetch_one(&mut *tx)
            .await?;

            items.push(OrderItem {
                product_id: row.product_id,
                quantity: row.quantity,
            });
        }

        tx.commit().await?;

        Ok(Order {
            id: order_id,
            customer_id: order.customer_id,
            items,
            created_at,
        })
    }
}

// =============================================================================
// LEADERBOARD REPOSITORY
// =============================================================================

/// Postgres-backed aggregation query for the leaderboard.
pub struct PgLeaderboardRepository {
    client: Arc<PgClient>,
}

impl PgLeaderboardRepository {
    pub fn new(client: Arc<PgClient>) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl LeaderboardRepository for PgLeaderboardRepository {
    async fn top_by_area(&self, area: &str, limit: i64) -> Result<Vec<LeaderboardEntry>> {
        let rows: Vec<LeaderboardRow> = sqlx::query_as(
            r"
            SELECT
                p.id,
                p.name,
                p.category,
                p.area,
                SUM(oi.quantity)::BIGINT AS total_quantity
            FROM products p
            JOIN order_items oi ON oi.product_id = p.id
            WHERE p.area = $1
            GROUP BY p.id, p.name, p.category, p.area
            ORDER BY total_quantity DESC
            LIMIT $2
            ",
        )
        .bind(area)
        .bind(limit)
        .fetch_all(self.client.pool())
        .await?;

        Ok(rows.into_iter().map(LeaderboardEntry::from).collect())
    }
}
