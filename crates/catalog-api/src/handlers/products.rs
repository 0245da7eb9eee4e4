//! Product catalog handlers: list/filter/paginate, get-by-id, and the
//! per-area leaderboard.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use catalog_domain::{LeaderboardEntry, Page, Pagination, Product, ProductFilter};

use crate::context::ApiContext;
use crate::error::{ApiError, ApiResult};

/// Query parameters for `GET /product`.
///
/// `categories` is a comma-separated list, e.g. `categories=Books,Games`.
#[derive(Debug, Default, Deserialize)]
pub struct ListProductsQuery {
    pub categories: Option<String>,
    pub name: Option<String>,
    pub area: Option<String>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl ListProductsQuery {
    fn into_filter_and_page(self) -> (ProductFilter, Pagination) {
        let categories = self.categories.map(|raw| {
            raw.split(',')
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(String::from)
                .collect::<Vec<_>>()
        });

        let filter = ProductFilter {
            categories: categories.filter(|c| !c.is_empty()),
            name: self.name,
            area: self.area,
        };

        let page = Pagination::clamped(
            self.page.unwrap_or(1),
            self.page_size.unwrap_or(Pagination::DEFAULT_PAGE_SIZE),
        );

        (filter, page)
    }
}

/// `GET /product` - list products matching the filter, paginated.
pub async fn list_products(
    State(ctx): State<ApiContext>,
    Query(params): Query<ListProductsQuery>,
) -> ApiResult<Json<Page<Product>>> {
    let (filter, page) = params.into_filter_and_page();
    let result = ctx.products.list(&filter, page).await?;
    Ok(Json(result))
}

/// `GET /product/{id}` - fetch a single product.
pub async fn get_product(
    State(ctx): State<ApiContext>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Product>> {
    match ctx.products.get_by_id(id).await? {
        Some(product) => Ok(Json(product)),
        None => Err(ApiError::NotFound {
            entity_type: "product".to_string(),
            id: id.to_string(),
        }),
    }
}

/// `GET /product/top-ordered/{area}` - top ordered products for an area,
/// served through the cache-aside leaderboard.
pub async fn top_ordered_products(
    State(ctx): State<ApiContext>,
    Path(area): Path<String>,
) -> ApiResult<Json<Vec<LeaderboardEntry>>> {
    if area.trim().is_empty() {
        return Err(ApiError::InvalidInput(
            "area must not be empty".to_string(),
        ));
    }

    let entries = ctx.leaderboard.get_top_ordered_products(&area).await?;
    Ok(Json(entries))
}
