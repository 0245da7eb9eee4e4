//! Order creation handler.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use catalog_domain::{NewOrder, Order};

use crate::context::ApiContext;
use crate::error::{ApiError, ApiResult};

/// `POST /order` - create an order with its line items.
pub async fn create_order(
    State(ctx): State<ApiContext>,
    Json(payload): Json<NewOrder>,
) -> ApiResult<(StatusCode, Json<Order>)> {
    payload
        .validate()
        .map_err(|err| ApiError::InvalidInput(err.to_string()))?;

    let order = ctx.orders.create(&payload).await?;
    Ok((StatusCode::CREATED, Json(order)))
}
