//! Handlers for the `/orders` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use printforge_core::error::CoreError;
use printforge_core::types::DbId;
use serde::{Deserialize, Serialize};

use printforge_db::models::order::{CheckoutInput, Order, OrderPosition};
use printforge_db::repositories::OrderRepo;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct FromQuoteInput {
    pub user_id: DbId,
    pub project_id: DbId,
}

/// POST /api/v1/orders/from-quote
///
/// Start an order from an accepted quote. Idempotent: repeating the
/// call returns the already-open order for the project.
pub async fn create_from_quote(
    State(state): State<AppState>,
    Json(input): Json<FromQuoteInput>,
) -> AppResult<(StatusCode, Json<Order>)> {
    let order = OrderRepo::create_from_quote(&state.pool, input.user_id, input.project_id).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

#[derive(Deserialize)]
pub struct FromCartInput {
    pub user_id: DbId,
}

/// POST /api/v1/orders/from-cart
///
/// Turn the cart into an order. An empty cart is a validation error,
/// not an empty order.
pub async fn create_from_cart(
    State(state): State<AppState>,
    Json(input): Json<FromCartInput>,
) -> AppResult<(StatusCode, Json<Order>)> {
    let order = OrderRepo::create_from_cart(&state.pool, input.user_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Validation("your cart is empty".to_string()))
        })?;
    Ok((StatusCode::CREATED, Json(order)))
}

#[derive(Serialize)]
pub struct CheckoutResponse {
    pub order: Order,
    pub address_id: DbId,
    pub payment_method_id: DbId,
}

/// POST /api/v1/orders/{id}/checkout
///
/// Commit a draft order: resolve address and payment method and mark
/// the order finalized, atomically.
pub async fn finalize_checkout(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<CheckoutInput>,
) -> AppResult<Json<CheckoutResponse>> {
    let (order, address_id, payment_method_id) =
        OrderRepo::finalize_checkout(&state.pool, id, &input).await?;
    Ok(Json(CheckoutResponse {
        order,
        address_id,
        payment_method_id,
    }))
}

#[derive(Deserialize)]
pub struct UserQuery {
    pub user_id: DbId,
}

/// GET /api/v1/orders?user_id=
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> AppResult<Json<Vec<Order>>> {
    let orders = OrderRepo::list_for_user(&state.pool, query.user_id).await?;
    Ok(Json(orders))
}

#[derive(Serialize)]
pub struct OrderDetail {
    pub order: Order,
    pub positions: Vec<OrderPosition>,
}

/// GET /api/v1/orders/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<OrderDetail>> {
    let order = OrderRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "order",
            id,
        }))?;
    let positions = OrderRepo::positions(&state.pool, id).await?;
    Ok(Json(OrderDetail { order, positions }))
}
