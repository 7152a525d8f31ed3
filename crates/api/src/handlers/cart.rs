//! Handlers for the `/cart` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use printforge_core::types::DbId;
use serde::Deserialize;

use printforge_db::models::cart::{AddCartItem, CartItem};
use printforge_db::repositories::CartRepo;

use crate::error::AppResult;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct UserQuery {
    pub user_id: DbId,
}

/// GET /api/v1/cart?user_id=
pub async fn view(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> AppResult<Json<Vec<CartItem>>> {
    let items = CartRepo::items_with_current_price(&state.pool, query.user_id).await?;
    Ok(Json(items))
}

#[derive(Deserialize)]
pub struct AddInput {
    pub user_id: DbId,
    #[serde(flatten)]
    pub item: AddCartItem,
}

/// POST /api/v1/cart/items
pub async fn add_item(
    State(state): State<AppState>,
    Json(input): Json<AddInput>,
) -> AppResult<StatusCode> {
    CartRepo::add_item(&state.pool, input.user_id, &input.item).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/cart/items/{product_id}?user_id=
pub async fn remove_item(
    State(state): State<AppState>,
    Path(product_id): Path<DbId>,
    Query(query): Query<UserQuery>,
) -> AppResult<StatusCode> {
    let removed = CartRepo::remove_item(&state.pool, query.user_id, product_id).await?;
    if removed {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Ok(StatusCode::NOT_FOUND)
    }
}
