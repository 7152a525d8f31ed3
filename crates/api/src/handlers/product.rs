//! Handlers for the `/products` (shop) resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use printforge_core::error::CoreError;
use printforge_core::types::DbId;
use serde::{Deserialize, Serialize};

use printforge_db::models::product::{CreateProduct, Product, ProductPrice, ShopProduct};
use printforge_db::repositories::ProductRepo;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/v1/products
///
/// Shop listing: active, visible products with their current price.
pub async fn list_shop(State(state): State<AppState>) -> AppResult<Json<Vec<ShopProduct>>> {
    let products = ProductRepo::list_shop(&state.pool).await?;
    Ok(Json(products))
}

#[derive(Serialize)]
pub struct ProductDetail {
    pub product: Product,
    pub price_cents: Option<i64>,
}

/// GET /api/v1/products/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ProductDetail>> {
    let product = ProductRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "product",
            id,
        }))?;
    let price_cents = ProductRepo::current_price_cents(&state.pool, id).await?;
    Ok(Json(ProductDetail {
        product,
        price_cents,
    }))
}

/// POST /api/v1/admin/products
///
/// Direct product creation for shop management. The first price row is
/// created in the same transaction.
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateProduct>,
) -> AppResult<(StatusCode, Json<Product>)> {
    if input.price_cents <= 0 {
        return Err(CoreError::Validation("price must be positive".to_string()).into());
    }
    let product = ProductRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

#[derive(Deserialize)]
pub struct NewPriceInput {
    pub price_cents: i64,
}

/// POST /api/v1/admin/products/{id}/prices
///
/// Append a price-history row; existing orders keep their snapshots.
pub async fn add_price(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<NewPriceInput>,
) -> AppResult<(StatusCode, Json<ProductPrice>)> {
    if input.price_cents <= 0 {
        return Err(CoreError::Validation("price must be positive".to_string()).into());
    }
    ProductRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "product",
            id,
        }))?;
    let price = ProductRepo::add_price(&state.pool, id, input.price_cents).await?;
    Ok((StatusCode::CREATED, Json(price)))
}

/// GET /api/v1/admin/products/{id}/prices
///
/// Full price history, newest first.
pub async fn list_prices(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vec<ProductPrice>>> {
    ProductRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "product",
            id,
        }))?;
    let history = ProductRepo::price_history(&state.pool, id).await?;
    Ok(Json(history))
}
