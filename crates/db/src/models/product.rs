//! Product and price-history models and DTOs.

use printforge_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A product row from the `products` table. `source_project_id` points
/// back at the project a quote-derived product came from; admin-created
/// shop products carry NULL there.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Product {
    pub id: DbId,
    pub user_id: DbId,
    pub category_id: Option<DbId>,
    pub source_project_id: Option<DbId>,
    pub name: String,
    pub description: Option<String>,
    pub material_type: Option<String>,
    pub color: Option<String>,
    pub weight_g: Option<f64>,
    pub print_time_min: Option<f64>,
    pub stock_quantity: i32,
    pub is_active: bool,
    pub shop_visible: bool,
    pub image_path: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for creating a product directly (admin shop management).
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProduct {
    pub user_id: DbId,
    pub category_id: Option<DbId>,
    pub name: String,
    pub description: Option<String>,
    pub material_type: Option<String>,
    pub color: Option<String>,
    pub weight_g: Option<f64>,
    pub print_time_min: Option<f64>,
    #[serde(default)]
    pub stock_quantity: i32,
    #[serde(default)]
    pub shop_visible: bool,
    pub image_path: Option<String>,
    /// Initial price; every product gets a price-history row at birth.
    pub price_cents: i64,
}

/// One row of the append-only price history.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProductPrice {
    pub id: DbId,
    pub product_id: DbId,
    pub price_cents: i64,
    pub created_at: Timestamp,
}

/// Shop listing row: product joined to its newest price.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ShopProduct {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub category_id: Option<DbId>,
    pub color: Option<String>,
    pub image_path: Option<String>,
    pub stock_quantity: i32,
    pub price_cents: i64,
}
