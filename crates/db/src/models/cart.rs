//! Cart models and DTOs.

use printforge_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A cart line joined to the product's name and newest price, the
/// shape order creation consumes.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CartItem {
    pub product_id: DbId,
    pub product_name: String,
    pub quantity: i32,
    pub price_cents: i64,
}

/// DTO for adding a product to the caller's cart.
#[derive(Debug, Clone, Deserialize)]
pub struct AddCartItem {
    pub product_id: DbId,
    pub quantity: i32,
}
