//! Order and order-position models and DTOs.

use printforge_core::status::{OrderStatus, PaymentStatus};
use printforge_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An order row from the `orders` table. `amount_cents` is fixed at
/// creation from price snapshots and never recomputed from positions.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Order {
    pub id: DbId,
    pub user_id: DbId,
    pub source_project_id: Option<DbId>,
    #[sqlx(try_from = "String")]
    pub status: OrderStatus,
    #[sqlx(try_from = "String")]
    pub payment_status: PaymentStatus,
    pub amount_cents: i64,
    pub address_id: Option<DbId>,
    pub payment_method_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A line item; unit price is the snapshot taken at order creation.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct OrderPosition {
    pub id: DbId,
    pub order_id: DbId,
    pub product_id: Option<DbId>,
    pub description: String,
    pub quantity: i32,
    pub price_per_unit_cents: i64,
    pub created_at: Timestamp,
}

/// DTO for the admin order-status update endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateOrderStatus {
    pub status: OrderStatus,
}

use crate::models::address::CreateAddress;
use crate::models::payment_method::NewPaymentMethod;

/// Checkout's address choice: reuse a stored address or create one.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AddressSelection {
    Existing { address_id: DbId },
    New(CreateAddress),
}

/// Checkout's payment choice: reuse a stored method or create one.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentSelection {
    Existing { payment_method_id: DbId },
    New { method: NewPaymentMethod },
}

/// Full checkout request body.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutInput {
    pub user_id: DbId,
    pub address: AddressSelection,
    pub payment: PaymentSelection,
}
