//! Project entity model and DTOs.

use printforge_core::status::{OrderType, ProjectStatus};
use printforge_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A project row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub user_id: DbId,
    pub name: String,
    pub description: String,
    pub requested_quantity: i32,
    #[sqlx(try_from = "String")]
    pub order_type: OrderType,
    pub material_type: Option<String>,
    #[sqlx(try_from = "String")]
    pub status: ProjectStatus,
    pub priority: i32,
    pub volume_cm3: Option<f64>,
    pub print_time_min: Option<f64>,
    pub estimated_material_g: Option<f64>,
    pub final_quote_price_cents: Option<i64>,
    pub quoted_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new project. The status always starts at
/// `UNDER_REVIEW` and is not part of the input.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProject {
    pub user_id: DbId,
    pub name: String,
    pub description: String,
    pub requested_quantity: i32,
    pub order_type: OrderType,
    pub material_type: Option<String>,
}

/// Slicing metrics plus the quote an admin attaches when finalizing.
#[derive(Debug, Clone, Deserialize)]
pub struct QuoteInput {
    pub volume_cm3: f64,
    pub print_time_min: f64,
    pub estimated_material_g: f64,
    pub quote_price_cents: i64,
    pub product_name: Option<String>,
    pub product_description: Option<String>,
    pub category_id: Option<DbId>,
    #[serde(default)]
    pub shop_visible: bool,
}
