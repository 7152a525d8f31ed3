//! Catalog models: materials, print profiles and product categories.

use printforge_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Material {
    pub id: DbId,
    pub name: String,
    pub cost_per_kg: Option<f64>,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PrintProfile {
    pub id: DbId,
    pub name: String,
    pub cost_multiplier: Option<f64>,
    pub markup_multiplier: Option<f64>,
    pub cost_per_min: Option<f64>,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProductCategory {
    pub id: DbId,
    pub name: String,
}
