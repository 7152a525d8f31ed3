//! Repository for catalog tables: materials, print profiles and
//! product categories. Also resolves the pricing engine's cost
//! constants, falling back to defaults when catalog rows are missing.

use printforge_core::pricing::CostConstants;
use printforge_core::types::DbId;
use sqlx::PgPool;

use crate::models::catalog::{Material, PrintProfile, ProductCategory};

pub struct CatalogRepo;

impl CatalogRepo {
    pub async fn list_materials(pool: &PgPool) -> Result<Vec<Material>, sqlx::Error> {
        sqlx::query_as::<_, Material>(
            "SELECT id, name, cost_per_kg FROM materials ORDER BY name",
        )
        .fetch_all(pool)
        .await
    }

    pub async fn list_profiles(pool: &PgPool) -> Result<Vec<PrintProfile>, sqlx::Error> {
        sqlx::query_as::<_, PrintProfile>(
            "SELECT id, name, cost_multiplier, markup_multiplier, cost_per_min
             FROM print_profiles ORDER BY name",
        )
        .fetch_all(pool)
        .await
    }

    pub async fn list_categories(pool: &PgPool) -> Result<Vec<ProductCategory>, sqlx::Error> {
        sqlx::query_as::<_, ProductCategory>(
            "SELECT id, name FROM product_categories ORDER BY name",
        )
        .fetch_all(pool)
        .await
    }

    /// Resolve cost constants for a pricing run. Unknown profile or
    /// material ids simply keep the defaults.
    pub async fn cost_constants(
        pool: &PgPool,
        profile_id: Option<DbId>,
        material_name: Option<&str>,
    ) -> Result<CostConstants, sqlx::Error> {
        let mut constants = CostConstants::default();

        if let Some(profile_id) = profile_id {
            let row: Option<(Option<f64>, Option<f64>, Option<f64>)> = sqlx::query_as(
                "SELECT cost_multiplier, markup_multiplier, cost_per_min
                 FROM print_profiles WHERE id = $1",
            )
            .bind(profile_id)
            .fetch_optional(pool)
            .await?;
            if let Some((cost_multiplier, markup_multiplier, cost_per_min)) = row {
                constants = constants.with_profile(cost_multiplier, markup_multiplier, cost_per_min);
            }
        }

        if let Some(material_name) = material_name {
            let row: Option<(Option<f64>,)> =
                sqlx::query_as("SELECT cost_per_kg FROM materials WHERE name = $1")
                    .bind(material_name)
                    .fetch_optional(pool)
                    .await?;
            if let Some((cost_per_kg,)) = row {
                constants = constants.with_material(cost_per_kg);
            }
        }

        Ok(constants)
    }
}
