//! Handler for the `/catalog` lookup endpoint.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use printforge_db::models::catalog::{Material, PrintProfile, ProductCategory};
use printforge_db::repositories::CatalogRepo;

use crate::error::AppResult;
use crate::state::AppState;

#[derive(Serialize)]
pub struct CatalogResponse {
    pub materials: Vec<Material>,
    pub print_profiles: Vec<PrintProfile>,
    pub categories: Vec<ProductCategory>,
}

/// GET /api/v1/catalog
///
/// Everything the submission form and the admin quote screen need in
/// one call: materials, print profiles and product categories.
pub async fn catalog(State(state): State<AppState>) -> AppResult<Json<CatalogResponse>> {
    let materials = CatalogRepo::list_materials(&state.pool).await?;
    let print_profiles = CatalogRepo::list_profiles(&state.pool).await?;
    let categories = CatalogRepo::list_categories(&state.pool).await?;
    Ok(Json(CatalogResponse {
        materials,
        print_profiles,
        categories,
    }))
}
