//! Blueprint (manufacturing shadow of a project) model.

use printforge_core::status::BlueprintStatus;
use printforge_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `blueprints` table. At most one per project.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Blueprint {
    pub id: DbId,
    pub project_id: DbId,
    #[sqlx(try_from = "String")]
    pub status: BlueprintStatus,
    pub bom_path: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
