//! Production job model.

use printforge_core::status::JobStatus;
use printforge_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// One queued unit of physical work. A part with quantity N in the BOM
/// becomes N of these rows.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProductionJob {
    pub id: DbId,
    pub job_code: String,
    pub source_project_id: DbId,
    #[sqlx(try_from = "String")]
    pub status: JobStatus,
    pub priority: i32,
    pub part_name: String,
    pub material_id: Option<DbId>,
    pub profile_id: Option<DbId>,
    pub color: Option<String>,
    pub nozzle_diameter: f64,
    pub print_time_min: f64,
    pub dim_x: f64,
    pub dim_y: f64,
    pub dim_z: f64,
    pub assigned_printer: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
