//! Uploaded file metadata model and DTOs.

use printforge_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `project_files` table. `position` preserves the
/// order the files were submitted in.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectFile {
    pub id: DbId,
    pub project_id: DbId,
    pub user_id: DbId,
    pub original_name: String,
    pub stored_name: String,
    pub storage_path: String,
    pub size_kb: i64,
    pub position: i32,
    pub created_at: Timestamp,
}

/// An upload that passed validation and is ready to persist.
#[derive(Debug, Clone)]
pub struct NewProjectFile {
    pub original_name: String,
    pub stored_name: String,
    pub storage_path: String,
    pub size_kb: i64,
}
