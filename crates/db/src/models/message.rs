//! Project message (admin/customer chat) model and DTOs.

use printforge_core::status::SenderRole;
use printforge_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the append-only `project_messages` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectMessage {
    pub id: DbId,
    pub project_id: DbId,
    #[sqlx(try_from = "String")]
    pub sender_role: SenderRole,
    pub body: String,
    pub requires_file_upload: bool,
    pub required_files_provided: bool,
    pub unread_by_admin: bool,
    pub created_at: Timestamp,
}

/// DTO for appending a message to a project's log.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMessage {
    pub sender_role: SenderRole,
    pub body: String,
    #[serde(default)]
    pub requires_file_upload: bool,
}
