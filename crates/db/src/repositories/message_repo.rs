//! Repository for the append-only `project_messages` table.

use printforge_core::status::SenderRole;
use printforge_core::types::DbId;
use sqlx::PgPool;

use crate::models::message::{CreateMessage, ProjectMessage};

pub(crate) const MESSAGE_COLUMNS: &str = "id, project_id, sender_role, body, \
     requires_file_upload, required_files_provided, unread_by_admin, created_at";

pub struct MessageRepo;

impl MessageRepo {
    /// Append a message. Customer messages start unread for the admin.
    pub async fn create(
        pool: &PgPool,
        project_id: DbId,
        input: &CreateMessage,
    ) -> Result<ProjectMessage, sqlx::Error> {
        let query = format!(
            "INSERT INTO project_messages (project_id, sender_role, body, requires_file_upload, unread_by_admin)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {MESSAGE_COLUMNS}"
        );
        sqlx::query_as::<_, ProjectMessage>(&query)
            .bind(project_id)
            .bind(input.sender_role.as_str())
            .bind(&input.body)
            .bind(input.requires_file_upload)
            .bind(input.sender_role == SenderRole::User)
            .fetch_one(pool)
            .await
    }

    pub async fn list_for_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<ProjectMessage>, sqlx::Error> {
        let query = format!(
            "SELECT {MESSAGE_COLUMNS} FROM project_messages
             WHERE project_id = $1 ORDER BY created_at, id"
        );
        sqlx::query_as::<_, ProjectMessage>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Clear the admin's unread flags for a project. Returns how many
    /// messages were marked read.
    pub async fn mark_read_by_admin(pool: &PgPool, project_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE project_messages SET unread_by_admin = FALSE
             WHERE project_id = $1 AND unread_by_admin",
        )
        .bind(project_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Flag that the customer supplied the files an admin message asked
    /// for.
    pub async fn mark_required_files_provided(
        pool: &PgPool,
        message_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE project_messages SET required_files_provided = TRUE
             WHERE id = $1 AND requires_file_upload",
        )
        .bind(message_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
