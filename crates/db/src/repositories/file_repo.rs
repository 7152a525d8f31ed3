//! Repository for the `project_files` table.

use printforge_core::types::DbId;
use sqlx::PgPool;

use crate::models::project_file::{NewProjectFile, ProjectFile};

pub(crate) const FILE_COLUMNS: &str = "id, project_id, user_id, original_name, stored_name, \
     storage_path, size_kb, position, created_at";

pub struct FileRepo;

impl FileRepo {
    /// Files of a project in submission order.
    pub async fn list_for_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<ProjectFile>, sqlx::Error> {
        let query = format!(
            "SELECT {FILE_COLUMNS} FROM project_files WHERE project_id = $1 ORDER BY position"
        );
        sqlx::query_as::<_, ProjectFile>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Append files to an existing project, continuing the position
    /// sequence after the current last file. Used when a customer
    /// supplies additional files in the chat.
    pub async fn append_files(
        pool: &PgPool,
        project_id: DbId,
        user_id: DbId,
        files: &[NewProjectFile],
    ) -> Result<Vec<ProjectFile>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let (next_position,): (i32,) = sqlx::query_as(
            "SELECT COALESCE(MAX(position) + 1, 0) FROM project_files WHERE project_id = $1",
        )
        .bind(project_id)
        .fetch_one(&mut *tx)
        .await?;

        let query = format!(
            "INSERT INTO project_files (project_id, user_id, original_name, stored_name, storage_path, size_kb, position)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {FILE_COLUMNS}"
        );
        let mut rows = Vec::with_capacity(files.len());
        for (offset, file) in files.iter().enumerate() {
            let row = sqlx::query_as::<_, ProjectFile>(&query)
                .bind(project_id)
                .bind(user_id)
                .bind(&file.original_name)
                .bind(&file.stored_name)
                .bind(&file.storage_path)
                .bind(file.size_kb)
                .bind(next_position + offset as i32)
                .fetch_one(&mut *tx)
                .await?;
            rows.push(row);
        }

        tx.commit().await?;
        Ok(rows)
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<ProjectFile>, sqlx::Error> {
        let query = format!("SELECT {FILE_COLUMNS} FROM project_files WHERE id = $1");
        sqlx::query_as::<_, ProjectFile>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
