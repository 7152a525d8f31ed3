//! Repository for the `blueprints` table.

use printforge_core::error::CoreError;
use printforge_core::status::BlueprintStatus;
use printforge_core::types::DbId;
use sqlx::PgPool;

use crate::error::DbError;
use crate::models::blueprint::Blueprint;

const COLUMNS: &str = "id, project_id, status, bom_path, created_at, updated_at";

pub struct BlueprintRepo;

impl BlueprintRepo {
    /// Load a project into manufacturing. Idempotent: if a blueprint
    /// already exists the existing row comes back with `created`
    /// false; the unique constraint on `project_id` guards the race.
    pub async fn load(pool: &PgPool, project_id: DbId) -> Result<(Blueprint, bool), DbError> {
        let insert_query = format!(
            "INSERT INTO blueprints (project_id) VALUES ($1)
             ON CONFLICT ON CONSTRAINT uq_blueprints_project DO NOTHING
             RETURNING {COLUMNS}"
        );
        let inserted = sqlx::query_as::<_, Blueprint>(&insert_query)
            .bind(project_id)
            .fetch_optional(pool)
            .await?;
        if let Some(blueprint) = inserted {
            return Ok((blueprint, true));
        }

        let existing = Self::find_by_project(pool, project_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "blueprint",
                id: project_id,
            })?;
        Ok((existing, false))
    }

    pub async fn find_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Option<Blueprint>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM blueprints WHERE project_id = $1");
        sqlx::query_as::<_, Blueprint>(&query)
            .bind(project_id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<Blueprint>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM blueprints ORDER BY created_at DESC");
        sqlx::query_as::<_, Blueprint>(&query).fetch_all(pool).await
    }

    /// Record the finalized BOM document and advance the status.
    pub async fn finalize_bom(
        pool: &PgPool,
        project_id: DbId,
        bom_path: &str,
    ) -> Result<Blueprint, DbError> {
        let query = format!(
            "UPDATE blueprints SET
                bom_path = $2,
                status = $3,
                updated_at = NOW()
             WHERE project_id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Blueprint>(&query)
            .bind(project_id)
            .bind(bom_path)
            .bind(BlueprintStatus::BomFinished.as_str())
            .fetch_optional(pool)
            .await?
            .ok_or(
                CoreError::NotFound {
                    entity: "blueprint",
                    id: project_id,
                }
                .into(),
            )
    }

    pub async fn update_status(
        pool: &PgPool,
        project_id: DbId,
        status: BlueprintStatus,
    ) -> Result<Blueprint, DbError> {
        let query = format!(
            "UPDATE blueprints SET status = $2, updated_at = NOW()
             WHERE project_id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Blueprint>(&query)
            .bind(project_id)
            .bind(status.as_str())
            .fetch_optional(pool)
            .await?
            .ok_or(
                CoreError::NotFound {
                    entity: "blueprint",
                    id: project_id,
                }
                .into(),
            )
    }

    pub async fn delete(pool: &PgPool, project_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM blueprints WHERE project_id = $1")
            .bind(project_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
