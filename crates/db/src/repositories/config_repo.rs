//! Repository for the `configurations` key-value table.

use printforge_core::quota::{ProjectQuota, MAX_PROJECTS_TOTAL_KEY, MAX_PROJECTS_UNDER_REVIEW_KEY};
use sqlx::PgPool;

use crate::error::DbError;

pub struct ConfigRepo;

impl ConfigRepo {
    /// Read a raw configuration value.
    pub async fn get(pool: &PgPool, key: &str) -> Result<Option<String>, sqlx::Error> {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT value FROM configurations WHERE key = $1")
                .bind(key)
                .fetch_optional(pool)
                .await?;
        Ok(row.map(|(value,)| value))
    }

    /// Upsert a configuration value.
    pub async fn set(pool: &PgPool, key: &str, value: &str) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO configurations (key, value) VALUES ($1, $2)
             ON CONFLICT (key) DO UPDATE SET value = EXCLUDED.value",
        )
        .bind(key)
        .bind(value)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Load the project submission quota.
    pub async fn project_quota(pool: &PgPool) -> Result<ProjectQuota, DbError> {
        let max_total = Self::get(pool, MAX_PROJECTS_TOTAL_KEY).await?;
        let max_under_review = Self::get(pool, MAX_PROJECTS_UNDER_REVIEW_KEY).await?;
        Ok(ProjectQuota::from_config(max_total, max_under_review)?)
    }
}
