//! Repository for the `production_jobs` table.

use printforge_core::bom::PlannedJob;
use printforge_core::status::JobStatus;
use printforge_core::types::DbId;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::production_job::ProductionJob;

const COLUMNS: &str = "id, job_code, source_project_id, status, priority, part_name, \
     material_id, profile_id, color, nozzle_diameter, print_time_min, dim_x, dim_y, dim_z, \
     assigned_printer, created_at, updated_at";

pub struct ProductionJobRepo;

impl ProductionJobRepo {
    /// Insert one row per planned job, all queued, in one transaction.
    pub async fn insert_jobs(
        pool: &PgPool,
        project_id: DbId,
        jobs: &[PlannedJob],
    ) -> Result<Vec<ProductionJob>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO production_jobs (job_code, source_project_id, priority, part_name,
                                          material_id, profile_id, color, nozzle_diameter,
                                          print_time_min, dim_x, dim_y, dim_z)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
             RETURNING {COLUMNS}"
        );
        let mut rows = Vec::with_capacity(jobs.len());
        for job in jobs {
            let row = sqlx::query_as::<_, ProductionJob>(&query)
                .bind(format!("JOB_{}", Uuid::new_v4()))
                .bind(project_id)
                .bind(job.priority)
                .bind(&job.part_name)
                .bind(job.material_id)
                .bind(job.profile_id)
                .bind(&job.color)
                .bind(job.nozzle_diameter)
                .bind(job.print_time_min)
                .bind(job.dim_x)
                .bind(job.dim_y)
                .bind(job.dim_z)
                .fetch_one(&mut *tx)
                .await?;
            rows.push(row);
        }

        tx.commit().await?;
        Ok(rows)
    }

    pub async fn list_for_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<ProductionJob>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM production_jobs
             WHERE source_project_id = $1
             ORDER BY priority, id"
        );
        sqlx::query_as::<_, ProductionJob>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    pub async fn list_by_status(
        pool: &PgPool,
        status: JobStatus,
    ) -> Result<Vec<ProductionJob>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM production_jobs
             WHERE status = $1
             ORDER BY priority, id"
        );
        sqlx::query_as::<_, ProductionJob>(&query)
            .bind(status.as_str())
            .fetch_all(pool)
            .await
    }

    pub async fn update_status(
        pool: &PgPool,
        job_id: DbId,
        status: JobStatus,
    ) -> Result<Option<ProductionJob>, sqlx::Error> {
        let query = format!(
            "UPDATE production_jobs SET status = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProductionJob>(&query)
            .bind(job_id)
            .bind(status.as_str())
            .fetch_optional(pool)
            .await
    }

    pub async fn assign_printer(
        pool: &PgPool,
        job_id: DbId,
        printer: &str,
    ) -> Result<Option<ProductionJob>, sqlx::Error> {
        let query = format!(
            "UPDATE production_jobs SET assigned_printer = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProductionJob>(&query)
            .bind(job_id)
            .bind(printer)
            .fetch_optional(pool)
            .await
    }
}
