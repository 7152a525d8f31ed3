//! Repository for the `projects` table and its transactional lifecycle
//! operations.
//!
//! Every multi-statement business operation here runs inside a single
//! transaction: either all of its writes land or none do.

use printforge_core::error::CoreError;
use printforge_core::quota::ProjectCounts;
use printforge_core::status::{AdminDecision, ProjectStatus, SenderRole};
use printforge_core::types::DbId;
use sqlx::PgPool;

use crate::error::DbError;
use crate::models::message::ProjectMessage;
use crate::models::product::Product;
use crate::models::project::{CreateProject, Project, QuoteInput};
use crate::models::project_file::{NewProjectFile, ProjectFile};
use crate::repositories::file_repo::FILE_COLUMNS;
use crate::repositories::message_repo::MESSAGE_COLUMNS;
use crate::repositories::product_repo::PRODUCT_COLUMNS;

/// Column list shared across queries to avoid repetition.
pub(crate) const COLUMNS: &str = "id, user_id, name, description, requested_quantity, order_type, \
     material_type, status, priority, volume_cm3, print_time_min, estimated_material_g, \
     final_quote_price_cents, quoted_at, created_at, updated_at";

pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a project plus one file row per saved upload, atomically.
    ///
    /// File positions follow slice order, so the project's file list
    /// reads back in submission order. If any insert fails the project
    /// row never becomes visible.
    pub async fn create_with_files(
        pool: &PgPool,
        input: &CreateProject,
        files: &[NewProjectFile],
    ) -> Result<(Project, Vec<ProjectFile>), DbError> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO projects (user_id, name, description, requested_quantity, order_type, material_type)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        let project = sqlx::query_as::<_, Project>(&query)
            .bind(input.user_id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.requested_quantity)
            .bind(input.order_type.as_str())
            .bind(&input.material_type)
            .fetch_one(&mut *tx)
            .await?;

        let file_query = format!(
            "INSERT INTO project_files (project_id, user_id, original_name, stored_name, storage_path, size_kb, position)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {FILE_COLUMNS}"
        );
        let mut file_rows = Vec::with_capacity(files.len());
        for (position, file) in files.iter().enumerate() {
            let row = sqlx::query_as::<_, ProjectFile>(&file_query)
                .bind(project.id)
                .bind(input.user_id)
                .bind(&file.original_name)
                .bind(&file.stored_name)
                .bind(&file.storage_path)
                .bind(file.size_kb)
                .bind(position as i32)
                .fetch_one(&mut *tx)
                .await?;
            file_rows.push(row);
        }

        tx.commit().await?;
        Ok((project, file_rows))
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects WHERE user_id = $1 ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Admin listing, most urgent first.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects ORDER BY priority DESC, created_at DESC"
        );
        sqlx::query_as::<_, Project>(&query).fetch_all(pool).await
    }

    /// Project counts feeding the submission quota check.
    pub async fn counts_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<ProjectCounts, sqlx::Error> {
        let (total, under_review): (i64, i64) = sqlx::query_as(
            "SELECT COUNT(*),
                    COUNT(*) FILTER (WHERE status = 'UNDER_REVIEW')
             FROM projects WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_one(pool)
        .await?;
        Ok(ProjectCounts {
            total,
            under_review,
        })
    }

    /// Append an admin review message; when `skip_first_review` is set
    /// and the project is still under review, move it on to
    /// `WAITING_FOR_QUOTE` in the same transaction.
    pub async fn send_review_message(
        pool: &PgPool,
        project_id: DbId,
        body: &str,
        skip_first_review: bool,
        requires_file_upload: bool,
    ) -> Result<(ProjectMessage, ProjectStatus), DbError> {
        let mut tx = pool.begin().await?;

        let status = lock_project_status(&mut tx, project_id).await?;

        let message_query = format!(
            "INSERT INTO project_messages (project_id, sender_role, body, requires_file_upload)
             VALUES ($1, $2, $3, $4)
             RETURNING {MESSAGE_COLUMNS}"
        );
        let message = sqlx::query_as::<_, ProjectMessage>(&message_query)
            .bind(project_id)
            .bind(SenderRole::Admin.as_str())
            .bind(body)
            .bind(requires_file_upload)
            .fetch_one(&mut *tx)
            .await?;

        let final_status = if skip_first_review && status == ProjectStatus::UnderReview {
            let next = ProjectStatus::WaitingForQuote;
            update_status_in_tx(&mut tx, project_id, next).await?;
            next
        } else {
            status
        };

        tx.commit().await?;
        Ok((message, final_status))
    }

    /// Apply the initial ACCEPT/REJECT review decision.
    pub async fn apply_admin_decision(
        pool: &PgPool,
        project_id: DbId,
        decision: AdminDecision,
    ) -> Result<Project, DbError> {
        let mut tx = pool.begin().await?;

        let status = lock_project_status(&mut tx, project_id).await?;
        let next = decision.resolve(status)?;
        update_status_in_tx(&mut tx, project_id, next).await?;

        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        let project = sqlx::query_as::<_, Project>(&query)
            .bind(project_id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(project)
    }

    /// Turn a reviewed project into a quoted one, atomically:
    /// technical metrics and quote land on the project, a product row is
    /// created pointing back at it, and the product gets its first
    /// price-history row. If any write fails, none take effect.
    ///
    /// Two concurrent finalizations serialize on the row lock; the
    /// loser fails the status recheck (and would trip the unique index
    /// on `products.source_project_id` regardless).
    pub async fn finalize_quote(
        pool: &PgPool,
        project_id: DbId,
        input: &QuoteInput,
    ) -> Result<(Project, Product), DbError> {
        let mut tx = pool.begin().await?;

        let status = lock_project_status(&mut tx, project_id).await?;
        if !status.accepts_quote() {
            return Err(CoreError::StateConflict {
                entity: "project",
                current: status.as_str().to_string(),
            }
            .into());
        }
        if input.quote_price_cents <= 0 {
            return Err(CoreError::Validation(
                "quote price must be positive".to_string(),
            )
            .into());
        }

        let project_query = format!(
            "UPDATE projects SET
                volume_cm3 = $2,
                print_time_min = $3,
                estimated_material_g = $4,
                final_quote_price_cents = $5,
                quoted_at = NOW(),
                status = $6,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let project = sqlx::query_as::<_, Project>(&project_query)
            .bind(project_id)
            .bind(input.volume_cm3)
            .bind(input.print_time_min)
            .bind(input.estimated_material_g)
            .bind(input.quote_price_cents)
            .bind(ProjectStatus::QuotedAwaitingCustomer.as_str())
            .fetch_one(&mut *tx)
            .await?;

        let product_query = format!(
            "INSERT INTO products (user_id, category_id, source_project_id, name, description,
                                   material_type, weight_g, print_time_min, shop_visible)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {PRODUCT_COLUMNS}"
        );
        let product = sqlx::query_as::<_, Product>(&product_query)
            .bind(project.user_id)
            .bind(input.category_id)
            .bind(project.id)
            .bind(input.product_name.as_deref().unwrap_or(&project.name))
            .bind(
                input
                    .product_description
                    .as_deref()
                    .unwrap_or(&project.description),
            )
            .bind(&project.material_type)
            .bind(input.estimated_material_g)
            .bind(input.print_time_min)
            .bind(input.shop_visible)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query("INSERT INTO product_prices (product_id, price_cents) VALUES ($1, $2)")
            .bind(product.id)
            .bind(input.quote_price_cents)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok((project, product))
    }

    /// Delete a project while it is still in a cancellable status.
    ///
    /// Removes the project row and, via cascade, its file rows.
    /// Returns the stored file paths so the caller can attempt
    /// best-effort physical deletion after the transaction committed.
    pub async fn delete_cancellable(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<String>, DbError> {
        let mut tx = pool.begin().await?;

        let status = lock_project_status(&mut tx, project_id).await?;
        if !status.is_cancellable() {
            return Err(CoreError::StateConflict {
                entity: "project",
                current: status.as_str().to_string(),
            }
            .into());
        }

        let paths: Vec<(String,)> = sqlx::query_as(
            "SELECT storage_path FROM project_files WHERE project_id = $1 ORDER BY position",
        )
        .bind(project_id)
        .fetch_all(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(project_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(paths.into_iter().map(|(path,)| path).collect())
    }

    /// Administrative close-out once the order side is done.
    pub async fn complete(pool: &PgPool, project_id: DbId) -> Result<Project, DbError> {
        let mut tx = pool.begin().await?;

        let status = lock_project_status(&mut tx, project_id).await?;
        if !matches!(
            status,
            ProjectStatus::OrderStarted | ProjectStatus::OrderFinalized
        ) {
            return Err(CoreError::StateConflict {
                entity: "project",
                current: status.as_str().to_string(),
            }
            .into());
        }
        update_status_in_tx(&mut tx, project_id, ProjectStatus::ProjectCompleted).await?;

        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        let project = sqlx::query_as::<_, Project>(&query)
            .bind(project_id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(project)
    }
}

/// Lock a project row and return its current status, or `NotFound`.
pub(crate) async fn lock_project_status(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    project_id: DbId,
) -> Result<ProjectStatus, DbError> {
    let row: Option<(String,)> =
        sqlx::query_as("SELECT status FROM projects WHERE id = $1 FOR UPDATE")
            .bind(project_id)
            .fetch_optional(&mut **tx)
            .await?;
    let (status,) = row.ok_or(CoreError::NotFound {
        entity: "project",
        id: project_id,
    })?;
    Ok(ProjectStatus::try_from(status)?)
}

pub(crate) async fn update_status_in_tx(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    project_id: DbId,
    status: ProjectStatus,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE projects SET status = $2, updated_at = NOW() WHERE id = $1")
        .bind(project_id)
        .bind(status.as_str())
        .execute(&mut **tx)
        .await?;
    Ok(())
}
