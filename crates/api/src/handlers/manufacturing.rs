//! Handlers for the manufacturing path: blueprints and production jobs.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use printforge_core::bom::BomDocument;
use printforge_core::error::CoreError;
use printforge_core::status::{BlueprintStatus, JobStatus};
use printforge_core::types::DbId;
use serde::{Deserialize, Serialize};

use printforge_db::models::blueprint::Blueprint;
use printforge_db::models::production_job::ProductionJob;
use printforge_db::repositories::{BlueprintRepo, ProductionJobRepo, ProjectRepo};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Serialize)]
pub struct LoadResponse {
    pub blueprint: Blueprint,
    pub created: bool,
}

/// POST /api/v1/admin/projects/{id}/manufacturing
///
/// Load a project into manufacturing. Idempotent: a second call
/// reports the existing blueprint instead of erroring.
pub async fn load_to_manufacturing(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<(StatusCode, Json<LoadResponse>)> {
    ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "project",
            id,
        }))?;
    let (blueprint, created) = BlueprintRepo::load(&state.pool, id).await?;
    let status = if created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(LoadResponse { blueprint, created })))
}

/// PUT /api/v1/admin/projects/{id}/bom
///
/// Store the finalized BOM document for a project's blueprint. The
/// body must parse as a BOM; it lands in the file store and the
/// blueprint advances to `BOM_FINISHED`.
pub async fn store_bom(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    body: String,
) -> AppResult<Json<Blueprint>> {
    // Reject garbage before writing anything.
    BomDocument::from_json(&body)?;

    BlueprintRepo::find_by_project(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "blueprint",
            id,
        }))?;

    let bom_path = bom_path_for(id);
    state
        .files
        .save(&bom_path, body.as_bytes())
        .await
        .map_err(|e| AppError::InternalError(format!("failed to store BOM: {e}")))?;

    let blueprint = BlueprintRepo::finalize_bom(&state.pool, id, &bom_path).await?;
    Ok(Json(blueprint))
}

#[derive(Serialize)]
pub struct ExpansionResponse {
    pub job_count: usize,
    pub jobs: Vec<ProductionJob>,
}

/// POST /api/v1/admin/projects/{id}/production-jobs
///
/// Expand the project's finalized BOM into production jobs: every
/// in-house printable part contributes one row per unit of quantity.
pub async fn expand_bom(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<(StatusCode, Json<ExpansionResponse>)> {
    let blueprint = BlueprintRepo::find_by_project(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "blueprint",
            id,
        }))?;

    // Prefer the recorded path; fall back to the conventional location
    // for BOMs dropped into the store out of band.
    let bom_path = match blueprint.bom_path {
        Some(path) => path,
        None => {
            let candidate = bom_path_for(id);
            if !state.files.exists(&candidate).await {
                return Err(CoreError::Validation(format!(
                    "no BOM document found for project {id}"
                ))
                .into());
            }
            BlueprintRepo::finalize_bom(&state.pool, id, &candidate).await?;
            candidate
        }
    };

    let raw = state
        .files
        .read(&bom_path)
        .await
        .map_err(|e| AppError::InternalError(format!("failed to read BOM: {e}")))?;
    let raw = String::from_utf8(raw)
        .map_err(|_| CoreError::Validation("BOM document is not valid UTF-8".to_string()))?;
    let bom = BomDocument::from_json(&raw)?;

    let planned = bom.plan_jobs();
    if planned.is_empty() {
        return Err(CoreError::Validation(
            "BOM contains no in-house printable parts".to_string(),
        )
        .into());
    }

    let jobs = ProductionJobRepo::insert_jobs(&state.pool, id, &planned).await?;
    Ok((
        StatusCode::CREATED,
        Json(ExpansionResponse {
            job_count: jobs.len(),
            jobs,
        }),
    ))
}

/// GET /api/v1/admin/projects/{id}/production-jobs
pub async fn list_project_jobs(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vec<ProductionJob>>> {
    let jobs = ProductionJobRepo::list_for_project(&state.pool, id).await?;
    Ok(Json(jobs))
}

#[derive(Deserialize)]
pub struct BlueprintStatusInput {
    pub status: BlueprintStatus,
}

/// PUT /api/v1/admin/projects/{id}/manufacturing/status
///
/// Manual blueprint status control, e.g. marking a blueprint
/// `COMPLETED` once all of its jobs are off the printers.
pub async fn update_blueprint_status(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<BlueprintStatusInput>,
) -> AppResult<Json<Blueprint>> {
    let blueprint = BlueprintRepo::update_status(&state.pool, id, input.status).await?;
    Ok(Json(blueprint))
}

/// GET /api/v1/admin/blueprints
pub async fn list_blueprints(State(state): State<AppState>) -> AppResult<Json<Vec<Blueprint>>> {
    let blueprints = BlueprintRepo::list(&state.pool).await?;
    Ok(Json(blueprints))
}

/// DELETE /api/v1/admin/projects/{id}/manufacturing
pub async fn delete_blueprint(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = BlueprintRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "blueprint",
            id,
        }))
    }
}

#[derive(Deserialize)]
pub struct JobQuery {
    pub status: Option<JobStatus>,
}

/// GET /api/v1/admin/production-jobs?status=
pub async fn list_jobs(
    State(state): State<AppState>,
    Query(query): Query<JobQuery>,
) -> AppResult<Json<Vec<ProductionJob>>> {
    let jobs = ProductionJobRepo::list_by_status(
        &state.pool,
        query.status.unwrap_or(JobStatus::Queued),
    )
    .await?;
    Ok(Json(jobs))
}

#[derive(Deserialize)]
pub struct JobStatusInput {
    pub status: JobStatus,
}

/// PUT /api/v1/admin/production-jobs/{id}/status
pub async fn update_job_status(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<JobStatusInput>,
) -> AppResult<Json<ProductionJob>> {
    let job = ProductionJobRepo::update_status(&state.pool, id, input.status)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "production job",
            id,
        }))?;
    Ok(Json(job))
}

#[derive(Deserialize)]
pub struct AssignPrinterInput {
    pub printer: String,
}

/// PUT /api/v1/admin/production-jobs/{id}/printer
pub async fn assign_printer(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<AssignPrinterInput>,
) -> AppResult<Json<ProductionJob>> {
    let job = ProductionJobRepo::assign_printer(&state.pool, id, &input.printer)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "production job",
            id,
        }))?;
    Ok(Json(job))
}

fn bom_path_for(project_id: DbId) -> String {
    format!("bom/BOM_{project_id}.json")
}
