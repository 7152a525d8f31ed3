//! Handlers for the customer-facing `/projects` resource.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use printforge_core::error::CoreError;
use printforge_core::status::{OrderType, SenderRole};
use printforge_core::types::DbId;
use printforge_core::upload;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use printforge_db::models::message::{CreateMessage, ProjectMessage};
use printforge_db::models::project::{CreateProject, Project};
use printforge_db::models::project_file::{NewProjectFile, ProjectFile};
use printforge_db::repositories::{ConfigRepo, FileRepo, MessageRepo, ProjectRepo};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Serialize)]
pub struct SubmitResponse {
    pub project: Project,
    pub files: Vec<ProjectFile>,
}

#[derive(Serialize)]
pub struct ProjectDetail {
    pub project: Project,
    pub files: Vec<ProjectFile>,
    pub messages: Vec<ProjectMessage>,
}

#[derive(Deserialize)]
pub struct UserQuery {
    pub user_id: DbId,
}

/// One upload that passed validation, with its bytes still in hand.
struct PendingUpload {
    file: NewProjectFile,
    bytes: Vec<u8>,
}

/// POST /api/v1/projects
///
/// Multipart submission: text fields describe the project, repeated
/// `files` fields carry the uploads. Validation and the quota check
/// happen before anything is written; the project and its file rows
/// are inserted in one transaction after the physical saves succeed.
pub async fn submit(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<SubmitResponse>)> {
    let mut user_id: Option<DbId> = None;
    let mut name = String::new();
    let mut description = String::new();
    let mut requested_quantity: i32 = 1;
    let mut material_type: Option<String> = None;
    let mut special_processing = false;
    let mut uploads: Vec<(String, Vec<u8>)> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("malformed multipart body: {e}")))?
    {
        let field_name = field.name().unwrap_or_default().to_string();
        match field_name.as_str() {
            "files" => {
                let original_name = field
                    .file_name()
                    .unwrap_or_default()
                    .to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("failed to read upload: {e}")))?;
                if original_name.is_empty() && bytes.is_empty() {
                    continue;
                }
                uploads.push((original_name, bytes.to_vec()));
            }
            "user_id" => {
                let text = field_text(field).await?;
                user_id = Some(text.trim().parse().map_err(|_| {
                    AppError::BadRequest(format!("user_id is not a number: '{text}'"))
                })?);
            }
            "name" => name = field_text(field).await?,
            "description" => description = field_text(field).await?,
            "quantity" => {
                let text = field_text(field).await?;
                requested_quantity = text.trim().parse().map_err(|_| {
                    AppError::BadRequest(format!("quantity is not a number: '{text}'"))
                })?;
            }
            "material_type" => {
                let text = field_text(field).await?;
                if !text.trim().is_empty() {
                    material_type = Some(text.trim().to_string());
                }
            }
            "special_processing" => {
                let text = field_text(field).await?;
                special_processing = matches!(text.trim(), "true" | "on" | "1");
            }
            _ => {}
        }
    }

    let user_id =
        user_id.ok_or_else(|| AppError::BadRequest("user_id field is required".to_string()))?;
    if name.trim().is_empty() || description.trim().is_empty() {
        return Err(CoreError::Validation(
            "please fill in the project name and description".to_string(),
        )
        .into());
    }
    if uploads.is_empty() {
        return Err(CoreError::Validation(
            "please attach at least one file".to_string(),
        )
        .into());
    }
    if requested_quantity < 1 {
        return Err(CoreError::Validation(
            "quantity must be at least 1".to_string(),
        )
        .into());
    }

    let quota = ConfigRepo::project_quota(&state.pool).await?;
    let counts = ProjectRepo::counts_for_user(&state.pool, user_id).await?;
    quota.check_submission(counts)?;

    // Validate every upload before saving any of them.
    let pending = validate_uploads(user_id, uploads)?;

    // Physical save first: an orphaned file on disk is garbage, a DB
    // row without a backing file is corruption.
    for upload in &pending {
        state
            .files
            .save(&upload.file.storage_path, &upload.bytes)
            .await
            .map_err(|e| AppError::InternalError(format!("failed to store upload: {e}")))?;
    }

    let files: Vec<NewProjectFile> = pending.iter().map(|u| u.file.clone()).collect();
    let input = CreateProject {
        user_id,
        name: name.trim().to_string(),
        description: description.trim().to_string(),
        requested_quantity,
        order_type: OrderType::from_flags(special_processing),
        material_type,
    };

    let created = ProjectRepo::create_with_files(&state.pool, &input, &files).await;
    let (project, file_rows) = match created {
        Ok(result) => result,
        Err(err) => {
            // Roll the physical saves back so a failed submission
            // leaves nothing behind.
            for upload in &pending {
                if let Err(cleanup_err) = state.files.delete(&upload.file.storage_path).await {
                    tracing::warn!(
                        path = %upload.file.storage_path,
                        error = %cleanup_err,
                        "Failed to clean up upload after aborted submission"
                    );
                }
            }
            return Err(err.into());
        }
    };

    Ok((
        StatusCode::CREATED,
        Json(SubmitResponse {
            project,
            files: file_rows,
        }),
    ))
}

/// GET /api/v1/projects?user_id=
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> AppResult<Json<Vec<Project>>> {
    let projects = ProjectRepo::list_for_user(&state.pool, query.user_id).await?;
    Ok(Json(projects))
}

/// GET /api/v1/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ProjectDetail>> {
    let project = ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "project",
            id,
        }))?;
    let files = FileRepo::list_for_project(&state.pool, id).await?;
    let messages = MessageRepo::list_for_project(&state.pool, id).await?;
    Ok(Json(ProjectDetail {
        project,
        files,
        messages,
    }))
}

#[derive(Serialize)]
pub struct DeleteResponse {
    pub deleted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// DELETE /api/v1/projects/{id}
///
/// Status-gated: only cancellable projects may be deleted. The
/// database rows go first; physical file removal afterwards is best
/// effort and a failure there is reported as a warning, not an error.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DeleteResponse>> {
    let paths = ProjectRepo::delete_cancellable(&state.pool, id).await?;

    let mut failed = Vec::new();
    for path in &paths {
        if let Err(err) = state.files.delete(path).await {
            tracing::warn!(path = %path, error = %err, "Physical file deletion failed");
            failed.push(path.clone());
        }
    }

    let warning = if failed.is_empty() {
        None
    } else {
        Some(format!(
            "project deleted, but {} stored file(s) could not be removed",
            failed.len()
        ))
    };
    Ok(Json(DeleteResponse {
        deleted: true,
        warning,
    }))
}

#[derive(Deserialize)]
pub struct CustomerMessage {
    pub body: String,
}

/// POST /api/v1/projects/{id}/messages
///
/// Customer side of the chat log. Messages land unread for the admin.
pub async fn post_message(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<CustomerMessage>,
) -> AppResult<(StatusCode, Json<ProjectMessage>)> {
    if input.body.trim().is_empty() {
        return Err(CoreError::Validation("message must not be empty".to_string()).into());
    }
    ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "project",
            id,
        }))?;
    let message = MessageRepo::create(
        &state.pool,
        id,
        &CreateMessage {
            sender_role: SenderRole::User,
            body: input.body,
            requires_file_upload: false,
        },
    )
    .await?;
    Ok((StatusCode::CREATED, Json(message)))
}

/// GET /api/v1/projects/{id}/messages
pub async fn list_messages(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vec<ProjectMessage>>> {
    let messages = MessageRepo::list_for_project(&state.pool, id).await?;
    Ok(Json(messages))
}

#[derive(Serialize)]
pub struct ChatUploadResponse {
    pub files: Vec<ProjectFile>,
    pub required_files_provided: bool,
}

/// POST /api/v1/projects/{id}/messages/files
///
/// Customer supplies files an admin message asked for. The uploads go
/// through the same validation as the initial submission and continue
/// the project's file position sequence. A `message_id` field flags
/// that message as satisfied.
pub async fn upload_chat_files(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<ChatUploadResponse>)> {
    let project = ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "project",
            id,
        }))?;

    let mut message_id: Option<DbId> = None;
    let mut uploads: Vec<(String, Vec<u8>)> = Vec::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("malformed multipart body: {e}")))?
    {
        match field.name().unwrap_or_default() {
            "files" => {
                let original_name = field.file_name().unwrap_or_default().to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("failed to read upload: {e}")))?;
                if original_name.is_empty() && bytes.is_empty() {
                    continue;
                }
                uploads.push((original_name, bytes.to_vec()));
            }
            "message_id" => {
                let text = field_text(field).await?;
                message_id = Some(text.trim().parse().map_err(|_| {
                    AppError::BadRequest(format!("message_id is not a number: '{text}'"))
                })?);
            }
            _ => {}
        }
    }

    if uploads.is_empty() {
        return Err(CoreError::Validation(
            "please attach at least one file".to_string(),
        )
        .into());
    }

    let pending = validate_uploads(project.user_id, uploads)?;
    for upload in &pending {
        state
            .files
            .save(&upload.file.storage_path, &upload.bytes)
            .await
            .map_err(|e| AppError::InternalError(format!("failed to store upload: {e}")))?;
    }

    let files: Vec<NewProjectFile> = pending.iter().map(|u| u.file.clone()).collect();
    let file_rows = FileRepo::append_files(&state.pool, id, project.user_id, &files).await?;

    let required_files_provided = match message_id {
        Some(message_id) => {
            MessageRepo::mark_required_files_provided(&state.pool, message_id).await?
        }
        None => false,
    };

    Ok((
        StatusCode::CREATED,
        Json(ChatUploadResponse {
            files: file_rows,
            required_files_provided,
        }),
    ))
}

/// GET /api/v1/projects/files/{file_id}
///
/// Stream a stored file back, e.g. for the admin's slicer.
pub async fn download_file(
    State(state): State<AppState>,
    Path(file_id): Path<DbId>,
) -> AppResult<impl axum::response::IntoResponse> {
    let file = FileRepo::find_by_id(&state.pool, file_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "project file",
            id: file_id,
        }))?;
    let bytes = state
        .files
        .read(&file.storage_path)
        .await
        .map_err(|e| AppError::InternalError(format!("failed to read stored file: {e}")))?;

    let headers = [
        (
            axum::http::header::CONTENT_TYPE,
            "application/octet-stream".to_string(),
        ),
        (
            axum::http::header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", file.original_name),
        ),
    ];
    Ok((headers, bytes))
}

/// Run every upload through sniffing and filename resolution, assigning
/// storage paths. Nothing is saved here.
fn validate_uploads(
    user_id: DbId,
    uploads: Vec<(String, Vec<u8>)>,
) -> Result<Vec<PendingUpload>, AppError> {
    let mut pending = Vec::with_capacity(uploads.len());
    for (original_name, bytes) in uploads {
        let header = &bytes[..bytes.len().min(upload::SNIFF_HEADER_LEN)];
        let detected = upload::detect_extension(header, bytes.len() as u64);
        let resolved_name = upload::resolve_upload_filename(&original_name, detected)?;

        let extension = resolved_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();
        let stored_name = format!("{}.{extension}", Uuid::new_v4());
        let storage_path = format!("projects/{user_id}/{stored_name}");

        pending.push(PendingUpload {
            file: NewProjectFile {
                original_name: resolved_name,
                stored_name,
                storage_path,
                size_kb: bytes.len().div_ceil(1024) as i64,
            },
            bytes,
        });
    }
    Ok(pending)
}

async fn field_text(field: axum::extract::multipart::Field<'_>) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::BadRequest(format!("malformed multipart field: {e}")))
}
