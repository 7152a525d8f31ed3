use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use printforge_core::error::CoreError;
use printforge_db::DbError;
use serde_json::json;

/// Error type returned by every HTTP handler.
///
/// Domain failures arrive as [`CoreError`], persistence failures as
/// [`sqlx::Error`]; the remaining variants cover request parsing and
/// storage I/O. All of them render as `{"error": ..., "code": ...}`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Malformed request input outside the domain layer, e.g. a broken
    /// multipart body or a non-numeric form field.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// A server-side failure whose detail must not leak to the client.
    #[error("internal error: {0}")]
    InternalError(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl From<DbError> for AppError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::Core(core) => AppError::Core(core),
            DbError::Sqlx(sqlx) => AppError::Database(sqlx),
        }
    }
}

impl AppError {
    fn status_code_and_message(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::Core(CoreError::NotFound { entity, id }) => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                format!("{entity} with id {id} not found"),
            ),
            AppError::Core(CoreError::Validation(msg)) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
            AppError::Core(CoreError::QuotaExceeded(msg)) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "QUOTA_EXCEEDED",
                msg.clone(),
            ),
            AppError::Core(CoreError::StateConflict { entity, current }) => (
                StatusCode::CONFLICT,
                "STATE_CONFLICT",
                format!("{entity} is currently '{current}'"),
            ),
            AppError::Core(CoreError::Internal(msg)) => {
                tracing::error!(error = %msg, "internal domain error");
                internal()
            }
            AppError::Database(err) => classify_sqlx_error(err),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "internal error");
                internal()
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.status_code_and_message();
        let body = json!({
            "error": message,
            "code": code,
        });
        (status, axum::Json(body)).into_response()
    }
}

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "an internal error occurred".to_string(),
    )
}

/// Map persistence failures onto HTTP semantics.
///
/// `RowNotFound` becomes a 404. Unique violations on `uq_` constraints
/// (duplicate user email, double product link for a project) and
/// foreign key violations (referencing a deleted row) both surface as
/// 409 instead of a blind 500.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) => {
            let constraint = db_err.constraint().unwrap_or("unknown");
            match db_err.code().as_deref() {
                // 23505: unique_violation
                Some("23505") if constraint.starts_with("uq_") => (
                    StatusCode::CONFLICT,
                    "CONFLICT",
                    format!("duplicate value violates unique constraint: {constraint}"),
                ),
                // 23503: foreign_key_violation
                Some("23503") => (
                    StatusCode::CONFLICT,
                    "CONFLICT",
                    format!("operation violates reference constraint: {constraint}"),
                ),
                _ => {
                    tracing::error!(error = %db_err, "database error");
                    internal()
                }
            }
        }
        other => {
            tracing::error!(error = %other, "database error");
            internal()
        }
    }
}
