//! Route definitions for the customer `/projects` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::project;
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET    /                  -> list (by user)
/// POST   /                  -> submit (multipart)
/// GET    /{id}              -> get_by_id (project + files + messages)
/// DELETE /{id}              -> delete (status-gated)
/// GET    /{id}/messages        -> list_messages
/// POST   /{id}/messages        -> post_message (customer)
/// POST   /{id}/messages/files  -> upload_chat_files (multipart)
/// GET    /files/{file_id}      -> download_file
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(project::list).post(project::submit))
        .route("/files/{file_id}", get(project::download_file))
        .route("/{id}", get(project::get_by_id).delete(project::delete))
        .route(
            "/{id}/messages",
            get(project::list_messages).post(project::post_message),
        )
        .route("/{id}/messages/files", post(project::upload_chat_files))
}
