use std::sync::Arc;

use crate::storage::FileStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: printforge_db::DbPool,
    /// Storage for uploaded files and BOM documents.
    pub files: Arc<dyn FileStore>,
}
