//! Error type for repository operations.

use printforge_core::error::CoreError;

/// Failure of a repository operation: either a domain rule rejected it
/// or the store itself failed. Transactional methods roll back on both.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}
