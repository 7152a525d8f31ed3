use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Quota exceeded: {0}")]
    QuotaExceeded(String),

    /// The operation is not legal for the entity's current status. The
    /// current status is carried so callers can report it.
    #[error("Operation not allowed: {entity} is currently '{current}'")]
    StateConflict {
        entity: &'static str,
        current: String,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
