use super::models::EntityKind;
use super::validation::ValidationError;
use thiserror::Error;

/// Errors produced by catalog store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{kind} with id '{id}' not found")]
    NotFound { kind: EntityKind, id: String },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A referential guard refused the operation; nothing was written.
    #[error("{0}")]
    Conflict(String),

    /// Data that should line up across collections did not.
    #[error("Internal consistency error: {0}")]
    InternalConsistency(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StoreError {
    pub fn not_found(kind: EntityKind, id: impl ToString) -> Self {
        StoreError::NotFound {
            kind,
            id: id.to_string(),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
