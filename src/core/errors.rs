use thiserror::Error;

use crate::core::validation::ValidationErrors;
use crate::domain::EntityId;

/// Failures raised by an entity store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Error type for session and service operations.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Expense not found: {0}")]
    ExpenseNotFound(EntityId),
    #[error("Category not found: {0}")]
    CategoryNotFound(EntityId),
    #[error("Preset not found: {0}")]
    PresetNotFound(EntityId),
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type CoreResult<T> = Result<T, CoreError>;
