// ==========================================
// Safety Operations Platform - API layer error types
// ==========================================
// Translates pipeline and repository errors into the messages the
// request boundary returns to callers.
// ==========================================

use crate::importer::ImportError;
use crate::repository::RepositoryError;
use thiserror::Error;

/// API layer error type
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("import failed: {0}")]
    ImportError(#[from] ImportError),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("database error: {0}")]
    DatabaseError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        ApiError::DatabaseError(err.to_string())
    }
}

/// Result alias for the API layer
pub type ApiResult<T> = Result<T, ApiError>;
