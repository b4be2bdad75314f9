// ==========================================
// Safety Operations Platform - Repository error types
// ==========================================

use thiserror::Error;

/// Data-access error type
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("database connection failed: {0}")]
    ConnectionError(String),

    #[error("database query failed: {0}")]
    QueryError(String),

    #[error("database lock acquisition failed: {0}")]
    LockError(String),

    #[error("internal error: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<rusqlite::Error> for RepositoryError {
    fn from(err: rusqlite::Error) -> Self {
        RepositoryError::QueryError(err.to_string())
    }
}

/// Result alias for the repository layer
pub type RepositoryResult<T> = Result<T, RepositoryError>;
