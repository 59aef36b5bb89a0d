//! Repository Module
//!
//! Free-function CRUD over `SqlitePool`, one module per table. Repositories
//! return [`RepoError`]; handlers convert into [`AppError`] with `?`.

pub mod accommodation;
pub mod booking;
pub mod event;
pub mod menu_item;
pub mod room;
pub mod user;
pub mod vegan_business;
pub mod wishlist;

use shared::error::{AppError, ErrorCode};
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// Domain rule violation carrying its own error code
    #[error("{1}")]
    Business(ErrorCode, String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err
            && db_err.is_unique_violation()
        {
            return RepoError::Duplicate(db_err.message().to_string());
        }
        RepoError::Database(err.to_string())
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::with_message(ErrorCode::NotFound, msg),
            RepoError::Duplicate(msg) => AppError::with_message(ErrorCode::AlreadyExists, msg),
            RepoError::Validation(msg) => AppError::validation(msg),
            RepoError::Business(code, msg) => AppError::with_message(code, msg),
            RepoError::Database(msg) => {
                tracing::error!(error = %msg, "Repository database error");
                AppError::database(msg)
            }
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;


#[cfg(test)]
mod tests {
    use super::*;
    use shared::error::ErrorCode;

    #[test]
    fn repo_errors_map_to_app_errors() {
        let err: AppError = RepoError::NotFound("Room 3 not found".into()).into();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Room 3 not found");

        let err: AppError = RepoError::Duplicate("dup".into()).into();
        assert_eq!(err.code, ErrorCode::AlreadyExists);

        let err: AppError =
            RepoError::Business(ErrorCode::RoomUnavailable, "taken".into()).into();
        assert_eq!(err.code, ErrorCode::RoomUnavailable);
        assert_eq!(err.message, "taken");

        let err: AppError = RepoError::Database("disk I/O error".into()).into();
        assert_eq!(err.code, ErrorCode::DatabaseError);
    }
}
