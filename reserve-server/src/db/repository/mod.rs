//! Repository Module
//!
//! CRUD and transaction logic over the SQLite store. Repositories are
//! plain async functions taking `&SqlitePool`; multi-step mutations run
//! inside IMMEDIATE transactions (see `reservation`).

pub mod report;
pub mod reservation;
pub mod review;
pub mod slot;
pub mod user;

use shared::{AppError, ErrorCode};
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("duplicate: {0}")]
    Duplicate(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("store busy: {0}")]
    Busy(String),

    #[error("database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db) => {
                if db.is_unique_violation() {
                    RepoError::Duplicate(err.to_string())
                } else if db.is_foreign_key_violation() {
                    RepoError::Validation(err.to_string())
                } else if is_busy(db.as_ref()) {
                    RepoError::Busy(err.to_string())
                } else {
                    RepoError::Database(err.to_string())
                }
            }
            sqlx::Error::PoolTimedOut => RepoError::Busy(err.to_string()),
            _ => RepoError::Database(err.to_string()),
        }
    }
}

/// SQLITE_BUSY and friends (locked, busy-recovery, busy-snapshot): the
/// busy_timeout elapsed or the snapshot went stale while another writer
/// held the lock. Retryable by the caller.
fn is_busy(db: &dyn sqlx::error::DatabaseError) -> bool {
    matches!(
        db.code().as_deref(),
        Some("5") | Some("6") | Some("261") | Some("517")
    ) || db.message().contains("database is locked")
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::with_message(ErrorCode::NotFound, msg),
            RepoError::Duplicate(msg) => AppError::with_message(ErrorCode::AlreadyExists, msg),
            RepoError::Validation(msg) => AppError::validation(msg),
            RepoError::Busy(msg) => AppError::busy(msg),
            RepoError::Database(msg) => AppError::database(msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;
