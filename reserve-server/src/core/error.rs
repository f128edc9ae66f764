//! Server startup errors

use thiserror::Error;

/// Errors surfaced while starting or running the server process.
/// Request-level failures use `shared::AppError` and never reach here.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, ServerError>;
