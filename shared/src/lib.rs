//! Shared types for the reservation service
//!
//! Common types used by both the server and API clients: domain models,
//! error codes, response structures, and utility types.

pub mod client;
pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
