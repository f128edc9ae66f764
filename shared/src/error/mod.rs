//! Unified error handling
//!
//! Error codes, categories, HTTP status mapping and the application
//! error / response types shared by the server and its clients.

mod category;
mod codes;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{ApiResponse, AppError, AppResult};
