//! API route modules
//!
//! # Structure
//!
//! - [`health`] - health check
//! - [`auth`] - registration, login, current user
//! - [`slots`] - slot search and staff slot creation
//! - [`reservations`] - booking, history, cancellation
//! - [`reviews`] - public feed and submission
//! - [`reports`] - staff usage counts

pub mod auth;
pub mod health;
pub mod reports;
pub mod reservations;
pub mod reviews;
pub mod slots;

// Re-export common types for handlers
pub use crate::utils::{ApiResponse, AppResult};
