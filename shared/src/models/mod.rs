//! Data models
//!
//! Shared between the server and frontend (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY), all timestamps are
//! UTC milliseconds.

pub mod reservation;
pub mod review;
pub mod table_slot;
pub mod user;

// Re-exports
pub use reservation::*;
pub use review::*;
pub use table_slot::*;
pub use user::*;
