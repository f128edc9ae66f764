//! Reserve Server - restaurant table-reservation service
//!
//! # Architecture
//!
//! - **Database** (`db`): embedded SQLite via sqlx, WAL mode
//! - **Auth** (`auth`): JWT + Argon2 credential checking
//! - **HTTP API** (`api`): RESTful routes for slots, reservations,
//!   reviews and staff reports
//! - **Reservation ledger** (`db::repository::reservation`): the state
//!   machine binding slots to reservations under store transactions
//!
//! # Module structure
//!
//! ```text
//! reserve-server/src/
//! ├── core/          # config, state, server
//! ├── auth/          # JWT auth, role gate, password hashing
//! ├── api/           # HTTP routes and handlers
//! ├── db/            # database layer (pool + repositories)
//! └── utils/         # logging, time and validation helpers
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod utils;

// Re-export public types
pub use crate::auth::{CurrentUser, JwtService};
pub use crate::core::{Config, Server, ServerState};
pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro - structured tracing events for auth decisions
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// Set up process environment: dotenv and logging
pub fn setup_environment() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    init_logger();
    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
    ____
   / __ \___  ________  ______   _____
  / /_/ / _ \/ ___/ _ \/ ___/ | / / _ \
 / _, _/  __(__  )  __/ /   | |/ /  __/
/_/ |_|\___/____/\___/_/    |___/\___/
    "#
    );
}
