use std::sync::Arc;

use sqlx::SqlitePool;

use crate::auth::JwtService;
use crate::core::Config;
use crate::db::DbService;

/// Server state - shared handles for every request handler
///
/// Cloning is shallow: the pool and JWT service are reference-counted.
/// All mutable state lives in the database; nothing is shared in-process
/// across requests, so the booking guarantees come entirely from store
/// transactions.
#[derive(Clone, Debug)]
pub struct ServerState {
    /// Server configuration
    pub config: Config,
    /// SQLite connection pool
    pub pool: SqlitePool,
    /// JWT auth service
    pub jwt_service: Arc<JwtService>,
}

impl ServerState {
    /// Create server state from already-initialized parts
    ///
    /// Most callers should use [`ServerState::initialize`] instead.
    pub fn new(config: Config, pool: SqlitePool, jwt_service: Arc<JwtService>) -> Self {
        Self {
            config,
            pool,
            jwt_service,
        }
    }

    /// Initialize server state
    ///
    /// Creates the work directory layout, opens the database (running
    /// migrations) and sets up the JWT service.
    ///
    /// # Panics
    ///
    /// Panics when the database cannot be opened; the process is useless
    /// without its store.
    pub async fn initialize(config: &Config) -> Self {
        config
            .ensure_work_dir_structure()
            .expect("Failed to create work directory structure");

        let db_path = config.database_dir().join("reserve.db");
        let db_path_str = db_path.to_string_lossy();

        let db_service = DbService::new(&db_path_str)
            .await
            .expect("Failed to initialize database");

        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));

        Self::new(config.clone(), db_service.pool, jwt_service)
    }

    /// Get the JWT service
    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }
}
