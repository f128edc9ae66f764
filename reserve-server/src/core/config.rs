use std::path::PathBuf;

use crate::auth::JwtConfig;

/// Server configuration
///
/// Every item can be overridden through environment variables:
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | WORK_DIR | /var/lib/reserve | working directory (database, logs) |
/// | HTTP_PORT | 3000 | HTTP service port |
/// | ENVIRONMENT | development | development \| staging \| production |
/// | REQUEST_TIMEOUT_MS | 30000 | request timeout (millis) |
/// | CANCEL_WINDOW_MINUTES | 120 | minimum lead time to cancel a reservation |
/// | REPORTS_INCLUDE_CANCELLED | true | count cancelled reservations in reports |
/// | HISTORY_INCLUDE_CANCELLED | true | include cancelled entries in "my reservations" |
///
/// JWT settings come from `JwtConfig` (JWT_SECRET, JWT_EXPIRATION_MINUTES,
/// JWT_ISSUER, JWT_AUDIENCE).
#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory holding the database and log files
    pub work_dir: String,
    /// HTTP API port
    pub http_port: u16,
    /// JWT auth configuration
    pub jwt: JwtConfig,
    /// Runtime environment: development | staging | production
    pub environment: String,
    /// Request timeout (millis)
    pub request_timeout_ms: u64,

    // === Reservation policy ===
    /// Minimum lead time before slot time required to cancel (minutes)
    pub cancel_window_minutes: i64,
    /// Whether daily/weekly reports count cancelled reservations.
    /// Historic behavior counts every reservation row; flip this to
    /// restrict reports to active bookings only.
    pub reports_include_cancelled: bool,
    /// Whether `GET /api/reservations/me` includes cancelled entries
    pub history_include_cancelled: bool,
}

impl Config {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/reserve".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            jwt: JwtConfig::default(),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            request_timeout_ms: std::env::var("REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(30000),
            cancel_window_minutes: std::env::var("CANCEL_WINDOW_MINUTES")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(120),
            reports_include_cancelled: std::env::var("REPORTS_INCLUDE_CANCELLED")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            history_include_cancelled: std::env::var("HISTORY_INCLUDE_CANCELLED")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        }
    }

    /// Override work dir and port, commonly used in tests
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
    }

    /// Directory holding the SQLite database file
    pub fn database_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("database")
    }

    /// Directory holding log files
    pub fn log_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("logs")
    }

    /// Create the work directory layout if missing
    pub fn ensure_work_dir_structure(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(self.database_dir())?;
        std::fs::create_dir_all(self.log_dir())?;
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
