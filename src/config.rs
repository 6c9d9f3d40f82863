//! Service configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`), with sensible defaults for local
//! development.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;

/// Top-level service configuration.
///
/// Loaded once at startup via [`AppConfig::from_env`]. Initialization
/// order downstream is fixed: config → database pool → photo store →
/// repository → service → router.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Socket address to bind the HTTP server to (e.g. `0.0.0.0:3000`).
    pub listen_addr: SocketAddr,

    /// SQLite connection string.
    pub database_url: String,

    /// Maximum number of database connections in the pool.
    pub database_max_connections: u32,

    /// Timeout in seconds for acquiring a database connection.
    pub database_acquire_timeout_secs: u64,

    /// SQLite busy timeout in seconds before a contended call fails.
    pub database_busy_timeout_secs: u64,

    /// Directory that receives stored photos.
    pub upload_dir: PathBuf,

    /// Base address composed into outward-facing `photo_url` values.
    pub public_base_url: String,

    /// Maximum accepted request body size in bytes.
    pub max_upload_bytes: usize,

    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl AppConfig {
    /// Loads configuration from environment variables.
    ///
    /// Falls back to sensible defaults when a variable is not set.
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns an error if `LISTEN_ADDR` is set but cannot be parsed as
    /// a [`SocketAddr`].
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let listen_addr: SocketAddr = std::env::var("LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:3000".to_string())
            .parse()
            .context("LISTEN_ADDR is not a valid socket address")?;

        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://adventure_log.db".to_string());

        let upload_dir = std::env::var("UPLOAD_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("uploads/snapshots"));

        let public_base_url = std::env::var("PUBLIC_BASE_URL")
            .unwrap_or_else(|_| format!("http://{listen_addr}"));

        Ok(Self {
            listen_addr,
            database_url,
            database_max_connections: parse_env("DATABASE_MAX_CONNECTIONS", 5),
            database_acquire_timeout_secs: parse_env("DATABASE_ACQUIRE_TIMEOUT_SECS", 5),
            database_busy_timeout_secs: parse_env("DATABASE_BUSY_TIMEOUT_SECS", 5),
            upload_dir,
            public_base_url,
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", 10 * 1024 * 1024),
            request_timeout_secs: parse_env("REQUEST_TIMEOUT_SECS", 30),
        })
    }
}

/// Parses an environment variable as `T`, returning `default` on missing
/// or invalid values.
fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
