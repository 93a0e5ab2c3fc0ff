// src/config.rs

//! Application configuration loaded from environment variables.
//!
//! This module defines all startup-time configuration for the service.
//! Configuration is validated eagerly and failures are treated as
//! deployment errors rather than recoverable runtime conditions.

use anyhow::Result;
use std::path::PathBuf;
use std::time::Duration;

// ============================================================
// Local macros (config-only, intentionally explicit)
// ============================================================

/// Reads a required environment variable.
///
/// # Behavior
/// - Fails fast if the variable is missing
/// - Produces a clear, human-readable error message
/// - Intended for startup-time configuration validation
macro_rules! required_env {
    // ---
    ($key:literal) => {
        std::env::var($key)
            .map_err(|_| anyhow::anyhow!(concat!("Missing required configuration: ", $key)))?
    };
}

/// Reads an optional environment variable and attempts to parse it.
///
/// If the variable is missing or cannot be parsed, the provided
/// default value is used.
macro_rules! optional_env_parse {
    // ---
    ($key:literal, $ty:ty, $default:expr) => {
        std::env::var($key)
            .ok()
            .and_then(|v| v.parse::<$ty>().ok())
            .unwrap_or($default)
    };
}

#[cfg(test)]
/// Asserts that a configuration constructor fails due to a missing
/// required environment variable.
macro_rules! assert_missing_config {
    // ---
    ($expr:expr, $key:literal) => {{
        let err = $expr.expect_err("expected configuration error");
        assert!(
            err.to_string()
                .contains(concat!("Missing required configuration: ", $key)),
            "unexpected error: {err}"
        );
    }};
}

// ============================================================
// Public configuration facade
// ============================================================

/// Aggregated application configuration.
///
/// This is the single source of truth for startup configuration.
/// Tests build it field by field instead of going through the environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: server::ServerConfig,
    pub database: database::DatabaseConfig,
    pub session: session::SessionConfig,
    pub content: content::ContentConfig,
    pub metrics: MetricsKind,
}

impl AppConfig {
    /// Loads and validates all application configuration from the environment.
    ///
    /// # Errors
    /// Returns an error if any required configuration is missing or invalid.
    /// This function is intended to be called exactly once at startup.
    pub fn from_env() -> Result<Self> {
        // ---
        Ok(Self {
            server: server::ServerConfig::from_env(),
            database: database::DatabaseConfig::from_env(),
            session: session::SessionConfig::from_env()?,
            content: content::ContentConfig::from_env(),
            metrics: MetricsKind::from_env(),
        })
    }
}

/// Which metrics backend to install.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MetricsKind {
    // ---
    #[default]
    Noop,
    Prometheus,
}

impl MetricsKind {
    /// `GREEN_METRICS_TYPE=prom` selects Prometheus; anything else is no-op.
    pub fn from_env() -> Self {
        // ---
        match std::env::var("GREEN_METRICS_TYPE").as_deref() {
            Ok("prom") => MetricsKind::Prometheus,
            _ => MetricsKind::Noop,
        }
    }
}

// ============================================================
// Server configuration
// ============================================================

mod server {
    // ---

    /// Listener settings.
    #[derive(Debug, Clone)]
    pub struct ServerConfig {
        /// Socket address to bind. Defaults to `127.0.0.1:5000`.
        pub bind_addr: String,
    }

    impl ServerConfig {
        pub fn from_env() -> Self {
            // ---
            let bind_addr =
                std::env::var("API_BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:5000".to_string());

            Self { bind_addr }
        }
    }
}
pub use server::ServerConfig;

// ============================================================
// Database configuration
// ============================================================

mod database {
    // ---
    use super::*;

    /// Database-related configuration derived from environment variables.
    #[derive(Debug, Clone)]
    pub struct DatabaseConfig {
        /// SQLite connection string. Defaults to `sqlite://habits.db`.
        pub database_url: String,

        /// Number of attempts when initializing the database connection. Defaults to 5.
        pub retry_count: u32,

        /// Maximum time to wait when acquiring a connection from the pool. Defaults to 30 seconds.
        pub acquire_timeout: Duration,

        /// Maximum number of pooled connections. Defaults to 5.
        pub max_connections: u32,
    }

    impl DatabaseConfig {
        /// Builds a [`DatabaseConfig`] from environment variables.
        pub fn from_env() -> Self {
            // ---
            let database_url =
                std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://habits.db".to_string());
            let retry_count = optional_env_parse!("GREEN_DB_RETRY_COUNT", u32, 5);
            let acquire_timeout_secs = optional_env_parse!("GREEN_DB_ACQUIRE_TIMEOUT_SEC", u64, 30);
            let max_connections = optional_env_parse!("GREEN_DB_MAX_CONNECTIONS", u32, 5);

            Self {
                database_url,
                retry_count,
                acquire_timeout: Duration::from_secs(acquire_timeout_secs),
                max_connections,
            }
        }

        /// Configuration for a database file at `path` with default tuning.
        pub fn for_path(path: &std::path::Path) -> Self {
            // ---
            Self {
                database_url: format!("sqlite://{}", path.display()),
                retry_count: 1,
                acquire_timeout: Duration::from_secs(30),
                max_connections: 5,
            }
        }
    }
}
pub use database::DatabaseConfig;

// ============================================================
// Session configuration
// ============================================================

mod session {
    // ---
    use super::*;

    /// Cookie session settings.
    #[derive(Clone)]
    pub struct SessionConfig {
        /// Secret the session cookie signing key is derived from.
        pub secret: String,
    }

    impl std::fmt::Debug for SessionConfig {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("SessionConfig")
                .field("secret", &"<redacted>")
                .finish()
        }
    }

    impl SessionConfig {
        /// Builds a [`SessionConfig`] from environment variables.
        ///
        /// # Errors
        /// `SESSION_SECRET` is required and must not be blank. The service
        /// refuses to start with unsigned or trivially forgeable sessions.
        pub fn from_env() -> Result<Self> {
            // ---
            let secret = required_env!("SESSION_SECRET");
            anyhow::ensure!(
                !secret.trim().is_empty(),
                "Invalid configuration: SESSION_SECRET must not be empty"
            );

            Ok(Self { secret })
        }
    }
}
pub use session::SessionConfig;

// ============================================================
// Content configuration (tips and habit catalog)
// ============================================================

mod content {
    // ---
    use super::*;

    /// Locations of the optional data files.
    #[derive(Debug, Clone)]
    pub struct ContentConfig {
        /// JSON array of tip strings. Defaults to `data/sustainability_tips.json`.
        pub tips_path: PathBuf,

        /// Optional JSON override of the habit catalog and carbon table.
        pub catalog_path: Option<PathBuf>,
    }

    impl ContentConfig {
        pub fn from_env() -> Self {
            // ---
            let tips_path = std::env::var("GREEN_TIPS_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data/sustainability_tips.json"));
            let catalog_path = std::env::var("GREEN_CATALOG_PATH").ok().map(PathBuf::from);

            Self {
                tips_path,
                catalog_path,
            }
        }
    }
}
pub use content::ContentConfig;

// ============================================================
// Tests
// ============================================================
