mod database;
pub mod metrics;
mod password;

// Re-export the factory functions for easy access
pub use database::{create_sqlite_repository, init_database, init_database_with_retry};
pub use metrics::{create_noop_metrics, create_prom_metrics};
pub use password::{hash_password, verify_password};
