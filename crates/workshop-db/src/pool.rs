//! # Database Handle
//!
//! Connection setup and configuration for the workshop SQLite file.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Process start                                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbConfig::from_env() ← WORKSHOP_DB_PATH or ./oficina.db               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Database::new(config).await ← open connection + create schema         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  db.customers() / db.inventory() / db.orders() / db.simulator()        │
//! │       │        (handle passed explicitly, no global state)             │
//! │       ▼                                                                 │
//! │  db.close().await ← release the connection                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The pool is capped at a single connection by default: the application is
//! single-user and keeps one long-lived connection for the whole run.

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};
use workshop_core::DEFAULT_DB_FILE;

use crate::error::{DbError, DbResult};
use crate::migrations;
use crate::repository::customer::CustomerRepository;
use crate::repository::inventory::InventoryRepository;
use crate::repository::order::OrderRepository;
use crate::simulation::OrderSimulator;

/// Environment variable naming the storage file.
pub const DB_PATH_ENV: &str = "WORKSHOP_DB_PATH";

// =============================================================================
// Configuration
// =============================================================================

/// Database configuration.
///
/// ## Example
/// ```rust,ignore
/// let config = DbConfig::new("/var/lib/workshop/oficina.db")
///     .connect_timeout(Duration::from_secs(5));
/// ```
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Path to the SQLite database file.
    pub database_path: PathBuf,

    /// Maximum number of connections in the pool.
    /// Default: 1
    pub max_connections: u32,

    /// Minimum number of connections to keep alive.
    /// Default: 1
    pub min_connections: u32,

    /// Connection timeout duration.
    /// Default: 30 seconds
    pub connect_timeout: Duration,

    /// Whether to create the schema on connect.
    /// Default: true
    pub run_migrations: bool,
}

impl DbConfig {
    /// Creates a configuration for the given file. The file is created if it
    /// doesn't exist.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            database_path: path.into(),
            max_connections: 1,
            min_connections: 1,
            connect_timeout: Duration::from_secs(30),
            run_migrations: true,
        }
    }

    /// Reads the storage path from `WORKSHOP_DB_PATH`, falling back to
    /// `oficina.db` in the working directory.
    pub fn from_env() -> Self {
        let path = std::env::var(DB_PATH_ENV).unwrap_or_else(|_| DEFAULT_DB_FILE.to_string());
        DbConfig::new(path)
    }

    /// Sets the maximum number of connections.
    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Sets the minimum number of connections.
    pub fn min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    /// Sets the connection timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Sets whether to create the schema on connect.
    pub fn run_migrations(mut self, run: bool) -> Self {
        self.run_migrations = run;
        self
    }

    /// Creates an in-memory database configuration (for testing).
    ///
    /// Each call yields an isolated database.
    pub fn in_memory() -> Self {
        DbConfig {
            database_path: PathBuf::from(":memory:"),
            max_connections: 1, // In-memory requires single connection
            min_connections: 1,
            connect_timeout: Duration::from_secs(5),
            run_migrations: true,
        }
    }
}

impl Default for DbConfig {
    fn default() -> Self {
        DbConfig::new(DEFAULT_DB_FILE)
    }
}

// =============================================================================
// Database
// =============================================================================

/// Storage-access object handed to every repository and the order simulator.
///
/// ## Usage
/// ```rust,ignore
/// let db = Database::new(DbConfig::from_env()).await?;
///
/// let customer = db.customers().insert(&new_customer).await?;
/// db.simulator()
///     .record_order(customer.id, "Brake Pad", 2, Money::from_cents(10_000))
///     .await?;
///
/// db.close().await;
/// ```
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Opens the database.
    ///
    /// ## What This Does
    /// 1. Creates the database file if it doesn't exist
    /// 2. Configures SQLite:
    ///    - WAL journal
    ///    - NORMAL synchronous
    ///    - Foreign keys enabled (orders.item_id is enforced)
    /// 3. Creates the connection pool
    /// 4. Creates the schema (if enabled)
    pub async fn new(config: DbConfig) -> DbResult<Self> {
        info!(
            path = %config.database_path.display(),
            "Initializing database connection"
        );

        // sqlite://path creates file if not exists
        let connect_url = format!("sqlite://{}?mode=rwc", config.database_path.display());

        let connect_options = SqliteConnectOptions::from_str(&connect_url)
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            // SQLite has them disabled by default for backwards compatibility
            .foreign_keys(true)
            .create_if_missing(true);

        debug!("Connection options configured");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.connect_timeout)
            // The single connection lives for the whole run.
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(connect_options)
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        info!(
            max_connections = config.max_connections,
            "Database pool created"
        );

        let db = Database { pool };

        if config.run_migrations {
            db.run_migrations().await?;
        }

        Ok(db)
    }

    /// Creates the schema. Idempotent.
    pub async fn run_migrations(&self) -> DbResult<()> {
        info!("Running database migrations");
        migrations::run_migrations(&self.pool).await?;
        info!("Migrations complete");
        Ok(())
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Returns the customer repository.
    pub fn customers(&self) -> CustomerRepository {
        CustomerRepository::new(self.pool.clone())
    }

    /// Returns the inventory repository.
    pub fn inventory(&self) -> InventoryRepository {
        InventoryRepository::new(self.pool.clone())
    }

    /// Returns the order repository.
    pub fn orders(&self) -> OrderRepository {
        OrderRepository::new(self.pool.clone())
    }

    /// Returns the order simulator.
    pub fn simulator(&self) -> OrderSimulator {
        OrderSimulator::new(self.pool.clone())
    }

    /// Closes the connection. Repository calls fail afterwards.
    pub async fn close(&self) {
        info!("Closing database connection pool");
        self.pool.close().await;
    }

    /// Checks if the database can execute queries.
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::migrations::migration_status;
    use chrono::NaiveDate;
    use tempfile::tempdir;
    use workshop_core::NewCustomer;

    #[tokio::test]
    async fn test_in_memory_database() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        assert!(db.health_check().await);
    }

    #[tokio::test]
    async fn test_closed_database_rejects_queries() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.close().await;

        assert!(!db.health_check().await);
        let err = db.customers().list().await.unwrap_err();
        assert!(matches!(err, DbError::ConnectionFailed(_)));
    }

    #[test]
    fn test_config_builder() {
        let config = DbConfig::new("/tmp/test.db")
            .max_connections(4)
            .min_connections(2)
            .run_migrations(false);

        assert_eq!(config.max_connections, 4);
        assert_eq!(config.min_connections, 2);
        assert!(!config.run_migrations);
    }

    #[test]
    fn test_default_config_targets_single_connection() {
        let config = DbConfig::default();
        assert_eq!(config.database_path, PathBuf::from(DEFAULT_DB_FILE));
        assert_eq!(config.max_connections, 1);
        assert_eq!(config.min_connections, 1);
    }

    #[tokio::test]
    async fn test_reopening_file_keeps_rows() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("oficina.db");

        let db = Database::new(DbConfig::new(path.clone())).await.unwrap();
        let customer = db
            .customers()
            .insert(&NewCustomer::new(
                "Ana",
                "11 99999-0000",
                "ana@example.com",
                NaiveDate::from_ymd_opt(2024, 5, 2).unwrap(),
            ))
            .await
            .unwrap();
        db.close().await;

        // Schema creation runs again on the existing file.
        let reopened = Database::new(DbConfig::new(path.clone())).await.unwrap();
        assert_eq!(reopened.customers().list().await.unwrap(), vec![customer]);

        let (total, applied) = migration_status(reopened.pool()).await.unwrap();
        assert_eq!(total, applied);
        reopened.close().await;
    }

    #[tokio::test]
    async fn test_from_env_selects_storage_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("from-env.db");

        std::env::set_var(DB_PATH_ENV, &path);
        let config = DbConfig::from_env();
        std::env::remove_var(DB_PATH_ENV);

        assert_eq!(config.database_path, path);
        let db = Database::new(config).await.unwrap();
        assert!(path.exists());
        db.close().await;

        assert_eq!(
            DbConfig::from_env().database_path,
            PathBuf::from(DEFAULT_DB_FILE)
        );
    }
}
