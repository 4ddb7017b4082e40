//! # Catalog Database Handle
//!
//! Opens the SQLite catalog, applies migrations and hands out repositories.
//!
//! ```text
//!   DbConfig::new("bookstore.db")        DbConfig::in_memory()
//!            │                                    │
//!            │  WAL, busy_timeout,                │  one pinned connection,
//!            │  create_if_missing                 │  never recycled
//!            └──────────────┬─────────────────────┘
//!                           ▼
//!                Database::new(config)  ──► migrations
//!                           │
//!                           ▼
//!                     db.books() ──► BookRepository
//! ```
//!
//! The API server and the seeder may touch the same file at once, so file
//! databases use WAL and wait on a locked database instead of failing.

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

use crate::error::{DbError, DbResult};
use crate::migrations;
use crate::repository::book::BookRepository;

/// Where the catalog lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DbLocation {
    File(PathBuf),
    /// Private to the pool and gone once it closes.
    Memory,
}

impl std::fmt::Display for DbLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DbLocation::File(path) => write!(f, "{}", path.display()),
            DbLocation::Memory => f.write_str(":memory:"),
        }
    }
}

/// Pool settings for [`Database::new`].
///
/// ```rust,ignore
/// let config = DbConfig::new("./bookstore.db").max_connections(8);
/// ```
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub location: DbLocation,
    pub max_connections: u32,
    /// How long a request waits for a free connection.
    pub acquire_timeout: Duration,
    /// How long a statement waits on a locked database file.
    pub busy_timeout: Duration,
    pub run_migrations: bool,
}

impl DbConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            location: DbLocation::File(path.into()),
            max_connections: 5,
            acquire_timeout: Duration::from_secs(30),
            busy_timeout: Duration::from_secs(5),
            run_migrations: true,
        }
    }

    /// Migrated, empty catalog for tests.
    pub fn in_memory() -> Self {
        DbConfig {
            location: DbLocation::Memory,
            // A second connection would open a second, empty database.
            max_connections: 1,
            acquire_timeout: Duration::from_secs(5),
            busy_timeout: Duration::ZERO,
            run_migrations: true,
        }
    }

    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max.max(1);
        self
    }

    pub fn run_migrations(mut self, run: bool) -> Self {
        self.run_migrations = run;
        self
    }

    fn connect_options(&self) -> DbResult<SqliteConnectOptions> {
        let options = match &self.location {
            DbLocation::Memory => SqliteConnectOptions::from_str("sqlite::memory:")
                .map_err(|e| DbError::ConnectionFailed(e.to_string()))?,
            DbLocation::File(path) => SqliteConnectOptions::new()
                .filename(path)
                .create_if_missing(true)
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal)
                .busy_timeout(self.busy_timeout),
        };

        Ok(options.foreign_keys(true))
    }

    fn pool_options(&self) -> SqlitePoolOptions {
        let options = SqlitePoolOptions::new()
            .max_connections(self.max_connections)
            .acquire_timeout(self.acquire_timeout);

        match self.location {
            // The database dies with its last connection.
            DbLocation::Memory => options.min_connections(1).idle_timeout(None).max_lifetime(None),
            DbLocation::File(_) => options.idle_timeout(Some(Duration::from_secs(600))),
        }
    }
}

// =============================================================================
// Database
// =============================================================================

/// Shared handle to the catalog. Clones share one pool.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Opens the pool and, unless disabled, brings the schema up to date.
    pub async fn new(config: DbConfig) -> DbResult<Self> {
        let pool = config
            .pool_options()
            .connect_with(config.connect_options()?)
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        info!(
            location = %config.location,
            max_connections = config.max_connections,
            "Catalog database opened"
        );

        let db = Database { pool };
        if config.run_migrations {
            migrations::run_migrations(&db.pool).await?;
        }
        Ok(db)
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn books(&self) -> BookRepository {
        BookRepository::new(self.pool.clone())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// `true` while the pool can still run a trivial query.
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_database() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        assert!(db.health_check().await);
        assert_eq!(db.books().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_closed_database_is_unhealthy() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.close().await;

        assert!(!db.health_check().await);
    }

    #[tokio::test]
    async fn test_file_database_is_created() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("catalog.db");

        let db = Database::new(DbConfig::new(&path)).await.unwrap();

        assert!(db.health_check().await);
        assert!(path.exists());
        db.close().await;
    }

    #[test]
    fn test_config_builder() {
        let config = DbConfig::new("/tmp/test.db").max_connections(0).run_migrations(false);

        assert_eq!(config.max_connections, 1);
        assert!(!config.run_migrations);
        assert_eq!(config.location, DbLocation::File(PathBuf::from("/tmp/test.db")));
        assert_eq!(DbConfig::in_memory().location.to_string(), ":memory:");
    }
}
