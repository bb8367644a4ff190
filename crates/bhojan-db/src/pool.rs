//! # Opening the Database
//!
//! One SQLite file per register, shared by every `bhojan` invocation that
//! points at it.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  DbConfig::new(path).busy_timeout(..)                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Database::new ── WAL journal, NORMAL sync, foreign keys on             │
//! │       │        ── embedded migrations                                   │
//! │       ▼                                                                 │
//! │  db.menu()    ──► MenuRepository                                        │
//! │  db.sales()   ──► SaleRepository  (sale + table writes in one tx)       │
//! │  db.tables()  ──► TableRepository                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Two Registers, One File
//! Two terminals may bill against the same file. WAL lets the second read
//! while the first writes; a writer that finds the file locked waits up to
//! `busy_timeout` before the write fails with a database error.

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::migrations;
use crate::repository::menu::MenuRepository;
use crate::repository::sale::SaleRepository;
use crate::repository::table::TableRepository;

/// Where the database lives and how connections behave.
///
/// ## Example
/// ```rust
/// use bhojan_db::DbConfig;
/// use std::time::Duration;
///
/// let config = DbConfig::new("/var/lib/bhojan/bhojan.db").busy_timeout(Duration::from_secs(10));
/// assert_eq!(config.busy_timeout, Duration::from_secs(10));
/// ```
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub database_path: PathBuf,

    /// A CLI run does one thing at a time; a handful covers the repositories.
    pub max_connections: u32,

    /// How long a write waits on another register's lock.
    pub busy_timeout: Duration,
}

impl DbConfig {
    /// A file database, created on first open.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            database_path: path.into(),
            max_connections: 4,
            busy_timeout: Duration::from_secs(5),
        }
    }

    pub fn busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = timeout;
        self
    }

    /// A private in-memory database. Every connection to `:memory:` gets
    /// its own empty database, so the pool holds exactly one.
    pub fn in_memory() -> Self {
        DbConfig {
            database_path: PathBuf::from(":memory:"),
            max_connections: 1,
            busy_timeout: Duration::from_secs(1),
        }
    }
}

/// An open, migrated database. Clones share the pool.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Opens (or creates) the database and brings its schema up to date.
    pub async fn new(config: DbConfig) -> DbResult<Self> {
        info!(path = %config.database_path.display(), "Opening SQLite database");

        let url = format!("sqlite://{}?mode=rwc", config.database_path.display());
        let options = SqliteConnectOptions::from_str(&url)
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?
            .journal_mode(SqliteJournalMode::Wal)
            // A power cut may drop the last sale, never corrupt the file
            .synchronous(SqliteSynchronous::Normal)
            .foreign_keys(true)
            .busy_timeout(config.busy_timeout)
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(1)
            .connect_with(options)
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        debug!(
            max_connections = config.max_connections,
            busy_timeout_ms = config.busy_timeout.as_millis() as u64,
            "Pool ready"
        );

        migrations::run_migrations(&pool).await?;
        Ok(Database { pool })
    }

    /// The raw pool, for queries no repository covers.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn menu(&self) -> MenuRepository {
        MenuRepository::new(self.pool.clone())
    }

    pub fn sales(&self) -> SaleRepository {
        SaleRepository::new(self.pool.clone())
    }

    pub fn tables(&self) -> TableRepository {
        TableRepository::new(self.pool.clone())
    }

    /// Waits for open connections to finish, then closes the pool. WAL
    /// contents are checkpointed into the main file by the last close.
    pub async fn close(&self) {
        info!("Closing database");
        self.pool.close().await;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
