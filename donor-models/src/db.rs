//! Database initialization, connection pooling, and lifecycle management.
//!
//! Uses SQLite in WAL mode with r2d2 connection pooling.
//! Runs integrity checks on startup and applies versioned migrations.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;
use tracing::{info, warn, error};

use donor_core::error::{DonorError, DonorResult};
use donor_core::config::{BloodBankSeed, DatabaseConfig};

use crate::models::blood_bank::BloodBank;
use crate::schema;
use crate::migrations;

/// Type alias for the SQLite connection pool.
pub type DbPool = Pool<SqliteConnectionManager>;

/// Database wrapper providing initialization, pooling, and lifecycle management.
///
/// Cloning is cheap; clones share the same pool.
#[derive(Clone)]
pub struct Database {
    pool: Arc<DbPool>,
    path: PathBuf,
}

impl Database {
    /// Initialize the database at the given path with the provided configuration.
    ///
    /// This:
    /// 1. Creates the database file and parent directories if needed
    /// 2. Sets up connection pooling with WAL and foreign keys enabled
    /// 3. Runs integrity checks if configured
    /// 4. Creates the schema tables
    /// 5. Runs pending migrations
    pub fn init(db_path: &Path, config: &DatabaseConfig) -> DonorResult<Self> {
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        info!("opening database at {}", db_path.display());

        let manager = SqliteConnectionManager::file(db_path);
        let pool = Pool::builder()
            .max_size(config.pool_size)
            .connection_customizer(Box::new(ConnectionCustomizer {
                wal_mode: config.wal_mode,
            }))
            .build(manager)
            .map_err(|e| DonorError::Pool(e.to_string()))?;

        let db = Self {
            pool: Arc::new(pool),
            path: db_path.to_path_buf(),
        };

        if config.integrity_check_on_startup {
            db.run_integrity_check()?;
        }

        {
            let conn = db.conn()?;
            schema::create_tables(&conn)?;
            migrations::run_migrations(&conn)?;
        }

        info!("database ready");
        Ok(db)
    }

    /// Get a connection from the pool.
    pub fn conn(&self) -> DonorResult<r2d2::PooledConnection<SqliteConnectionManager>> {
        self.pool.get().map_err(|e| DonorError::Pool(e.to_string()))
    }

    /// Get a reference to the underlying pool.
    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    /// Path of the database file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Run a SQLite integrity check.
    pub fn run_integrity_check(&self) -> DonorResult<()> {
        let conn = self.conn()?;
        let result: String = conn
            .query_row("PRAGMA integrity_check", [], |row| row.get(0))
            .map_err(|e| DonorError::Database(e.to_string()))?;

        if result != "ok" {
            error!("database integrity check failed: {result}");
            return Err(DonorError::IntegrityCheck(result));
        }

        info!("database integrity check passed");
        Ok(())
    }

    /// List foreign key violations as human-readable strings.
    pub fn foreign_key_violations(&self) -> DonorResult<Vec<String>> {
        let conn = self.conn()?;
        let mut stmt = conn
            .prepare("PRAGMA foreign_key_check")
            .map_err(|e| DonorError::Database(e.to_string()))?;
        let rows = stmt
            .query_map([], |row| {
                let table: String = row.get(0)?;
                let rowid: i64 = row.get(1)?;
                let parent: String = row.get(2)?;
                Ok(format!("{table} row {rowid} -> {parent}"))
            })
            .map_err(|e| DonorError::Database(e.to_string()))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| DonorError::Database(e.to_string()))?;
        Ok(rows)
    }

    /// Execute a function within a database transaction.
    pub fn transaction<T, F>(&self, f: F) -> DonorResult<T>
    where
        F: FnOnce(&Connection) -> DonorResult<T>,
    {
        let mut conn = self.conn()?;
        let tx = conn
            .transaction()
            .map_err(|e| DonorError::Database(e.to_string()))?;

        let result = f(&tx)?;

        tx.commit()
            .map_err(|e| DonorError::Database(e.to_string()))?;

        Ok(result)
    }

    /// Insert the configured blood banks that are not stored yet.
    ///
    /// Seeds colliding with an existing id or name are skipped. Returns the
    /// number of rows written.
    pub fn bootstrap_blood_banks(&self, seeds: &[BloodBankSeed]) -> DonorResult<usize> {
        if seeds.is_empty() {
            return Ok(0);
        }

        let inserted = self.transaction(|conn| {
            let mut inserted = 0;
            for seed in seeds {
                if BloodBank::from(seed).insert_if_missing(conn)? {
                    inserted += 1;
                } else {
                    tracing::debug!("blood bank {} ({}) already present", seed.id, seed.name);
                }
            }
            Ok(inserted)
        })?;

        if inserted > 0 {
            info!("bootstrapped {inserted} blood bank(s)");
        }
        Ok(inserted)
    }

    /// Get database statistics (row counts per table).
    pub fn stats(&self) -> DonorResult<DatabaseStats> {
        let conn = self.conn()?;

        let count = |table: &str| -> DonorResult<i64> {
            let sql = format!("SELECT COUNT(*) FROM {table}");
            conn.query_row(&sql, [], |row| row.get(0))
                .map_err(|e| DonorError::Database(e.to_string()))
        };

        Ok(DatabaseStats {
            blood_banks: count("blood_banks")?,
            donors: count("donors")?,
        })
    }

    /// Reset the database by dropping and recreating all tables.
    pub fn reset(&self) -> DonorResult<()> {
        warn!("resetting database - all donors and blood banks will be lost");
        let conn = self.conn()?;
        schema::drop_tables(&conn)?;
        schema::create_tables(&conn)?;
        migrations::run_migrations(&conn)?;
        info!("database reset complete");
        Ok(())
    }
}

/// Database row count statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatabaseStats {
    pub blood_banks: i64,
    pub donors: i64,
}

impl std::fmt::Display for DatabaseStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "blood_banks={}, donors={}", self.blood_banks, self.donors)
    }
}

/// r2d2 connection customizer that applies PRAGMA settings.
#[derive(Debug)]
struct ConnectionCustomizer {
    wal_mode: bool,
}

impl r2d2::CustomizeConnection<Connection, rusqlite::Error> for ConnectionCustomizer {
    fn on_acquire(&self, conn: &mut Connection) -> Result<(), rusqlite::Error> {
        if self.wal_mode {
            conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        }

        // Donors must reference an existing blood bank.
        conn.execute_batch(
            "PRAGMA synchronous=NORMAL;
             PRAGMA busy_timeout=5000;
             PRAGMA foreign_keys=ON;",
        )?;

        Ok(())
    }
}
