//! Database schema definitions and table creation.
//!
//! The `blood_banks` and `donors` table definitions are kept byte-compatible
//! with existing registry databases. Uniqueness rules are added as separate
//! indexes by the migrations so the table DDL itself never changes.

use rusqlite::Connection;
use donor_core::error::{DonorError, DonorResult};
use tracing::debug;

/// Create all database tables and indexes if they do not exist.
pub fn create_tables(conn: &Connection) -> DonorResult<()> {
    conn.execute_batch(SCHEMA_SQL)
        .map_err(|e| DonorError::Database(format!("failed to create schema: {e}")))?;
    debug!("database schema verified");
    Ok(())
}

/// Drop all tables (used for database reset).
pub fn drop_tables(conn: &Connection) -> DonorResult<()> {
    conn.execute_batch(
        "DROP TABLE IF EXISTS donors;
         DROP TABLE IF EXISTS blood_banks;
         DROP TABLE IF EXISTS schema_version;",
    )
    .map_err(|e| DonorError::Database(format!("failed to drop tables: {e}")))?;
    Ok(())
}

/// Complete SQL schema for all tables.
const SCHEMA_SQL: &str = r#"
-- Schema version tracking
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER NOT NULL
);

-- Blood banks (populated by bootstrap only)
CREATE TABLE IF NOT EXISTS blood_banks (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    location TEXT NOT NULL
);

-- Donors
CREATE TABLE IF NOT EXISTS donors (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    blood_group TEXT(3) NOT NULL,
    contact TEXT NOT NULL,
    blood_bank_id INTEGER NOT NULL REFERENCES blood_banks(id)
);

CREATE INDEX IF NOT EXISTS idx_donors_blood_bank_id ON donors(blood_bank_id);
"#;
