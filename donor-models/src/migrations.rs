//! Versioned database migrations.
//!
//! Migrations run sequentially from the current stored version to the latest.
//! Each migration is an idempotent SQL script.

use rusqlite::Connection;
use tracing::{info, warn};
use donor_core::error::{DonorError, DonorResult};
use donor_core::constants::DB_SCHEMA_VERSION;

/// Run all pending migrations on the database.
pub fn run_migrations(conn: &Connection) -> DonorResult<()> {
    let current_version = get_schema_version(conn)?;

    if current_version >= DB_SCHEMA_VERSION {
        tracing::debug!("database schema is up to date (version {current_version})");
        return Ok(());
    }

    info!("running migrations from version {current_version} to {DB_SCHEMA_VERSION}");

    for version in (current_version + 1)..=DB_SCHEMA_VERSION {
        run_migration(conn, version)?;
    }

    set_schema_version(conn, DB_SCHEMA_VERSION)?;
    info!("migrations complete, schema at version {DB_SCHEMA_VERSION}");
    Ok(())
}

/// Get the current schema version from the database.
pub fn get_schema_version(conn: &Connection) -> DonorResult<i32> {
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM schema_version", [], |row| row.get(0))
        .map_err(|e| DonorError::Database(e.to_string()))?;

    if count == 0 {
        // First run
        conn.execute("INSERT INTO schema_version (version) VALUES (0)", [])
            .map_err(|e| DonorError::Database(e.to_string()))?;
        return Ok(0);
    }

    conn.query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
        row.get(0)
    })
    .map_err(|e| DonorError::Database(e.to_string()))
}

/// Set the schema version in the database.
fn set_schema_version(conn: &Connection, version: i32) -> DonorResult<()> {
    conn.execute("UPDATE schema_version SET version = ?1", [version])
        .map_err(|e| DonorError::Database(e.to_string()))?;
    Ok(())
}

/// Run a specific migration version.
fn run_migration(conn: &Connection, version: i32) -> DonorResult<()> {
    info!("applying migration version {version}");

    match version {
        1 => migration_v1(conn),
        _ => {
            warn!("unknown migration version {version}, skipping");
            Ok(())
        }
    }
}

/// Migration v1: uniqueness indexes.
///
/// A donor is identified by its (name, contact) pair and a blood bank by its
/// name. Fails if an existing database already holds duplicates.
fn migration_v1(conn: &Connection) -> DonorResult<()> {
    conn.execute_batch(
        "CREATE UNIQUE INDEX IF NOT EXISTS idx_donors_name_contact ON donors(name, contact);
         CREATE UNIQUE INDEX IF NOT EXISTS idx_blood_banks_name ON blood_banks(name);",
    )
    .map_err(|e| DonorError::Migration(format!("v1 uniqueness indexes: {e}")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema;

    #[test]
    fn test_migrations_on_fresh_db() {
        let conn = Connection::open_in_memory().unwrap();
        schema::create_tables(&conn).unwrap();
        run_migrations(&conn).unwrap();

        let version = get_schema_version(&conn).unwrap();
        assert_eq!(version, DB_SCHEMA_VERSION);
    }

    #[test]
    fn test_migrations_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        schema::create_tables(&conn).unwrap();
        run_migrations(&conn).unwrap();
        run_migrations(&conn).unwrap(); // Should be a no-op
    }

    #[test]
    fn test_unique_indexes_created() {
        let conn = Connection::open_in_memory().unwrap();
        schema::create_tables(&conn).unwrap();
        run_migrations(&conn).unwrap();

        for idx in ["idx_donors_name_contact", "idx_blood_banks_name"] {
            let count: i64 = conn
                .query_row(
                    "SELECT COUNT(*) FROM sqlite_master WHERE type='index' AND name=?1",
                    [idx],
                    |row| row.get(0),
                )
                .unwrap();
            assert_eq!(count, 1, "index {idx} should exist");
        }
    }

    #[test]
    fn test_migration_fails_on_existing_duplicates() {
        let conn = Connection::open_in_memory().unwrap();
        schema::create_tables(&conn).unwrap();
        conn.execute_batch(
            "INSERT INTO blood_banks (id, name, location) VALUES (1, 'Blood Bank 1', 'X');
             INSERT INTO donors (name, blood_group, contact, blood_bank_id) VALUES ('Bob', 'B+', '1', 1);
             INSERT INTO donors (name, blood_group, contact, blood_bank_id) VALUES ('Bob', 'B+', '1', 1);",
        )
        .unwrap();

        assert!(matches!(run_migrations(&conn), Err(DonorError::Migration(_))));
    }
}
