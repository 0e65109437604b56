//! Integration tests for the data layer.
//!
//! Tests database creation, schema, WAL and foreign key pragmas, migrations,
//! uniqueness indexes, blood bank bootstrap, and statistics.

mod common;

use donor_core::constants::DB_SCHEMA_VERSION;
use donor_core::error::DonorError;
use donor_models::models::blood_group::BloodGroup;
use donor_models::{migrations, queries, BloodBank, Donor};

// ---- Database initialization ----

#[test]
fn database_init_creates_file_and_wal_mode() {
    let (db, dir) = common::create_test_db();
    let db_path = dir.path().join("test.db");
    assert!(db_path.exists(), "database file should exist after init");

    let conn = db.conn().unwrap();
    let journal_mode: String = conn
        .query_row("PRAGMA journal_mode", [], |row| row.get(0))
        .unwrap();
    assert_eq!(journal_mode.to_lowercase(), "wal", "database should be in WAL mode");
}

#[test]
fn database_connections_enforce_foreign_keys() {
    let (db, _dir) = common::create_test_db();
    let conn = db.conn().unwrap();
    let enabled: i64 = conn
        .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
        .unwrap();
    assert_eq!(enabled, 1);
}

#[test]
fn database_init_creates_all_tables_and_indexes() {
    let (db, _dir) = common::create_test_db();
    let conn = db.conn().unwrap();

    for (kind, name) in [
        ("table", "blood_banks"),
        ("table", "donors"),
        ("table", "schema_version"),
        ("index", "idx_donors_blood_bank_id"),
        ("index", "idx_donors_name_contact"),
        ("index", "idx_blood_banks_name"),
    ] {
        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = ?1 AND name = ?2",
                [kind, name],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 1, "{kind} '{name}' should exist");
    }
}

#[test]
fn reopening_database_keeps_rows() {
    let (db, _dir) = common::create_seeded_db();
    let path = db.path().to_path_buf();
    drop(db);

    let reopened = donor_models::Database::init(&path, &Default::default()).unwrap();
    assert_eq!(reopened.stats().unwrap().blood_banks, 3);
}

// ---- Schema version and migrations ----

#[test]
fn schema_version_is_set_after_migration() {
    let (db, _dir) = common::create_test_db();
    let conn = db.conn().unwrap();
    assert_eq!(migrations::get_schema_version(&conn).unwrap(), DB_SCHEMA_VERSION);
}

#[test]
fn migration_is_idempotent() {
    let (db, _dir) = common::create_test_db();
    let conn = db.conn().unwrap();
    migrations::run_migrations(&conn).unwrap();
    migrations::run_migrations(&conn).unwrap();
    assert_eq!(migrations::get_schema_version(&conn).unwrap(), DB_SCHEMA_VERSION);
}

// ---- Storage-level invariants ----

#[test]
fn unique_index_rejects_raw_duplicate_insert() {
    let (db, _dir) = common::create_seeded_db();
    let conn = db.conn().unwrap();
    let insert = "INSERT INTO donors (name, blood_group, contact, blood_bank_id) VALUES ('Alice', 'O+', '555-1111', 1)";
    conn.execute(insert, []).unwrap();
    assert!(conn.execute(insert, []).is_err());
    assert_eq!(Donor::count(&conn).unwrap(), 1);
}

#[test]
fn donor_requires_existing_blood_bank() {
    let (db, _dir) = common::create_seeded_db();
    let conn = db.conn().unwrap();
    let err = Donor::new("Alice", BloodGroup::OPositive, "555-1111", 99)
        .insert(&conn)
        .unwrap_err();
    assert!(matches!(err, DonorError::Database(_)));
    assert!(db.foreign_key_violations().unwrap().is_empty());
}

#[test]
fn donor_ids_are_not_reused_after_delete() {
    let (db, _dir) = common::create_seeded_db();
    let conn = db.conn().unwrap();
    let first = Donor::new("Alice", BloodGroup::OPositive, "1", 1).insert(&conn).unwrap();
    Donor::delete(&conn, first).unwrap();
    let second = Donor::new("Bob", BloodGroup::BPositive, "2", 1).insert(&conn).unwrap();
    assert!(second > first, "AUTOINCREMENT ids must keep increasing");
}

// ---- Bootstrap and stats ----

#[test]
fn bootstrap_inserts_seeds_once() {
    let (db, _dir) = common::create_test_db();
    let seeds = common::starter_banks();
    assert_eq!(db.bootstrap_blood_banks(&seeds).unwrap(), 3);
    assert_eq!(db.bootstrap_blood_banks(&seeds).unwrap(), 0);

    let conn = db.conn().unwrap();
    let banks = BloodBank::list(&conn).unwrap();
    let names: Vec<&str> = banks.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, ["Blood Bank 1", "Blood Bank 2", "Blood Bank 3"]);
}

#[test]
fn stats_count_rows() {
    let (db, _dir) = common::create_seeded_db();
    {
        let conn = db.conn().unwrap();
        Donor::new("Alice", BloodGroup::OPositive, "1", 1).insert(&conn).unwrap();
        Donor::new("Bob", BloodGroup::OPositive, "2", 2).insert(&conn).unwrap();
        let by_group = queries::count_by_blood_group(&conn).unwrap();
        assert_eq!(by_group[6], (BloodGroup::OPositive, 2));
    }
    let stats = db.stats().unwrap();
    assert_eq!(stats.blood_banks, 3);
    assert_eq!(stats.donors, 2);
    assert_eq!(stats.to_string(), "blood_banks=3, donors=2");
}
