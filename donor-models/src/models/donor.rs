//! Donor entity model.

use serde::{Deserialize, Serialize};
use rusqlite::{params, Connection, ErrorCode, OptionalExtension, Row};
use donor_core::error::{DonorError, DonorResult};

use super::blood_group::BloodGroup;

/// A registered blood donor.
///
/// `id` is `None` until the row has been inserted; the storage layer assigns
/// it. Donors are never updated in place, only inserted and deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Donor {
    pub id: Option<i64>,
    pub name: String,
    pub blood_group: BloodGroup,
    pub contact: String,
    pub blood_bank_id: i64,
}

impl Donor {
    /// Create an unsaved donor.
    pub fn new(
        name: impl Into<String>,
        blood_group: BloodGroup,
        contact: impl Into<String>,
        blood_bank_id: i64,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            blood_group,
            contact: contact.into(),
            blood_bank_id,
        }
    }

    /// Construct a Donor from a database row.
    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            blood_group: row.get("blood_group")?,
            contact: row.get("contact")?,
            blood_bank_id: row.get("blood_bank_id")?,
        })
    }

    // ─── Static finders ──────────────────────────────────────────────────

    /// Find a donor by its local database ID.
    pub fn find_by_id(conn: &Connection, id: i64) -> DonorResult<Option<Self>> {
        conn.query_row("SELECT * FROM donors WHERE id = ?1", [id], Self::from_row)
            .optional()
            .map_err(|e| DonorError::Database(e.to_string()))
    }

    /// Find the donor registered under an exact (name, contact) pair.
    pub fn find_by_identity(conn: &Connection, name: &str, contact: &str) -> DonorResult<Option<Self>> {
        conn.query_row(
            "SELECT * FROM donors WHERE name = ?1 AND contact = ?2",
            [name, contact],
            Self::from_row,
        )
        .optional()
        .map_err(|e| DonorError::Database(e.to_string()))
    }

    /// Delete a donor by its local database ID. Returns true if a row was removed.
    pub fn delete(conn: &Connection, id: i64) -> DonorResult<bool> {
        let changed = conn
            .execute("DELETE FROM donors WHERE id = ?1", [id])
            .map_err(|e| DonorError::Database(e.to_string()))?;
        Ok(changed > 0)
    }

    /// Total number of donor rows.
    pub fn count(conn: &Connection) -> DonorResult<i64> {
        conn.query_row("SELECT COUNT(*) FROM donors", [], |row| row.get(0))
            .map_err(|e| DonorError::Database(e.to_string()))
    }

    // ─── Persistence ─────────────────────────────────────────────────────

    /// Insert this donor and record the assigned ID.
    ///
    /// A collision on the (name, contact) unique index is reported as
    /// `DonorError::Duplicate`.
    pub fn insert(&mut self, conn: &Connection) -> DonorResult<i64> {
        conn.execute(
            "INSERT INTO donors (name, blood_group, contact, blood_bank_id) VALUES (?1, ?2, ?3, ?4)",
            params![self.name, self.blood_group, self.contact, self.blood_bank_id],
        )
        .map_err(|e| {
            if is_unique_violation(&e) {
                DonorError::Duplicate {
                    name: self.name.clone(),
                    contact: self.contact.clone(),
                }
            } else {
                DonorError::Database(e.to_string())
            }
        })?;

        let id = conn.last_insert_rowid();
        self.id = Some(id);
        Ok(id)
    }
}

/// Whether a rusqlite error is a UNIQUE or PRIMARY KEY constraint failure.
fn is_unique_violation(err: &rusqlite::Error) -> bool {
    match err {
        rusqlite::Error::SqliteFailure(e, _) => {
            e.code == ErrorCode::ConstraintViolation
                && matches!(
                    e.extended_code,
                    rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE | rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY
                )
        }
        _ => false,
    }
}
