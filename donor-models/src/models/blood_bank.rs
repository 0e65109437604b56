//! Blood bank entity model.

use serde::{Deserialize, Serialize};
use rusqlite::{params, Connection, OptionalExtension, Row};
use donor_core::config::BloodBankSeed;
use donor_core::error::{DonorError, DonorResult};

/// A named, located facility that donors are registered with.
///
/// Rows are only ever written by bootstrap seeding; the registry itself
/// treats blood banks as read-only reference data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BloodBank {
    pub id: i64,
    pub name: String,
    pub location: String,
}

impl BloodBank {
    /// Construct a BloodBank from a database row.
    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            location: row.get("location")?,
        })
    }

    /// Find a blood bank by its identifier.
    pub fn find_by_id(conn: &Connection, id: i64) -> DonorResult<Option<Self>> {
        conn.query_row("SELECT * FROM blood_banks WHERE id = ?1", [id], Self::from_row)
            .optional()
            .map_err(|e| DonorError::Database(e.to_string()))
    }

    /// Find a blood bank by its exact name.
    pub fn find_by_name(conn: &Connection, name: &str) -> DonorResult<Option<Self>> {
        conn.query_row("SELECT * FROM blood_banks WHERE name = ?1", [name], Self::from_row)
            .optional()
            .map_err(|e| DonorError::Database(e.to_string()))
    }

    /// Resolve a blood bank name to its identifier.
    pub fn find_id_by_name(conn: &Connection, name: &str) -> DonorResult<Option<i64>> {
        conn.query_row("SELECT id FROM blood_banks WHERE name = ?1", [name], |row| row.get(0))
            .optional()
            .map_err(|e| DonorError::Database(e.to_string()))
    }

    /// List all blood banks ordered by identifier.
    pub fn list(conn: &Connection) -> DonorResult<Vec<Self>> {
        let mut stmt = conn
            .prepare("SELECT * FROM blood_banks ORDER BY id")
            .map_err(|e| DonorError::Database(e.to_string()))?;

        let banks = stmt
            .query_map([], Self::from_row)
            .map_err(|e| DonorError::Database(e.to_string()))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| DonorError::Database(e.to_string()))?;

        Ok(banks)
    }

    /// Insert this blood bank unless a row with the same id or name exists.
    /// Returns true if a row was written.
    pub fn insert_if_missing(&self, conn: &Connection) -> DonorResult<bool> {
        let changed = conn
            .execute(
                "INSERT OR IGNORE INTO blood_banks (id, name, location) VALUES (?1, ?2, ?3)",
                params![self.id, self.name, self.location],
            )
            .map_err(|e| DonorError::Database(e.to_string()))?;
        Ok(changed > 0)
    }
}

impl From<&BloodBankSeed> for BloodBank {
    fn from(seed: &BloodBankSeed) -> Self {
        Self {
            id: seed.id,
            name: seed.name.clone(),
            location: seed.location.clone(),
        }
    }
}
