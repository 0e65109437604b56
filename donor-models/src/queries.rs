//! Read queries that join donors with their blood banks.
//!
//! All queries use parameterized SQL and return domain model types.

use rusqlite::{Connection, Row};
use serde::Serialize;
use donor_core::error::{DonorError, DonorResult};

use crate::models::blood_group::BloodGroup;

/// One row of the donor results table: a donor with its blood bank name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DonorListing {
    pub id: i64,
    pub name: String,
    pub blood_group: BloodGroup,
    pub contact: String,
    pub blood_bank_name: String,
}

impl DonorListing {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            blood_group: row.get("blood_group")?,
            contact: row.get("contact")?,
            blood_bank_name: row.get("blood_bank_name")?,
        })
    }

    /// Cell values in results-table column order.
    pub fn cells(&self) -> [String; 5] {
        [
            self.id.to_string(),
            self.name.clone(),
            self.blood_group.to_string(),
            self.contact.clone(),
            self.blood_bank_name.clone(),
        ]
    }
}

/// Donors whose name or blood group contains `criteria`.
///
/// Matching is a case-sensitive substring test (`instr`), so `%` and `_` are
/// literal. Empty criteria match every donor. Rows come back in insertion
/// (id) order.
pub fn search_donors(conn: &Connection, criteria: &str) -> DonorResult<Vec<DonorListing>> {
    let mut stmt = conn
        .prepare(
            "SELECT donors.id, donors.name, donors.blood_group, donors.contact,
                    blood_banks.name AS blood_bank_name
             FROM donors
             INNER JOIN blood_banks ON donors.blood_bank_id = blood_banks.id
             WHERE ?1 = ''
                OR instr(donors.name, ?1) > 0
                OR instr(donors.blood_group, ?1) > 0
             ORDER BY donors.id",
        )
        .map_err(|e| DonorError::Database(e.to_string()))?;

    let rows = stmt
        .query_map([criteria], DonorListing::from_row)
        .map_err(|e| DonorError::Database(e.to_string()))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| DonorError::Database(e.to_string()))?;

    Ok(rows)
}

/// Number of donors registered with each blood group, in form order.
/// Groups with no donors are included with a zero count.
pub fn count_by_blood_group(conn: &Connection) -> DonorResult<Vec<(BloodGroup, i64)>> {
    let mut stmt = conn
        .prepare("SELECT COUNT(*) FROM donors WHERE blood_group = ?1")
        .map_err(|e| DonorError::Database(e.to_string()))?;

    BloodGroup::ALL
        .iter()
        .map(|group| {
            stmt.query_row([group], |row| row.get(0))
                .map(|count| (*group, count))
                .map_err(|e| DonorError::Database(e.to_string()))
        })
        .collect()
}
