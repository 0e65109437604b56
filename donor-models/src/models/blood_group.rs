//! ABO/Rh blood group enumeration.

use std::fmt;
use std::str::FromStr;

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};
use donor_core::error::DonorError;

/// One of the eight blood groups a donor can be registered with.
///
/// Stored in the `donors.blood_group` column as its display text (`"AB+"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BloodGroup {
    #[default]
    #[serde(rename = "A+")]
    APositive,
    #[serde(rename = "A-")]
    ANegative,
    #[serde(rename = "B+")]
    BPositive,
    #[serde(rename = "B-")]
    BNegative,
    #[serde(rename = "AB+")]
    AbPositive,
    #[serde(rename = "AB-")]
    AbNegative,
    #[serde(rename = "O+")]
    OPositive,
    #[serde(rename = "O-")]
    ONegative,
}

impl BloodGroup {
    /// All groups in form display order.
    pub const ALL: [BloodGroup; 8] = [
        BloodGroup::APositive,
        BloodGroup::ANegative,
        BloodGroup::BPositive,
        BloodGroup::BNegative,
        BloodGroup::AbPositive,
        BloodGroup::AbNegative,
        BloodGroup::OPositive,
        BloodGroup::ONegative,
    ];

    /// Display and storage text.
    pub fn as_str(&self) -> &'static str {
        match self {
            BloodGroup::APositive => "A+",
            BloodGroup::ANegative => "A-",
            BloodGroup::BPositive => "B+",
            BloodGroup::BNegative => "B-",
            BloodGroup::AbPositive => "AB+",
            BloodGroup::AbNegative => "AB-",
            BloodGroup::OPositive => "O+",
            BloodGroup::ONegative => "O-",
        }
    }
}

impl fmt::Display for BloodGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BloodGroup {
    type Err = DonorError;

    /// Parses the display text. Surrounding whitespace and letter case are
    /// ignored, so `" ab+ "` yields `AbPositive`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase();
        Self::ALL
            .iter()
            .copied()
            .find(|g| g.as_str() == normalized)
            .ok_or_else(|| DonorError::InvalidBloodGroup(s.to_string()))
    }
}

impl ToSql for BloodGroup {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for BloodGroup {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|e: DonorError| FromSqlError::Other(Box::new(e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use donor_core::constants::BLOOD_GROUPS;

    #[test]
    fn test_all_matches_form_constants() {
        let names: Vec<&str> = BloodGroup::ALL.iter().map(|g| g.as_str()).collect();
        assert_eq!(names, BLOOD_GROUPS);
        assert_eq!(BloodGroup::default().as_str(), BLOOD_GROUPS[0]);
    }

    #[test]
    fn test_parse_normalizes_input() {
        assert_eq!(" ab+ ".parse::<BloodGroup>().unwrap(), BloodGroup::AbPositive);
        assert_eq!("O-".parse::<BloodGroup>().unwrap(), BloodGroup::ONegative);
    }

    #[test]
    fn test_parse_rejects_unknown() {
        let err = "C+".parse::<BloodGroup>().unwrap_err();
        assert!(matches!(err, DonorError::InvalidBloodGroup(ref s) if s == "C+"));
        assert!("".parse::<BloodGroup>().is_err());
    }

    #[test]
    fn test_serde_uses_display_text() {
        let json = serde_json::to_string(&BloodGroup::AbNegative).unwrap();
        assert_eq!(json, "\"AB-\"");
        let back: BloodGroup = serde_json::from_str("\"B+\"").unwrap();
        assert_eq!(back, BloodGroup::BPositive);
    }

    #[test]
    fn test_sql_roundtrip_column() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        let group: BloodGroup = conn
            .query_row("SELECT ?1", [BloodGroup::OPositive], |row| row.get(0))
            .unwrap();
        assert_eq!(group, BloodGroup::OPositive);

        let bad: rusqlite::Result<BloodGroup> =
            conn.query_row("SELECT 'XY'", [], |row| row.get(0));
        assert!(bad.is_err());
    }
}
