//! Application-wide constants.

/// Application name.
pub const APP_NAME: &str = "DonorBank";

/// Application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// File name of the SQLite database inside the data directory.
pub const DB_FILE_NAME: &str = "donorbank.db";

/// Base name of the rotated log files.
pub const LOG_FILE_NAME: &str = "donorbank.log";

/// Database schema version.
pub const DB_SCHEMA_VERSION: i32 = 1;

/// Blood groups offered by the registration form, in display order.
/// The first entry is the form default.
pub const BLOOD_GROUPS: &[&str] = &["A+", "A-", "B+", "B-", "AB+", "AB-", "O+", "O-"];

/// Starter blood bank names offered as form choices. These seed the
/// choice list only; the blood_banks table is populated separately.
pub const DEFAULT_BLOOD_BANK_CHOICES: &[&str] = &["Blood Bank 1", "Blood Bank 2", "Blood Bank 3"];

/// Column headings of the donor results table.
pub const RESULT_COLUMNS: &[&str] = &["ID", "Name", "Blood Group", "Contact", "Blood Bank"];
