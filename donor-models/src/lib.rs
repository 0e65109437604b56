//! Donor Models - Database schema, models, migrations, and queries.
//!
//! This crate owns all data persistence: SQLite database initialization,
//! the `blood_banks` and `donors` tables, versioned migrations, and the
//! joined donor listing used by search.

pub mod db;
pub mod schema;
pub mod models;
pub mod queries;
pub mod migrations;

// Re-export key types
pub use db::{Database, DbPool, DatabaseStats};
pub use models::blood_bank::BloodBank;
pub use models::blood_group::BloodGroup;
pub use models::donor::Donor;
pub use queries::DonorListing;
