//! Storage-access interface for the registry operations.
//!
//! The registrar, search, and remover only talk to storage through
//! `DonorStore`, so they can run against the SQLite `Database` or against a
//! test double.

use donor_core::error::DonorResult;
use donor_models::{queries, BloodBank, Database, Donor, DonorListing};

/// Storage operations needed by the registry.
pub trait DonorStore {
    /// Resolve a blood bank name to its identifier.
    fn find_blood_bank_id(&self, name: &str) -> DonorResult<Option<i64>>;

    /// All blood banks, ordered by identifier.
    fn list_blood_banks(&self) -> DonorResult<Vec<BloodBank>>;

    /// The donor registered under an exact (name, contact) pair, if any.
    fn find_donor(&self, name: &str, contact: &str) -> DonorResult<Option<Donor>>;

    /// Insert a donor, assigning `donor.id`. Must fail with
    /// `DonorError::Duplicate` if the (name, contact) pair is taken.
    fn insert_donor(&self, donor: &mut Donor) -> DonorResult<i64>;

    /// Donors whose name or blood group contains `criteria`, joined with
    /// their blood bank names.
    fn search_donors(&self, criteria: &str) -> DonorResult<Vec<DonorListing>>;

    /// Delete a donor. Returns false if no row had that identifier.
    fn delete_donor(&self, id: i64) -> DonorResult<bool>;

    /// Total number of donors.
    fn count_donors(&self) -> DonorResult<i64>;
}

impl DonorStore for Database {
    fn find_blood_bank_id(&self, name: &str) -> DonorResult<Option<i64>> {
        let conn = self.conn()?;
        BloodBank::find_id_by_name(&conn, name)
    }

    fn list_blood_banks(&self) -> DonorResult<Vec<BloodBank>> {
        let conn = self.conn()?;
        BloodBank::list(&conn)
    }

    fn find_donor(&self, name: &str, contact: &str) -> DonorResult<Option<Donor>> {
        let conn = self.conn()?;
        Donor::find_by_identity(&conn, name, contact)
    }

    fn insert_donor(&self, donor: &mut Donor) -> DonorResult<i64> {
        let conn = self.conn()?;
        donor.insert(&conn)
    }

    fn search_donors(&self, criteria: &str) -> DonorResult<Vec<DonorListing>> {
        let conn = self.conn()?;
        queries::search_donors(&conn, criteria)
    }

    fn delete_donor(&self, id: i64) -> DonorResult<bool> {
        let conn = self.conn()?;
        Donor::delete(&conn, id)
    }

    fn count_donors(&self) -> DonorResult<i64> {
        let conn = self.conn()?;
        Donor::count(&conn)
    }
}
