//! Shared test utilities for integration tests.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};

use donor_core::config::{BloodBankSeed, DatabaseConfig};
use donor_core::error::{DonorError, DonorResult};
use donor_models::{BloodBank, Database, Donor, DonorListing};
use donor_services::{DonorStore, Registration};
use tempfile::TempDir;

/// Create a temporary database with full schema and migrations applied.
/// Returns the Database and the TempDir (must be held alive for the duration of the test).
pub fn create_test_db() -> (Database, TempDir) {
    let dir = TempDir::new().expect("failed to create temp dir");
    let path = dir.path().join("test.db");
    let config = DatabaseConfig::default();
    let db = Database::init(&path, &config).expect("failed to init test database");
    (db, dir)
}

/// The three starter blood banks, ids 1..=3.
pub fn starter_banks() -> Vec<BloodBankSeed> {
    (1..=3)
        .map(|i| BloodBankSeed {
            id: i,
            name: format!("Blood Bank {i}"),
            location: format!("Ward {i}"),
        })
        .collect()
}

/// Create a temporary database with the starter blood banks inserted.
pub fn create_seeded_db() -> (Database, TempDir) {
    let (db, dir) = create_test_db();
    db.bootstrap_blood_banks(&starter_banks())
        .expect("failed to seed blood banks");
    (db, dir)
}

/// Registration at "Blood Bank 1".
pub fn registration(name: &str, blood_group: &str, contact: &str) -> Registration {
    Registration::new(name, blood_group, contact, "Blood Bank 1")
}

/// In-memory `DonorStore` with the same matching rules as SQLite.
#[derive(Default)]
pub struct MemoryStore {
    banks: RefCell<Vec<BloodBank>>,
    donors: RefCell<Vec<Donor>>,
    next_id: Cell<i64>,
}

impl MemoryStore {
    pub fn with_banks(seeds: &[BloodBankSeed]) -> Self {
        let store = Self::default();
        store
            .banks
            .borrow_mut()
            .extend(seeds.iter().map(BloodBank::from));
        store
    }

    fn bank_name(&self, id: i64) -> String {
        self.banks
            .borrow()
            .iter()
            .find(|b| b.id == id)
            .map(|b| b.name.clone())
            .unwrap_or_default()
    }
}

impl DonorStore for MemoryStore {
    fn find_blood_bank_id(&self, name: &str) -> DonorResult<Option<i64>> {
        Ok(self.banks.borrow().iter().find(|b| b.name == name).map(|b| b.id))
    }

    fn list_blood_banks(&self) -> DonorResult<Vec<BloodBank>> {
        Ok(self.banks.borrow().clone())
    }

    fn find_donor(&self, name: &str, contact: &str) -> DonorResult<Option<Donor>> {
        Ok(self
            .donors
            .borrow()
            .iter()
            .find(|d| d.name == name && d.contact == contact)
            .cloned())
    }

    fn insert_donor(&self, donor: &mut Donor) -> DonorResult<i64> {
        if self.find_donor(&donor.name, &donor.contact)?.is_some() {
            return Err(DonorError::Duplicate {
                name: donor.name.clone(),
                contact: donor.contact.clone(),
            });
        }
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        donor.id = Some(id);
        self.donors.borrow_mut().push(donor.clone());
        Ok(id)
    }

    fn search_donors(&self, criteria: &str) -> DonorResult<Vec<DonorListing>> {
        Ok(self
            .donors
            .borrow()
            .iter()
            .filter(|d| d.name.contains(criteria) || d.blood_group.as_str().contains(criteria))
            .map(|d| DonorListing {
                id: d.id.unwrap_or_default(),
                name: d.name.clone(),
                blood_group: d.blood_group,
                contact: d.contact.clone(),
                blood_bank_name: self.bank_name(d.blood_bank_id),
            })
            .collect())
    }

    fn delete_donor(&self, id: i64) -> DonorResult<bool> {
        let mut donors = self.donors.borrow_mut();
        let before = donors.len();
        donors.retain(|d| d.id != Some(id));
        Ok(donors.len() < before)
    }

    fn count_donors(&self) -> DonorResult<i64> {
        Ok(self.donors.borrow().len() as i64)
    }
}

/// Store whose every operation fails like a dropped connection.
pub struct FailingStore;

impl FailingStore {
    fn lost<T>() -> DonorResult<T> {
        Err(DonorError::Database("connection lost".into()))
    }
}

impl DonorStore for FailingStore {
    fn find_blood_bank_id(&self, _name: &str) -> DonorResult<Option<i64>> {
        Self::lost()
    }
    fn list_blood_banks(&self) -> DonorResult<Vec<BloodBank>> {
        Self::lost()
    }
    fn find_donor(&self, _name: &str, _contact: &str) -> DonorResult<Option<Donor>> {
        Self::lost()
    }
    fn insert_donor(&self, _donor: &mut Donor) -> DonorResult<i64> {
        Self::lost()
    }
    fn search_donors(&self, _criteria: &str) -> DonorResult<Vec<DonorListing>> {
        Self::lost()
    }
    fn delete_donor(&self, _id: i64) -> DonorResult<bool> {
        Self::lost()
    }
    fn count_donors(&self) -> DonorResult<i64> {
        Self::lost()
    }
}
