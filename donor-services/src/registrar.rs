//! Donor registration.
//!
//! Registration validates the form input, resolves the chosen blood bank,
//! rejects a (name, contact) pair that is already registered, and inserts
//! the donor. The pre-insert lookup only saves a round trip; the unique
//! index on `donors(name, contact)` decides duplicates.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use donor_core::error::{DonorError, DonorResult};
use donor_models::{BloodGroup, Donor};

use crate::store::DonorStore;

/// Raw registration input, as entered in the form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub name: String,
    /// Blood group text; must name one of the eight groups.
    pub blood_group: String,
    pub contact: String,
    /// Name of an existing blood bank.
    pub blood_bank: String,
}

impl Registration {
    pub fn new(
        name: impl Into<String>,
        blood_group: impl Into<String>,
        contact: impl Into<String>,
        blood_bank: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            blood_group: blood_group.into(),
            contact: contact.into(),
            blood_bank: blood_bank.into(),
        }
    }
}

/// Register a new donor and return the stored row.
///
/// Name and contact are trimmed before they are checked and stored.
///
/// # Errors
/// - `InvalidInput` for an empty name or contact
/// - `InvalidBloodGroup` for blood group text outside the enumeration
/// - `BloodBankNotFound` if no blood bank has the given name
/// - `Duplicate` if the (name, contact) pair is already registered
pub fn register<S: DonorStore + ?Sized>(store: &S, registration: &Registration) -> DonorResult<Donor> {
    let name = required(&registration.name, "Name")?;
    let contact = required(&registration.contact, "Contact")?;
    let blood_group: BloodGroup = registration.blood_group.parse()?;

    let blood_bank_id = store
        .find_blood_bank_id(&registration.blood_bank)?
        .ok_or_else(|| DonorError::BloodBankNotFound(registration.blood_bank.clone()))?;

    if store.find_donor(name, contact)?.is_some() {
        warn!(name, contact, "rejected duplicate donor");
        return Err(DonorError::Duplicate {
            name: name.to_string(),
            contact: contact.to_string(),
        });
    }

    let mut donor = Donor::new(name, blood_group, contact, blood_bank_id);
    let id = store.insert_donor(&mut donor).map_err(|e| {
        if matches!(e, DonorError::Duplicate { .. }) {
            warn!(name, contact, "duplicate donor inserted concurrently");
        }
        e
    })?;

    info!(id, %blood_group, blood_bank_id, "donor registered");
    Ok(donor)
}

fn required<'a>(value: &'a str, field: &str) -> DonorResult<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DonorError::InvalidInput(format!("{field} is required")));
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_trims() {
        assert_eq!(required("  Alice ", "Name").unwrap(), "Alice");
        let err = required("   ", "Contact").unwrap_err();
        assert_eq!(err.user_message(), "Contact is required.");
    }

    #[test]
    fn test_registration_new() {
        let reg = Registration::new("Alice", "O+", "555-1111", "Blood Bank 1");
        assert_eq!(reg.blood_bank, "Blood Bank 1");
        assert_eq!(reg.blood_group, "O+");
    }
}
