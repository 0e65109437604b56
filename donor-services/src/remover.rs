//! Donor removal.

use tracing::{info, warn};

use donor_core::error::{DonorError, DonorResult};

use crate::store::DonorStore;

/// Delete the selected donor.
///
/// `selected` is the identifier of the highlighted result row, or `None`
/// when nothing is selected. Callers refresh their results afterwards,
/// including after `DonorNotFound`.
pub fn remove<S: DonorStore + ?Sized>(store: &S, selected: Option<i64>) -> DonorResult<i64> {
    let Some(id) = selected else {
        warn!("delete requested with no donor selected");
        return Err(DonorError::SelectionRequired);
    };

    if !store.delete_donor(id)? {
        warn!(id, "selected donor no longer exists");
        return Err(DonorError::DonorNotFound(id));
    }

    info!(id, "donor deleted");
    Ok(id)
}
