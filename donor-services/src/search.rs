//! Donor search.

use tracing::debug;

use donor_core::error::DonorResult;
use donor_models::DonorListing;

use crate::store::DonorStore;

/// Find donors whose name or blood group contains `criteria`.
///
/// The match is case-sensitive and literal; empty criteria return every
/// donor. Each call produces a complete result set meant to replace
/// whatever is currently displayed.
pub fn search<S: DonorStore + ?Sized>(store: &S, criteria: &str) -> DonorResult<Vec<DonorListing>> {
    let rows = store.search_donors(criteria)?;
    debug!(criteria, matches = rows.len(), "donor search");
    Ok(rows)
}
