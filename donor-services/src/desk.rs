//! Donor desk session state.
//!
//! `DonorDesk` holds everything a front end displays: the registration form,
//! the search criteria, the current result rows, the selected row, and a
//! single status line. Each operation runs to completion and leaves the desk
//! idle. Recoverable failures are written to the status line and returned;
//! the next successful operation clears the status line.

use tracing::debug;

use donor_core::error::{DonorError, DonorResult};
use donor_models::{Donor, DonorListing};

use crate::form::DonorForm;
use crate::store::DonorStore;
use crate::{registrar, remover, search};

/// Interactive registry session over a storage backend.
pub struct DonorDesk<S: DonorStore> {
    store: S,
    form: DonorForm,
    criteria: String,
    results: Vec<DonorListing>,
    selected: Option<usize>,
    status: Option<String>,
}

impl<S: DonorStore> DonorDesk<S> {
    /// Create a desk with an empty result table and no status message.
    pub fn new(store: S, form: DonorForm) -> Self {
        Self {
            store,
            form,
            criteria: String::new(),
            results: Vec::new(),
            selected: None,
            status: None,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn form(&self) -> &DonorForm {
        &self.form
    }

    /// Mutable access for editing form fields.
    pub fn form_mut(&mut self) -> &mut DonorForm {
        &mut self.form
    }

    /// Criteria of the last successful search.
    pub fn criteria(&self) -> &str {
        &self.criteria
    }

    pub fn results(&self) -> &[DonorListing] {
        &self.results
    }

    /// Current status line text, if any.
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Index of the selected result row.
    pub fn selected_row(&self) -> Option<usize> {
        self.selected
    }

    /// The donor listed in the selected row.
    pub fn selected_donor(&self) -> Option<&DonorListing> {
        self.selected.and_then(|i| self.results.get(i))
    }

    /// Register the donor described by the form.
    ///
    /// On success the form is reset and the status line cleared. On failure
    /// the form keeps its values so the user can correct them.
    pub fn register(&mut self) -> DonorResult<Donor> {
        let registration = self.form.registration();
        match registrar::register(&self.store, &registration) {
            Ok(donor) => {
                self.form.reset();
                self.status = None;
                Ok(donor)
            }
            Err(e) => Err(self.report(e)),
        }
    }

    /// Run a search and replace the result rows. Clears the selection.
    pub fn search(&mut self, criteria: &str) -> DonorResult<usize> {
        match search::search(&self.store, criteria) {
            Ok(rows) => {
                self.criteria = criteria.to_string();
                self.results = rows;
                self.selected = None;
                self.status = None;
                Ok(self.results.len())
            }
            Err(e) => Err(self.report(e)),
        }
    }

    /// Re-run the last search.
    pub fn refresh(&mut self) -> DonorResult<usize> {
        let criteria = std::mem::take(&mut self.criteria);
        let result = self.search(&criteria);
        if result.is_err() {
            self.criteria = criteria;
        }
        result
    }

    /// Select a result row by index.
    pub fn select(&mut self, row: usize) -> DonorResult<&DonorListing> {
        if row >= self.results.len() {
            let err = DonorError::InvalidInput(format!(
                "Row {} is not in the results ({} shown)",
                row + 1,
                self.results.len()
            ));
            return Err(self.report(err));
        }
        self.selected = Some(row);
        Ok(&self.results[row])
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Delete the selected donor and refresh the results with the last
    /// criteria. Returns the deleted donor's identifier.
    pub fn delete_selected(&mut self) -> DonorResult<i64> {
        let selected_id = self.selected_donor().map(|d| d.id);
        match remover::remove(&self.store, selected_id) {
            Ok(id) => {
                self.refresh()?;
                Ok(id)
            }
            Err(e @ DonorError::DonorNotFound(_)) => {
                // The row is stale; show the current state anyway.
                if let Err(refresh_err) = self.refresh() {
                    debug!("refresh after stale delete failed: {refresh_err}");
                }
                Err(self.report(e))
            }
            Err(e) => Err(self.report(e)),
        }
    }

    fn report(&mut self, err: DonorError) -> DonorError {
        debug!("status: {err}");
        self.status = Some(err.user_message());
        err
    }
}
