//! Donor Services - Registry operations independent of any UI toolkit.
//!
//! This crate provides:
//! - `DonorStore`, the storage-access interface the operations run against
//! - Donor registration (validation, blood bank resolution, duplicate check)
//! - Donor search (substring match over name and blood group)
//! - Donor removal by selected identifier
//! - `DonorForm` and `DonorDesk`, the form, results, selection, and status
//!   line state a front end renders

pub mod store;
pub mod registrar;
pub mod search;
pub mod remover;
pub mod form;
pub mod desk;

// Re-export key types
pub use store::DonorStore;
pub use registrar::Registration;
pub use form::DonorForm;
pub use desk::DonorDesk;
