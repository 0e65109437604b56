//! Entity model definitions.

pub mod blood_bank;
pub mod blood_group;
pub mod donor;
