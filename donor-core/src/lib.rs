//! Donor Core - Foundation types, error handling, configuration, and logging.
//!
//! This crate provides the shared foundation used by the other donor registry crates:
//! - Application configuration (database location, logging, form defaults, bootstrap banks)
//! - A single error type covering storage, configuration, and registry rule failures
//! - Structured logging with tracing
//! - Platform directory resolution
//! - Fixed enumerations and constants

pub mod config;
pub mod error;
pub mod logging;
pub mod platform;
pub mod constants;

// Re-export commonly used items at the crate root
pub use config::AppConfig;
pub use error::{DonorError, DonorResult};
pub use logging::init_logging;
pub use platform::Platform;
