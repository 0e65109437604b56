//! Global error types for the donor registry.
//!
//! Storage, configuration, and registry rule failures are unified into a
//! single `DonorError` enum with conversions from underlying library errors.
//! Rule failures (duplicates, missing selection, unknown blood bank) are
//! recoverable and carry the text shown in the status line.

use thiserror::Error;

/// Convenience type alias for Results using DonorError.
pub type DonorResult<T> = Result<T, DonorError>;

/// Unified error type covering all error categories in the registry.
#[derive(Error, Debug)]
pub enum DonorError {
    // -- Configuration errors --
    /// Failed to load or parse application configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// A required configuration value is missing.
    #[error("missing configuration: {0}")]
    MissingConfig(String),

    // -- Database errors --
    /// SQLite database error.
    #[error("database error: {0}")]
    Database(String),

    /// Database migration failed.
    #[error("migration error: {0}")]
    Migration(String),

    /// Database connection pool error.
    #[error("connection pool error: {0}")]
    Pool(String),

    /// Database integrity check failed.
    #[error("database integrity check failed: {0}")]
    IntegrityCheck(String),

    // -- Registry rule errors --
    /// A donor with the same name and contact is already registered.
    #[error("donor already exists: {name} ({contact})")]
    Duplicate {
        /// Donor name that collided.
        name: String,
        /// Contact string that collided.
        contact: String,
    },

    /// Delete was requested with no donor row selected.
    #[error("no donor selected")]
    SelectionRequired,

    /// The chosen blood bank name does not match any stored blood bank.
    #[error("blood bank not found: {0}")]
    BloodBankNotFound(String),

    /// The selected donor id no longer exists.
    #[error("donor not found: {0}")]
    DonorNotFound(i64),

    /// Blood group text outside the fixed enumeration.
    #[error("invalid blood group: {0}")]
    InvalidBloodGroup(String),

    /// A required form field was empty or malformed.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    // -- File/IO errors --
    /// File system operation failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    // -- Generic --
    /// An unexpected internal error.
    #[error("internal error: {0}")]
    Internal(String),

    /// Wrapping anyhow errors for interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DonorError {
    /// Whether the error should be reported in the status line and the
    /// application returned to idle, rather than aborting.
    ///
    /// Storage failures count as recoverable: the user can retry once the
    /// database is reachable again.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Duplicate { .. }
                | Self::SelectionRequired
                | Self::BloodBankNotFound(_)
                | Self::DonorNotFound(_)
                | Self::InvalidBloodGroup(_)
                | Self::InvalidInput(_)
                | Self::Database(_)
                | Self::Pool(_)
        )
    }

    /// Text for the status message area.
    pub fn user_message(&self) -> String {
        match self {
            Self::Duplicate { .. } => {
                "Donor with the same name and contact already exists!".to_string()
            }
            Self::SelectionRequired => "Please select a donor to delete.".to_string(),
            Self::BloodBankNotFound(name) => format!("Blood bank \"{name}\" does not exist."),
            Self::DonorNotFound(id) => format!("Donor {id} no longer exists."),
            Self::InvalidBloodGroup(group) => format!("\"{group}\" is not a valid blood group."),
            Self::InvalidInput(msg) => format!("{msg}."),
            Self::Database(_) | Self::Pool(_) => format!("Storage unavailable: {self}"),
            other => other.to_string(),
        }
    }
}

impl From<serde_json::Error> for DonorError {
    fn from(e: serde_json::Error) -> Self {
        DonorError::Serialization(e.to_string())
    }
}

impl From<toml::de::Error> for DonorError {
    fn from(e: toml::de::Error) -> Self {
        DonorError::Config(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_donor_error_display() {
        let err = DonorError::Config("bad value".to_string());
        assert_eq!(err.to_string(), "configuration error: bad value");
    }

    #[test]
    fn test_user_messages() {
        let dup = DonorError::Duplicate {
            name: "Alice".into(),
            contact: "555-1111".into(),
        };
        assert_eq!(
            dup.user_message(),
            "Donor with the same name and contact already exists!"
        );
        assert_eq!(
            DonorError::SelectionRequired.user_message(),
            "Please select a donor to delete."
        );
        assert_eq!(
            DonorError::BloodBankNotFound("Nowhere".into()).user_message(),
            "Blood bank \"Nowhere\" does not exist."
        );
    }

    #[test]
    fn test_recoverable_classification() {
        assert!(DonorError::SelectionRequired.is_recoverable());
        assert!(DonorError::DonorNotFound(7).is_recoverable());
        assert!(DonorError::Database("disk I/O error".into()).is_recoverable());
        assert!(!DonorError::Config("broken".into()).is_recoverable());
        assert!(!DonorError::Internal("bug".into()).is_recoverable());
    }
}
