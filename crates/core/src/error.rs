//! Error types shared across the interrupt guard crates

use thiserror::Error;

/// Result type alias using our Error
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type
///
/// Runtime inputs (transcripts, lifecycle signals) never produce errors;
/// everything here is raised at construction time.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Rejected configuration value, fatal to startup
    #[error("Invalid configuration for {field}: {message}")]
    InvalidConfiguration { field: String, message: String },
}

impl Error {
    /// Shorthand for an `InvalidConfiguration` error
    pub fn invalid_config(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            field: field.into(),
            message: message.into(),
        }
    }
}
