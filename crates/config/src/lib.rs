//! Configuration management for the interrupt guard
//!
//! Supports loading configuration from:
//! - YAML/TOML/JSON files (`config/default`, `config/{env}`)
//! - Environment variables (INTERRUPT_GUARD__ prefix)
//! - The legacy `AGENT_FILLER_*` variables
//! - A standalone lexicon file with per-language filler lists

pub mod legacy;
pub mod lexicon_file;
pub mod settings;

pub use legacy::{parse_word_list, LegacyOverrides};
pub use lexicon_file::LexiconFile;
pub use settings::{load_settings, ObservabilityConfig, RuntimeEnvironment, Settings};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

impl From<interrupt_guard_core::Error> for ConfigError {
    fn from(err: interrupt_guard_core::Error) -> Self {
        let interrupt_guard_core::Error::InvalidConfiguration { field, message } = err;
        ConfigError::InvalidValue { field, message }
    }
}

impl From<ConfigError> for interrupt_guard_core::Error {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::InvalidValue { field, message } => {
                interrupt_guard_core::Error::InvalidConfiguration { field, message }
            }
            other => interrupt_guard_core::Error::invalid_config("config", other.to_string()),
        }
    }
}
