//! Text processing errors

use thiserror::Error;

pub type Result<T> = std::result::Result<T, TextProcessingError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TextProcessingError {
    /// Entry listed as both filler and stop command
    #[error("'{entry}' is listed as both a filler and a stop command")]
    AmbiguousToken { entry: String },
}

impl From<TextProcessingError> for interrupt_guard_core::Error {
    fn from(err: TextProcessingError) -> Self {
        interrupt_guard_core::Error::invalid_config("lexicon", err.to_string())
    }
}
