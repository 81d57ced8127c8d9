//! Text processing for the interrupt guard
//!
//! This crate provides the **Lexicon Classifier**: it normalizes a fragment
//! of transcribed user speech and decides whether it is nothing but filler
//! ("umm", "haan", "euh"), contains meaningful content, or contains an
//! explicit stop command.
//!
//! # Example
//!
//! ```
//! use interrupt_guard_core::Classification;
//! use interrupt_guard_text_processing::LexiconClassifier;
//!
//! let classifier = LexiconClassifier::with_defaults();
//! assert_eq!(classifier.classify("Umm, haan..."), Classification::OnlyFiller);
//! assert!(classifier.classify("umm okay stop").is_stop_command());
//! ```

pub mod lexicon;

mod error;

pub use error::{Result, TextProcessingError};

pub use lexicon::{
    default_fillers, normalize, tokenize, LexiconClassifier, LexiconConfig, Vocabulary,
    VocabularySnapshot, DEFAULT_STOP_WORDS,
};
