//! Core traits and types for the interrupt guard
//!
//! This crate provides foundational types used across all other crates:
//! - Transcript fragments as delivered by the STT
//! - Language tags for the filler lexicons
//! - The classification seam between lexicon and policy
//! - Frames and the `FrameProcessor` trait
//! - Error types

pub mod error;
pub mod language;
pub mod transcript;
pub mod traits;

pub use error::{Error, Result};
pub use language::Language;
pub use transcript::TranscriptFragment;

pub use traits::{
    // Text processing
    Classification, UtteranceClassifier,
    // Pipeline
    ControlFrame, Frame, FrameProcessor, InterruptReason, ProcessorContext,
};
