//! Core traits for the interrupt guard
//!
//! ```text
//! Text Processing:
//!   - UtteranceClassifier: fragment text → Classification
//!
//! Pipeline:
//!   - FrameProcessor: Process frames in the pipeline
//! ```

mod text_processing;
mod pipeline;

pub use text_processing::{Classification, UtteranceClassifier};
pub use pipeline::{ControlFrame, Frame, FrameProcessor, InterruptReason, ProcessorContext};
