//! Transcript fragments delivered by the STT collaborator

use std::time::{Duration, Instant};

use crate::Language;

/// A unit of transcribed user speech
///
/// Created per interim or final STT result and discarded once the
/// interruption policy has looked at it. Interim and final results share
/// one ordered stream; a final result supersedes earlier interims but is
/// never reordered ahead of them.
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptFragment {
    /// Raw transcribed text (may be empty)
    pub text: String,

    /// Is this a final result?
    pub is_final: bool,

    /// Language hint from the STT, if any
    pub language: Option<Language>,

    /// When the fragment reached us
    pub received_at: Instant,

    /// Estimated spoken duration of the fragment
    pub duration: Option<Duration>,

    /// Word count reported by the STT
    pub word_count: Option<usize>,
}

impl TranscriptFragment {
    /// Create a new fragment received at `received_at`
    pub fn new(text: impl Into<String>, is_final: bool, received_at: Instant) -> Self {
        Self {
            text: text.into(),
            is_final,
            language: None,
            received_at,
            duration: None,
            word_count: None,
        }
    }

    /// Create an interim (non-final) fragment
    pub fn interim(text: impl Into<String>, received_at: Instant) -> Self {
        Self::new(text, false, received_at)
    }

    /// Create a final fragment
    pub fn final_result(text: impl Into<String>, received_at: Instant) -> Self {
        Self::new(text, true, received_at)
    }

    /// Set the language hint
    pub fn with_language(mut self, language: Language) -> Self {
        self.language = Some(language);
        self
    }

    /// Set the estimated spoken duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    /// Set the STT word count
    pub fn with_word_count(mut self, word_count: usize) -> Self {
        self.word_count = Some(word_count);
        self
    }

    /// Spoken duration, zero when the STT did not report one
    pub fn spoken_duration(&self) -> Duration {
        self.duration.unwrap_or_default()
    }

    /// Check if the fragment carries no text at all
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}
