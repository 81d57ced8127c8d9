//! Text processing traits

use serde::{Deserialize, Serialize};

/// Outcome of classifying one transcript fragment
///
/// Consumed by exhaustive matching in the interruption policy; there are no
/// string flags anywhere between the classifier and the policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Classification {
    /// Nothing but filler (or nothing at all)
    OnlyFiller,
    /// At least one token outside the filler vocabulary
    MeaningfulContent {
        /// Non-filler tokens in original order
        residual: Vec<String>,
    },
    /// At least one stop entry; overrides everything else
    StopCommand {
        /// The stop entry that matched first
        matched: String,
    },
}

impl Classification {
    /// Tokens that count as meaningful speech
    pub fn residual(&self) -> &[String] {
        match self {
            Self::MeaningfulContent { residual } => residual,
            Self::OnlyFiller | Self::StopCommand { .. } => &[],
        }
    }

    pub fn is_only_filler(&self) -> bool {
        matches!(self, Self::OnlyFiller)
    }

    pub fn is_stop_command(&self) -> bool {
        matches!(self, Self::StopCommand { .. })
    }

    /// Short label for logs
    pub fn label(&self) -> &'static str {
        match self {
            Self::OnlyFiller => "only_filler",
            Self::MeaningfulContent { .. } => "meaningful_content",
            Self::StopCommand { .. } => "stop_command",
        }
    }
}

/// Filler-vs-content classification interface
///
/// Implementations:
/// - `LexiconClassifier` - word-level lookup against a multilingual vocabulary
///
/// Both methods take `&self`: vocabulary updates may arrive from a control
/// plane while recognition callbacks are classifying on another task.
///
/// # Example
///
/// ```ignore
/// let classifier: Arc<dyn UtteranceClassifier> = Arc::new(LexiconClassifier::with_defaults());
/// assert!(classifier.classify("umm, haan").is_only_filler());
/// classifier.add_ignored_words(&["okay".to_string()]);
/// ```
pub trait UtteranceClassifier: Send + Sync + 'static {
    /// Classify a fragment of user speech. Never fails.
    fn classify(&self, text: &str) -> Classification;

    /// Add entries to the filler vocabulary (additive only)
    ///
    /// # Returns
    /// Number of entries that were not already present
    fn add_ignored_words(&self, words: &[String]) -> usize;
}
