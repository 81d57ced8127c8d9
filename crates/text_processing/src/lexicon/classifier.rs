//! Lexicon-based filler classifier

use std::sync::Arc;

use interrupt_guard_core::{Classification, Language, UtteranceClassifier};

use super::defaults::{default_fillers, DEFAULT_STOP_WORDS};
use super::normalize::tokenize;
use super::vocabulary::Vocabulary;
use super::LexiconConfig;
use crate::Result;

/// Word-level filler classifier
///
/// Matching is on whole tokens (and contiguous token runs for phrase
/// entries), never substrings, so "umbrella" is not mistaken for "um".
pub struct LexiconClassifier {
    vocabulary: Arc<Vocabulary>,
    enabled: bool,
}

impl LexiconClassifier {
    /// Create a classifier over an existing vocabulary
    pub fn new(vocabulary: Arc<Vocabulary>) -> Self {
        Self {
            vocabulary,
            enabled: true,
        }
    }

    /// Classifier with every built-in lexicon and the default stop words
    pub fn with_defaults() -> Self {
        let fillers = Language::all().iter().flat_map(|language| {
            default_fillers(*language)
                .iter()
                .map(move |w| (Some(*language), w.to_string()))
        });
        let stops = DEFAULT_STOP_WORDS.iter().map(|w| w.to_string());
        match Vocabulary::new(fillers, stops) {
            Ok(vocabulary) => Self::new(Arc::new(vocabulary)),
            Err(e) => {
                // Built-in lists are disjoint; see defaults tests
                tracing::error!(error = %e, "Built-in lexicon is inconsistent, starting empty");
                Self::new(Arc::new(Vocabulary::default()))
            }
        }
    }

    /// Build from configuration
    pub fn from_config(config: &LexiconConfig) -> Result<Self> {
        let vocabulary = Vocabulary::new(config.filler_entries(), config.stop_entries())?;
        let classifier = Self::new(Arc::new(vocabulary)).with_enabled(config.enabled);

        tracing::info!(
            enabled = config.enabled,
            languages = ?config.languages,
            fillers = classifier.vocabulary.snapshot().filler_count(),
            stops = classifier.vocabulary.snapshot().stop_count(),
            "Lexicon classifier initialized"
        );

        Ok(classifier)
    }

    /// Turn filler matching on or off
    ///
    /// A disabled classifier still recognizes stop commands and still treats
    /// empty input as filler, but reports everything else as meaningful.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Shared vocabulary handle
    pub fn vocabulary(&self) -> &Arc<Vocabulary> {
        &self.vocabulary
    }

    /// Classify a fragment of user speech
    pub fn classify(&self, text: &str) -> Classification {
        let tokens = tokenize(text);
        if tokens.is_empty() {
            return Classification::OnlyFiller;
        }

        let snapshot = self.vocabulary.snapshot();

        // Stop entries win regardless of position or surrounding content
        if let Some(matched) = (0..tokens.len()).find_map(|i| snapshot.match_stop(&tokens, i)) {
            tracing::debug!(text, matched = %matched, "Stop command");
            return Classification::StopCommand { matched };
        }

        if !self.enabled {
            return Classification::MeaningfulContent { residual: tokens };
        }

        let mut residual = Vec::new();
        let mut i = 0;
        while i < tokens.len() {
            match snapshot.match_filler(&tokens, i) {
                Some(len) => i += len,
                None => {
                    residual.push(tokens[i].clone());
                    i += 1;
                }
            }
        }

        if residual.is_empty() {
            tracing::debug!(text, "Filler-only input");
            Classification::OnlyFiller
        } else {
            Classification::MeaningfulContent { residual }
        }
    }

    /// Check if the text contains only filler words
    pub fn is_only_filler(&self, text: &str) -> bool {
        self.classify(text).is_only_filler()
    }

    /// Inverse of [`is_only_filler`](Self::is_only_filler)
    pub fn contains_meaningful_content(&self, text: &str) -> bool {
        !self.is_only_filler(text)
    }

    /// Add words or phrases to the filler vocabulary
    pub fn add_ignored_words<W: AsRef<str>>(&self, words: &[W]) -> usize {
        self.vocabulary.add_fillers(words)
    }

    /// Currently ignored filler entries, sorted
    pub fn ignored_words(&self) -> Vec<String> {
        self.vocabulary.filler_entries()
    }

    /// Current stop entries, sorted
    pub fn stop_words(&self) -> Vec<String> {
        self.vocabulary.stop_entries()
    }
}

impl UtteranceClassifier for LexiconClassifier {
    fn classify(&self, text: &str) -> Classification {
        LexiconClassifier::classify(self, text)
    }

    fn add_ignored_words(&self, words: &[String]) -> usize {
        LexiconClassifier::add_ignored_words(self, words)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meaningful(words: &[&str]) -> Classification {
        Classification::MeaningfulContent {
            residual: words.iter().map(|w| w.to_string()).collect(),
        }
    }

    #[test]
    fn test_fillers_in_any_case_and_punctuation() {
        let classifier = LexiconClassifier::with_defaults();
        for text in ["umm", "Umm...", "HMM, uh!", "mhm mmm", "Ähm, also", "euh ben", "pues, este"] {
            assert_eq!(classifier.classify(text), Classification::OnlyFiller, "{text}");
        }
    }

    #[test]
    fn test_hindi_fillers() {
        let classifier = LexiconClassifier::with_defaults();
        assert_eq!(classifier.classify("haan theek hai"), Classification::OnlyFiller);
        assert_eq!(classifier.classify("accha, matlab"), Classification::OnlyFiller);
        assert_eq!(classifier.classify("हाँ, ठीक है।"), Classification::OnlyFiller);
    }

    #[test]
    fn test_empty_input_is_filler() {
        let classifier = LexiconClassifier::with_defaults();
        assert_eq!(classifier.classify(""), Classification::OnlyFiller);
        assert_eq!(classifier.classify("   "), Classification::OnlyFiller);
        assert_eq!(classifier.classify("?!"), Classification::OnlyFiller);
    }

    #[test]
    fn test_stop_anywhere_wins() {
        let classifier = LexiconClassifier::with_defaults();
        assert_eq!(
            classifier.classify("umm okay stop"),
            Classification::StopCommand { matched: "stop".into() }
        );
        assert_eq!(
            classifier.classify("Ruko! tell me about gold loans"),
            Classification::StopCommand { matched: "ruko".into() }
        );
        assert_eq!(
            classifier.classify("uh hold on a second"),
            Classification::StopCommand { matched: "hold on".into() }
        );
    }

    #[test]
    fn test_residual_keeps_order() {
        let classifier = LexiconClassifier::with_defaults();
        assert_eq!(
            classifier.classify("umm tell me, uh, about the weather"),
            meaningful(&["tell", "me", "about", "the", "weather"])
        );
    }

    #[test]
    fn test_word_level_not_substring() {
        let classifier = LexiconClassifier::with_defaults();
        assert_eq!(classifier.classify("umbrella"), meaningful(&["umbrella"]));
        assert_eq!(classifier.classify("hmmm"), meaningful(&["hmmm"]));
    }

    #[test]
    fn test_phrase_needs_whole_run() {
        let classifier = LexiconClassifier::with_defaults();
        // "you know" is a filler phrase; "you" alone is not
        assert_eq!(classifier.classify("you know"), Classification::OnlyFiller);
        assert_eq!(classifier.classify("you"), meaningful(&["you"]));
        assert_eq!(classifier.classify("i mean the blue one"), meaningful(&["the", "blue", "one"]));
    }

    #[test]
    fn test_add_ignored_words_extends_fillers() {
        let classifier = LexiconClassifier::with_defaults();
        assert_eq!(classifier.classify("okay"), meaningful(&["okay"]));

        assert_eq!(classifier.add_ignored_words(&["okay", "Alright"]), 2);
        assert_eq!(classifier.add_ignored_words(&["okay"]), 0);

        assert_eq!(classifier.classify("okay, alright"), Classification::OnlyFiller);
        assert!(classifier.ignored_words().contains(&"alright".to_string()));
    }

    #[test]
    fn test_disabled_classifier() {
        let classifier = LexiconClassifier::with_defaults().with_enabled(false);
        assert!(!classifier.is_enabled());
        assert_eq!(classifier.classify("umm"), meaningful(&["umm"]));
        assert_eq!(classifier.classify(""), Classification::OnlyFiller);
        assert!(classifier.classify("umm stop").is_stop_command());
    }

    #[test]
    fn test_from_config_replacement_list() {
        let config = LexiconConfig {
            ignored_words: Some(vec!["umm".into(), "yeah".into()]),
            ..Default::default()
        };
        let classifier = LexiconClassifier::from_config(&config).unwrap();
        assert!(classifier.is_only_filler("yeah umm"));
        assert!(classifier.contains_meaningful_content("haan"));
    }

    #[test]
    fn test_from_config_rejects_overlap() {
        let config = LexiconConfig {
            extra_stop_words: vec!["umm".into()],
            ..Default::default()
        };
        assert!(LexiconClassifier::from_config(&config).is_err());
    }

    #[test]
    fn test_trait_object() {
        let classifier: Arc<dyn UtteranceClassifier> = Arc::new(LexiconClassifier::with_defaults());
        assert_eq!(classifier.add_ignored_words(&["yeah".to_string()]), 1);
        assert!(classifier.classify("yeah").is_only_filler());
    }
}
