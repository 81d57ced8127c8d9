//! Filler lexicon
//!
//! - `normalize`: lowercasing, punctuation stripping, tokenization
//! - `defaults`: built-in filler lists per language and stop commands
//! - `vocabulary`: disjoint filler/stop sets with snapshot-and-swap updates
//! - `classifier`: `LexiconClassifier`, the `UtteranceClassifier` implementation

mod classifier;
mod defaults;
mod normalize;
mod vocabulary;

pub use classifier::LexiconClassifier;
pub use defaults::{default_fillers, DEFAULT_STOP_WORDS};
pub use normalize::{normalize, normalize_entry, tokenize};
pub use vocabulary::{Vocabulary, VocabularySnapshot};

use interrupt_guard_core::Language;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Lexicon configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LexiconConfig {
    /// Whether filler filtering is enabled
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Languages whose built-in filler lists are merged in
    #[serde(default = "default_languages")]
    pub languages: Vec<Language>,

    /// Replaces the built-in filler lists entirely when set
    #[serde(default)]
    pub ignored_words: Option<Vec<String>>,

    /// Additional language-tagged fillers on top of the base list
    #[serde(default)]
    pub fillers: BTreeMap<Language, Vec<String>>,

    /// Replaces the built-in stop commands when set
    #[serde(default)]
    pub stop_words: Option<Vec<String>>,

    /// Additional stop commands
    #[serde(default)]
    pub extra_stop_words: Vec<String>,
}

fn default_true() -> bool {
    true
}

fn default_languages() -> Vec<Language> {
    Language::all().to_vec()
}

impl Default for LexiconConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            languages: default_languages(),
            ignored_words: None,
            fillers: BTreeMap::new(),
            stop_words: None,
            extra_stop_words: Vec::new(),
        }
    }
}

impl LexiconConfig {
    /// Filler entries this config resolves to, with their language tags
    pub fn filler_entries(&self) -> Vec<(Option<Language>, String)> {
        let base: Vec<(Option<Language>, String)> = match &self.ignored_words {
            Some(words) => words.iter().map(|w| (None, w.clone())).collect(),
            None => self
                .languages
                .iter()
                .flat_map(|language| {
                    default_fillers(*language)
                        .iter()
                        .map(move |w| (Some(*language), w.to_string()))
                })
                .collect(),
        };

        let extra = self
            .fillers
            .iter()
            .flat_map(|(language, words)| words.iter().map(move |w| (Some(*language), w.clone())));

        base.into_iter().chain(extra).collect()
    }

    /// Stop entries this config resolves to
    pub fn stop_entries(&self) -> Vec<String> {
        let base: Vec<String> = match &self.stop_words {
            Some(words) => words.clone(),
            None => DEFAULT_STOP_WORDS.iter().map(|w| w.to_string()).collect(),
        };
        base.into_iter()
            .chain(self.extra_stop_words.iter().cloned())
            .collect()
    }
}
