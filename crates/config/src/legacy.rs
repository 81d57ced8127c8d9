//! Legacy filler-filter environment variables
//!
//! Older deployments configure the filter with two flat variables:
//! - `AGENT_FILLER_WORDS`: comma-separated list replacing the built-in fillers
//! - `AGENT_FILLER_FILTER_ENABLED`: `true` enables filtering, anything else disables it
//!
//! They are applied on top of the layered settings.

use interrupt_guard_text_processing::LexiconConfig;

pub const FILLER_WORDS_VAR: &str = "AGENT_FILLER_WORDS";
pub const FILTER_ENABLED_VAR: &str = "AGENT_FILLER_FILTER_ENABLED";

/// Values read from the legacy variables
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LegacyOverrides {
    pub ignored_words: Option<Vec<String>>,
    pub enabled: Option<bool>,
}

impl LegacyOverrides {
    /// Read the overrides from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the overrides through an arbitrary lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let ignored_words = lookup(FILLER_WORDS_VAR)
            .map(|raw| parse_word_list(&raw))
            .filter(|words| !words.is_empty());

        let enabled = lookup(FILTER_ENABLED_VAR).map(|raw| raw.trim().eq_ignore_ascii_case("true"));

        Self { ignored_words, enabled }
    }

    pub fn is_empty(&self) -> bool {
        self.ignored_words.is_none() && self.enabled.is_none()
    }

    /// Apply onto a lexicon config
    pub fn apply(&self, lexicon: &mut LexiconConfig) {
        if let Some(words) = &self.ignored_words {
            tracing::info!(count = words.len(), "Filler list replaced by {}", FILLER_WORDS_VAR);
            lexicon.ignored_words = Some(words.clone());
        }
        if let Some(enabled) = self.enabled {
            lexicon.enabled = enabled;
        }
    }
}

/// Parse a comma-separated word list, dropping blanks
pub fn parse_word_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|w| w.trim().to_lowercase())
        .filter(|w| !w.is_empty())
        .collect()
}
