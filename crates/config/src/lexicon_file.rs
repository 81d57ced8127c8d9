//! Standalone lexicon files
//!
//! A lexicon file extends the configured vocabulary:
//!
//! ```yaml
//! fillers:
//!   hindi: ["arre", "yaar"]
//!   english: ["you see"]
//! stop_words: ["bas karo"]
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use interrupt_guard_core::Language;
use interrupt_guard_text_processing::LexiconConfig;

use crate::ConfigError;

/// Per-language filler lists and extra stop commands
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LexiconFile {
    #[serde(default)]
    pub fillers: BTreeMap<Language, Vec<String>>,

    #[serde(default)]
    pub stop_words: Vec<String>,
}

impl LexiconFile {
    /// Load from a YAML, TOML or JSON file, chosen by extension
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("yaml") | Some("yml") => {
                serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))
            }
            Some("toml") => toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string())),
            Some("json") => {
                serde_json::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))
            }
            _ => Err(ConfigError::ParseError(format!(
                "Unsupported lexicon file format: {}",
                path.display()
            ))),
        }
    }

    /// Merge into a lexicon config; entries are appended, never replaced
    pub fn merge_into(self, lexicon: &mut LexiconConfig) {
        for (language, words) in self.fillers {
            lexicon.fillers.entry(language).or_default().extend(words);
        }
        lexicon.extra_stop_words.extend(self.stop_words);
    }
}
