//! Language definitions for the filler lexicons
//!
//! Languages are tags on vocabulary entries and optional hints on
//! transcript fragments. Classification itself merges every enabled
//! language into one lookup set, so an unknown or missing hint is harmless.

use serde::{Deserialize, Serialize};

/// Languages with a built-in filler lexicon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    #[serde(alias = "en")]
    English,
    #[serde(alias = "hi")]
    Hindi,
    #[serde(alias = "es")]
    Spanish,
    #[serde(alias = "fr")]
    French,
    #[serde(alias = "de")]
    German,
}

impl Language {
    /// Get ISO 639-1 code
    pub fn code(&self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Hindi => "hi",
            Self::Spanish => "es",
            Self::French => "fr",
            Self::German => "de",
        }
    }

    /// Get human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            Self::English => "English",
            Self::Hindi => "Hindi",
            Self::Spanish => "Spanish",
            Self::French => "French",
            Self::German => "German",
        }
    }

    /// Parse from string (case-insensitive, code or name)
    ///
    /// Region subtags are ignored, so STT hints like `en-US` or `hi_IN`
    /// resolve to their base language.
    pub fn from_str_loose(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();
        let base = s.split(['-', '_']).next().unwrap_or_default();
        match base {
            "en" | "eng" | "english" => Some(Self::English),
            "hi" | "hin" | "hindi" | "hinglish" => Some(Self::Hindi),
            "es" | "spa" | "spanish" | "espanol" | "español" => Some(Self::Spanish),
            "fr" | "fra" | "fre" | "french" | "francais" | "français" => Some(Self::French),
            "de" | "deu" | "ger" | "german" | "deutsch" => Some(Self::German),
            _ => None,
        }
    }

    /// Get all supported languages
    pub fn all() -> &'static [Language] {
        &[
            Self::English,
            Self::Hindi,
            Self::Spanish,
            Self::French,
            Self::German,
        ]
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_code() {
        assert_eq!(Language::Hindi.code(), "hi");
        assert_eq!(Language::German.code(), "de");
        assert_eq!(Language::English.code(), "en");
    }

    #[test]
    fn test_language_from_str() {
        assert_eq!(Language::from_str_loose("hi"), Some(Language::Hindi));
        assert_eq!(Language::from_str_loose("Hindi"), Some(Language::Hindi));
        assert_eq!(Language::from_str_loose("FRENCH"), Some(Language::French));
        assert_eq!(Language::from_str_loose("en-US"), Some(Language::English));
        assert_eq!(Language::from_str_loose("es_MX"), Some(Language::Spanish));
        assert_eq!(Language::from_str_loose("multi"), None);
        assert_eq!(Language::from_str_loose(""), None);
    }

    #[test]
    fn test_all_languages() {
        assert_eq!(Language::all().len(), 5);
        assert_eq!(Language::default(), Language::English);
    }
}
