//! Text normalization for lexicon lookups
//!
//! Lowercases, strips punctuation and splits on whitespace. Filtering works
//! on grapheme clusters rather than chars so that vowel signs and viramas in
//! Devanagari stay attached to their base letter instead of being stripped
//! as "non-word" characters.

use unicode_segmentation::UnicodeSegmentation;

/// Lowercase `text` and drop every grapheme that is not part of a word
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .graphemes(true)
        .filter(|g| is_word_or_space(g))
        .collect()
}

/// Normalize and split into tokens
pub fn tokenize(text: &str) -> Vec<String> {
    normalize(text)
        .split_whitespace()
        .map(str::to_owned)
        .collect()
}

/// Normalize a vocabulary entry into its canonical single-spaced form
///
/// Returns `None` for entries that normalize to nothing ("", "...").
pub fn normalize_entry(entry: &str) -> Option<String> {
    let tokens = tokenize(entry);
    if tokens.is_empty() {
        None
    } else {
        Some(tokens.join(" "))
    }
}

fn is_word_or_space(grapheme: &str) -> bool {
    grapheme
        .chars()
        .next()
        .is_some_and(|c| c.is_alphanumeric() || c == '_' || c.is_whitespace())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercase_and_punctuation() {
        assert_eq!(normalize("Umm... OK!"), "umm ok");
        assert_eq!(tokenize("Hmm, haan?"), vec!["hmm", "haan"]);
    }

    #[test]
    fn test_punctuation_inside_words_is_removed() {
        // Matches how the STT fillers were matched upstream: "uh-huh" collapses
        assert_eq!(tokenize("uh-huh don't"), vec!["uhhuh", "dont"]);
    }

    #[test]
    fn test_devanagari_marks_survive() {
        assert_eq!(tokenize("हाँ, ठीक है।"), vec!["हाँ", "ठीक", "है"]);
    }

    #[test]
    fn test_non_ascii_latin() {
        assert_eq!(tokenize("ÄHM, also"), vec!["ähm", "also"]);
    }

    #[test]
    fn test_blank_input() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   \t\n").is_empty());
        assert!(tokenize("?!...").is_empty());
    }

    #[test]
    fn test_normalize_entry() {
        assert_eq!(normalize_entry("  You   Know "), Some("you know".to_string()));
        assert_eq!(normalize_entry("..."), None);
    }
}
