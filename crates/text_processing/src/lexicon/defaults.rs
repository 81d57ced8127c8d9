//! Built-in filler and stop lexicons
//!
//! Ambiguous words that are just as often meaningful (Hindi "bas" = "enough"
//! or "bus") are left out on purpose; deployments can add them with
//! `add_ignored_words` if their traffic says otherwise.

use interrupt_guard_core::Language;

const ENGLISH_FILLERS: &[&str] = &[
    "uh", "um", "umm", "uhh", "hmm", "hm", "mhm", "mmm", "ah", "ahh", "er", "err", "like",
    "you know", "i mean",
];

const HINDI_FILLERS: &[&str] = &[
    "haan", "haa", "accha", "achha", "theek", "theek hai", "matlab",
    "हाँ", "हां", "अच्छा", "ठीक", "ठीक है",
];

const SPANISH_FILLERS: &[&str] = &["eh", "este", "pues"];

const FRENCH_FILLERS: &[&str] = &["euh", "ben", "alors"];

const GERMAN_FILLERS: &[&str] = &["äh", "ähm", "also"];

/// Stop commands that always force an interruption
pub const DEFAULT_STOP_WORDS: &[&str] = &[
    "stop", "wait", "chup", "shaant", "shant", "ruko", "rukho", "enough", "quiet", "silence",
    "khamosh", "hold on",
];

/// Default filler entries for a language
pub fn default_fillers(language: Language) -> &'static [&'static str] {
    match language {
        Language::English => ENGLISH_FILLERS,
        Language::Hindi => HINDI_FILLERS,
        Language::Spanish => SPANISH_FILLERS,
        Language::French => FRENCH_FILLERS,
        Language::German => GERMAN_FILLERS,
    }
}
