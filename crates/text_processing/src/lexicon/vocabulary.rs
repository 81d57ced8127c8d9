//! Filler and stop vocabulary with snapshot-and-swap updates
//!
//! Readers take an `Arc` to the current snapshot under a short read lock and
//! classify without holding any lock. Writers copy the snapshot, extend the
//! copy and swap it in, so an update never blocks or corrupts a
//! classification that is already running. Concurrent writers are
//! last-writer-wins.

use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use interrupt_guard_core::Language;

use super::normalize::normalize_entry;
use crate::{Result, TextProcessingError};

/// Immutable view of the vocabulary at one point in time
#[derive(Debug, Clone, Default)]
pub struct VocabularySnapshot {
    /// Normalized filler entry → language it came from (None for runtime additions)
    fillers: HashMap<String, Option<Language>>,
    stops: HashSet<String>,
    /// Longest filler entry in tokens
    max_filler_tokens: usize,
    /// Longest stop entry in tokens
    max_stop_tokens: usize,
}

impl VocabularySnapshot {
    pub fn is_filler(&self, entry: &str) -> bool {
        self.fillers.contains_key(entry)
    }

    pub fn is_stop(&self, entry: &str) -> bool {
        self.stops.contains(entry)
    }

    /// Language tag of a filler entry
    pub fn filler_language(&self, entry: &str) -> Option<Language> {
        self.fillers.get(entry).copied().flatten()
    }

    pub fn filler_count(&self) -> usize {
        self.fillers.len()
    }

    pub fn stop_count(&self) -> usize {
        self.stops.len()
    }

    /// Length in tokens of the longest filler entry starting at `start`
    pub fn match_filler(&self, tokens: &[String], start: usize) -> Option<usize> {
        longest_match(tokens, start, self.max_filler_tokens, |key| self.fillers.contains_key(key))
    }

    /// The longest stop entry starting at `start`
    pub fn match_stop(&self, tokens: &[String], start: usize) -> Option<String> {
        longest_match(tokens, start, self.max_stop_tokens, |key| self.stops.contains(key))
            .map(|len| tokens[start..start + len].join(" "))
    }

    fn insert_filler(&mut self, entry: String, language: Option<Language>) -> bool {
        if self.fillers.contains_key(&entry) {
            return false;
        }
        self.max_filler_tokens = self.max_filler_tokens.max(token_len(&entry));
        self.fillers.insert(entry, language);
        true
    }

    fn insert_stop(&mut self, entry: String) -> bool {
        self.max_stop_tokens = self.max_stop_tokens.max(token_len(&entry));
        self.stops.insert(entry)
    }

    fn first_conflict(&self) -> Option<&String> {
        self.stops.iter().find(|stop| self.fillers.contains_key(*stop))
    }
}

/// Owned, shareable vocabulary
#[derive(Debug, Default)]
pub struct Vocabulary {
    current: RwLock<Arc<VocabularySnapshot>>,
}

impl Vocabulary {
    /// Build a vocabulary from language-tagged fillers and stop entries
    ///
    /// Entries are normalized; blanks are dropped. An entry present in both
    /// sets is rejected rather than resolved one way or the other.
    pub fn new<F, S>(fillers: F, stops: S) -> Result<Self>
    where
        F: IntoIterator<Item = (Option<Language>, String)>,
        S: IntoIterator<Item = String>,
    {
        let mut snapshot = VocabularySnapshot::default();
        for (language, raw) in fillers {
            if let Some(entry) = normalize_entry(&raw) {
                snapshot.insert_filler(entry, language);
            }
        }
        for raw in stops {
            if let Some(entry) = normalize_entry(&raw) {
                snapshot.insert_stop(entry);
            }
        }

        if let Some(entry) = snapshot.first_conflict() {
            return Err(TextProcessingError::AmbiguousToken {
                entry: entry.clone(),
            });
        }

        tracing::debug!(
            fillers = snapshot.filler_count(),
            stops = snapshot.stop_count(),
            "Vocabulary built"
        );

        Ok(Self {
            current: RwLock::new(Arc::new(snapshot)),
        })
    }

    /// Current snapshot; stays valid even if the vocabulary changes later
    pub fn snapshot(&self) -> Arc<VocabularySnapshot> {
        self.current.read().clone()
    }

    /// Add filler entries (additive only)
    ///
    /// Entries already present are no-ops, entries that collide with a stop
    /// command are skipped.
    ///
    /// # Returns
    /// Number of entries actually added
    pub fn add_fillers<I, W>(&self, words: I) -> usize
    where
        I: IntoIterator<Item = W>,
        W: AsRef<str>,
    {
        let entries: Vec<String> = words
            .into_iter()
            .filter_map(|w| normalize_entry(w.as_ref()))
            .collect();
        if entries.is_empty() {
            return 0;
        }

        let mut current = self.current.write();
        let mut next = (**current).clone();
        let mut added = Vec::new();

        for entry in entries {
            if next.is_stop(&entry) {
                tracing::warn!(entry = %entry, "Not adding filler that is also a stop command");
                continue;
            }
            if next.insert_filler(entry.clone(), None) {
                added.push(entry);
            }
        }

        if !added.is_empty() {
            *current = Arc::new(next);
            tracing::info!(count = added.len(), words = ?added, "Added filler words");
        }

        added.len()
    }

    /// All filler entries, sorted
    pub fn filler_entries(&self) -> Vec<String> {
        let snapshot = self.snapshot();
        let mut entries: Vec<String> = snapshot.fillers.keys().cloned().collect();
        entries.sort();
        entries
    }

    /// All stop entries, sorted
    pub fn stop_entries(&self) -> Vec<String> {
        let snapshot = self.snapshot();
        let mut entries: Vec<String> = snapshot.stops.iter().cloned().collect();
        entries.sort();
        entries
    }
}

fn token_len(entry: &str) -> usize {
    entry.split(' ').count()
}

/// Greedy longest-first contiguous match of up to `max_len` tokens
fn longest_match<F>(tokens: &[String], start: usize, max_len: usize, contains: F) -> Option<usize>
where
    F: Fn(&str) -> bool,
{
    let available = tokens.len().saturating_sub(start);
    (1..=max_len.min(available))
        .rev()
        .find(|len| contains(&tokens[start..start + len].join(" ")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(text: &str) -> Vec<String> {
        text.split(' ').map(str::to_owned).collect()
    }

    fn vocab() -> Vocabulary {
        Vocabulary::new(
            [
                (Some(Language::English), "umm".to_string()),
                (Some(Language::English), "You know".to_string()),
                (Some(Language::Hindi), "theek hai".to_string()),
                (Some(Language::Hindi), "theek".to_string()),
            ],
            ["stop".to_string(), "hold on".to_string()],
        )
        .unwrap()
    }

    #[test]
    fn test_entries_are_normalized() {
        let vocab = vocab();
        let snapshot = vocab.snapshot();
        assert!(snapshot.is_filler("you know"));
        assert_eq!(snapshot.filler_language("theek hai"), Some(Language::Hindi));
        assert!(snapshot.is_stop("hold on"));
    }

    #[test]
    fn test_conflict_is_rejected() {
        let result = Vocabulary::new(
            [(None, "Stop!".to_string())],
            ["stop".to_string()],
        );
        assert_eq!(
            result.unwrap_err(),
            TextProcessingError::AmbiguousToken { entry: "stop".into() }
        );
    }

    #[test]
    fn test_longest_match_prefers_phrase() {
        let snapshot = vocab().snapshot();
        let t = tokens("haan theek hai");
        assert_eq!(snapshot.match_filler(&t, 1), Some(2));
        assert_eq!(snapshot.match_filler(&t, 0), None);
        assert_eq!(snapshot.match_filler(&tokens("theek"), 0), Some(1));
    }

    #[test]
    fn test_phrase_requires_contiguous_tokens() {
        let snapshot = vocab().snapshot();
        let t = tokens("you really know");
        assert_eq!(snapshot.match_filler(&t, 0), None);
    }

    #[test]
    fn test_match_stop_returns_entry() {
        let snapshot = vocab().snapshot();
        let t = tokens("umm hold on please");
        assert_eq!(snapshot.match_stop(&t, 1), Some("hold on".to_string()));
        assert_eq!(snapshot.match_stop(&t, 0), None);
    }

    #[test]
    fn test_add_fillers_is_idempotent() {
        let vocab = vocab();
        assert_eq!(vocab.add_fillers(["Okay", "okay."]), 1);
        let after_first = vocab.filler_entries();
        assert_eq!(vocab.add_fillers(["okay"]), 0);
        assert_eq!(vocab.filler_entries(), after_first);
    }

    #[test]
    fn test_add_fillers_skips_stop_and_blank() {
        let vocab = vocab();
        assert_eq!(vocab.add_fillers(["STOP", "  ", "..."]), 0);
        assert!(!vocab.snapshot().is_filler("stop"));
    }

    #[test]
    fn test_old_snapshot_is_unaffected() {
        let vocab = vocab();
        let before = vocab.snapshot();
        vocab.add_fillers(["alright"]);
        assert!(!before.is_filler("alright"));
        assert!(vocab.snapshot().is_filler("alright"));
    }

    #[test]
    fn test_concurrent_updates_and_reads() {
        let vocab = Arc::new(vocab());
        let writers: Vec<_> = (0..4)
            .map(|i| {
                let vocab = Arc::clone(&vocab);
                std::thread::spawn(move || {
                    for j in 0..50 {
                        vocab.add_fillers([format!("w{i}x{j}")]);
                    }
                })
            })
            .collect();
        for _ in 0..200 {
            assert!(vocab.snapshot().is_filler("umm"));
        }
        for w in writers {
            w.join().unwrap();
        }
        // 4 original + 200 added
        assert_eq!(vocab.snapshot().filler_count(), 204);
    }
}
