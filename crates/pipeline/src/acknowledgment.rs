//! Acknowledgment suppression after stop commands
//!
//! When the user says "stop", the agent's reply is often a reflexive
//! "Okay, stopping". The suppressor is armed by the stop command and drops
//! the next agent utterance that is exactly one of the acknowledgment
//! phrases. It lives for the whole conversation, not one utterance, since
//! the acknowledgment comes after the interrupted utterance has ended.

use parking_lot::Mutex;
use std::collections::HashSet;
use std::time::{Duration, Instant};

use interrupt_guard_text_processing::lexicon::normalize_entry;

use crate::policy::InterruptPolicyConfig;

/// Verdict on a planned agent utterance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentUtteranceVerdict {
    Speak,
    Suppress,
}

/// One-shot acknowledgment suppression flag with a bounded window
pub struct AckSuppressor {
    phrases: HashSet<String>,
    window: Duration,
    armed_until: Mutex<Option<Instant>>,
}

impl AckSuppressor {
    pub fn new<I, S>(phrases: I, window: Duration) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let phrases = phrases
            .into_iter()
            .filter_map(|p| normalize_entry(p.as_ref()))
            .collect();

        Self {
            phrases,
            window,
            armed_until: Mutex::new(None),
        }
    }

    /// Build from the policy's acknowledgment phrases and window
    pub fn from_config(config: &InterruptPolicyConfig) -> Self {
        Self::new(&config.acknowledgments, config.ack_window())
    }

    /// Arm suppression until `now + window`
    pub fn arm(&self, now: Instant) {
        let Some(until) = now.checked_add(self.window) else {
            tracing::warn!("Acknowledgment window overflows the clock, suppression not armed");
            self.disarm();
            return;
        };
        *self.armed_until.lock() = Some(until);
        tracing::debug!(window_ms = self.window.as_millis() as u64, "Acknowledgment suppression armed");
    }

    /// Check whether suppression is armed at `now`
    pub fn is_armed(&self, now: Instant) -> bool {
        matches!(*self.armed_until.lock(), Some(until) if now < until)
    }

    pub fn disarm(&self) {
        *self.armed_until.lock() = None;
    }

    /// Check whether `text` is exactly one of the acknowledgment phrases
    pub fn is_acknowledgment(&self, text: &str) -> bool {
        normalize_entry(text).is_some_and(|normalized| self.phrases.contains(&normalized))
    }

    /// Decide whether the agent may say `text`
    ///
    /// Only a matching utterance consumes the flag; anything else is spoken
    /// and leaves it armed. An expired flag is cleared.
    pub fn filter(&self, text: &str, now: Instant) -> AgentUtteranceVerdict {
        let mut armed_until = self.armed_until.lock();

        match *armed_until {
            Some(until) if now >= until => {
                *armed_until = None;
                AgentUtteranceVerdict::Speak
            }
            Some(_) if self.is_acknowledgment(text) => {
                *armed_until = None;
                tracing::info!(text, "Suppressed acknowledgment after stop command");
                AgentUtteranceVerdict::Suppress
            }
            _ => AgentUtteranceVerdict::Speak,
        }
    }
}

impl Default for AckSuppressor {
    fn default() -> Self {
        Self::from_config(&InterruptPolicyConfig::default())
    }
}
