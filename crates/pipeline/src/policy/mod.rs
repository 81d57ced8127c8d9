//! Interruption policy
//!
//! Maps classified transcript fragments onto the speech session state
//! machine:
//!
//! ```text
//! Speaking --stop/long meaningful--> Interrupted
//! Speaking --filler/short meaningful--> PendingConfirmation
//! PendingConfirmation --filler before deadline--> Speaking (Resume)
//! PendingConfirmation --meaningful/stop/deadline--> Interrupted
//! ```
//!
//! The policy itself never sleeps. A pending confirmation carries its
//! deadline, and callers either hand in the next fragment or `poll` when
//! their timer fires.

mod config;
mod session;

pub use config::{InterruptPolicyConfig, MAX_DURATION_SECS};
pub use session::{SpeechSession, SpeechState};

use std::sync::Arc;
use std::time::Instant;

use interrupt_guard_core::{Classification, InterruptReason, Result, TranscriptFragment, UtteranceClassifier};

/// What the speech pipeline should do about a fragment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Keep speaking, nothing changed
    Ignore,
    /// Stop speaking now
    Interrupt(InterruptReason),
    /// Tentative interruption was a false alarm, keep speaking
    Resume,
    /// Tentative interruption, waiting for the next fragment until `deadline`
    PendingWait { deadline: Instant },
}

impl Decision {
    pub fn is_interrupt(&self) -> bool {
        matches!(self, Self::Interrupt(_))
    }
}

/// Result of running one fragment through the policy
#[derive(Debug, Clone, PartialEq)]
pub struct PolicyOutcome {
    pub decision: Decision,
    /// Drop the agent's next acknowledgment utterance
    pub suppress_next_ack: bool,
    /// How the fragment was classified
    pub classification: Classification,
}

impl PolicyOutcome {
    fn new(decision: Decision, classification: Classification) -> Self {
        Self {
            suppress_next_ack: classification.is_stop_command() && decision.is_interrupt(),
            decision,
            classification,
        }
    }
}

/// Filler-aware interruption policy
pub struct InterruptionPolicy {
    config: InterruptPolicyConfig,
    classifier: Arc<dyn UtteranceClassifier>,
}

impl InterruptionPolicy {
    /// Create a policy, rejecting invalid durations
    pub fn new(config: InterruptPolicyConfig, classifier: Arc<dyn UtteranceClassifier>) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, classifier })
    }

    pub fn config(&self) -> &InterruptPolicyConfig {
        &self.config
    }

    pub fn classifier(&self) -> &Arc<dyn UtteranceClassifier> {
        &self.classifier
    }

    /// Decide what a fragment means for the current utterance
    ///
    /// The fragment's `received_at` is the clock: a fragment arriving at or
    /// after a pending deadline takes the timeout path.
    pub fn decide(&self, fragment: &TranscriptFragment, session: &mut SpeechSession) -> PolicyOutcome {
        let classification = self.classifier.classify(&fragment.text);
        let decision = self.transition(fragment, &classification, session);

        tracing::debug!(
            text = %fragment.text,
            is_final = fragment.is_final,
            classification = classification.label(),
            decision = ?decision,
            state = session.state().as_str(),
            "Interruption decision"
        );

        PolicyOutcome::new(decision, classification)
    }

    /// Handle a fragment heard while the agent is silent
    ///
    /// Nothing to interrupt, but a stop command still arms acknowledgment
    /// suppression so the agent does not answer "okay" to it.
    pub fn decide_without_session(&self, fragment: &TranscriptFragment) -> PolicyOutcome {
        let classification = self.classifier.classify(&fragment.text);
        PolicyOutcome {
            decision: Decision::Ignore,
            suppress_next_ack: classification.is_stop_command(),
            classification,
        }
    }

    /// Non-blocking deadline check
    ///
    /// Returns `Some(Interrupt(Timeout))` once, when a pending confirmation's
    /// deadline has passed.
    pub fn poll(&self, session: &mut SpeechSession, now: Instant) -> Option<Decision> {
        match session.state() {
            SpeechState::PendingConfirmation { deadline, .. } if now >= deadline => {
                tracing::info!("No filler before deadline, interrupting");
                session.interrupt(InterruptReason::Timeout);
                Some(Decision::Interrupt(InterruptReason::Timeout))
            }
            _ => None,
        }
    }

    fn transition(
        &self,
        fragment: &TranscriptFragment,
        classification: &Classification,
        session: &mut SpeechSession,
    ) -> Decision {
        let state = session.state();

        if let SpeechState::Interrupted(_) = state {
            return Decision::Ignore;
        }

        if classification.is_stop_command() {
            tracing::info!(text = %fragment.text, "Stop command");
            return interrupt(session, InterruptReason::StopCommand);
        }

        if !self.config.allow_interruptions {
            return Decision::Ignore;
        }

        match (state, classification) {
            (SpeechState::PendingConfirmation { deadline, .. }, _) if fragment.received_at >= deadline => {
                interrupt(session, InterruptReason::Timeout)
            }
            (SpeechState::PendingConfirmation { .. }, Classification::OnlyFiller) => {
                tracing::info!("False interruption, resuming");
                session.resume();
                Decision::Resume
            }
            (SpeechState::PendingConfirmation { .. }, _) => interrupt(session, InterruptReason::Confirmed),
            (SpeechState::Speaking, Classification::MeaningfulContent { residual })
                if self.meets_minimums(fragment, residual) =>
            {
                interrupt(session, InterruptReason::MeaningfulSpeech)
            }
            (SpeechState::Speaking, _) => {
                let since = fragment.received_at;
                let Some(deadline) = since.checked_add(self.config.resume_timeout()) else {
                    tracing::warn!("Confirmation deadline overflows the clock, interrupting");
                    return interrupt(session, InterruptReason::Timeout);
                };
                session.await_confirmation(since, deadline);
                Decision::PendingWait { deadline }
            }
            (SpeechState::Interrupted(_), _) => Decision::Ignore,
        }
    }

    fn meets_minimums(&self, fragment: &TranscriptFragment, residual: &[String]) -> bool {
        let words = fragment
            .word_count
            .map_or(residual.len(), |stt| stt.min(residual.len()));

        fragment.spoken_duration() >= self.config.min_duration()
            && words >= self.config.min_interruption_words as usize
    }
}

fn interrupt(session: &mut SpeechSession, reason: InterruptReason) -> Decision {
    session.interrupt(reason);
    Decision::Interrupt(reason)
}
