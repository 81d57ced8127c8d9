//! Per-utterance speech session state

use std::time::Instant;

use interrupt_guard_core::InterruptReason;

/// State of one agent utterance
///
/// A resumed utterance goes straight back to `Speaking`; the resume itself
/// is reported as a decision, not kept as a state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeechState {
    /// Agent is talking
    Speaking,
    /// A candidate interruption was heard and awaits the next fragment
    PendingConfirmation {
        since: Instant,
        deadline: Instant,
    },
    /// Speech stopped; terminal for this utterance
    Interrupted(InterruptReason),
}

impl SpeechState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Speaking => "speaking",
            Self::PendingConfirmation { .. } => "pending_confirmation",
            Self::Interrupted(_) => "interrupted",
        }
    }
}

/// State machine for one agent utterance
///
/// Created when the agent starts speaking, dropped when the utterance ends.
#[derive(Debug, Clone)]
pub struct SpeechSession {
    state: SpeechState,
    started_at: Instant,
    false_interruptions: u32,
}

impl SpeechSession {
    /// Start tracking an utterance that began at `started_at`
    pub fn start(started_at: Instant) -> Self {
        Self {
            state: SpeechState::Speaking,
            started_at,
            false_interruptions: 0,
        }
    }

    pub fn state(&self) -> SpeechState {
        self.state
    }

    pub fn started_at(&self) -> Instant {
        self.started_at
    }

    pub fn is_interrupted(&self) -> bool {
        matches!(self.state, SpeechState::Interrupted(_))
    }

    /// Deadline of a pending confirmation, if one is outstanding
    pub fn deadline(&self) -> Option<Instant> {
        match self.state {
            SpeechState::PendingConfirmation { deadline, .. } => Some(deadline),
            SpeechState::Speaking | SpeechState::Interrupted(_) => None,
        }
    }

    /// Tentative interruptions that were resumed
    pub fn false_interruptions(&self) -> u32 {
        self.false_interruptions
    }

    pub(crate) fn await_confirmation(&mut self, since: Instant, deadline: Instant) {
        self.transition(SpeechState::PendingConfirmation { since, deadline });
    }

    pub(crate) fn resume(&mut self) {
        self.false_interruptions += 1;
        self.transition(SpeechState::Speaking);
    }

    pub(crate) fn interrupt(&mut self, reason: InterruptReason) {
        self.transition(SpeechState::Interrupted(reason));
    }

    fn transition(&mut self, next: SpeechState) {
        tracing::debug!(from = self.state.as_str(), to = next.as_str(), "Speech state transition");
        self.state = next;
    }
}
