//! Replay events in, decisions out
//!
//! Input is one JSON object per line:
//!
//! ```text
//! {"event": "utterance_started"}
//! {"event": "transcript", "text": "umm", "duration": 0.3, "language": "hi"}
//! {"event": "wait", "seconds": 2.5}
//! {"event": "agent_speech", "text": "Okay, stopping"}
//! {"event": "add_ignored_words", "words": ["yeah"]}
//! {"event": "utterance_ended"}
//! ```
//!
//! Output is one JSON object per decision frame.

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

use interrupt_guard_core::{ControlFrame, Frame, InterruptReason, Language, TranscriptFragment};

/// One line of replay input
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ReplayEvent {
    UtteranceStarted,
    UtteranceEnded,
    Transcript {
        text: String,
        #[serde(default = "default_true")]
        is_final: bool,
        /// Spoken duration in seconds
        #[serde(default)]
        duration: Option<f64>,
        #[serde(default)]
        word_count: Option<usize>,
        /// Language code or name, region subtags allowed
        #[serde(default)]
        language: Option<String>,
    },
    AgentSpeech {
        text: String,
    },
    AddIgnoredWords {
        words: Vec<String>,
    },
    /// Pause the replay
    Wait {
        seconds: f64,
    },
}

fn default_true() -> bool {
    true
}

impl ReplayEvent {
    /// Parse one input line
    pub fn parse(line: &str) -> serde_json::Result<Self> {
        serde_json::from_str(line)
    }

    /// How long to pause before the next event, for `wait`
    pub fn pause(&self) -> Option<Duration> {
        match self {
            Self::Wait { seconds } => Some(Duration::try_from_secs_f64(*seconds).unwrap_or_default()),
            _ => None,
        }
    }

    /// Frame for this event, stamped with `now`
    pub fn into_frame(self, now: Instant) -> Option<Frame> {
        match self {
            Self::UtteranceStarted => Some(Frame::UtteranceStarted { at: now }),
            Self::UtteranceEnded => Some(Frame::UtteranceEnded),
            Self::Transcript {
                text,
                is_final,
                duration,
                word_count,
                language,
            } => {
                let mut fragment = TranscriptFragment::new(text, is_final, now);
                if let Some(secs) = duration.and_then(|d| Duration::try_from_secs_f64(d).ok()) {
                    fragment = fragment.with_duration(secs);
                }
                if let Some(count) = word_count {
                    fragment = fragment.with_word_count(count);
                }
                if let Some(language) = language.as_deref().and_then(Language::from_str_loose) {
                    fragment = fragment.with_language(language);
                }
                Some(Frame::Transcript(fragment))
            }
            Self::AgentSpeech { text } => Some(Frame::AgentSpeech { text }),
            Self::AddIgnoredWords { words } => Some(Frame::Control(ControlFrame::AddIgnoredWords(words))),
            Self::Wait { .. } => None,
        }
    }
}

/// One line of output
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum DecisionEvent {
    Interrupt {
        reason: InterruptReason,
        #[serde(skip_serializing_if = "Option::is_none")]
        transcript: Option<String>,
    },
    Resume,
    AwaitingConfirmation {
        /// Deadline, milliseconds since the replay started
        deadline_ms: u64,
    },
    AcknowledgmentSuppressed {
        text: String,
    },
    Error {
        stage: String,
        message: String,
    },
}

impl DecisionEvent {
    /// Map a chain output frame; non-decision frames map to `None`
    pub fn from_frame(frame: &Frame, origin: Instant) -> Option<Self> {
        match frame {
            Frame::Interrupt { reason, transcript } => Some(Self::Interrupt {
                reason: *reason,
                transcript: transcript.clone(),
            }),
            Frame::Resume => Some(Self::Resume),
            Frame::AwaitingConfirmation { deadline } => Some(Self::AwaitingConfirmation {
                deadline_ms: deadline.saturating_duration_since(origin).as_millis() as u64,
            }),
            Frame::AcknowledgmentSuppressed { text } => {
                Some(Self::AcknowledgmentSuppressed { text: text.clone() })
            }
            Frame::Error { stage, message, .. } => Some(Self::Error {
                stage: stage.clone(),
                message: message.clone(),
            }),
            _ => None,
        }
    }
}
