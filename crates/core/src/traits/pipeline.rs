//! Pipeline processing traits

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::{Language, Result, TranscriptFragment};

/// Why agent speech was stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterruptReason {
    /// Explicit stop vocabulary ("stop", "ruko", ...)
    StopCommand,
    /// Meaningful speech long enough to interrupt outright
    MeaningfulSpeech,
    /// Meaningful speech arrived while a tentative interruption was pending
    Confirmed,
    /// Pending confirmation ran out without a filler to resume on
    Timeout,
}

impl InterruptReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StopCommand => "stop_command",
            Self::MeaningfulSpeech => "meaningful_speech",
            Self::Confirmed => "confirmed",
            Self::Timeout => "timeout",
        }
    }
}

/// Frame types that flow through the pipeline
///
/// Input frames come from the STT and the agent's speech scheduler; output
/// frames are decisions for the external speech pipeline to act on.
#[derive(Debug, Clone)]
pub enum Frame {
    /// Interim or final transcript of user speech
    Transcript(TranscriptFragment),

    /// Agent started an utterance
    UtteranceStarted {
        at: Instant,
    },

    /// Agent utterance finished or was torn down
    UtteranceEnded,

    /// Agent is about to say `text`
    AgentSpeech {
        text: String,
    },

    /// Stop agent speech now
    Interrupt {
        reason: InterruptReason,
        /// The interrupting transcript (absent on timeout)
        transcript: Option<String>,
    },

    /// Continue agent speech after a false interruption
    Resume,

    /// Tentative interruption, waiting for the next fragment
    AwaitingConfirmation {
        deadline: Instant,
    },

    /// An acknowledgment utterance was dropped after a stop command
    AcknowledgmentSuppressed {
        text: String,
    },

    /// End of stream marker
    EndOfStream,

    /// Error occurred in pipeline
    Error {
        stage: String,
        message: String,
        recoverable: bool,
    },

    /// Control frame for pipeline management
    Control(ControlFrame),
}

/// Control frames for pipeline management
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ControlFrame {
    /// Reset pipeline state
    Reset,
    /// Extend the filler vocabulary at runtime
    AddIgnoredWords(Vec<String>),
}

impl Frame {
    /// Check if this is an end-of-stream frame
    pub fn is_end_of_stream(&self) -> bool {
        matches!(self, Frame::EndOfStream)
    }

    /// Check if this is an error frame
    pub fn is_error(&self) -> bool {
        matches!(self, Frame::Error { .. })
    }

    /// Check if this is a control frame
    pub fn is_control(&self) -> bool {
        matches!(self, Frame::Control(_))
    }

    /// Check if this frame is a decision for the speech pipeline
    pub fn is_decision(&self) -> bool {
        matches!(
            self,
            Frame::Interrupt { .. }
                | Frame::Resume
                | Frame::AwaitingConfirmation { .. }
                | Frame::AcknowledgmentSuppressed { .. }
        )
    }

    /// Get the stage name for this frame type
    pub fn stage_name(&self) -> &'static str {
        match self {
            Frame::Transcript(_) => "transcript",
            Frame::UtteranceStarted { .. } => "utterance_started",
            Frame::UtteranceEnded => "utterance_ended",
            Frame::AgentSpeech { .. } => "agent_speech",
            Frame::Interrupt { .. } => "interrupt",
            Frame::Resume => "resume",
            Frame::AwaitingConfirmation { .. } => "awaiting_confirmation",
            Frame::AcknowledgmentSuppressed { .. } => "acknowledgment_suppressed",
            Frame::EndOfStream => "end_of_stream",
            Frame::Error { .. } => "error",
            Frame::Control(_) => "control",
        }
    }
}

/// Context passed to frame processors
#[derive(Debug, Clone, Default)]
pub struct ProcessorContext {
    /// Session ID
    pub session_id: String,
    /// Agent utterances started so far
    pub turn_number: usize,
    /// Last language hint seen on a transcript
    pub language: Option<Language>,
}

impl ProcessorContext {
    /// Create a new context for a session
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            ..Default::default()
        }
    }

    /// Set the language
    pub fn with_language(mut self, language: Language) -> Self {
        self.language = Some(language);
        self
    }

    /// Increment turn number
    pub fn next_turn(&mut self) {
        self.turn_number += 1;
    }
}

/// Frame processor for pipeline stages
///
/// Each processor receives frames, processes them, and emits output frames.
/// Processors run in separate tokio tasks, connected by channels.
///
/// A processor that needs to act on the passage of time reports its next
/// deadline through [`FrameProcessor::deadline`]. The chain waits on the
/// input channel and that deadline together and calls
/// [`FrameProcessor::on_deadline`] only if no frame arrived first.
#[async_trait]
pub trait FrameProcessor: Send + Sync + 'static {
    /// Process a frame and emit zero or more output frames
    ///
    /// # Arguments
    /// * `frame` - Input frame to process
    /// * `context` - Mutable per-task context
    ///
    /// # Returns
    /// Vector of output frames (may be empty, one, or multiple)
    async fn process(
        &self,
        frame: Frame,
        context: &mut ProcessorContext,
    ) -> Result<Vec<Frame>>;

    /// Get processor name for tracing
    fn name(&self) -> &'static str;

    /// Get processor description
    fn description(&self) -> &str {
        ""
    }

    /// Called when pipeline starts
    async fn on_start(&self, _context: &mut ProcessorContext) -> Result<()> {
        Ok(())
    }

    /// Called when pipeline stops
    async fn on_stop(&self, _context: &mut ProcessorContext) -> Result<()> {
        Ok(())
    }

    /// Next instant at which this processor wants `on_deadline` called
    fn deadline(&self) -> Option<Instant> {
        None
    }

    /// Called when the reported deadline elapsed before any frame arrived
    async fn on_deadline(&self, _context: &mut ProcessorContext) -> Result<Vec<Frame>> {
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_stage_names() {
        assert_eq!(Frame::Resume.stage_name(), "resume");
        assert_eq!(Frame::EndOfStream.stage_name(), "end_of_stream");
        assert_eq!(Frame::UtteranceEnded.stage_name(), "utterance_ended");
    }

    #[test]
    fn test_processor_context() {
        let mut ctx = ProcessorContext::new("session-123").with_language(Language::Hindi);

        assert_eq!(ctx.session_id, "session-123");
        assert_eq!(ctx.language, Some(Language::Hindi));
        assert_eq!(ctx.turn_number, 0);

        ctx.next_turn();
        assert_eq!(ctx.turn_number, 1);
    }

    #[test]
    fn test_frame_predicates() {
        assert!(Frame::EndOfStream.is_end_of_stream());
        assert!(Frame::Error { stage: "test".into(), message: "err".into(), recoverable: false }.is_error());
        assert!(Frame::Control(ControlFrame::Reset).is_control());
        assert!(Frame::Resume.is_decision());
        assert!(Frame::Interrupt { reason: InterruptReason::Timeout, transcript: None }.is_decision());
        assert!(!Frame::UtteranceEnded.is_decision());
    }

    struct Echo;

    #[async_trait]
    impl FrameProcessor for Echo {
        async fn process(&self, frame: Frame, _context: &mut ProcessorContext) -> Result<Vec<Frame>> {
            Ok(vec![frame])
        }

        fn name(&self) -> &'static str {
            "echo"
        }
    }

    #[tokio::test]
    async fn test_processor_defaults() {
        let echo = Echo;
        let mut ctx = ProcessorContext::default();

        assert!(echo.deadline().is_none());
        assert!(echo.on_deadline(&mut ctx).await.unwrap().is_empty());
        assert!(echo.on_start(&mut ctx).await.is_ok());

        let frames = echo.process(Frame::Resume, &mut ctx).await.unwrap();
        assert!(matches!(frames.as_slice(), [Frame::Resume]));
    }
}
