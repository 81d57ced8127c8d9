//! Interrupt handler for filler-aware barge-in
//!
//! Turns the agent's utterance lifecycle and the user's transcript stream
//! into interruption decisions:
//! - `UtteranceStarted` / `UtteranceEnded` open and close the speech session
//! - `Transcript` runs through the interruption policy
//! - `AddIgnoredWords` control frames extend the filler vocabulary
//!
//! Decision frames are emitted ahead of the frame that caused them.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Instant;

use interrupt_guard_core::{
    ControlFrame, Frame, FrameProcessor, InterruptReason, ProcessorContext, Result, TranscriptFragment,
};

use super::now;
use crate::acknowledgment::AckSuppressor;
use crate::policy::{Decision, InterruptionPolicy, SpeechSession, SpeechState};

/// Interrupt handler processor
pub struct InterruptHandler {
    policy: InterruptionPolicy,
    /// Session of the utterance in progress, if the agent is speaking
    session: Mutex<Option<SpeechSession>>,
    suppressor: Arc<AckSuppressor>,
}

impl InterruptHandler {
    /// Create a new interrupt handler
    pub fn new(policy: InterruptionPolicy, suppressor: Arc<AckSuppressor>) -> Self {
        Self {
            policy,
            session: Mutex::new(None),
            suppressor,
        }
    }

    pub fn policy(&self) -> &InterruptionPolicy {
        &self.policy
    }

    pub fn suppressor(&self) -> &Arc<AckSuppressor> {
        &self.suppressor
    }

    /// State of the current utterance, `None` while the agent is silent
    pub fn state(&self) -> Option<SpeechState> {
        self.session.lock().as_ref().map(SpeechSession::state)
    }

    /// Check if the current utterance was interrupted
    pub fn is_interrupted(&self) -> bool {
        self.session.lock().as_ref().is_some_and(SpeechSession::is_interrupted)
    }

    /// Drop the current session and any armed suppression
    pub fn reset(&self) {
        *self.session.lock() = None;
        self.suppressor.disarm();
    }

    fn start_utterance(&self, at: Instant, context: &mut ProcessorContext) {
        context.next_turn();
        *self.session.lock() = Some(SpeechSession::start(at));
        tracing::debug!(turn = context.turn_number, "Agent utterance started");
    }

    fn end_utterance(&self) {
        if let Some(session) = self.session.lock().take() {
            tracing::debug!(
                state = session.state().as_str(),
                false_interruptions = session.false_interruptions(),
                "Agent utterance ended"
            );
        }
    }

    fn handle_transcript(&self, fragment: &TranscriptFragment, context: &mut ProcessorContext) -> Vec<Frame> {
        if fragment.language.is_some() {
            context.language = fragment.language;
        }

        let outcome = {
            let mut session = self.session.lock();
            match session.as_mut() {
                Some(session) => self.policy.decide(fragment, session),
                None => self.policy.decide_without_session(fragment),
            }
        };

        if outcome.suppress_next_ack {
            self.suppressor.arm(fragment.received_at);
        }

        decision_frame(outcome.decision, Some(&fragment.text))
            .into_iter()
            .collect()
    }

    fn add_ignored_words(&self, words: &[String]) {
        let added = self.policy.classifier().add_ignored_words(words);
        tracing::info!(requested = words.len(), added, "Extended filler vocabulary");
    }
}

fn decision_frame(decision: Decision, transcript: Option<&str>) -> Option<Frame> {
    match decision {
        Decision::Ignore => None,
        Decision::Interrupt(reason) => Some(Frame::Interrupt {
            reason,
            transcript: match reason {
                InterruptReason::Timeout => None,
                _ => transcript.map(str::to_owned),
            },
        }),
        Decision::Resume => Some(Frame::Resume),
        Decision::PendingWait { deadline } => Some(Frame::AwaitingConfirmation { deadline }),
    }
}

#[async_trait]
impl FrameProcessor for InterruptHandler {
    async fn process(
        &self,
        frame: Frame,
        context: &mut ProcessorContext,
    ) -> Result<Vec<Frame>> {
        let mut output = match &frame {
            Frame::UtteranceStarted { at } => {
                self.start_utterance(*at, context);
                Vec::new()
            }

            Frame::UtteranceEnded => {
                self.end_utterance();
                Vec::new()
            }

            Frame::Transcript(fragment) => self.handle_transcript(fragment, context),

            // Consumed here, nothing downstream needs it
            Frame::Control(ControlFrame::AddIgnoredWords(words)) => {
                self.add_ignored_words(words);
                return Ok(Vec::new());
            }

            Frame::Control(ControlFrame::Reset) | Frame::EndOfStream => {
                self.reset();
                Vec::new()
            }

            _ => Vec::new(),
        };

        output.push(frame);
        Ok(output)
    }

    fn name(&self) -> &'static str {
        "interrupt_handler"
    }

    fn description(&self) -> &str {
        "Filler-aware interruption policy over agent utterances"
    }

    async fn on_start(&self, _context: &mut ProcessorContext) -> Result<()> {
        self.reset();
        Ok(())
    }

    async fn on_stop(&self, _context: &mut ProcessorContext) -> Result<()> {
        self.reset();
        Ok(())
    }

    fn deadline(&self) -> Option<Instant> {
        self.session.lock().as_ref().and_then(SpeechSession::deadline)
    }

    async fn on_deadline(&self, _context: &mut ProcessorContext) -> Result<Vec<Frame>> {
        let decision = {
            let mut session = self.session.lock();
            session
                .as_mut()
                .and_then(|session| self.policy.poll(session, now()))
        };

        Ok(decision
            .and_then(|decision| decision_frame(decision, None))
            .into_iter()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::InterruptPolicyConfig;
    use interrupt_guard_text_processing::LexiconClassifier;
    use std::time::Duration;

    fn handler() -> InterruptHandler {
        let policy = InterruptionPolicy::new(
            InterruptPolicyConfig::default(),
            Arc::new(LexiconClassifier::with_defaults()),
        )
        .unwrap();
        InterruptHandler::new(policy, Arc::new(AckSuppressor::default()))
    }

    fn transcript(text: &str, secs: f64) -> Frame {
        Frame::Transcript(
            TranscriptFragment::final_result(text, now()).with_duration(Duration::from_secs_f64(secs)),
        )
    }

    #[tokio::test]
    async fn test_meaningful_speech_interrupts() {
        let handler = handler();
        let mut ctx = ProcessorContext::default();

        handler.process(Frame::UtteranceStarted { at: now() }, &mut ctx).await.unwrap();
        assert_eq!(ctx.turn_number, 1);

        let frames = handler
            .process(transcript("tell me about the weather", 2.0), &mut ctx)
            .await
            .unwrap();

        assert_eq!(frames.len(), 2);
        assert!(matches!(
            &frames[0],
            Frame::Interrupt { reason: InterruptReason::MeaningfulSpeech, transcript: Some(t) } if t == "tell me about the weather"
        ));
        assert!(matches!(frames[1], Frame::Transcript(_)));
        assert!(handler.is_interrupted());
    }

    #[tokio::test]
    async fn test_filler_awaits_confirmation() {
        let handler = handler();
        let mut ctx = ProcessorContext::default();

        handler.process(Frame::UtteranceStarted { at: now() }, &mut ctx).await.unwrap();
        let frames = handler.process(transcript("umm", 0.3), &mut ctx).await.unwrap();

        assert!(matches!(frames[0], Frame::AwaitingConfirmation { .. }));
        assert!(handler.deadline().is_some());

        let frames = handler.process(transcript("hmm", 0.2), &mut ctx).await.unwrap();
        assert!(matches!(frames[0], Frame::Resume));
        assert_eq!(handler.state(), Some(SpeechState::Speaking));
        assert!(handler.deadline().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_on_deadline_interrupts() {
        let handler = handler();
        let mut ctx = ProcessorContext::default();

        handler.process(Frame::UtteranceStarted { at: now() }, &mut ctx).await.unwrap();
        handler.process(transcript("umm", 0.3), &mut ctx).await.unwrap();

        assert!(handler.on_deadline(&mut ctx).await.unwrap().is_empty());

        tokio::time::advance(Duration::from_millis(2100)).await;
        let frames = handler.on_deadline(&mut ctx).await.unwrap();
        assert!(matches!(
            frames.as_slice(),
            [Frame::Interrupt { reason: InterruptReason::Timeout, transcript: None }]
        ));
    }

    #[tokio::test]
    async fn test_stop_arms_suppressor() {
        let handler = handler();
        let mut ctx = ProcessorContext::default();

        handler.process(Frame::UtteranceStarted { at: now() }, &mut ctx).await.unwrap();
        handler.process(transcript("stop", 0.3), &mut ctx).await.unwrap();

        assert!(handler.suppressor().is_armed(now()));
    }

    #[tokio::test]
    async fn test_no_session_ignores_speech() {
        let handler = handler();
        let mut ctx = ProcessorContext::default();

        let frames = handler
            .process(transcript("tell me about the weather", 2.0), &mut ctx)
            .await
            .unwrap();

        assert_eq!(frames.len(), 1);
        assert!(matches!(frames[0], Frame::Transcript(_)));
        assert_eq!(handler.state(), None);
    }

    #[tokio::test]
    async fn test_add_ignored_words_control() {
        let handler = handler();
        let mut ctx = ProcessorContext::default();

        let frames = handler
            .process(
                Frame::Control(ControlFrame::AddIgnoredWords(vec!["okay".into()])),
                &mut ctx,
            )
            .await
            .unwrap();
        assert!(frames.is_empty());

        handler.process(Frame::UtteranceStarted { at: now() }, &mut ctx).await.unwrap();
        let frames = handler.process(transcript("okay", 1.0), &mut ctx).await.unwrap();
        assert!(matches!(frames[0], Frame::AwaitingConfirmation { .. }));
    }

    #[tokio::test]
    async fn test_utterance_end_drops_session() {
        let handler = handler();
        let mut ctx = ProcessorContext::default();

        handler.process(Frame::UtteranceStarted { at: now() }, &mut ctx).await.unwrap();
        handler.process(transcript("umm", 0.3), &mut ctx).await.unwrap();
        handler.process(Frame::UtteranceEnded, &mut ctx).await.unwrap();

        assert_eq!(handler.state(), None);
        assert!(handler.deadline().is_none());
    }
}
