//! Acknowledgment filter
//!
//! Drops the agent's "Okay, stopping" right after a stop command.

use async_trait::async_trait;
use std::sync::Arc;

use interrupt_guard_core::{Frame, FrameProcessor, ProcessorContext, Result};

use super::now;
use crate::acknowledgment::{AckSuppressor, AgentUtteranceVerdict};

/// Filters `AgentSpeech` frames through a shared [`AckSuppressor`]
pub struct AcknowledgmentFilter {
    suppressor: Arc<AckSuppressor>,
}

impl AcknowledgmentFilter {
    pub fn new(suppressor: Arc<AckSuppressor>) -> Self {
        Self { suppressor }
    }
}

#[async_trait]
impl FrameProcessor for AcknowledgmentFilter {
    async fn process(
        &self,
        frame: Frame,
        _context: &mut ProcessorContext,
    ) -> Result<Vec<Frame>> {
        match frame {
            Frame::AgentSpeech { text } => match self.suppressor.filter(&text, now()) {
                AgentUtteranceVerdict::Suppress => Ok(vec![Frame::AcknowledgmentSuppressed { text }]),
                AgentUtteranceVerdict::Speak => Ok(vec![Frame::AgentSpeech { text }]),
            },
            other => Ok(vec![other]),
        }
    }

    fn name(&self) -> &'static str {
        "acknowledgment_filter"
    }

    fn description(&self) -> &str {
        "Suppresses acknowledgment utterances after a stop command"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_passes_when_unarmed() {
        let filter = AcknowledgmentFilter::new(Arc::new(AckSuppressor::default()));
        let mut ctx = ProcessorContext::default();

        let frames = filter
            .process(Frame::AgentSpeech { text: "Okay, stopping.".into() }, &mut ctx)
            .await
            .unwrap();
        assert!(matches!(&frames[0], Frame::AgentSpeech { text } if text == "Okay, stopping."));
    }

    #[tokio::test]
    async fn test_suppresses_when_armed() {
        let suppressor = Arc::new(AckSuppressor::default());
        suppressor.arm(now());
        let filter = AcknowledgmentFilter::new(Arc::clone(&suppressor));
        let mut ctx = ProcessorContext::default();

        let frames = filter
            .process(Frame::AgentSpeech { text: "Okay, stopping.".into() }, &mut ctx)
            .await
            .unwrap();
        assert!(matches!(&frames[0], Frame::AcknowledgmentSuppressed { .. }));

        let frames = filter.process(Frame::Resume, &mut ctx).await.unwrap();
        assert!(matches!(frames[0], Frame::Resume));
    }
}
