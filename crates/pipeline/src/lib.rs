//! Interruption policy for a speaking voice agent
//!
//! This crate decides what user speech means while the agent is talking:
//! - `InterruptionPolicy`: the per-utterance state machine
//!   (speaking, pending confirmation, interrupted)
//! - `AckSuppressor`: drops "Okay, stopping" after a stop command
//! - Frame processors (InterruptHandler, AcknowledgmentFilter)
//! - Channel-based processor chains with deadline support

pub mod acknowledgment;
pub mod policy;
pub mod processors;

pub use acknowledgment::{AckSuppressor, AgentUtteranceVerdict};

pub use policy::{
    Decision, InterruptPolicyConfig, InterruptionPolicy, PolicyOutcome, SpeechSession, SpeechState,
};

pub use processors::{
    interruption_chain, AcknowledgmentFilter, InterruptHandler, PassthroughProcessor, ProcessorChain,
    ProcessorChainBuilder,
};
