//! Frame processors for the pipeline
//!
//! This module contains FrameProcessor implementations for:
//! - InterruptHandler: Runs transcripts through the interruption policy
//! - AcknowledgmentFilter: Drops acknowledgments after stop commands
//! - ProcessorChain: Channel-based chain connecting processors

mod ack_filter;
mod chain;
mod interrupt_handler;

pub use ack_filter::AcknowledgmentFilter;
pub use chain::{PassthroughProcessor, ProcessorChain, ProcessorChainBuilder};
pub use interrupt_handler::InterruptHandler;

use std::sync::Arc;
use std::time::Instant;

use crate::acknowledgment::AckSuppressor;
use crate::policy::InterruptionPolicy;

/// Build the standard chain: interrupt handler, then acknowledgment filter
///
/// Both processors share one suppressor so a stop command seen by the
/// handler suppresses the acknowledgment the filter sees next.
pub fn interruption_chain(policy: InterruptionPolicy) -> ProcessorChain {
    let suppressor = Arc::new(AckSuppressor::from_config(policy.config()));

    ProcessorChain::builder("interruption")
        .processor(InterruptHandler::new(policy, Arc::clone(&suppressor)))
        .processor(AcknowledgmentFilter::new(suppressor))
        .build()
}

/// Current time on the tokio clock
///
/// Follows paused time in tests, so deadlines computed from fragment
/// timestamps line up with the chain's timers.
pub(crate) fn now() -> Instant {
    tokio::time::Instant::now().into_std()
}
