//! Channel-based processor chain
//!
//! Connects multiple FrameProcessors with tokio channels for
//! concurrent, streaming frame processing. Each processor task waits on its
//! input channel and on the processor's own deadline at the same time, so
//! pending timeouts fire without a dedicated timer task and are cancelled
//! implicitly when a frame arrives first.

use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;
use interrupt_guard_core::{Frame, FrameProcessor, ProcessorContext, Result};

/// Channel capacity for inter-processor communication
const DEFAULT_CHANNEL_CAPACITY: usize = 64;

/// A chain of frame processors connected by channels
pub struct ProcessorChain {
    /// Name of this chain
    name: String,
    /// Processors in order
    processors: Vec<Arc<dyn FrameProcessor>>,
    /// Channel capacity
    channel_capacity: usize,
}

enum Wake {
    Frame(Frame),
    Deadline,
    Closed,
}

impl ProcessorChain {
    /// Create a new processor chain
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            processors: Vec::new(),
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }

    /// Create using the builder
    pub fn builder(name: impl Into<String>) -> ProcessorChainBuilder {
        ProcessorChainBuilder::new(name)
    }

    /// Add a processor to the chain
    pub fn add<P: FrameProcessor + 'static>(&mut self, processor: P) -> &mut Self {
        self.processors.push(Arc::new(processor));
        self
    }

    /// Get the chain name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get number of processors
    pub fn len(&self) -> usize {
        self.processors.len()
    }

    /// Check if chain is empty
    pub fn is_empty(&self) -> bool {
        self.processors.is_empty()
    }

    /// Process a single frame through the chain synchronously
    ///
    /// Deadlines are not serviced here; use `run` for streaming with timeouts.
    pub async fn process_one(
        &self,
        frame: Frame,
        context: &mut ProcessorContext,
    ) -> Result<Vec<Frame>> {
        let mut frames = vec![frame];

        for processor in &self.processors {
            let mut next_frames = Vec::new();

            for f in frames {
                let output = processor.process(f, context).await?;
                next_frames.extend(output);
            }

            frames = next_frames;
        }

        Ok(frames)
    }

    /// Start the processing pipeline
    ///
    /// Spawns a task for each processor connected by channels.
    /// Returns the input sender and output receiver.
    pub fn run(
        &self,
        initial_context: ProcessorContext,
    ) -> (mpsc::Sender<Frame>, mpsc::Receiver<Frame>) {
        let (input_tx, input_rx) = mpsc::channel::<Frame>(self.channel_capacity);

        if self.processors.is_empty() {
            // Empty chain: directly connect input to output
            let (output_tx, output_rx) = mpsc::channel::<Frame>(self.channel_capacity);
            let mut input_rx = input_rx;

            tokio::spawn(async move {
                while let Some(frame) = input_rx.recv().await {
                    if output_tx.send(frame).await.is_err() {
                        break;
                    }
                }
            });

            return (input_tx, output_rx);
        }

        let mut current_rx = input_rx;

        for processor in &self.processors {
            let (next_tx, next_rx) = mpsc::channel::<Frame>(self.channel_capacity);

            tokio::spawn(run_processor(
                Arc::clone(processor),
                initial_context.clone(),
                current_rx,
                next_tx,
            ));

            current_rx = next_rx;
        }

        (input_tx, current_rx)
    }
}

async fn run_processor(
    processor: Arc<dyn FrameProcessor>,
    mut context: ProcessorContext,
    mut rx: mpsc::Receiver<Frame>,
    tx: mpsc::Sender<Frame>,
) {
    let processor_name = processor.name();

    if let Err(e) = processor.on_start(&mut context).await {
        tracing::error!(
            processor = processor_name,
            error = %e,
            "Processor on_start failed"
        );
    }

    loop {
        let deadline = processor.deadline();

        let wake = tokio::select! {
            biased;
            frame = rx.recv() => match frame {
                Some(frame) => Wake::Frame(frame),
                None => Wake::Closed,
            },
            _ = sleep_until(deadline) => Wake::Deadline,
        };

        let (result, is_eos) = match wake {
            Wake::Frame(frame) => {
                let is_eos = frame.is_end_of_stream();
                (processor.process(frame, &mut context).await, is_eos)
            }
            Wake::Deadline => {
                tracing::debug!(processor = processor_name, "Deadline elapsed");
                (processor.on_deadline(&mut context).await, false)
            }
            Wake::Closed => break,
        };

        let delivered = match result {
            Ok(output_frames) => forward(&tx, output_frames).await,
            Err(e) => {
                tracing::error!(
                    processor = processor_name,
                    error = %e,
                    "Processor error"
                );
                let error_frame = Frame::Error {
                    stage: processor_name.to_string(),
                    message: e.to_string(),
                    recoverable: true,
                };
                tx.send(error_frame).await.is_ok()
            }
        };

        if is_eos {
            if let Err(e) = processor.on_stop(&mut context).await {
                tracing::error!(
                    processor = processor_name,
                    error = %e,
                    "Processor on_stop failed"
                );
            }
        }

        if !delivered {
            tracing::debug!(processor = processor_name, "Output channel closed");
            break;
        }
    }

    tracing::debug!(processor = processor_name, "Processor task exiting");
}

async fn forward(tx: &mpsc::Sender<Frame>, frames: Vec<Frame>) -> bool {
    for frame in frames {
        if tx.send(frame).await.is_err() {
            return false;
        }
    }
    true
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(tokio::time::Instant::from_std(deadline)).await,
        None => std::future::pending().await,
    }
}

/// Builder for ProcessorChain
pub struct ProcessorChainBuilder {
    chain: ProcessorChain,
}

impl ProcessorChainBuilder {
    /// Create a new builder
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            chain: ProcessorChain::new(name),
        }
    }

    /// Add a processor
    pub fn processor<P: FrameProcessor + 'static>(mut self, processor: P) -> Self {
        self.chain.add(processor);
        self
    }

    /// Set channel capacity
    pub fn channel_capacity(mut self, capacity: usize) -> Self {
        self.chain.channel_capacity = capacity;
        self
    }

    /// Build the chain
    pub fn build(self) -> ProcessorChain {
        self.chain
    }
}

/// A passthrough processor for testing
pub struct PassthroughProcessor {
    name: &'static str,
}

impl PassthroughProcessor {
    /// Create a new passthrough processor
    pub fn new(name: &'static str) -> Self {
        Self { name }
    }
}

#[async_trait::async_trait]
impl FrameProcessor for PassthroughProcessor {
    async fn process(
        &self,
        frame: Frame,
        _context: &mut ProcessorContext,
    ) -> Result<Vec<Frame>> {
        Ok(vec![frame])
    }

    fn name(&self) -> &'static str {
        self.name
    }
}
