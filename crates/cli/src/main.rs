//! Interrupt guard replay harness
//!
//! Reads replay events from stdin, runs them through the interruption chain
//! and prints decisions to stdout. Logs go to stderr.

use anyhow::Context;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

use interrupt_guard_cli::{DecisionEvent, ReplayEvent};
use interrupt_guard_config::{load_settings, Settings};
use interrupt_guard_core::{Frame, ProcessorContext};
use interrupt_guard_pipeline::{interruption_chain, InterruptionPolicy};
use interrupt_guard_text_processing::LexiconClassifier;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Priority: env vars > config/{env} > config/default > defaults
    let env = std::env::var("INTERRUPT_GUARD_ENV").ok();
    let settings = load_settings(env.as_deref()).context("Failed to load configuration")?;

    init_tracing(&settings);

    tracing::info!("Starting interrupt guard v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        environment = ?settings.environment,
        config_path = env.as_deref().unwrap_or("default"),
        "Configuration loaded"
    );

    let classifier = Arc::new(
        LexiconClassifier::from_config(&settings.lexicon).context("Invalid lexicon configuration")?,
    );
    tracing::info!(
        fillers = classifier.ignored_words().len(),
        stop_words = classifier.stop_words().len(),
        enabled = classifier.is_enabled(),
        "Lexicon ready"
    );

    let policy = InterruptionPolicy::new(settings.interruption.clone(), classifier)
        .context("Invalid interruption configuration")?;

    let session_id = uuid::Uuid::new_v4().to_string();
    let (tx, mut rx) = interruption_chain(policy).run(ProcessorContext::new(session_id.clone()));
    tracing::info!(session_id = %session_id, "Replay started");

    let origin = now();
    let reader = tokio::spawn(feed_stdin(tx));

    let mut stdout = tokio::io::stdout();
    while let Some(frame) = rx.recv().await {
        if frame.is_end_of_stream() {
            break;
        }
        if let Some(decision) = DecisionEvent::from_frame(&frame, origin) {
            let mut line = serde_json::to_string(&decision)?;
            line.push('\n');
            stdout.write_all(line.as_bytes()).await?;
            stdout.flush().await?;
        }
    }

    reader.await.context("stdin reader panicked")??;
    tracing::info!(session_id = %session_id, "Replay finished");

    Ok(())
}

/// Forward stdin events into the chain until EOF
async fn feed_stdin(tx: mpsc::Sender<Frame>) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut line_number = 0usize;

    while let Some(line) = lines.next_line().await? {
        line_number += 1;
        if line.trim().is_empty() {
            continue;
        }

        let event = match ReplayEvent::parse(&line) {
            Ok(event) => event,
            Err(e) => {
                tracing::warn!(line = line_number, error = %e, "Skipping malformed event");
                continue;
            }
        };

        if let Some(pause) = event.pause() {
            tokio::time::sleep(pause).await;
            continue;
        }

        if let Some(frame) = event.into_frame(now()) {
            if tx.send(frame).await.is_err() {
                anyhow::bail!("Pipeline closed before input ended");
            }
        }
    }

    tx.send(Frame::EndOfStream)
        .await
        .map_err(|_| anyhow::anyhow!("Pipeline closed before end of stream"))?;

    Ok(())
}

fn now() -> std::time::Instant {
    tokio::time::Instant::now().into_std()
}

/// Initialize tracing (stderr, stdout carries decisions)
fn init_tracing(config: &Settings) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = &config.observability.log_level;
        if level.contains('=') {
            level.clone().into()
        } else {
            format!("interrupt_guard={level},interrupt_guard_pipeline={level},interrupt_guard_text_processing={level}").into()
        }
    });

    let subscriber = tracing_subscriber::registry().with(env_filter);
    let fmt_layer = if config.observability.log_json {
        tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr).boxed()
    } else {
        tracing_subscriber::fmt::layer().with_writer(std::io::stderr).boxed()
    };
    subscriber.with(fmt_layer).init();
}
