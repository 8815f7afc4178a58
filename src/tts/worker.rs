//! Background synthesis worker.
//!
//! The egui thread never awaits. It hands a [`SynthesisCommand`] to
//! [`run_synthesis_worker`] over a `tokio::sync::mpsc` channel and picks the
//! [`SynthesisReply`] up with `try_recv` on a later frame.
//!
//! ```text
//! UI ──SynthesisCommand──▶ run_synthesis_worker ──synthesize().await──▶ backend
//!  ▲                                │
//!  └──────── SynthesisReply ────────┘
//! ```

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;

use crate::config::{AppConfig, AppPaths, SynthesisProvider};

use super::elevenlabs::ElevenLabsSynthesizer;
use super::simulated::SimulatedSynthesizer;
use super::synthesizer::{SpeechOutcome, SpeechSynthesizer, SynthesisError, SynthesisRequest};

/// Commands sent from the UI thread to the worker.
#[derive(Debug, Clone)]
pub enum SynthesisCommand {
    Synthesize(SynthesisRequest),
}

/// Results delivered from the worker back to the UI.
#[derive(Debug, Clone)]
pub enum SynthesisReply {
    Finished(Result<SpeechOutcome, SynthesisError>),
}

/// Run until `command_rx` is closed, answering each command in order.
pub async fn run_synthesis_worker(
    synth: Arc<dyn SpeechSynthesizer>,
    mut command_rx: mpsc::Receiver<SynthesisCommand>,
    reply_tx: mpsc::Sender<SynthesisReply>,
) {
    while let Some(cmd) = command_rx.recv().await {
        match cmd {
            SynthesisCommand::Synthesize(request) => {
                log::info!(
                    "worker: synthesizing {} chars with voice {}",
                    request.text.chars().count(),
                    request.voice_id
                );

                let result = synth.synthesize(&request).await;
                match &result {
                    Ok(outcome) => log::info!(
                        "worker: done (audio: {})",
                        outcome.audio.is_some()
                    ),
                    Err(e) => log::error!("worker: synthesis failed: {e}"),
                }

                if reply_tx.send(SynthesisReply::Finished(result)).await.is_err() {
                    log::warn!("worker: reply channel closed, dropping result");
                    break;
                }
            }
        }
    }

    log::info!("worker: command channel closed, shutting down");
}

/// Construct the backend selected by `config.synthesis.provider`.
pub fn build_synthesizer(config: &AppConfig, paths: &AppPaths) -> Arc<dyn SpeechSynthesizer> {
    match config.synthesis.provider {
        SynthesisProvider::Simulated => {
            log::info!(
                "using simulated synthesizer ({} ms delay)",
                config.synthesis.simulated_delay_ms
            );
            Arc::new(SimulatedSynthesizer::new(Duration::from_millis(
                config.synthesis.simulated_delay_ms,
            )))
        }
        SynthesisProvider::ElevenLabs => {
            let synth =
                ElevenLabsSynthesizer::from_config(&config.synthesis, paths.audio_dir.clone());
            if config.synthesis.resolved_api_key().is_none() {
                log::warn!("ElevenLabs selected but no API key is configured");
            }
            match synth.prune_clips() {
                Ok(0) => {}
                Ok(n) => log::info!("removed {n} clip(s) left from a previous session"),
                Err(e) => log::warn!("could not prune {}: {e}", paths.audio_dir.display()),
            }
            log::info!("using ElevenLabs synthesizer at {}", config.synthesis.base_url);
            Arc::new(synth)
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
