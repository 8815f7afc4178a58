//! Speech-synthesis collaborators.
//!
//! This module provides:
//! * [`SpeechSynthesizer`] — async trait implemented by every backend.
//! * [`SimulatedSynthesizer`] — fixed delay, succeeds without audio.
//! * [`ElevenLabsSynthesizer`] — ElevenLabs REST API, saves MP3 clips.
//! * [`run_synthesis_worker`] — tokio task that serves the UI thread.
//! * [`SynthesisError`] — error variants for synthesis calls.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use text_to_speech::tts::{SimulatedSynthesizer, SpeechSynthesizer, SynthesisRequest};
//!
//! #[tokio::main]
//! async fn main() {
//!     let synth = SimulatedSynthesizer::new(Duration::from_millis(2_000));
//!     let request = SynthesisRequest {
//!         text: "Hello world".into(),
//!         voice_id: "21m00Tcm4TlvDq8ikWAM",
//!     };
//!     let outcome = synth.synthesize(&request).await.unwrap();
//!     assert!(outcome.audio.is_none());
//! }
//! ```

pub mod elevenlabs;
pub mod simulated;
pub mod synthesizer;
pub mod worker;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use elevenlabs::ElevenLabsSynthesizer;
pub use simulated::SimulatedSynthesizer;
pub use synthesizer::{
    AudioLocation, SpeechOutcome, SpeechSynthesizer, SynthesisError, SynthesisRequest,
};
pub use worker::{build_synthesizer, run_synthesis_worker, SynthesisCommand, SynthesisReply};
