//! The speech request form.
//!
//! * [`SpeechRequestForm`] — owns the state, validates input and drives the
//!   submit cycle.
//! * [`FormState`] / [`LimitStatus`] / [`SubmitPhase`] — what the form holds
//!   and what is derived from it.
//! * [`FormAction`] — what the egui view asks its host to do.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//! use text_to_speech::config::FormConfig;
//! use text_to_speech::form::SpeechRequestForm;
//! use text_to_speech::notify::ToastQueue;
//! use text_to_speech::tts::SimulatedSynthesizer;
//!
//! #[tokio::main]
//! async fn main() {
//!     let toasts = ToastQueue::new(Duration::from_secs(4), 5);
//!     let mut form = SpeechRequestForm::new(&FormConfig::default(), Arc::new(toasts));
//!
//!     form.edit_text("Hello world");
//!     let synth = SimulatedSynthesizer::new(Duration::from_millis(2_000));
//!     form.submit_with(&synth).await.unwrap();
//!     assert!(!form.state().is_submitting());
//! }
//! ```

pub mod controller;
pub mod state;
pub mod view;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use controller::{FormError, SpeechRequestForm, SubmitBlocked};
pub use state::{FormState, LimitStatus, Limits, SubmitPhase};
pub use view::{status_color, FormAction};
