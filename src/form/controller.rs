//! The speech request form: edit, select, submit.
//!
//! [`SpeechRequestForm`] owns a [`FormState`] and an injected
//! [`Notifier`]. Submitting is split in two so the UI thread never awaits:
//!
//! 1. [`begin_submit`](SpeechRequestForm::begin_submit) runs the guard,
//!    flips `is_submitting` and returns the [`SynthesisRequest`] to send.
//! 2. [`finish_submit`](SpeechRequestForm::finish_submit) applies whatever
//!    the synthesizer answered and returns the form to idle.
//!
//! [`submit_with`](SpeechRequestForm::submit_with) glues both around one
//! `.await` for callers that do own an async context.

use std::sync::Arc;

use thiserror::Error;

use crate::config::FormConfig;
use crate::notify::{Notification, Notifier};
use crate::tts::{
    AudioLocation, SpeechOutcome, SpeechSynthesizer, SynthesisError, SynthesisRequest,
};
use crate::voice;

use super::state::{FormState, LimitStatus, Limits};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Rejected user input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("unknown voice id: {0}")]
    UnknownVoice(String),
}

/// Why a submit was refused. The form is left untouched in every case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubmitBlocked {
    #[error("a request is already in flight")]
    AlreadySubmitting,
    #[error("text is {len} characters, limit is {limit}")]
    OverLimit { len: usize, limit: usize },
    #[error("text is empty")]
    Empty,
}

// ---------------------------------------------------------------------------
// SpeechRequestForm
// ---------------------------------------------------------------------------

pub struct SpeechRequestForm {
    state: FormState,
    limits: Limits,
    notifier: Arc<dyn Notifier>,
}

impl SpeechRequestForm {
    /// Create a form using the limits and default voice from `config`.
    pub fn new(config: &FormConfig, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            state: FormState::new(voice::voice_or_default(&config.default_voice_id)),
            limits: Limits::from_config(config),
            notifier,
        }
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn limits(&self) -> Limits {
        self.limits
    }

    pub fn limit_status(&self) -> LimitStatus {
        self.limits.status(self.state.char_count())
    }

    /// Counter text, e.g. `"1025/1024"`.
    pub fn char_count_label(&self) -> String {
        format!("{}/{}", self.state.char_count(), self.limits.char_limit)
    }

    /// Run the submit guard without changing anything.
    pub fn check_submit(&self) -> Result<(), SubmitBlocked> {
        if self.state.is_submitting {
            return Err(SubmitBlocked::AlreadySubmitting);
        }
        let len = self.state.char_count();
        if len > self.limits.char_limit {
            return Err(SubmitBlocked::OverLimit {
                len,
                limit: self.limits.char_limit,
            });
        }
        if len == 0 {
            return Err(SubmitBlocked::Empty);
        }
        Ok(())
    }

    /// Whether the submit control should be enabled.
    pub fn can_submit(&self) -> bool {
        self.check_submit().is_ok()
    }

    /// The clip the play control may open. Hidden while a request is in
    /// flight, since a successful reply replaces it.
    pub fn playable_audio(&self) -> Option<&AudioLocation> {
        if self.state.is_submitting {
            return None;
        }
        self.state.result_audio.as_ref()
    }

    // ── User operations ──────────────────────────────────────────────────

    /// Replace the text verbatim.
    ///
    /// Text over the limit is kept as-is; each such edit raises one warning.
    pub fn edit_text(&mut self, text: impl Into<String>) {
        self.state.text = text.into();
        let len = self.state.char_count();
        if len > self.limits.char_limit {
            log::debug!("form: text over limit ({len}/{})", self.limits.char_limit);
            self.notifier
                .notify(Notification::limit_exceeded(self.limits.char_limit));
        }
    }

    /// Select a voice from the catalogue. Unknown ids leave the form
    /// unchanged.
    pub fn select_voice(&mut self, id: &str) -> Result<(), FormError> {
        let voice = voice::find_voice(id).ok_or_else(|| FormError::UnknownVoice(id.to_string()))?;
        log::debug!("form: voice -> {}", voice.name);
        self.state.voice = voice;
        Ok(())
    }

    /// Guard the submit and, if accepted, enter the submitting phase.
    pub fn begin_submit(&mut self) -> Result<SynthesisRequest, SubmitBlocked> {
        if let Err(blocked) = self.check_submit() {
            log::debug!("form: submit blocked: {blocked}");
            return Err(blocked);
        }

        self.state.is_submitting = true;
        log::info!(
            "form: submitting {} chars with voice {}",
            self.state.char_count(),
            self.state.voice.name
        );

        Ok(SynthesisRequest {
            text: self.state.text.clone(),
            voice_id: self.state.voice.id,
        })
    }

    /// Apply the synthesizer's answer and return to idle.
    ///
    /// Success replaces the audio reference (clearing it when the backend
    /// produced none) and raises the success notification. Failure keeps the
    /// previous audio and raises a destructive notification. A result that
    /// arrives while idle is ignored.
    ///
    /// A replaced local clip is deleted so the audio cache holds at most the
    /// clip currently on screen.
    pub fn finish_submit(&mut self, result: Result<SpeechOutcome, SynthesisError>) {
        if !self.state.is_submitting {
            log::warn!("form: ignoring synthesis result received while idle");
            return;
        }
        self.state.is_submitting = false;

        match result {
            Ok(outcome) => {
                let previous =
                    std::mem::replace(&mut self.state.result_audio, outcome.audio);
                if let Some(old) = previous {
                    if self.state.result_audio.as_ref() != Some(&old) {
                        old.discard();
                    }
                }
                self.notifier.notify(Notification::generated());
            }
            Err(e) => {
                log::error!("form: synthesis failed: {e}");
                self.notifier.notify(Notification::generation_failed(&e));
            }
        }
    }

    /// Submit and await the synthesizer in one call.
    pub async fn submit_with(
        &mut self,
        synth: &dyn SpeechSynthesizer,
    ) -> Result<(), SubmitBlocked> {
        let request = self.begin_submit()?;
        let result = synth.synthesize(&request).await;
        self.finish_submit(result);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
