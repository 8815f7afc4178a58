//! Form state and the values derived from it.
//!
//! [`FormState`] holds everything the request form knows. Its fields are
//! only writable from inside the `form` module, so the voice id can never
//! leave the catalogue and `is_submitting` only changes through the submit
//! operation.

use crate::config::FormConfig;
use crate::tts::AudioLocation;
use crate::voice::{self, VoiceOption};

// ---------------------------------------------------------------------------
// Limits
// ---------------------------------------------------------------------------

/// Character thresholds applied to the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Longest text that may be submitted.
    pub char_limit: usize,
    /// Length at which the near-limit warning starts.
    pub warning_threshold: usize,
}

impl Limits {
    pub fn from_config(config: &FormConfig) -> Self {
        Self {
            char_limit: config.char_limit,
            warning_threshold: config.warning_threshold,
        }
    }

    /// Classify a text length against these limits.
    pub fn status(&self, len: usize) -> LimitStatus {
        if len > self.char_limit {
            LimitStatus::OverLimit
        } else if len >= self.warning_threshold {
            LimitStatus::NearLimit
        } else {
            LimitStatus::Normal
        }
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self::from_config(&FormConfig::default())
    }
}

// ---------------------------------------------------------------------------
// LimitStatus
// ---------------------------------------------------------------------------

/// Visual state of the character counter.
///
/// ```
/// use text_to_speech::form::{LimitStatus, Limits};
///
/// let limits = Limits::default();
/// assert_eq!(limits.status(0), LimitStatus::Normal);
/// assert_eq!(limits.status(799), LimitStatus::Normal);
/// assert_eq!(limits.status(800), LimitStatus::NearLimit);
/// assert_eq!(limits.status(1024), LimitStatus::NearLimit);
/// assert_eq!(limits.status(1025), LimitStatus::OverLimit);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitStatus {
    Normal,
    NearLimit,
    OverLimit,
}

impl LimitStatus {
    pub fn is_over(&self) -> bool {
        matches!(self, LimitStatus::OverLimit)
    }

    pub fn is_near(&self) -> bool {
        matches!(self, LimitStatus::NearLimit)
    }
}

// ---------------------------------------------------------------------------
// SubmitPhase
// ---------------------------------------------------------------------------

/// The form's only state machine.
///
/// ```text
/// Idle ──submit accepted──▶ Submitting ──result (ok or err)──▶ Idle
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitPhase {
    #[default]
    Idle,
    Submitting,
}

// ---------------------------------------------------------------------------
// FormState
// ---------------------------------------------------------------------------

/// Everything the request form stores. Lives as long as the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    pub(in crate::form) text: String,
    pub(in crate::form) voice: &'static VoiceOption,
    pub(in crate::form) is_submitting: bool,
    pub(in crate::form) result_audio: Option<AudioLocation>,
}

impl FormState {
    /// Fresh state: empty text, `voice` selected, idle, no audio.
    pub fn new(voice: &'static VoiceOption) -> Self {
        Self {
            text: String::new(),
            voice,
            is_submitting: false,
            result_audio: None,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length of the text in characters (Unicode scalar values).
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    pub fn selected_voice(&self) -> &'static VoiceOption {
        self.voice
    }

    pub fn selected_voice_id(&self) -> &'static str {
        self.voice.id
    }

    pub fn is_submitting(&self) -> bool {
        self.is_submitting
    }

    pub fn phase(&self) -> SubmitPhase {
        if self.is_submitting {
            SubmitPhase::Submitting
        } else {
            SubmitPhase::Idle
        }
    }

    pub fn result_audio(&self) -> Option<&AudioLocation> {
        self.result_audio.as_ref()
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::new(voice::default_voice())
    }
}
