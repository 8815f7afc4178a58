//! Core `SpeechSynthesizer` trait and its request / result types.

use std::fmt;
use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;

// ---------------------------------------------------------------------------
// SynthesisError
// ---------------------------------------------------------------------------

/// Errors that can occur while generating speech.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SynthesisError {
    /// HTTP transport or connection error.
    #[error("request failed: {0}")]
    Request(String),

    /// The provider did not answer within the configured timeout.
    #[error("speech provider timed out")]
    Timeout,

    /// The provider answered with a non-success status code.
    #[error("speech provider returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The provider answered 2xx but with no audio bytes.
    #[error("speech provider returned no audio")]
    EmptyAudio,

    /// The generated clip could not be written to disk.
    #[error("could not save audio: {0}")]
    Io(String),

    /// The backend needs an API key and none is configured.
    #[error("no API key configured (set ELEVENLABS_API_KEY)")]
    MissingApiKey,

    /// The background synthesis worker is gone or its queue is full.
    #[error("synthesis worker unavailable")]
    WorkerUnavailable,
}

impl From<reqwest::Error> for SynthesisError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            SynthesisError::Timeout
        } else {
            SynthesisError::Request(e.to_string())
        }
    }
}

impl From<std::io::Error> for SynthesisError {
    fn from(e: std::io::Error) -> Self {
        SynthesisError::Io(e.to_string())
    }
}

// ---------------------------------------------------------------------------
// Request / outcome
// ---------------------------------------------------------------------------

/// What the form asks the synthesizer to speak.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesisRequest {
    pub text: String,
    pub voice_id: &'static str,
}

/// Reference to a playable audio resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioLocation {
    /// A clip on the local filesystem.
    File(PathBuf),
    /// A remotely hosted clip.
    Url(String),
}

impl AudioLocation {
    /// Delete a local clip that is no longer referenced. Remote clips are
    /// left alone; a file that is already gone is not an error.
    pub fn discard(&self) {
        if let AudioLocation::File(path) = self {
            match std::fs::remove_file(path) {
                Ok(()) => log::debug!("discarded clip {}", path.display()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => log::warn!("could not remove clip {}: {e}", path.display()),
            }
        }
    }
}

impl fmt::Display for AudioLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AudioLocation::File(path) => write!(f, "{}", path.display()),
            AudioLocation::Url(url) => f.write_str(url),
        }
    }
}

/// Successful result of a synthesis call.
///
/// `audio` is `None` when the backend succeeded without producing a clip
/// (the simulated backend always does this).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpeechOutcome {
    pub audio: Option<AudioLocation>,
}

// ---------------------------------------------------------------------------
// SpeechSynthesizer trait
// ---------------------------------------------------------------------------

/// Async interface for text-to-speech backends.
///
/// Implementors must be `Send + Sync` so they can be shared as
/// `Arc<dyn SpeechSynthesizer>` with the worker task.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    async fn synthesize(&self, request: &SynthesisRequest)
        -> Result<SpeechOutcome, SynthesisError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_location_displays_path() {
        let loc = AudioLocation::File(PathBuf::from("/tmp/clip.mp3"));
        assert_eq!(loc.to_string(), "/tmp/clip.mp3");
    }

    #[test]
    fn discard_removes_local_clip_and_tolerates_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("old.mp3");
        std::fs::write(&path, b"ID3").unwrap();
        let loc = AudioLocation::File(path.clone());

        loc.discard();
        assert!(!path.exists());

        // Second call hits NotFound and stays quiet.
        loc.discard();
    }

    #[test]
    fn url_location_displays_url() {
        let loc = AudioLocation::Url("https://example.com/a.mp3".into());
        assert_eq!(loc.to_string(), "https://example.com/a.mp3");
    }

    #[test]
    fn status_error_message() {
        let err = SynthesisError::Status {
            status: 401,
            body: "invalid key".into(),
        };
        assert_eq!(err.to_string(), "speech provider returned 401: invalid key");
    }

    #[test]
    fn io_error_converts() {
        let err: SynthesisError =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied").into();
        assert!(matches!(err, SynthesisError::Io(_)));
    }

    #[test]
    fn default_outcome_has_no_audio() {
        assert!(SpeechOutcome::default().audio.is_none());
    }
}
