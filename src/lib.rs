//! Free Text to Speech: a desktop widget that turns typed text into speech.
//!
//! The window ([`app::PageShell`]) hosts one [`form::SpeechRequestForm`].
//! Submits go to a [`tts::SpeechSynthesizer`] running on a background tokio
//! worker; feedback reaches the user through an injected
//! [`notify::Notifier`].

pub mod app;
pub mod config;
pub mod form;
pub mod notify;
pub mod playback;
pub mod tts;
pub mod voice;
