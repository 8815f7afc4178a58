//! Cross-platform application paths using the `dirs` crate.
//!
//! Layout:
//!
//! Config dir (settings):
//!   Windows: %APPDATA%\text-to-speech\
//!   macOS:   ~/Library/Application Support/text-to-speech/
//!   Linux:   ~/.config/text-to-speech/
//!
//! Cache dir (generated audio):
//!   Windows: %LOCALAPPDATA%\text-to-speech\audio\
//!   macOS:   ~/Library/Caches/text-to-speech/audio/
//!   Linux:   ~/.cache/text-to-speech/audio/

use std::path::PathBuf;

/// Holds all resolved application directory/file paths.
#[derive(Debug, Clone)]
pub struct AppPaths {
    /// Directory for `settings.toml`.
    pub config_dir: PathBuf,
    /// Full path to `settings.toml`.
    pub settings_file: PathBuf,
    /// Directory where synthesized audio clips are written.
    pub audio_dir: PathBuf,
}

impl AppPaths {
    const APP_NAME: &'static str = "text-to-speech";

    /// Resolves all paths using the `dirs` crate.
    ///
    /// Falls back to the current directory if the platform cannot provide a
    /// standard path.
    pub fn new() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(Self::APP_NAME);

        let cache_dir = dirs::cache_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(Self::APP_NAME);

        Self {
            settings_file: config_dir.join("settings.toml"),
            config_dir,
            audio_dir: cache_dir.join("audio"),
        }
    }
}

impl Default for AppPaths {
    fn default() -> Self {
        Self::new()
    }
}
