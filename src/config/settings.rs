//! Application settings structs, defaults and TOML persistence.
//!
//! All structs implement `Serialize`, `Deserialize`, `Default` and `Clone`
//! so they can be round-tripped through TOML files and shared across threads.
//! Every table is `#[serde(default)]`, so a hand-edited file only needs the
//! keys it wants to change.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::AppPaths;

/// Environment variable that overrides [`SynthesisConfig::api_key`].
pub const API_KEY_ENV: &str = "ELEVENLABS_API_KEY";

// ---------------------------------------------------------------------------
// SynthesisProvider
// ---------------------------------------------------------------------------

/// Selects which speech-synthesis backend handles a submit.
///
/// | Variant      | Behaviour                                          |
/// |--------------|----------------------------------------------------|
/// | Simulated    | Waits `simulated_delay_ms`, succeeds with no audio |
/// | ElevenLabs   | Calls the ElevenLabs REST API, saves an MP3 clip   |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SynthesisProvider {
    Simulated,
    ElevenLabs,
}

impl Default for SynthesisProvider {
    fn default() -> Self {
        Self::Simulated
    }
}

// ---------------------------------------------------------------------------
// SynthesisConfig
// ---------------------------------------------------------------------------

/// Settings for the speech-synthesis collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthesisConfig {
    /// Which backend to use.
    pub provider: SynthesisProvider,
    /// Base URL of the provider API (no trailing slash).
    pub base_url: String,
    /// API key. `None` falls back to the `ELEVENLABS_API_KEY` environment
    /// variable.
    pub api_key: Option<String>,
    /// Provider model identifier sent with every request.
    pub model_id: String,
    /// Maximum seconds to wait for the provider before timing out.
    pub timeout_secs: u64,
    /// Delay used by the simulated backend, in milliseconds.
    pub simulated_delay_ms: u64,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            provider: SynthesisProvider::default(),
            base_url: "https://api.elevenlabs.io".into(),
            api_key: None,
            model_id: "eleven_multilingual_v2".into(),
            timeout_secs: 30,
            simulated_delay_ms: 2_000,
        }
    }
}

impl SynthesisConfig {
    /// The API key to send, preferring the environment over the file.
    ///
    /// Empty strings are treated as absent.
    pub fn resolved_api_key(&self) -> Option<String> {
        resolve_api_key(std::env::var(API_KEY_ENV).ok(), self.api_key.as_deref())
    }
}

/// Pick the key from `env` if it is non-empty, else from `configured`.
pub fn resolve_api_key(env: Option<String>, configured: Option<&str>) -> Option<String> {
    env.filter(|k| !k.is_empty())
        .or_else(|| configured.filter(|k| !k.is_empty()).map(str::to_owned))
}

// ---------------------------------------------------------------------------
// FormConfig
// ---------------------------------------------------------------------------

/// Validation limits and defaults for the request form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// Advisory maximum input length in characters; longer text cannot be
    /// submitted but can still be edited.
    pub char_limit: usize,
    /// Length at which the counter switches to the near-limit colour.
    pub warning_threshold: usize,
    /// Voice selected when the form is created.
    pub default_voice_id: String,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            char_limit: 1024,
            warning_threshold: 800,
            default_voice_id: "21m00Tcm4TlvDq8ikWAM".into(),
        }
    }
}

// ---------------------------------------------------------------------------
// UiConfig
// ---------------------------------------------------------------------------

/// egui window and toast settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Initial inner window size `(width, height)` in points.
    pub window_size: (f32, f32),
    /// Seconds a toast stays on screen.
    pub toast_secs: u64,
    /// Maximum number of toasts shown at once; the oldest is dropped first.
    pub max_toasts: usize,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            window_size: (720.0, 640.0),
            toast_secs: 4,
            max_toasts: 5,
        }
    }
}

// ---------------------------------------------------------------------------
// AppConfig  (top-level)
// ---------------------------------------------------------------------------

/// Top-level application configuration, serialised as `settings.toml`.
///
/// ```rust,no_run
/// use text_to_speech::config::AppConfig;
///
/// // Load (returns Default when file is missing)
/// let config = AppConfig::load().unwrap();
/// // config.save().unwrap();
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Speech-synthesis backend settings.
    pub synthesis: SynthesisConfig,
    /// Form limits and defaults.
    pub form: FormConfig,
    /// Window / toast settings.
    pub ui: UiConfig,
}

impl AppConfig {
    /// Load configuration from the platform-appropriate `settings.toml`.
    ///
    /// Returns `Ok(AppConfig::default())` when the file does not exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&AppPaths::new().settings_file)
    }

    /// Load from an explicit path.
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to the platform-appropriate `settings.toml`,
    /// creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&AppPaths::new().settings_file)
    }

    /// Save to an explicit path.
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Returns `true` when no `settings.toml` file exists yet.
    pub fn is_first_run() -> bool {
        !AppPaths::new().settings_file.exists()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
