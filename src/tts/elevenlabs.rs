//! ElevenLabs REST synthesizer.
//!
//! Calls `POST {base_url}/v1/text-to-speech/{voice_id}` with the
//! `xi-api-key` header and a `{ text, model_id }` JSON body. The response
//! body is an MP3 clip, which is written under the audio directory and
//! returned as an [`AudioLocation::File`].
//!
//! All connection details come from [`SynthesisConfig`]; nothing is
//! hardcoded beyond the endpoint path.

use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use async_trait::async_trait;

use crate::config::SynthesisConfig;

use super::synthesizer::{
    AudioLocation, SpeechOutcome, SpeechSynthesizer, SynthesisError, SynthesisRequest,
};

pub struct ElevenLabsSynthesizer {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    model_id: String,
    audio_dir: PathBuf,
    clip_seq: AtomicU64,
}

impl ElevenLabsSynthesizer {
    /// Build a synthesizer from application config.
    ///
    /// The API key is resolved once here (environment first, then file).
    /// A missing key is not an error until the first request.
    pub fn from_config(config: &SynthesisConfig, audio_dir: PathBuf) -> Self {
        Self::new(
            &config.base_url,
            config.resolved_api_key(),
            &config.model_id,
            Duration::from_secs(config.timeout_secs),
            audio_dir,
        )
    }

    pub fn new(
        base_url: &str,
        api_key: Option<String>,
        model_id: &str,
        timeout: Duration,
        audio_dir: PathBuf,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            model_id: model_id.to_string(),
            audio_dir,
            clip_seq: AtomicU64::new(0),
        }
    }

    /// Remove `.mp3` clips left in the audio directory by earlier sessions.
    ///
    /// Returns how many files were deleted. A missing directory counts as
    /// empty.
    pub fn prune_clips(&self) -> std::io::Result<usize> {
        let entries = match std::fs::read_dir(&self.audio_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(e),
        };

        let mut removed = 0;
        for entry in entries {
            let path = entry?.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == "mp3") {
                std::fs::remove_file(&path)?;
                removed += 1;
            }
        }
        Ok(removed)
    }

    fn endpoint(&self, voice_id: &str) -> String {
        format!("{}/v1/text-to-speech/{voice_id}", self.base_url)
    }

    /// Unique file path for the next clip.
    fn next_clip_path(&self, voice_id: &str) -> PathBuf {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or(0);
        let seq = self.clip_seq.fetch_add(1, Ordering::Relaxed);
        self.audio_dir
            .join(format!("{voice_id}-{millis}-{seq}.mp3"))
    }
}

#[async_trait]
impl SpeechSynthesizer for ElevenLabsSynthesizer {
    async fn synthesize(
        &self,
        request: &SynthesisRequest,
    ) -> Result<SpeechOutcome, SynthesisError> {
        let key = self
            .api_key
            .as_deref()
            .ok_or(SynthesisError::MissingApiKey)?;

        let body = serde_json::json!({
            "text":     request.text,
            "model_id": self.model_id,
        });

        let response = self
            .client
            .post(self.endpoint(request.voice_id))
            .header("xi-api-key", key)
            .header(reqwest::header::ACCEPT, "audio/mpeg")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SynthesisError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let audio = response.bytes().await?;
        if audio.is_empty() {
            return Err(SynthesisError::EmptyAudio);
        }

        tokio::fs::create_dir_all(&self.audio_dir).await?;
        let path = self.next_clip_path(request.voice_id);
        tokio::fs::write(&path, &audio).await?;

        log::info!(
            "elevenlabs: saved {} bytes to {}",
            audio.len(),
            path.display()
        );

        Ok(SpeechOutcome {
            audio: Some(AudioLocation::File(path)),
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const VOICE: &str = "EXAVITQu4vr4xnSDxMaL";

    fn request(text: &str) -> SynthesisRequest {
        SynthesisRequest {
            text: text.into(),
            voice_id: VOICE,
        }
    }

    fn synth(server: &MockServer, key: Option<&str>, dir: PathBuf) -> ElevenLabsSynthesizer {
        ElevenLabsSynthesizer::new(
            &server.uri(),
            key.map(str::to_string),
            "eleven_multilingual_v2",
            Duration::from_secs(5),
            dir,
        )
    }

    #[tokio::test]
    async fn writes_returned_audio_to_disk() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(format!("/v1/text-to-speech/{VOICE}")))
            .and(header("xi-api-key", "test-key"))
            .and(body_json(serde_json::json!({
                "text": "Hello world",
                "model_id": "eleven_multilingual_v2",
            })))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0xFFu8; 512]))
            .expect(1)
            .mount(&server)
            .await;

        let dir = tempdir().unwrap();
        let audio_dir = dir.path().join("audio");
        let outcome = synth(&server, Some("test-key"), audio_dir.clone())
            .synthesize(&request("Hello world"))
            .await
            .expect("synthesis");

        let Some(AudioLocation::File(file)) = outcome.audio else {
            panic!("expected a file location");
        };
        assert!(file.starts_with(&audio_dir));
        assert_eq!(std::fs::read(&file).unwrap().len(), 512);
    }

    #[tokio::test]
    async fn consecutive_clips_get_distinct_paths() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![1u8; 8]))
            .mount(&server)
            .await;

        let dir = tempdir().unwrap();
        let s = synth(&server, Some("k"), dir.path().to_path_buf());
        let a = s.synthesize(&request("one")).await.unwrap().audio;
        let b = s.synthesize(&request("two")).await.unwrap().audio;
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn error_status_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
            .mount(&server)
            .await;

        let dir = tempdir().unwrap();
        let err = synth(&server, Some("bad"), dir.path().to_path_buf())
            .synthesize(&request("hi"))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            SynthesisError::Status {
                status: 401,
                body: "invalid api key".into()
            }
        );
    }

    #[tokio::test]
    async fn empty_body_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let dir = tempdir().unwrap();
        let err = synth(&server, Some("k"), dir.path().to_path_buf())
            .synthesize(&request("hi"))
            .await
            .unwrap_err();

        assert_eq!(err, SynthesisError::EmptyAudio);
    }

    #[tokio::test]
    async fn missing_key_fails_without_calling_provider() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![1u8; 8]))
            .expect(0)
            .mount(&server)
            .await;

        let dir = tempdir().unwrap();
        let err = synth(&server, None, dir.path().to_path_buf())
            .synthesize(&request("hi"))
            .await
            .unwrap_err();

        assert_eq!(err, SynthesisError::MissingApiKey);
    }

    #[tokio::test]
    async fn slow_provider_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_bytes(vec![1u8; 8])
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let dir = tempdir().unwrap();
        let s = ElevenLabsSynthesizer::new(
            &server.uri(),
            Some("k".into()),
            "eleven_multilingual_v2",
            Duration::from_millis(50),
            dir.path().to_path_buf(),
        );

        let err = s.synthesize(&request("hi")).await.unwrap_err();
        assert_eq!(err, SynthesisError::Timeout);
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let s = ElevenLabsSynthesizer::new(
            "https://api.elevenlabs.io/",
            None,
            "m",
            Duration::from_secs(1),
            PathBuf::from("."),
        );
        assert_eq!(
            s.endpoint(VOICE),
            format!("https://api.elevenlabs.io/v1/text-to-speech/{VOICE}")
        );
    }

    fn offline(dir: PathBuf) -> ElevenLabsSynthesizer {
        ElevenLabsSynthesizer::new("http://127.0.0.1:9", None, "m", Duration::from_secs(1), dir)
    }

    #[test]
    fn prune_removes_only_leftover_clips() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("a.mp3"), b"ID3").unwrap();
        std::fs::write(dir.path().join("b.mp3"), b"ID3").unwrap();
        std::fs::write(dir.path().join("notes.txt"), b"keep").unwrap();

        let removed = offline(dir.path().to_path_buf()).prune_clips().unwrap();

        assert_eq!(removed, 2);
        assert!(!dir.path().join("a.mp3").exists());
        assert!(dir.path().join("notes.txt").exists());
    }

    #[test]
    fn prune_of_missing_dir_is_a_no_op() {
        let dir = tempdir().unwrap();
        let s = offline(dir.path().join("never-created"));
        assert_eq!(s.prune_clips().unwrap(), 0);
    }
}
