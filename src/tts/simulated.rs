//! Placeholder synthesizer: waits, then succeeds without audio.
//!
//! Stands in for a real provider when none is configured. It never fails
//! and never times out.

use std::time::Duration;

use async_trait::async_trait;

use super::synthesizer::{SpeechOutcome, SpeechSynthesizer, SynthesisError, SynthesisRequest};

pub struct SimulatedSynthesizer {
    delay: Duration,
}

impl SimulatedSynthesizer {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

#[async_trait]
impl SpeechSynthesizer for SimulatedSynthesizer {
    async fn synthesize(
        &self,
        request: &SynthesisRequest,
    ) -> Result<SpeechOutcome, SynthesisError> {
        log::debug!(
            "simulated synthesis: {} chars, voice {}, sleeping {:?}",
            request.text.chars().count(),
            request.voice_id,
            self.delay
        );
        tokio::time::sleep(self.delay).await;
        Ok(SpeechOutcome::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> SynthesisRequest {
        SynthesisRequest {
            text: "Hello world".into(),
            voice_id: "21m00Tcm4TlvDq8ikWAM",
        }
    }

    #[tokio::test(start_paused = true)]
    async fn waits_full_delay_then_succeeds_without_audio() {
        let synth = SimulatedSynthesizer::new(Duration::from_millis(2_000));
        let start = tokio::time::Instant::now();

        let outcome = synth.synthesize(&request()).await.unwrap();

        assert!(start.elapsed() >= Duration::from_millis(2_000));
        assert!(outcome.audio.is_none());
    }

    #[test]
    fn simulated_is_object_safe() {
        let _: Box<dyn SpeechSynthesizer> =
            Box::new(SimulatedSynthesizer::new(Duration::ZERO));
    }
}
