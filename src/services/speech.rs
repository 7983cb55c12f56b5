use std::time::Duration;

use bytes::Bytes;
use serde::Serialize;
use thiserror::Error;

use crate::config::{env_parse, env_string};

const SYNTHESIS_PATH: &str = "/api/v1/text-to-speech-absolute-control";
const DEFAULT_VOICE_ID: &str = "1";
const DEFAULT_INPUT_MODE: &str = "0";
const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Credentials and voice settings for the speech provider.
///
/// Built once at process start and moved into [`SpeechClient`]; nothing else
/// reads the key afterwards.
#[derive(Clone)]
pub struct SpeechConfig {
    pub api_key: String,
    pub base_url: String,
    pub voice_id: String,
    pub input_mode: String,
    pub timeout: Duration,
}

impl std::fmt::Debug for SpeechConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpeechConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("voice_id", &self.voice_id)
            .field("input_mode", &self.input_mode)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl SpeechConfig {
    pub fn from_env() -> Result<Self, SpeechError> {
        let api_key = env_string("SPEECH_API_KEY").ok_or(SpeechError::NotConfigured("SPEECH_API_KEY"))?;
        let base_url =
            env_string("SPEECH_API_BASE_URL").ok_or(SpeechError::NotConfigured("SPEECH_API_BASE_URL"))?;

        Ok(Self {
            api_key,
            base_url,
            voice_id: env_string("SPEECH_VOICE_ID").unwrap_or_else(|| DEFAULT_VOICE_ID.to_string()),
            input_mode: env_string("SPEECH_INPUT_MODE").unwrap_or_else(|| DEFAULT_INPUT_MODE.to_string()),
            timeout: Duration::from_millis(env_parse("SPEECH_TIMEOUT_MS").unwrap_or(DEFAULT_TIMEOUT_MS)),
        })
    }

    pub fn endpoint(&self) -> String {
        format!("{}{SYNTHESIS_PATH}", self.base_url.trim_end_matches('/'))
    }
}

#[derive(Debug, Error)]
pub enum SpeechError {
    #[error("speech provider not configured: {0}")]
    NotConfigured(&'static str),
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("HTTP {status}: {body}")]
    HttpStatus {
        status: reqwest::StatusCode,
        body: String,
    },
}

#[derive(Debug, Serialize)]
struct SynthesisPayload<'a> {
    text: &'a str,
    id_voice: &'a str,
    input_mode: &'a str,
}

#[derive(Clone)]
pub struct SpeechClient {
    config: SpeechConfig,
    client: reqwest::Client,
}

impl SpeechClient {
    pub fn new(config: SpeechConfig) -> Result<Self, SpeechError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(SpeechError::Client)?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &SpeechConfig {
        &self.config
    }

    /// Single attempt; failures are returned to the caller, never retried.
    pub async fn synthesize(&self, text: &str) -> Result<Bytes, SpeechError> {
        let payload = SynthesisPayload {
            text,
            id_voice: &self.config.voice_id,
            input_mode: &self.config.input_mode,
        };

        let resp = self
            .client
            .post(self.config.endpoint())
            .bearer_auth(&self.config.api_key)
            .json(&payload)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(SpeechError::HttpStatus { status, body });
        }

        Ok(resp.bytes().await?)
    }
}

/// Fire-and-forget call: logs the outcome and swallows the error.
pub async fn speak_and_discard(client: &SpeechClient, text: &str) -> bool {
    match client.synthesize(text).await {
        Ok(audio) => {
            tracing::info!(bytes = audio.len(), "speech synthesized, discarding audio");
            true
        }
        Err(err) => {
            tracing::error!(error = %err, "speech synthesis failed");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(base_url: &str) -> SpeechConfig {
        SpeechConfig {
            api_key: "secret".to_string(),
            base_url: base_url.to_string(),
            voice_id: "7".to_string(),
            input_mode: "0".to_string(),
            timeout: Duration::from_secs(1),
        }
    }

    #[test]
    fn test_endpoint_joins_without_double_slash() {
        assert_eq!(
            config("https://speech.test/").endpoint(),
            "https://speech.test/api/v1/text-to-speech-absolute-control"
        );
        assert_eq!(
            config("https://speech.test").endpoint(),
            "https://speech.test/api/v1/text-to-speech-absolute-control"
        );
    }

    #[test]
    fn test_debug_hides_key() {
        let rendered = format!("{:?}", config("https://speech.test"));
        assert!(!rendered.contains("secret"));
    }

    #[test]
    fn test_payload_shape() {
        let payload = SynthesisPayload {
            text: "مرحبا",
            id_voice: "7",
            input_mode: "0",
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"text": "مرحبا", "id_voice": "7", "input_mode": "0"})
        );
    }
}
