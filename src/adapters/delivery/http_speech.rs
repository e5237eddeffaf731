//! HTTP text-to-speech adapter - implementation of the `SpeechSynthesizer` port.
//!
//! Talks to a TTS sidecar that takes `{ "text", "lang" }` on `POST /synthesize`
//! and answers with the encoded audio as the body (MP3 by default).
//!
//! ```ignore
//! let synthesizer = HttpSpeechSynthesizer::new(
//!     HttpSpeechConfig::new("http://localhost:5002").with_timeout(Duration::from_secs(15)),
//! )?;
//! ```

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

use crate::domain::foundation::Locale;
use crate::ports::{AudioClip, DeliveryError, SpeechSynthesizer};

const DEFAULT_MIME_TYPE: &str = "audio/mpeg";

#[derive(Debug, Clone)]
pub struct HttpSpeechConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl HttpSpeechConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(15),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[derive(Debug, Serialize)]
struct SynthesizeRequest<'a> {
    text: &'a str,
    lang: &'static str,
}

pub struct HttpSpeechSynthesizer {
    config: HttpSpeechConfig,
    client: Client,
}

impl HttpSpeechSynthesizer {
    pub fn new(config: HttpSpeechConfig) -> Result<Self, DeliveryError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| DeliveryError::network(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self { config, client })
    }
}

#[async_trait]
impl SpeechSynthesizer for HttpSpeechSynthesizer {
    async fn synthesize(&self, text: &str, locale: Locale) -> Result<AudioClip, DeliveryError> {
        let response = self
            .client
            .post(format!("{}/synthesize", self.config.base_url))
            .json(&SynthesizeRequest {
                text,
                lang: locale.code(),
            })
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    DeliveryError::Timeout {
                        timeout_secs: self.config.timeout.as_secs(),
                    }
                } else {
                    DeliveryError::network(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(DeliveryError::Service {
                status: status.as_u16(),
                message,
            });
        }

        let mime_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .filter(|v| v.starts_with("audio/"))
            .unwrap_or(DEFAULT_MIME_TYPE)
            .to_string();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| DeliveryError::network(format!("Failed to read audio: {}", e)))?;
        if bytes.is_empty() {
            return Err(DeliveryError::Service {
                status: status.as_u16(),
                message: "empty audio body".to_string(),
            });
        }

        debug!(locale = %locale, bytes = bytes.len(), "Synthesized speech");
        Ok(AudioClip {
            bytes: bytes.to_vec(),
            mime_type,
        })
    }
}
