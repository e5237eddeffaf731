//! LibreTranslate adapter - implementation of the `Translator` port.
//!
//! # Configuration
//!
//! ```ignore
//! let config = LibreTranslateConfig::new("https://libretranslate.example.org")
//!     .with_api_key(key)
//!     .with_timeout(Duration::from_secs(5));
//!
//! let translator = LibreTranslateTranslator::new(config)?;
//! ```

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::domain::foundation::Locale;
use crate::ports::{DeliveryError, Translator};

#[derive(Debug, Clone)]
pub struct LibreTranslateConfig {
    pub base_url: String,
    api_key: Option<Secret<String>>,
    pub timeout: Duration,
}

impl LibreTranslateConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: None,
            timeout: Duration::from_secs(5),
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(Secret::new(api_key.into()));
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    q: &'a str,
    source: &'static str,
    target: &'static str,
    format: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    #[serde(rename = "translatedText")]
    translated_text: String,
}

pub struct LibreTranslateTranslator {
    config: LibreTranslateConfig,
    client: Client,
}

impl LibreTranslateTranslator {
    pub fn new(config: LibreTranslateConfig) -> Result<Self, DeliveryError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| DeliveryError::network(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self { config, client })
    }
}

#[async_trait]
impl Translator for LibreTranslateTranslator {
    async fn translate(&self, text: &str, target: Locale) -> Result<String, DeliveryError> {
        if target == Locale::En {
            return Ok(text.to_string());
        }

        let body = TranslateRequest {
            q: text,
            source: "en",
            target: target.code(),
            format: "text",
            api_key: self.config.api_key.as_ref().map(|k| k.expose_secret().as_str()),
        };

        let response = self
            .client
            .post(format!("{}/translate", self.config.base_url))
            .json(&body)
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

        let parsed: TranslateResponse = response
            .json()
            .await
            .map_err(|e| DeliveryError::network(format!("Failed to parse response: {}", e)))?;
        debug!(target_locale = %target, chars = parsed.translated_text.len(), "Translated reply");
        Ok(parsed.translated_text)
    }
}
