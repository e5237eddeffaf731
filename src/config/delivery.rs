//! Delivery configuration

use secrecy::Secret;
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

#[derive(Debug, Clone, Deserialize)]
pub struct DeliveryConfig {
    /// LibreTranslate base URL; translation is skipped when unset
    pub translation_url: Option<String>,

    /// LibreTranslate API key
    pub translation_api_key: Option<Secret<String>>,

    /// Send spoken renditions of results
    #[serde(default)]
    pub speech_enabled: bool,

    /// Text-to-speech service base URL; required when speech is enabled
    pub speech_url: Option<String>,

    /// Per-request timeout for the speech service in seconds
    #[serde(default = "default_speech_timeout")]
    pub speech_timeout_secs: u64,
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            translation_url: None,
            translation_api_key: None,
            speech_enabled: false,
            speech_url: None,
            speech_timeout_secs: default_speech_timeout(),
        }
    }
}

fn default_speech_timeout() -> u64 {
    15
}

impl DeliveryConfig {
    pub fn has_translation(&self) -> bool {
        self.translation_url.as_ref().is_some_and(|u| !u.is_empty())
    }

    /// The speech service URL, when speech is switched on.
    pub fn speech_service(&self) -> Option<&str> {
        self.speech_url
            .as_deref()
            .filter(|u| self.speech_enabled && !u.is_empty())
    }

    pub fn speech_timeout(&self) -> Duration {
        Duration::from_secs(self.speech_timeout_secs)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        check_http_url("delivery.translation_url", self.translation_url.as_deref())?;
        check_http_url("delivery.speech_url", self.speech_url.as_deref())?;
        if self.speech_enabled && self.speech_service().is_none() {
            return Err(ValidationError::MissingRequired("DELIVERY__SPEECH_URL"));
        }
        if self.speech_timeout_secs == 0 || self.speech_timeout_secs > 120 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

fn check_http_url(field: &'static str, url: Option<&str>) -> Result<(), ValidationError> {
    match url.filter(|u| !u.is_empty()) {
        Some(url) if !url.starts_with("http://") && !url.starts_with("https://") => {
            Err(ValidationError::InvalidUrl {
                field,
                value: url.to_string(),
            })
        }
        _ => Ok(()),
    }
}
