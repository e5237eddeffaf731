//! Delivery Ports - Translation, speech synthesis and message transport.
//!
//! These collaborators carry no decision logic. Their failures are never
//! fatal to a decision: callers log them and fall back to plain text.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::foundation::{Locale, UserId};

/// Synthesized speech ready to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioClip {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

/// Delivery failures.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DeliveryError {
    #[error("delivery timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    #[error("network error: {0}")]
    Network(String),

    #[error("delivery service error (status {status}): {message}")]
    Service { status: u16, message: String },

    #[error("locale {0} is not supported")]
    UnsupportedLocale(Locale),

    #[error("{0} is disabled")]
    Disabled(String),
}

impl DeliveryError {
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Returns true for transient failures worth another attempt.
    pub fn is_retryable(&self) -> bool {
        match self {
            DeliveryError::Timeout { .. } | DeliveryError::Network(_) => true,
            DeliveryError::Service { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

/// Port for machine translation.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate English `text` into `target`.
    async fn translate(&self, text: &str, target: Locale) -> Result<String, DeliveryError>;
}

/// Port for text-to-speech.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    async fn synthesize(&self, text: &str, locale: Locale) -> Result<AudioClip, DeliveryError>;
}

/// Port for sending replies to a user.
#[async_trait]
pub trait MessageTransport: Send + Sync {
    async fn send_text(&self, user_id: &UserId, text: &str) -> Result<(), DeliveryError>;

    async fn send_audio(
        &self,
        user_id: &UserId,
        audio: &AudioClip,
        caption: &str,
    ) -> Result<(), DeliveryError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_transient_failures_are_retryable() {
        assert!(DeliveryError::Timeout { timeout_secs: 3 }.is_retryable());
        assert!(DeliveryError::network("reset").is_retryable());
        assert!(!DeliveryError::Disabled("speech".into()).is_retryable());
        assert!(!DeliveryError::Service {
            status: 400,
            message: "bad".into()
        }
        .is_retryable());
    }
}
