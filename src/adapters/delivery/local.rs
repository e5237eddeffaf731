//! Local delivery adapters: pass-through translation, disabled speech,
//! logging and recording transports.

use async_trait::async_trait;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::info;

use crate::domain::foundation::{Locale, UserId};
use crate::ports::{AudioClip, DeliveryError, MessageTransport, SpeechSynthesizer, Translator};

/// Returns text unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTranslator;

#[async_trait]
impl Translator for NoopTranslator {
    async fn translate(&self, text: &str, _target: Locale) -> Result<String, DeliveryError> {
        Ok(text.to_string())
    }
}

/// Speech synthesizer for deployments without text-to-speech.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledSpeechSynthesizer;

#[async_trait]
impl SpeechSynthesizer for DisabledSpeechSynthesizer {
    async fn synthesize(&self, _text: &str, _locale: Locale) -> Result<AudioClip, DeliveryError> {
        Err(DeliveryError::Disabled("speech synthesis".to_string()))
    }
}

/// Writes replies to the log instead of a chat network.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogTransport;

#[async_trait]
impl MessageTransport for LogTransport {
    async fn send_text(&self, user_id: &UserId, text: &str) -> Result<(), DeliveryError> {
        info!(user_id = %user_id, text, "Reply");
        Ok(())
    }

    async fn send_audio(
        &self,
        user_id: &UserId,
        audio: &AudioClip,
        caption: &str,
    ) -> Result<(), DeliveryError> {
        info!(
            user_id = %user_id,
            bytes = audio.bytes.len(),
            mime_type = %audio.mime_type,
            caption,
            "Audio reply"
        );
        Ok(())
    }
}

/// A reply captured by [`RecordingTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SentMessage {
    Text { user_id: UserId, text: String },
    Audio { user_id: UserId, caption: String, bytes: usize },
}

/// Keeps every reply in memory for inspection. Can be told to fail audio
/// sends.
#[derive(Debug, Clone, Default)]
pub struct RecordingTransport {
    sent: Arc<Mutex<Vec<SentMessage>>>,
    fail_audio: bool,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Transport whose audio sends always fail.
    pub fn failing_audio() -> Self {
        Self {
            fail_audio: true,
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<SentMessage> {
        lock(&self.sent).clone()
    }

    /// Text replies sent to `user_id`, oldest first.
    pub fn texts_for(&self, user_id: &UserId) -> Vec<String> {
        lock(&self.sent)
            .iter()
            .filter_map(|m| match m {
                SentMessage::Text { user_id: to, text } if to == user_id => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    /// Removes and returns everything queued for `user_id`.
    pub fn drain_for(&self, user_id: &UserId) -> Vec<SentMessage> {
        let mut sent = lock(&self.sent);
        let (mine, rest): (Vec<_>, Vec<_>) = sent.drain(..).partition(|m| match m {
            SentMessage::Text { user_id: to, .. } | SentMessage::Audio { user_id: to, .. } => {
                to == user_id
            }
        });
        *sent = rest;
        mine
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[async_trait]
impl MessageTransport for RecordingTransport {
    async fn send_text(&self, user_id: &UserId, text: &str) -> Result<(), DeliveryError> {
        lock(&self.sent).push(SentMessage::Text {
            user_id: user_id.clone(),
            text: text.to_string(),
        });
        Ok(())
    }

    async fn send_audio(
        &self,
        user_id: &UserId,
        audio: &AudioClip,
        caption: &str,
    ) -> Result<(), DeliveryError> {
        if self.fail_audio {
            return Err(DeliveryError::network("audio upload failed"));
        }
        lock(&self.sent).push(SentMessage::Audio {
            user_id: user_id.clone(),
            caption: caption.to_string(),
            bytes: audio.bytes.len(),
        });
        Ok(())
    }
}
