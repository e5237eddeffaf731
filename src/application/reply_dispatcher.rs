//! Reply delivery - translation, text and optional audio.
//!
//! Delivery never fails the caller. Every collaborator error is logged and
//! the reply degrades: untranslated text instead of translated, text
//! without audio instead of nothing.

use std::sync::Arc;
use tracing::{debug, warn};

use crate::domain::foundation::{Locale, UserId};
use crate::ports::{MessageTransport, SpeechSynthesizer, Translator};

/// What actually reached the user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchReport {
    pub translated: bool,
    pub text_sent: bool,
    pub audio_sent: bool,
}

#[derive(Clone)]
pub struct ReplyDispatcher {
    translator: Arc<dyn Translator>,
    speech: Arc<dyn SpeechSynthesizer>,
    transport: Arc<dyn MessageTransport>,
}

impl ReplyDispatcher {
    pub fn new(
        translator: Arc<dyn Translator>,
        speech: Arc<dyn SpeechSynthesizer>,
        transport: Arc<dyn MessageTransport>,
    ) -> Self {
        Self {
            translator,
            speech,
            transport,
        }
    }

    /// Sends `text` to `user_id`, followed by an audio rendition when
    /// `with_audio` is set.
    ///
    /// `text` is expected in the locale's own table when one exists and in
    /// English otherwise.
    pub async fn dispatch(
        &self,
        user_id: &UserId,
        text: &str,
        locale: Locale,
        with_audio: bool,
    ) -> DispatchReport {
        let mut report = DispatchReport::default();

        let text = if locale.has_native_catalog() {
            text.to_string()
        } else {
            match self.translator.translate(text, locale).await {
                Ok(translated) => {
                    report.translated = true;
                    translated
                }
                Err(err) => {
                    warn!(user_id = %user_id, locale = %locale, error = %err, "Translation failed, sending English");
                    text.to_string()
                }
            }
        };

        match self.transport.send_text(user_id, &text).await {
            Ok(()) => report.text_sent = true,
            Err(err) => warn!(user_id = %user_id, error = %err, "Text delivery failed"),
        }

        if with_audio {
            report.audio_sent = self.send_audio(user_id, &text, locale).await;
        }

        debug!(user_id = %user_id, ?report, "Reply dispatched");
        report
    }

    async fn send_audio(&self, user_id: &UserId, text: &str, locale: Locale) -> bool {
        let clip = match self.speech.synthesize(text, locale).await {
            Ok(clip) => clip,
            Err(err) => {
                warn!(user_id = %user_id, locale = %locale, error = %err, "Speech synthesis failed, text only");
                return false;
            }
        };

        let caption = text.lines().next().unwrap_or_default();
        match self.transport.send_audio(user_id, &clip, caption).await {
            Ok(()) => true,
            Err(err) => {
                warn!(user_id = %user_id, error = %err, "Audio delivery failed, text only");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::delivery::{
        DisabledSpeechSynthesizer, NoopTranslator, RecordingTransport, SentMessage,
    };
    use crate::ports::{AudioClip, DeliveryError};
    use async_trait::async_trait;

    struct FailingTranslator;

    #[async_trait]
    impl Translator for FailingTranslator {
        async fn translate(&self, _text: &str, _target: Locale) -> Result<String, DeliveryError> {
            Err(DeliveryError::Timeout { timeout_secs: 5 })
        }
    }

    struct UppercaseTranslator;

    #[async_trait]
    impl Translator for UppercaseTranslator {
        async fn translate(&self, text: &str, _target: Locale) -> Result<String, DeliveryError> {
            Ok(text.to_uppercase())
        }
    }

    struct BeepSynthesizer;

    #[async_trait]
    impl SpeechSynthesizer for BeepSynthesizer {
        async fn synthesize(&self, _text: &str, _locale: Locale) -> Result<AudioClip, DeliveryError> {
            Ok(AudioClip {
                bytes: vec![1, 2, 3],
                mime_type: "audio/mpeg".to_string(),
            })
        }
    }

    fn user() -> UserId {
        UserId::new("42").unwrap()
    }

    #[tokio::test]
    async fn native_locale_is_not_translated() {
        let transport = RecordingTransport::new();
        let dispatcher = ReplyDispatcher::new(
            Arc::new(UppercaseTranslator),
            Arc::new(DisabledSpeechSynthesizer),
            Arc::new(transport.clone()),
        );

        let report = dispatcher.dispatch(&user(), "hello", Locale::Hi, false).await;

        assert!(!report.translated);
        assert_eq!(transport.texts_for(&user()), vec!["hello".to_string()]);
    }

    #[tokio::test]
    async fn other_locales_are_translated() {
        let transport = RecordingTransport::new();
        let dispatcher = ReplyDispatcher::new(
            Arc::new(UppercaseTranslator),
            Arc::new(DisabledSpeechSynthesizer),
            Arc::new(transport.clone()),
        );

        let report = dispatcher.dispatch(&user(), "hello", Locale::Ta, false).await;

        assert!(report.translated);
        assert_eq!(transport.texts_for(&user()), vec!["HELLO".to_string()]);
    }

    #[tokio::test]
    async fn translation_failure_sends_original() {
        let transport = RecordingTransport::new();
        let dispatcher = ReplyDispatcher::new(
            Arc::new(FailingTranslator),
            Arc::new(DisabledSpeechSynthesizer),
            Arc::new(transport.clone()),
        );

        let report = dispatcher.dispatch(&user(), "hello", Locale::Pa, false).await;

        assert!(!report.translated);
        assert!(report.text_sent);
        assert_eq!(transport.texts_for(&user()), vec!["hello".to_string()]);
    }

    #[tokio::test]
    async fn audio_follows_text_with_first_line_caption() {
        let transport = RecordingTransport::new();
        let dispatcher = ReplyDispatcher::new(
            Arc::new(NoopTranslator),
            Arc::new(BeepSynthesizer),
            Arc::new(transport.clone()),
        );

        let report = dispatcher
            .dispatch(&user(), "Approved\nmore detail", Locale::En, true)
            .await;

        assert!(report.audio_sent);
        assert_eq!(
            transport.sent()[1],
            SentMessage::Audio {
                user_id: user(),
                caption: "Approved".to_string(),
                bytes: 3,
            }
        );
    }

    #[tokio::test]
    async fn speech_failure_keeps_text() {
        let transport = RecordingTransport::new();
        let dispatcher = ReplyDispatcher::new(
            Arc::new(NoopTranslator),
            Arc::new(DisabledSpeechSynthesizer),
            Arc::new(transport.clone()),
        );

        let report = dispatcher.dispatch(&user(), "Approved", Locale::En, true).await;

        assert!(report.text_sent);
        assert!(!report.audio_sent);
        assert_eq!(transport.sent().len(), 1);
    }

    #[tokio::test]
    async fn audio_transport_failure_keeps_text() {
        let transport = RecordingTransport::failing_audio();
        let dispatcher = ReplyDispatcher::new(
            Arc::new(NoopTranslator),
            Arc::new(BeepSynthesizer),
            Arc::new(transport.clone()),
        );

        let report = dispatcher.dispatch(&user(), "Approved", Locale::En, true).await;

        assert!(report.text_sent);
        assert!(!report.audio_sent);
    }
}
