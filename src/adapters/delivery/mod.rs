//! Delivery adapters - translation, speech and transport.

mod http_speech;
mod libre_translate;
mod local;

pub use http_speech::{HttpSpeechConfig, HttpSpeechSynthesizer};
pub use libre_translate::{LibreTranslateConfig, LibreTranslateTranslator};
pub use local::{
    DisabledSpeechSynthesizer, LogTransport, NoopTranslator, RecordingTransport, SentMessage,
};
