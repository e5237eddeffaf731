//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Decision Ports
//!
//! - `Classifier` - The binary loan-eligibility model
//!
//! ## State Ports
//!
//! - `SessionStore` - In-progress form sessions, one per user
//! - `PreferenceStore` - Per-user locale, location and advisory opt-in
//!
//! ## Delivery Ports
//!
//! - `Translator` - Machine translation for locales without message tables
//! - `SpeechSynthesizer` - Audio rendition of results
//! - `MessageTransport` - Sends text and audio to a user

mod classifier;
mod delivery;
mod preference_store;
mod session_store;

pub use classifier::{Classifier, ClassifierError, ClassifierInfo};
pub use delivery::{AudioClip, DeliveryError, MessageTransport, SpeechSynthesizer, Translator};
pub use preference_store::{PreferenceError, PreferenceStore, PreferenceUpdate, UserPreference};
pub use session_store::{SessionStore, SessionStoreError};
