//! Classifier adapters - implementations of the `Classifier` port.
//!
//! - `HttpClassifier` - remote model service
//! - `LinearModelClassifier` - logistic regression from a JSON artifact
//! - `MockClassifier` - scripted, for tests and local development

mod http;
mod linear_model;
mod mock;

pub use http::{HttpClassifier, HttpClassifierConfig};
pub use linear_model::{LinearModel, LinearModelClassifier};
pub use mock::{MockClassifier, MockPrediction, FALLBACK_APPROVAL_SCORE};
