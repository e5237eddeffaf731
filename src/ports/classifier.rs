//! Classifier Port - Interface to the binary loan-eligibility model.
//!
//! The model is an opaque capability: it declares the feature order it was
//! fit with, reports whether it is loaded, and answers label and
//! class-probability queries for one assembled feature vector.
//!
//! # Failure policy
//!
//! Implementations must fail closed. After retries are exhausted they
//! return an error; they never invent a label.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::decision::DecisionRequest;

/// Port for the eligibility classifier.
#[async_trait]
pub trait Classifier: Send + Sync {
    /// Whether the model is loaded and able to answer.
    async fn is_available(&self) -> bool;

    /// Column names in the exact order the model was fit with.
    async fn feature_order(&self) -> Result<Vec<String>, ClassifierError>;

    /// Predicted class label for one feature vector.
    async fn predict(&self, request: &DecisionRequest) -> Result<i64, ClassifierError>;

    /// Class probabilities for one feature vector, indexed by class.
    async fn predict_probabilities(
        &self,
        request: &DecisionRequest,
    ) -> Result<Vec<f64>, ClassifierError>;

    /// Label that means "eligible".
    fn positive_label(&self) -> i64;

    /// Short description for health output and logs.
    fn describe(&self) -> ClassifierInfo;
}

/// Static information about a classifier backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifierInfo {
    /// Backend name (e.g. "http", "linear_model", "mock").
    pub backend: String,
    /// Where the model lives (URL or file path).
    pub location: String,
}

/// Classifier failures.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClassifierError {
    /// No model is loaded.
    #[error("model not loaded: {0}")]
    NotLoaded(String),

    /// Request timed out.
    #[error("classifier timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// Transport-level failure.
    #[error("network error: {0}")]
    Network(String),

    /// Model service answered with a server error.
    #[error("classifier service error (status {status}): {message}")]
    Service { status: u16, message: String },

    /// Response could not be understood.
    #[error("invalid classifier response: {0}")]
    InvalidResponse(String),

    /// Feature vector does not match what the model expects.
    #[error("feature mismatch: model expects {expected} features, got {actual}")]
    FeatureMismatch { expected: usize, actual: usize },
}

impl ClassifierError {
    /// Creates a not-loaded error.
    pub fn not_loaded(message: impl Into<String>) -> Self {
        Self::NotLoaded(message.into())
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates an invalid-response error.
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse(message.into())
    }

    /// Returns true for transient failures worth another attempt.
    pub fn is_retryable(&self) -> bool {
        match self {
            ClassifierError::Timeout { .. } | ClassifierError::Network(_) => true,
            ClassifierError::Service { status, .. } => *status >= 500,
            _ => false,
        }
    }
}
