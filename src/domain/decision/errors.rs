//! Decision pipeline errors.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};
use crate::ports::ClassifierError;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecisionError {
    /// The applicant's data breaks a field rule.
    #[error("invalid loan intake: {0}")]
    InvalidIntake(#[from] ValidationError),

    /// The model's declared columns cannot be mapped onto the eleven features.
    #[error("feature order mismatch: {0}")]
    FeatureOrder(String),

    /// The model could not be reached or refused to answer.
    #[error("classifier unavailable: {0}")]
    Classifier(#[from] ClassifierError),

    /// The model answered with probabilities that make no sense.
    #[error("classifier returned invalid probabilities: {0}")]
    InvalidProbabilities(String),
}

impl DecisionError {
    /// True when the failure lies with the model rather than the applicant.
    pub fn is_classifier_failure(&self) -> bool {
        !matches!(self, DecisionError::InvalidIntake(_))
    }
}

impl From<DecisionError> for DomainError {
    fn from(err: DecisionError) -> Self {
        let message = err.to_string();
        match err {
            DecisionError::InvalidIntake(inner) => inner.into(),
            DecisionError::FeatureOrder(_) => {
                DomainError::new(ErrorCode::FeatureOrderMismatch, message)
            }
            DecisionError::Classifier(_) | DecisionError::InvalidProbabilities(_) => {
                DomainError::new(ErrorCode::ClassifierUnavailable, message)
            }
        }
    }
}
