//! Errors raised by the intake aggregate.

use thiserror::Error;

use super::field::FieldId;
use super::form::FormKind;
use super::state::IntakeState;
use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum IntakeError {
    /// The answer failed its field rules. The session is unchanged.
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error("The {active} form is active, not the {submitted} form")]
    FormMismatch {
        active: FormKind,
        submitted: FormKind,
    },

    #[error("All answers for the {form} form are in; the result is being prepared")]
    AwaitingDecision { form: FormKind },

    #[error("Answer for '{0}' is missing")]
    MissingAnswer(FieldId),

    #[error("Answer for '{0}' has the wrong type")]
    WrongAnswerType(FieldId),

    #[error("Cannot move from {from} to {to}")]
    InvalidTransition { from: IntakeState, to: IntakeState },
}

impl From<IntakeError> for DomainError {
    fn from(err: IntakeError) -> Self {
        let message = err.to_string();
        match err {
            IntakeError::Invalid(inner) => inner.into(),
            IntakeError::FormMismatch { .. } => DomainError::new(ErrorCode::FormMismatch, message),
            IntakeError::AwaitingDecision { .. } => {
                DomainError::new(ErrorCode::CompletionInFlight, message)
            }
            IntakeError::MissingAnswer(field) | IntakeError::WrongAnswerType(field) => {
                DomainError::new(ErrorCode::InternalError, message).with_detail("field", field.as_str())
            }
            IntakeError::InvalidTransition { .. } => {
                DomainError::new(ErrorCode::InvalidStateTransition, message)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_mismatch_maps_to_domain_code() {
        let err: DomainError = IntakeError::FormMismatch {
            active: FormKind::Loan,
            submitted: FormKind::Fraud,
        }
        .into();
        assert_eq!(err.code, ErrorCode::FormMismatch);
        assert_eq!(err.message, "The loan form is active, not the fraud form");
    }

    #[test]
    fn validation_failures_keep_their_field() {
        let err: DomainError =
            IntakeError::from(ValidationError::empty_field("location")).into();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(err.details.get("field").map(String::as_str), Some("location"));
    }
}
