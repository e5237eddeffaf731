//! Intake module - guided, one-question-at-a-time forms.
//!
//! Field rules, the form catalogue, the dialogue state machine and the
//! session aggregate, plus the typed payload of each form.

mod categories;
mod errors;
mod field;
mod form;
mod fraud_report;
mod loan_intake;
mod onboarding;
mod session;
mod state;

pub use categories::{classify_education, classify_yes_no, Education};
pub use errors::IntakeError;
pub use field::{normalize_number, FieldId, FieldKind, FieldSpec, FieldValue, MAX_WHOLE_ANSWER};
pub use form::{FormKind, MAX_TEXT_LEN};
pub use fraud_report::FraudReport;
pub use loan_intake::LoanIntake;
pub use onboarding::OnboardingAnswers;
pub use session::{ConversationSession, StepOutcome};
pub use state::IntakeState;

#[cfg(test)]
pub(crate) use loan_intake::fixtures;
