//! Conversation session aggregate.
//!
//! A session exists only while a user is filling in a form. "No session"
//! is the `Idle` state; completion, cancellation and expiry all delete it.
//!
//! # Ownership
//!
//! A session belongs to exactly one user and is mutated only while that
//! user's lock is held.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::errors::IntakeError;
use super::field::{FieldId, FieldValue};
use super::form::FormKind;
use super::state::IntakeState;
use crate::domain::foundation::{SessionId, StateMachine, Timestamp, UserId};

/// What a successfully committed answer led to.
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    /// Answer stored; `next` is the question to ask now.
    Advanced {
        answered: FieldId,
        value: FieldValue,
        next: FieldId,
    },
    /// Answer stored and it was the last one; the form is ready for its decision.
    ReadyForDecision { answered: FieldId, value: FieldValue },
}

/// One run of one form for one user.
///
/// # Invariants
///
/// - `state` is never `Idle` while the session is stored
/// - `state.form()` equals `form`
/// - `answers` only holds fields of `form` that passed validation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationSession {
    /// Run identifier, fresh for every start.
    id: SessionId,

    user_id: UserId,

    form: FormKind,

    state: IntakeState,

    answers: HashMap<FieldId, FieldValue>,

    started_at: Timestamp,

    last_activity_at: Timestamp,
}

impl ConversationSession {
    /// Begins a new run of `form`, positioned on its first question.
    pub fn start(user_id: UserId, form: FormKind) -> Self {
        let now = Timestamp::now();
        Self {
            id: SessionId::new(),
            user_id,
            form,
            state: IntakeState::start_of(form),
            answers: HashMap::new(),
            started_at: now,
            last_activity_at: now,
        }
    }

    /// Reconstitute a session from persistence (no validation).
    pub fn reconstitute(
        id: SessionId,
        user_id: UserId,
        form: FormKind,
        state: IntakeState,
        answers: HashMap<FieldId, FieldValue>,
        started_at: Timestamp,
        last_activity_at: Timestamp,
    ) -> Self {
        Self {
            id,
            user_id,
            form,
            state,
            answers,
            started_at,
            last_activity_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn form(&self) -> FormKind {
        self.form
    }

    pub fn state(&self) -> IntakeState {
        self.state
    }

    /// Validated answers collected so far.
    pub fn answers(&self) -> &HashMap<FieldId, FieldValue> {
        &self.answers
    }

    pub fn started_at(&self) -> &Timestamp {
        &self.started_at
    }

    pub fn last_activity_at(&self) -> &Timestamp {
        &self.last_activity_at
    }

    /// The question currently awaiting an answer.
    pub fn current_field(&self) -> Option<FieldId> {
        self.state.current_field()
    }

    pub fn is_awaiting_decision(&self) -> bool {
        matches!(self.state, IntakeState::AwaitingDecision { .. })
    }

    /// True when the user has been silent for longer than `idle_timeout_secs`.
    pub fn is_expired(&self, now: &Timestamp, idle_timeout_secs: u64) -> bool {
        now.duration_since(&self.last_activity_at).num_seconds() > idle_timeout_secs as i64
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Commands
    // ─────────────────────────────────────────────────────────────────────────

    /// Validates `raw` against the current question and commits it.
    ///
    /// On a validation failure the answers and the position are left
    /// untouched; only the activity clock moves.
    pub fn submit(&mut self, form: FormKind, raw: &str) -> Result<StepOutcome, IntakeError> {
        if form != self.form {
            return Err(IntakeError::FormMismatch {
                active: self.form,
                submitted: form,
            });
        }

        let field = match self.state {
            IntakeState::Collecting { field, .. } => field,
            _ => return Err(IntakeError::AwaitingDecision { form: self.form }),
        };

        self.touch();

        let spec = self
            .form
            .spec(field)
            .ok_or(IntakeError::WrongAnswerType(field))?;
        let value = spec.validate(raw)?;

        let next_state = self
            .state
            .after_valid_answer()
            .ok_or(IntakeError::AwaitingDecision { form: self.form })?;
        self.state = self
            .state
            .transition_to(next_state)
            .map_err(|_| IntakeError::InvalidTransition {
                from: self.state,
                to: next_state,
            })?;
        self.answers.insert(field, value.clone());

        Ok(match next_state {
            IntakeState::Collecting { field: next, .. } => StepOutcome::Advanced {
                answered: field,
                value,
                next,
            },
            _ => StepOutcome::ReadyForDecision {
                answered: field,
                value,
            },
        })
    }

    /// Moves the session to `Idle`, discarding every answer.
    ///
    /// Used for completion, cancellation and expiry alike; the caller then
    /// deletes the session from its store.
    pub fn close(&mut self) -> Result<(), IntakeError> {
        self.state = self
            .state
            .transition_to(IntakeState::Idle)
            .map_err(|_| IntakeError::InvalidTransition {
                from: self.state,
                to: IntakeState::Idle,
            })?;
        self.answers.clear();
        Ok(())
    }

    fn touch(&mut self) {
        self.last_activity_at = Timestamp::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> UserId {
        UserId::new("user-1").unwrap()
    }

    fn answer_all(session: &mut ConversationSession, answers: &[&str]) -> StepOutcome {
        let mut last = None;
        for raw in answers {
            last = Some(session.submit(session.form(), raw).unwrap());
        }
        last.unwrap()
    }

    #[test]
    fn start_positions_on_first_question() {
        let session = ConversationSession::start(user(), FormKind::Loan);
        assert_eq!(session.current_field(), Some(FieldId::Education));
        assert!(session.answers().is_empty());
    }

    #[test]
    fn every_start_gets_a_fresh_run_id() {
        let a = ConversationSession::start(user(), FormKind::Loan);
        let b = ConversationSession::start(user(), FormKind::Loan);
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn valid_answer_advances() {
        let mut session = ConversationSession::start(user(), FormKind::Loan);
        let outcome = session.submit(FormKind::Loan, "Graduate").unwrap();
        assert_eq!(
            outcome,
            StepOutcome::Advanced {
                answered: FieldId::Education,
                value: FieldValue::Education(crate::domain::intake::Education::Graduate),
                next: FieldId::SelfEmployed,
            }
        );
        assert_eq!(session.current_field(), Some(FieldId::SelfEmployed));
    }

    #[test]
    fn invalid_answer_changes_nothing_but_activity() {
        let mut session = ConversationSession::start(user(), FormKind::Loan);
        answer_all(&mut session, &["Graduate", "No"]);
        let before_answers = session.answers().clone();

        let err = session.submit(FormKind::Loan, "abc").unwrap_err();

        assert!(matches!(err, IntakeError::Invalid(_)));
        assert_eq!(session.current_field(), Some(FieldId::Dependents));
        assert_eq!(session.answers(), &before_answers);
    }

    #[test]
    fn last_answer_makes_session_ready_for_decision() {
        let mut session = ConversationSession::start(user(), FormKind::Fraud);
        let outcome = answer_all(&mut session, &["Free Loan", "No documents needed", "WhatsApp"]);
        assert!(matches!(outcome, StepOutcome::ReadyForDecision { .. }));
        assert!(session.is_awaiting_decision());
        assert_eq!(session.answers().len(), 3);
    }

    #[test]
    fn answers_after_completion_are_refused() {
        let mut session = ConversationSession::start(user(), FormKind::Onboarding);
        answer_all(&mut session, &["English", "Jaipur"]);
        assert_eq!(
            session.submit(FormKind::Onboarding, "again"),
            Err(IntakeError::AwaitingDecision {
                form: FormKind::Onboarding
            })
        );
    }

    #[test]
    fn submitting_to_another_form_is_a_mismatch() {
        let mut session = ConversationSession::start(user(), FormKind::Loan);
        assert_eq!(
            session.submit(FormKind::Fraud, "MUDRA"),
            Err(IntakeError::FormMismatch {
                active: FormKind::Loan,
                submitted: FormKind::Fraud,
            })
        );
    }

    #[test]
    fn close_discards_answers() {
        let mut session = ConversationSession::start(user(), FormKind::Loan);
        answer_all(&mut session, &["Graduate", "Yes", "2"]);
        session.close().unwrap();
        assert!(session.state().is_idle());
        assert!(session.answers().is_empty());
    }

    #[test]
    fn expiry_uses_last_activity() {
        let now = Timestamp::now();
        let session = ConversationSession::reconstitute(
            SessionId::new(),
            user(),
            FormKind::Loan,
            IntakeState::start_of(FormKind::Loan),
            HashMap::new(),
            now.minus_secs(2000),
            now.minus_secs(901),
        );
        assert!(session.is_expired(&now, 900));
        assert!(!session.is_expired(&now, 1800));
    }
}
