//! SubmitFieldHandler - Answer the current question of the active form.
//!
//! # Completion
//!
//! Fraud and onboarding forms finish under the user's lock. A loan form
//! needs the classifier, so the last answer moves the session to
//! `AwaitingDecision`, the lock is released for the call, and the result is
//! committed only if the same run is still awaiting it. A cancel or a new
//! form in the meantime turns the late result into [`SubmitOutcome::Discarded`].

use tracing::{debug, info, warn};

use super::context::IntakeContext;
use crate::domain::decision::{DecisionError, DecisionPipeline, DecisionResult};
use crate::domain::foundation::{DomainError, Locale, SessionId, Timestamp, UserId, ValidationError};
use crate::domain::fraud::FraudAssessment;
use crate::domain::intake::{
    ConversationSession, FieldId, FormKind, FraudReport, IntakeError, LoanIntake,
    OnboardingAnswers, StepOutcome,
};
use crate::domain::messages::{catalog, MessageComposer};
use crate::ports::{PreferenceError, PreferenceUpdate, SessionStoreError, UserPreference};

/// Command to submit one answer
#[derive(Debug, Clone)]
pub struct SubmitFieldCommand {
    pub user_id: UserId,
    pub form: FormKind,
    pub input: String,
}

/// What the answer led to.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Answer accepted; `field` is the next question.
    Prompt { field: FieldId, message: String },
    /// Answer refused; `field` is asked again.
    ValidationFailed {
        field: FieldId,
        error: ValidationError,
        message: String,
    },
    Decision {
        result: DecisionResult,
        message: String,
    },
    FraudAssessment {
        assessment: FraudAssessment,
        message: String,
    },
    OnboardingComplete {
        preference: UserPreference,
        message: String,
    },
    /// The run was cancelled or replaced while its decision was computed.
    Discarded,
}

impl SubmitOutcome {
    pub fn message(&self) -> Option<&str> {
        match self {
            SubmitOutcome::Prompt { message, .. }
            | SubmitOutcome::ValidationFailed { message, .. }
            | SubmitOutcome::Decision { message, .. }
            | SubmitOutcome::FraudAssessment { message, .. }
            | SubmitOutcome::OnboardingComplete { message, .. } => Some(message),
            SubmitOutcome::Discarded => None,
        }
    }

    /// Results worth an audio rendition.
    pub fn is_result(&self) -> bool {
        matches!(
            self,
            SubmitOutcome::Decision { .. } | SubmitOutcome::FraudAssessment { .. }
        )
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SubmitFieldError {
    #[error("No form is active for this user")]
    NoActiveForm,

    #[error("Session expired after inactivity")]
    Expired,

    #[error("The {active} form is active, not the {submitted} form")]
    FormMismatch { active: FormKind, submitted: FormKind },

    #[error("The {form} form is already being decided")]
    DecisionInFlight { form: FormKind },

    /// The session has been reset; `message` is the localized notice.
    #[error("Classifier unavailable: {reason}")]
    ClassifierUnavailable { reason: String, message: String },

    #[error("Storage error: {0}")]
    Storage(#[from] SessionStoreError),

    #[error("Preference error: {0}")]
    Preference(#[from] PreferenceError),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl From<IntakeError> for SubmitFieldError {
    fn from(err: IntakeError) -> Self {
        match err {
            IntakeError::FormMismatch { active, submitted } => {
                SubmitFieldError::FormMismatch { active, submitted }
            }
            IntakeError::AwaitingDecision { form } => SubmitFieldError::DecisionInFlight { form },
            other => SubmitFieldError::Domain(other.into()),
        }
    }
}

pub struct SubmitFieldHandler {
    ctx: IntakeContext,
    pipeline: DecisionPipeline,
    composer: MessageComposer,
}

impl SubmitFieldHandler {
    pub fn new(ctx: IntakeContext, pipeline: DecisionPipeline) -> Self {
        Self {
            ctx,
            pipeline,
            composer: MessageComposer::new(),
        }
    }

    pub async fn handle(&self, cmd: SubmitFieldCommand) -> Result<SubmitOutcome, SubmitFieldError> {
        let guard = self.ctx.locks.acquire(&cmd.user_id).await;

        let mut session = self
            .ctx
            .sessions
            .get(&cmd.user_id)
            .await?
            .ok_or(SubmitFieldError::NoActiveForm)?;

        if session.is_expired(&Timestamp::now(), self.ctx.settings.idle_timeout_secs) {
            self.ctx.sessions.delete(&cmd.user_id).await?;
            info!(user_id = %cmd.user_id, form = %session.form(), "Session expired");
            return Err(SubmitFieldError::Expired);
        }

        let locale = self.ctx.locale_for(&cmd.user_id).await;
        let field = session.current_field();

        let step = match session.submit(cmd.form, &cmd.input) {
            Ok(step) => step,
            Err(IntakeError::Invalid(error)) => {
                self.ctx.sessions.put(&session).await?;
                let field = field.ok_or(SubmitFieldError::DecisionInFlight { form: cmd.form })?;
                debug!(user_id = %cmd.user_id, field = %field, error = %error, "Answer rejected");
                return Ok(SubmitOutcome::ValidationFailed {
                    field,
                    message: catalog::reprompt(&error, field, locale),
                    error,
                });
            }
            Err(err) => return Err(err.into()),
        };

        match step {
            StepOutcome::Advanced {
                answered,
                value,
                next,
            } => {
                self.ctx.sessions.put(&session).await?;
                debug!(user_id = %cmd.user_id, field = %answered, next = %next, "Answer accepted");
                Ok(SubmitOutcome::Prompt {
                    field: next,
                    message: catalog::advance(answered, &value, next, locale),
                })
            }
            StepOutcome::ReadyForDecision { .. } => match session.form() {
                FormKind::Fraud => self.complete_fraud(session, locale).await,
                FormKind::Onboarding => self.complete_onboarding(session).await,
                FormKind::Loan => {
                    let intake = LoanIntake::from_answers(session.answers())?;
                    let run_id = session.id();
                    self.ctx.sessions.put(&session).await?;
                    drop(guard);
                    self.complete_loan(&cmd.user_id, run_id, intake, locale).await
                }
            },
        }
    }

    async fn complete_fraud(
        &self,
        mut session: ConversationSession,
        locale: Locale,
    ) -> Result<SubmitOutcome, SubmitFieldError> {
        let report = FraudReport::from_answers(session.answers())?;
        let assessment = FraudAssessment::assess(&report);
        self.finish(&mut session).await?;

        info!(
            user_id = %session.user_id(),
            risk = %assessment.risk_level,
            score = assessment.score,
            "Fraud report assessed"
        );
        Ok(SubmitOutcome::FraudAssessment {
            message: self.composer.fraud(&assessment, locale),
            assessment,
        })
    }

    async fn complete_onboarding(
        &self,
        mut session: ConversationSession,
    ) -> Result<SubmitOutcome, SubmitFieldError> {
        let answers = OnboardingAnswers::from_answers(session.answers())?;
        let preference = self
            .ctx
            .preferences
            .set(
                session.user_id(),
                PreferenceUpdate {
                    locale: Some(answers.locale),
                    location: Some(answers.location.clone()),
                    advisory_enabled: Some(true),
                },
                self.ctx.settings.default_locale,
            )
            .await?;
        self.finish(&mut session).await?;

        info!(user_id = %session.user_id(), locale = %answers.locale, "Onboarding complete");
        Ok(SubmitOutcome::OnboardingComplete {
            message: catalog::setup_complete(&answers, answers.locale),
            preference,
        })
    }

    async fn complete_loan(
        &self,
        user_id: &UserId,
        run_id: SessionId,
        intake: LoanIntake,
        locale: Locale,
    ) -> Result<SubmitOutcome, SubmitFieldError> {
        debug!(user_id = %user_id, run_id = %run_id, "Requesting eligibility decision");
        let decision = self.pipeline.decide(&intake).await;

        let _guard = self.ctx.locks.acquire(user_id).await;
        let mut session = match self.ctx.sessions.get(user_id).await? {
            Some(s) if s.id() == run_id && s.is_awaiting_decision() => s,
            _ => {
                info!(user_id = %user_id, run_id = %run_id, "Decision discarded, run no longer active");
                return Ok(SubmitOutcome::Discarded);
            }
        };
        self.finish(&mut session).await?;

        match decision {
            Ok(result) => Ok(SubmitOutcome::Decision {
                message: self.composer.decision(&result, locale),
                result,
            }),
            Err(err) => Err(self.decision_failure(user_id, err, locale)),
        }
    }

    fn decision_failure(&self, user_id: &UserId, err: DecisionError, locale: Locale) -> SubmitFieldError {
        if err.is_classifier_failure() {
            warn!(user_id = %user_id, error = %err, "Eligibility decision failed, session reset");
            SubmitFieldError::ClassifierUnavailable {
                reason: err.to_string(),
                message: catalog::decision_failed(locale).to_string(),
            }
        } else {
            SubmitFieldError::Domain(err.into())
        }
    }

    /// Closes and deletes a completed session.
    async fn finish(&self, session: &mut ConversationSession) -> Result<(), SubmitFieldError> {
        session.close()?;
        self.ctx.sessions.delete(session.user_id()).await?;
        Ok(())
    }
}
