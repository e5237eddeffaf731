//! CancelFormHandler - Abandon the active form.
//!
//! Cancelling while a loan decision is being computed deletes the run; the
//! late result is then discarded by the submitting handler.

use tracing::info;

use super::context::IntakeContext;
use crate::domain::foundation::{Locale, UserId};
use crate::domain::intake::FormKind;
use crate::domain::messages::catalog;
use crate::ports::SessionStoreError;

#[derive(Debug, Clone)]
pub struct CancelFormCommand {
    pub user_id: UserId,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CancelFormResult {
    /// Form that was cancelled, `None` when nothing was active.
    pub cancelled: Option<FormKind>,
    pub locale: Locale,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CancelFormError {
    #[error("Storage error: {0}")]
    Storage(#[from] SessionStoreError),
}

pub struct CancelFormHandler {
    ctx: IntakeContext,
}

impl CancelFormHandler {
    pub fn new(ctx: IntakeContext) -> Self {
        Self { ctx }
    }

    pub async fn handle(&self, cmd: CancelFormCommand) -> Result<CancelFormResult, CancelFormError> {
        let _guard = self.ctx.locks.acquire(&cmd.user_id).await;

        let cancelled = match self.ctx.sessions.get(&cmd.user_id).await? {
            Some(session) => {
                self.ctx.sessions.delete(&cmd.user_id).await?;
                info!(
                    user_id = %cmd.user_id,
                    form = %session.form(),
                    awaiting_decision = session.is_awaiting_decision(),
                    "Form cancelled"
                );
                Some(session.form())
            }
            None => None,
        };

        let locale = self.ctx.locale_for(&cmd.user_id).await;
        let message = match cancelled {
            Some(_) => catalog::cancelled(locale),
            None => catalog::nothing_to_cancel(locale),
        };

        Ok(CancelFormResult {
            cancelled,
            locale,
            message: message.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::classifier::MockClassifier;
    use crate::application::handlers::intake::test_support::{context, SCENARIO_A};
    use crate::application::handlers::intake::{
        StartFormCommand, StartFormHandler, SubmitFieldCommand, SubmitFieldHandler, SubmitOutcome,
    };
    use crate::domain::decision::DecisionPipeline;
    use std::sync::Arc;
    use std::time::Duration;

    fn user() -> UserId {
        UserId::new("u1").unwrap()
    }

    fn submit_cmd(input: &str) -> SubmitFieldCommand {
        SubmitFieldCommand {
            user_id: user(),
            form: FormKind::Loan,
            input: input.to_string(),
        }
    }

    #[tokio::test]
    async fn cancel_without_session_says_nothing_to_cancel() {
        let handler = CancelFormHandler::new(context());

        let result = handler.handle(CancelFormCommand { user_id: user() }).await.unwrap();

        assert_eq!(result.cancelled, None);
        assert_eq!(result.message, catalog::nothing_to_cancel(result.locale));
    }

    #[tokio::test]
    async fn cancel_mid_form_discards_answers() {
        let ctx = context();
        StartFormHandler::new(ctx.clone())
            .handle(StartFormCommand {
                user_id: user(),
                form: FormKind::Loan,
            })
            .await
            .unwrap();

        let result = CancelFormHandler::new(ctx.clone())
            .handle(CancelFormCommand { user_id: user() })
            .await
            .unwrap();

        assert_eq!(result.cancelled, Some(FormKind::Loan));
        assert!(ctx.sessions.get(&user()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn cancel_during_decision_discards_late_result() {
        let ctx = context();
        StartFormHandler::new(ctx.clone())
            .handle(StartFormCommand {
                user_id: user(),
                form: FormKind::Loan,
            })
            .await
            .unwrap();
        let classifier = MockClassifier::new().with_delay(Duration::from_millis(200));
        let submit = Arc::new(SubmitFieldHandler::new(
            ctx.clone(),
            DecisionPipeline::new(Arc::new(classifier)),
        ));
        for answer in &SCENARIO_A[..10] {
            submit.handle(submit_cmd(answer)).await.unwrap();
        }

        let last = {
            let submit = submit.clone();
            tokio::spawn(async move { submit.handle(submit_cmd(SCENARIO_A[10])).await })
        };
        tokio::time::sleep(Duration::from_millis(50)).await;
        let cancel = CancelFormHandler::new(ctx.clone())
            .handle(CancelFormCommand { user_id: user() })
            .await
            .unwrap();

        assert_eq!(cancel.cancelled, Some(FormKind::Loan));
        assert_eq!(last.await.unwrap().unwrap(), SubmitOutcome::Discarded);
        assert!(ctx.sessions.get(&user()).await.unwrap().is_none());
    }
}
