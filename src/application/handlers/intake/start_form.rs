//! StartFormHandler - Begin a form for a user, superseding any active one.

use tracing::info;

use super::context::IntakeContext;
use crate::domain::foundation::{Locale, SessionId, Timestamp, UserId};
use crate::domain::intake::{ConversationSession, FieldId, FormKind};
use crate::domain::messages::catalog;
use crate::ports::SessionStoreError;

/// Command to start a form
#[derive(Debug, Clone)]
pub struct StartFormCommand {
    pub user_id: UserId,
    pub form: FormKind,
}

/// Result of starting a form
#[derive(Debug, Clone, PartialEq)]
pub struct StartFormResult {
    pub run_id: SessionId,
    pub form: FormKind,
    pub field: FieldId,
    /// Form that was active before and has been discarded.
    pub superseded: Option<FormKind>,
    pub locale: Locale,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StartFormError {
    #[error("Storage error: {0}")]
    Storage(#[from] SessionStoreError),
}

pub struct StartFormHandler {
    ctx: IntakeContext,
}

impl StartFormHandler {
    pub fn new(ctx: IntakeContext) -> Self {
        Self { ctx }
    }

    pub async fn handle(&self, cmd: StartFormCommand) -> Result<StartFormResult, StartFormError> {
        let _guard = self.ctx.locks.acquire(&cmd.user_id).await;

        let superseded = match self.ctx.sessions.get(&cmd.user_id).await? {
            Some(old) if !old.is_expired(&Timestamp::now(), self.ctx.settings.idle_timeout_secs) => {
                info!(
                    user_id = %cmd.user_id,
                    old_form = %old.form(),
                    new_form = %cmd.form,
                    "New form supersedes active form"
                );
                Some(old.form())
            }
            _ => None,
        };

        let session = ConversationSession::start(cmd.user_id.clone(), cmd.form);
        self.ctx.sessions.put(&session).await?;

        let locale = self.ctx.locale_for(&cmd.user_id).await;
        info!(user_id = %cmd.user_id, form = %cmd.form, run_id = %session.id(), "Form started");

        Ok(StartFormResult {
            run_id: session.id(),
            form: cmd.form,
            field: cmd.form.first_field(),
            superseded,
            locale,
            message: catalog::form_start(cmd.form, locale),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::intake::test_support::context;

    fn user() -> UserId {
        UserId::new("u1").unwrap()
    }

    #[tokio::test]
    async fn start_stores_session_on_first_field() {
        let ctx = context();
        let handler = StartFormHandler::new(ctx.clone());

        let result = handler
            .handle(StartFormCommand {
                user_id: user(),
                form: FormKind::Loan,
            })
            .await
            .unwrap();

        assert_eq!(result.field, FieldId::Education);
        assert_eq!(result.superseded, None);
        assert!(result.message.contains("1️⃣"));
        let stored = ctx.sessions.get(&user()).await.unwrap().unwrap();
        assert_eq!(stored.id(), result.run_id);
    }

    #[tokio::test]
    async fn new_form_supersedes_active_one_with_fresh_run_id() {
        let ctx = context();
        let handler = StartFormHandler::new(ctx.clone());
        let first = handler
            .handle(StartFormCommand {
                user_id: user(),
                form: FormKind::Loan,
            })
            .await
            .unwrap();

        let second = handler
            .handle(StartFormCommand {
                user_id: user(),
                form: FormKind::Fraud,
            })
            .await
            .unwrap();

        assert_eq!(second.superseded, Some(FormKind::Loan));
        assert_ne!(first.run_id, second.run_id);
        let stored = ctx.sessions.get(&user()).await.unwrap().unwrap();
        assert_eq!(stored.form(), FormKind::Fraud);
        assert!(stored.answers().is_empty());
    }
}
