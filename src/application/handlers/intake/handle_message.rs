//! HandleMessageHandler - Chat boundary.
//!
//! Turns one raw chat message into the matching intake command, then hands
//! every reply to the [`ReplyDispatcher`]. Slash commands start or cancel
//! forms; any other text answers the active form.

use tracing::{debug, info};

use super::cancel_form::{CancelFormCommand, CancelFormError, CancelFormHandler};
use super::context::IntakeContext;
use super::start_form::{StartFormCommand, StartFormError, StartFormHandler};
use super::submit_field::{SubmitFieldCommand, SubmitFieldError, SubmitFieldHandler, SubmitOutcome};
use crate::application::ReplyDispatcher;
use crate::domain::foundation::{DomainError, Locale, Timestamp, UserId};
use crate::domain::intake::FormKind;
use crate::domain::messages::catalog;
use crate::ports::{PreferenceError, SessionStoreError};

#[derive(Debug, Clone)]
pub struct HandleMessageCommand {
    pub user_id: UserId,
    pub text: String,
}

/// One message sent back to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    /// Also send a spoken rendition.
    pub with_audio: bool,
}

impl Reply {
    fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            with_audio: false,
        }
    }

    fn spoken(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            with_audio: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HandleMessageResult {
    pub locale: Locale,
    /// Replies in the order they were sent.
    pub replies: Vec<Reply>,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum HandleMessageError {
    #[error("Storage error: {0}")]
    Storage(#[from] SessionStoreError),

    #[error("Preference error: {0}")]
    Preference(#[from] PreferenceError),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl From<StartFormError> for HandleMessageError {
    fn from(err: StartFormError) -> Self {
        match err {
            StartFormError::Storage(e) => HandleMessageError::Storage(e),
        }
    }
}

impl From<CancelFormError> for HandleMessageError {
    fn from(err: CancelFormError) -> Self {
        match err {
            CancelFormError::Storage(e) => HandleMessageError::Storage(e),
        }
    }
}

/// Recognized slash commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChatCommand {
    Welcome,
    Start(FormKind),
    Cancel,
}

impl ChatCommand {
    /// Parses `/loan`, `/loan@SomeBot` and the like. Unknown commands
    /// fall back to the welcome text.
    fn parse(text: &str) -> Option<Self> {
        let word = text.split_whitespace().next()?.strip_prefix('/')?;
        let name = word.split('@').next().unwrap_or_default().to_lowercase();
        Some(match name.as_str() {
            "loan" => ChatCommand::Start(FormKind::Loan),
            "fraud" => ChatCommand::Start(FormKind::Fraud),
            "language" => ChatCommand::Start(FormKind::Onboarding),
            "cancel" => ChatCommand::Cancel,
            _ => ChatCommand::Welcome,
        })
    }
}

pub struct HandleMessageHandler {
    ctx: IntakeContext,
    start: StartFormHandler,
    submit: SubmitFieldHandler,
    cancel: CancelFormHandler,
    dispatcher: ReplyDispatcher,
}

impl HandleMessageHandler {
    pub fn new(ctx: IntakeContext, submit: SubmitFieldHandler, dispatcher: ReplyDispatcher) -> Self {
        Self {
            start: StartFormHandler::new(ctx.clone()),
            cancel: CancelFormHandler::new(ctx.clone()),
            ctx,
            submit,
            dispatcher,
        }
    }

    pub async fn handle(
        &self,
        cmd: HandleMessageCommand,
    ) -> Result<HandleMessageResult, HandleMessageError> {
        let text = cmd.text.trim();
        debug!(user_id = %cmd.user_id, len = text.len(), "Message received");

        let (locale, replies) = match ChatCommand::parse(text) {
            Some(ChatCommand::Welcome) => {
                let locale = self.ctx.locale_for(&cmd.user_id).await;
                (locale, vec![Reply::text(catalog::welcome(locale))])
            }
            Some(ChatCommand::Start(form)) => {
                let started = self
                    .start
                    .handle(StartFormCommand {
                        user_id: cmd.user_id.clone(),
                        form,
                    })
                    .await?;
                (started.locale, vec![Reply::text(started.message)])
            }
            Some(ChatCommand::Cancel) => {
                let cancelled = self
                    .cancel
                    .handle(CancelFormCommand {
                        user_id: cmd.user_id.clone(),
                    })
                    .await?;
                (cancelled.locale, vec![Reply::text(cancelled.message)])
            }
            None => return self.answer(&cmd.user_id, text).await,
        };

        self.send(&cmd.user_id, locale, &replies).await;
        Ok(HandleMessageResult { locale, replies })
    }

    /// Free text: the answer to the active form's current question.
    async fn answer(
        &self,
        user_id: &UserId,
        text: &str,
    ) -> Result<HandleMessageResult, HandleMessageError> {
        let locale = self.ctx.locale_for(user_id).await;
        let mut replies = Vec::new();

        let Some(session) = self.ctx.sessions.get(user_id).await? else {
            let reply = Reply::text(catalog::welcome(locale));
            self.send(user_id, locale, std::slice::from_ref(&reply)).await;
            return Ok(HandleMessageResult {
                locale,
                replies: vec![reply],
            });
        };
        let form = session.form();

        // The classifier or assessor may take a moment; say so before the
        // final answer is processed, but only if it will be accepted.
        let expired = session.is_expired(&Timestamp::now(), self.ctx.settings.idle_timeout_secs);
        let completes = !expired
            && session
                .current_field()
                .filter(|field| form.is_last(*field))
                .and_then(|field| form.spec(field))
                .is_some_and(|spec| spec.validate(text).is_ok());
        if completes && form != FormKind::Onboarding {
            let notice = Reply::text(catalog::processing(form, locale));
            self.send(user_id, locale, std::slice::from_ref(&notice)).await;
            replies.push(notice);
        }

        let outcome = self
            .submit
            .handle(SubmitFieldCommand {
                user_id: user_id.clone(),
                form,
                input: text.to_string(),
            })
            .await;

        let (reply_locale, reply) = match outcome {
            Ok(SubmitOutcome::Discarded) => {
                info!(user_id = %user_id, "Late result dropped");
                return Ok(HandleMessageResult { locale, replies });
            }
            Ok(SubmitOutcome::OnboardingComplete { preference, message }) => {
                (preference.locale, Reply::text(message))
            }
            Ok(outcome) => {
                let with_audio = outcome.is_result();
                let message = outcome.message().unwrap_or_default().to_string();
                let reply = if with_audio {
                    Reply::spoken(message)
                } else {
                    Reply::text(message)
                };
                (locale, reply)
            }
            Err(SubmitFieldError::NoActiveForm) | Err(SubmitFieldError::FormMismatch { .. }) => {
                (locale, Reply::text(catalog::welcome(locale)))
            }
            Err(SubmitFieldError::Expired) => (locale, Reply::text(catalog::session_expired(locale))),
            Err(SubmitFieldError::DecisionInFlight { form }) => {
                (locale, Reply::text(catalog::processing(form, locale)))
            }
            Err(SubmitFieldError::ClassifierUnavailable { message, .. }) => {
                (locale, Reply::text(message))
            }
            Err(SubmitFieldError::Storage(e)) => return Err(e.into()),
            Err(SubmitFieldError::Preference(e)) => return Err(e.into()),
            Err(SubmitFieldError::Domain(e)) => return Err(e.into()),
        };

        self.send(user_id, reply_locale, std::slice::from_ref(&reply)).await;
        replies.push(reply);
        Ok(HandleMessageResult {
            locale: reply_locale,
            replies,
        })
    }

    async fn send(&self, user_id: &UserId, locale: Locale, replies: &[Reply]) {
        for reply in replies {
            self.dispatcher
                .dispatch(user_id, &reply.text, locale, reply.with_audio)
                .await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::classifier::MockClassifier;
    use crate::adapters::delivery::{DisabledSpeechSynthesizer, NoopTranslator, RecordingTransport};
    use crate::application::handlers::intake::test_support::{context, SCENARIO_A};
    use crate::domain::decision::DecisionPipeline;
    use crate::ports::ClassifierError;
    use std::sync::Arc;

    fn user() -> UserId {
        UserId::new("7").unwrap()
    }

    fn setup(classifier: MockClassifier) -> (HandleMessageHandler, RecordingTransport) {
        let ctx = context();
        let transport = RecordingTransport::new();
        let dispatcher = ReplyDispatcher::new(
            Arc::new(NoopTranslator),
            Arc::new(DisabledSpeechSynthesizer),
            Arc::new(transport.clone()),
        );
        let submit =
            SubmitFieldHandler::new(ctx.clone(), DecisionPipeline::new(Arc::new(classifier)));
        (HandleMessageHandler::new(ctx, submit, dispatcher), transport)
    }

    async fn say(handler: &HandleMessageHandler, text: &str) -> HandleMessageResult {
        handler
            .handle(HandleMessageCommand {
                user_id: user(),
                text: text.to_string(),
            })
            .await
            .unwrap()
    }

    #[test]
    fn commands_parse_with_bot_suffix() {
        assert_eq!(
            ChatCommand::parse("/loan@GraminBot"),
            Some(ChatCommand::Start(FormKind::Loan))
        );
        assert_eq!(ChatCommand::parse("/CANCEL"), Some(ChatCommand::Cancel));
        assert_eq!(ChatCommand::parse("/unknown"), Some(ChatCommand::Welcome));
        assert_eq!(ChatCommand::parse("Graduate"), None);
        assert_eq!(ChatCommand::parse(""), None);
    }

    #[tokio::test]
    async fn free_text_without_form_gets_welcome() {
        let (handler, transport) = setup(MockClassifier::new());

        let result = say(&handler, "hello").await;

        assert_eq!(result.replies, vec![Reply::text(catalog::welcome(Locale::Hi))]);
        assert_eq!(transport.texts_for(&user()).len(), 1);
    }

    #[tokio::test]
    async fn final_answer_to_expired_form_gets_only_the_expiry_notice() {
        use crate::domain::foundation::SessionId;
        use crate::domain::intake::{ConversationSession, FieldId, IntakeState};

        let ctx = context();
        let now = Timestamp::now();
        let stale = ConversationSession::reconstitute(
            SessionId::new(),
            user(),
            FormKind::Fraud,
            IntakeState::Collecting {
                form: FormKind::Fraud,
                field: FieldId::SchemeSource,
            },
            Default::default(),
            now.minus_secs(2_000),
            now.minus_secs(1_000),
        );
        ctx.sessions.put(&stale).await.unwrap();
        let transport = RecordingTransport::new();
        let dispatcher = ReplyDispatcher::new(
            Arc::new(NoopTranslator),
            Arc::new(DisabledSpeechSynthesizer),
            Arc::new(transport.clone()),
        );
        let submit = SubmitFieldHandler::new(
            ctx.clone(),
            DecisionPipeline::new(Arc::new(MockClassifier::new())),
        );
        let handler = HandleMessageHandler::new(ctx, submit, dispatcher);

        let result = say(&handler, "WhatsApp message").await;

        assert_eq!(
            result.replies,
            vec![Reply::text(catalog::session_expired(Locale::Hi))]
        );
        assert_eq!(
            transport.texts_for(&user()),
            vec![catalog::session_expired(Locale::Hi).to_string()]
        );
    }

    #[tokio::test]
    async fn full_loan_dialogue_sends_processing_then_decision() {
        let (handler, transport) = setup(MockClassifier::new());
        say(&handler, "/loan").await;

        let mut last = None;
        for answer in SCENARIO_A {
            last = Some(say(&handler, answer).await);
        }

        let last = last.unwrap();
        assert_eq!(last.replies.len(), 2);
        assert_eq!(last.replies[0].text, catalog::processing(FormKind::Loan, Locale::Hi));
        assert!(last.replies[1].with_audio);
        // start + 10 prompts + processing + decision
        assert_eq!(transport.texts_for(&user()).len(), 13);
    }

    #[tokio::test]
    async fn invalid_final_answer_skips_processing_notice() {
        let (handler, _transport) = setup(MockClassifier::new());
        say(&handler, "/loan").await;
        for answer in &SCENARIO_A[..10] {
            say(&handler, answer).await;
        }

        let result = say(&handler, "lots").await;

        assert_eq!(result.replies.len(), 1);
        assert!(!result.replies[0].with_audio);
    }

    #[tokio::test]
    async fn classifier_failure_is_reported_in_chat() {
        let (handler, _transport) =
            setup(MockClassifier::new().with_error(ClassifierError::not_loaded("no model")));
        say(&handler, "/loan").await;

        let mut last = None;
        for answer in SCENARIO_A {
            last = Some(say(&handler, answer).await);
        }

        let last = last.unwrap();
        assert_eq!(
            last.replies.last().unwrap().text,
            catalog::decision_failed(Locale::Hi)
        );
    }

    #[tokio::test]
    async fn language_form_switches_reply_locale() {
        let (handler, _transport) = setup(MockClassifier::new());
        say(&handler, "/language").await;
        say(&handler, "English").await;

        let result = say(&handler, "Jaipur").await;

        assert_eq!(result.locale, Locale::En);
        let welcome = say(&handler, "/start").await;
        assert_eq!(welcome.replies[0].text, catalog::welcome(Locale::En));
    }

    #[tokio::test]
    async fn cancel_command_acknowledges() {
        let (handler, _transport) = setup(MockClassifier::new());
        say(&handler, "/fraud").await;

        let result = say(&handler, "/cancel").await;

        assert_eq!(result.replies[0].text, catalog::cancelled(Locale::Hi));
    }
}
