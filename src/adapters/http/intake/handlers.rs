//! HTTP handlers for the intake endpoints.
//!
//! The user is named in the path. Authentication is left to the deployment
//! in front of this service.

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;

use crate::adapters::http::error::ApiError;
use crate::application::{
    CancelFormCommand, CancelFormError, CancelFormHandler, HandleMessageCommand,
    HandleMessageError, HandleMessageHandler, IntakeContext, ReplyDispatcher, StartFormCommand,
    StartFormError, StartFormHandler, SubmitFieldCommand, SubmitFieldError, SubmitFieldHandler,
};
use crate::domain::decision::DecisionPipeline;
use crate::domain::foundation::UserId;

use super::dto::{
    CancelFormResponse, MessageRequest, MessageResponse, StartFormRequest, StartFormResponse,
    SubmitFieldRequest, SubmitFieldResponse,
};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared state; handlers are built per request from it.
#[derive(Clone)]
pub struct IntakeAppState {
    pub ctx: IntakeContext,
    pub pipeline: DecisionPipeline,
    pub dispatcher: ReplyDispatcher,
}

impl IntakeAppState {
    pub fn new(ctx: IntakeContext, pipeline: DecisionPipeline, dispatcher: ReplyDispatcher) -> Self {
        Self {
            ctx,
            pipeline,
            dispatcher,
        }
    }

    pub fn start_form_handler(&self) -> StartFormHandler {
        StartFormHandler::new(self.ctx.clone())
    }

    pub fn submit_field_handler(&self) -> SubmitFieldHandler {
        SubmitFieldHandler::new(self.ctx.clone(), self.pipeline.clone())
    }

    pub fn cancel_form_handler(&self) -> CancelFormHandler {
        CancelFormHandler::new(self.ctx.clone())
    }

    pub fn handle_message_handler(&self) -> HandleMessageHandler {
        HandleMessageHandler::new(
            self.ctx.clone(),
            self.submit_field_handler(),
            self.dispatcher.clone(),
        )
    }
}

fn parse_user(raw: &str) -> Result<UserId, ApiError> {
    UserId::new(raw).map_err(|e| ApiError::bad_request(e.to_string()))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error mapping
// ════════════════════════════════════════════════════════════════════════════════

impl From<StartFormError> for ApiError {
    fn from(err: StartFormError) -> Self {
        ApiError::internal(err.to_string())
    }
}

impl From<CancelFormError> for ApiError {
    fn from(err: CancelFormError) -> Self {
        ApiError::internal(err.to_string())
    }
}

impl From<HandleMessageError> for ApiError {
    fn from(err: HandleMessageError) -> Self {
        match err {
            HandleMessageError::Domain(e) => e.into(),
            other => ApiError::internal(other.to_string()),
        }
    }
}

impl From<SubmitFieldError> for ApiError {
    fn from(err: SubmitFieldError) -> Self {
        let message = err.to_string();
        match err {
            SubmitFieldError::NoActiveForm => {
                ApiError::new(StatusCode::NOT_FOUND, "SESSION_NOT_FOUND", message)
            }
            SubmitFieldError::Expired => {
                ApiError::new(StatusCode::GONE, "SESSION_EXPIRED", message)
            }
            SubmitFieldError::FormMismatch { .. } => {
                ApiError::new(StatusCode::CONFLICT, "FORM_MISMATCH", message)
            }
            SubmitFieldError::DecisionInFlight { .. } => {
                ApiError::new(StatusCode::CONFLICT, "COMPLETION_IN_FLIGHT", message)
            }
            // The localized notice is what the user should see.
            SubmitFieldError::ClassifierUnavailable { message, .. } => ApiError::new(
                StatusCode::SERVICE_UNAVAILABLE,
                "CLASSIFIER_UNAVAILABLE",
                message,
            ),
            SubmitFieldError::Domain(e) => e.into(),
            SubmitFieldError::Storage(_) | SubmitFieldError::Preference(_) => {
                ApiError::internal(message)
            }
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/intake/:user_id/start
pub async fn start_form(
    State(state): State<IntakeAppState>,
    Path(user_id): Path<String>,
    Json(request): Json<StartFormRequest>,
) -> Result<Json<StartFormResponse>, ApiError> {
    let result = state
        .start_form_handler()
        .handle(StartFormCommand {
            user_id: parse_user(&user_id)?,
            form: request.form,
        })
        .await?;

    Ok(Json(result.into()))
}

/// POST /api/intake/:user_id/submit
///
/// A rejected answer is a normal dialogue outcome and comes back with 200
/// and `kind = validation_error`.
pub async fn submit_field(
    State(state): State<IntakeAppState>,
    Path(user_id): Path<String>,
    Json(request): Json<SubmitFieldRequest>,
) -> Result<Json<SubmitFieldResponse>, ApiError> {
    let outcome = state
        .submit_field_handler()
        .handle(SubmitFieldCommand {
            user_id: parse_user(&user_id)?,
            form: request.form,
            input: request.input,
        })
        .await?;

    Ok(Json(outcome.into()))
}

/// POST /api/intake/:user_id/cancel
pub async fn cancel_form(
    State(state): State<IntakeAppState>,
    Path(user_id): Path<String>,
) -> Result<Json<CancelFormResponse>, ApiError> {
    let result = state
        .cancel_form_handler()
        .handle(CancelFormCommand {
            user_id: parse_user(&user_id)?,
        })
        .await?;

    Ok(Json(result.into()))
}

/// POST /api/intake/:user_id/message
pub async fn message(
    State(state): State<IntakeAppState>,
    Path(user_id): Path<String>,
    Json(request): Json<MessageRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let result = state
        .handle_message_handler()
        .handle(HandleMessageCommand {
            user_id: parse_user(&user_id)?,
            text: request.text,
        })
        .await?;

    Ok(Json(result.into()))
}
