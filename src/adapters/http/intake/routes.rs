//! Axum router for the intake endpoints.

use axum::{routing::post, Router};

use super::handlers::{cancel_form, message, start_form, submit_field, IntakeAppState};

/// Intake routes, mounted at `/api/intake`.
///
/// - `POST /:user_id/start` - Begin a form
/// - `POST /:user_id/submit` - Answer the current question
/// - `POST /:user_id/cancel` - Abandon the active form
/// - `POST /:user_id/message` - Raw chat text, commands included
pub fn intake_routes() -> Router<IntakeAppState> {
    Router::new()
        .route("/:user_id/start", post(start_form))
        .route("/:user_id/submit", post(submit_field))
        .route("/:user_id/cancel", post(cancel_form))
        .route("/:user_id/message", post(message))
}

pub fn intake_router(state: IntakeAppState) -> Router {
    Router::new().nest("/intake", intake_routes()).with_state(state)
}
