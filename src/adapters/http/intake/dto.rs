//! HTTP DTOs for the intake endpoints.

use serde::{Deserialize, Serialize};

use crate::adapters::http::loan::dto::DecisionResponse;
use crate::application::{
    CancelFormResult, HandleMessageResult, Reply, StartFormResult, SubmitOutcome,
};
use crate::domain::foundation::Locale;
use crate::domain::fraud::FraudAssessment;
use crate::domain::intake::{FieldId, FormKind};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StartFormRequest {
    pub form: FormKind,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SubmitFieldRequest {
    pub form: FormKind,
    pub input: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MessageRequest {
    pub text: String,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StartFormResponse {
    pub run_id: String,
    pub form: FormKind,
    pub field: FieldId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub superseded: Option<FormKind>,
    pub locale: Locale,
    pub message: String,
}

impl From<StartFormResult> for StartFormResponse {
    fn from(result: StartFormResult) -> Self {
        Self {
            run_id: result.run_id.to_string(),
            form: result.form,
            field: result.field,
            superseded: result.superseded,
            locale: result.locale,
            message: result.message,
        }
    }
}

/// Outcome of one answer, tagged by `kind`.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SubmitFieldResponse {
    Prompt {
        field: FieldId,
        message: String,
    },
    ValidationError {
        field: FieldId,
        error: String,
        message: String,
    },
    Decision {
        decision: DecisionResponse,
        message: String,
    },
    FraudAssessment {
        assessment: FraudAssessment,
        message: String,
    },
    OnboardingComplete {
        locale: Locale,
        location: Option<String>,
        message: String,
    },
    Discarded,
}

impl From<SubmitOutcome> for SubmitFieldResponse {
    fn from(outcome: SubmitOutcome) -> Self {
        match outcome {
            SubmitOutcome::Prompt { field, message } => Self::Prompt { field, message },
            SubmitOutcome::ValidationFailed {
                field,
                error,
                message,
            } => Self::ValidationError {
                field,
                error: error.to_string(),
                message,
            },
            SubmitOutcome::Decision { result, message } => Self::Decision {
                decision: DecisionResponse::from(&result),
                message,
            },
            SubmitOutcome::FraudAssessment {
                assessment,
                message,
            } => Self::FraudAssessment {
                assessment,
                message,
            },
            SubmitOutcome::OnboardingComplete {
                preference,
                message,
            } => Self::OnboardingComplete {
                locale: preference.locale,
                location: preference.location,
                message,
            },
            SubmitOutcome::Discarded => Self::Discarded,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CancelFormResponse {
    pub cancelled: Option<FormKind>,
    pub message: String,
}

impl From<CancelFormResult> for CancelFormResponse {
    fn from(result: CancelFormResult) -> Self {
        Self {
            cancelled: result.cancelled,
            message: result.message,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReplyResponse {
    pub text: String,
    pub audio: bool,
}

impl From<Reply> for ReplyResponse {
    fn from(reply: Reply) -> Self {
        Self {
            text: reply.text,
            audio: reply.with_audio,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MessageResponse {
    pub locale: Locale,
    pub replies: Vec<ReplyResponse>,
}

impl From<HandleMessageResult> for MessageResponse {
    fn from(result: HandleMessageResult) -> Self {
        Self {
            locale: result.locale,
            replies: result.replies.into_iter().map(ReplyResponse::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ValidationError;

    #[test]
    fn submit_response_is_tagged_by_kind() {
        let response = SubmitFieldResponse::from(SubmitOutcome::ValidationFailed {
            field: FieldId::TenureYears,
            error: ValidationError::out_of_range("tenure_years", 1, 30, 31),
            message: "retry".to_string(),
        });

        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["kind"], "validation_error");
        assert_eq!(json["field"], "tenure_years");
    }

    #[test]
    fn discarded_has_no_payload() {
        let json = serde_json::to_value(SubmitFieldResponse::Discarded).unwrap();
        assert_eq!(json, serde_json::json!({ "kind": "discarded" }));
    }
}
