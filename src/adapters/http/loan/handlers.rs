//! HTTP handlers for the loan endpoints.

use axum::extract::{Json, Query, State};
use axum::http::StatusCode;
use tracing::info;

use crate::adapters::http::error::ApiError;
use crate::application::{
    CalculateEmiHandler, CalculateEmiQuery, CheckEligibilityCommand, CheckEligibilityError,
    CheckEligibilityHandler,
};
use crate::domain::decision::DecisionPipeline;
use crate::domain::fraud::{SCHEMES, SCHEMES_DISCLAIMER};
use crate::domain::intake::LoanIntake;

use super::dto::{
    EligibilityResponse, EmiQuery, EmiResponse, LoanApplicationRequest, LoanHealthResponse,
    RequirementsResponse, SchemeResponse, SchemesResponse,
};

/// State shared by the loan endpoints.
#[derive(Clone)]
pub struct LoanAppState {
    pub pipeline: DecisionPipeline,
}

impl LoanAppState {
    pub fn new(pipeline: DecisionPipeline) -> Self {
        Self { pipeline }
    }

    pub fn check_eligibility_handler(&self) -> CheckEligibilityHandler {
        CheckEligibilityHandler::new(self.pipeline.clone())
    }
}

impl From<CheckEligibilityError> for ApiError {
    fn from(err: CheckEligibilityError) -> Self {
        match err {
            CheckEligibilityError::Invalid(e) => {
                ApiError::new(StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_FAILED", e.to_string())
            }
            CheckEligibilityError::ClassifierUnavailable(reason) => ApiError::new(
                StatusCode::SERVICE_UNAVAILABLE,
                "CLASSIFIER_UNAVAILABLE",
                reason,
            ),
            CheckEligibilityError::Domain(e) => e.into(),
        }
    }
}

/// POST /api/loan/check-eligibility
pub async fn check_eligibility(
    State(state): State<LoanAppState>,
    Json(request): Json<LoanApplicationRequest>,
) -> Result<Json<EligibilityResponse>, ApiError> {
    let intake = LoanIntake::try_from(request).map_err(|e| {
        ApiError::new(StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_FAILED", e.to_string())
    })?;
    info!(
        credit_score = intake.credit_score,
        tenure_years = intake.tenure_years,
        "Eligibility request"
    );

    let result = state
        .check_eligibility_handler()
        .handle(CheckEligibilityCommand { intake })
        .await?;

    Ok(Json(result.into()))
}

/// GET /api/loan/emi-calculator
pub async fn emi_calculator(
    Query(query): Query<EmiQuery>,
) -> Result<Json<EmiResponse>, ApiError> {
    let breakdown = CalculateEmiHandler::new()
        .handle(CalculateEmiQuery {
            loan_amount: query.loan_amount,
            interest_rate_percent: query.interest_rate,
            tenure_months: query.tenure_months,
        })
        .map_err(|e| ApiError::bad_request(e.to_string()))?;

    Ok(Json(breakdown.into()))
}

/// GET /api/loan/health
pub async fn loan_health(State(state): State<LoanAppState>) -> Json<LoanHealthResponse> {
    let classifier = state.pipeline.classifier();
    let loaded = classifier.is_available().await;
    let info = classifier.describe();

    Json(LoanHealthResponse {
        status: if loaded { "healthy" } else { "unhealthy" }.to_string(),
        model_loaded: loaded,
        backend: info.backend,
        message: if loaded {
            "Loan service operational".to_string()
        } else {
            "Loan model not loaded".to_string()
        },
    })
}

/// GET /api/loan/schemes
pub async fn schemes() -> Json<SchemesResponse> {
    let schemes: Vec<SchemeResponse> = SCHEMES
        .iter()
        .map(|scheme| SchemeResponse {
            scheme: scheme.clone(),
            verified: true,
        })
        .collect();

    Json(SchemesResponse {
        count: schemes.len(),
        schemes,
        disclaimer: SCHEMES_DISCLAIMER,
    })
}

/// GET /api/loan/requirements
pub async fn requirements() -> Json<RequirementsResponse> {
    Json(RequirementsResponse::standard())
}
