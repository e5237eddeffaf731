//! Axum router for the loan endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    check_eligibility, emi_calculator, loan_health, requirements, schemes, LoanAppState,
};

/// Loan routes, mounted at `/api/loan`.
///
/// - `POST /check-eligibility` - Stateless decision
/// - `GET /emi-calculator` - Repayment arithmetic
/// - `GET /health` - Classifier availability
/// - `GET /schemes` - Verified government schemes
/// - `GET /requirements` - Document checklist
pub fn loan_routes() -> Router<LoanAppState> {
    Router::new()
        .route("/check-eligibility", post(check_eligibility))
        .route("/emi-calculator", get(emi_calculator))
        .route("/health", get(loan_health))
        .route("/schemes", get(schemes))
        .route("/requirements", get(requirements))
}

/// Loan routes with their state applied.
pub fn loan_router(state: LoanAppState) -> Router {
    Router::new().nest("/loan", loan_routes()).with_state(state)
}
