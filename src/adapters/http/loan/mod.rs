//! HTTP adapter for the loan endpoints.
//!
//! - `POST /api/loan/check-eligibility` - Decision for a complete application
//! - `GET /api/loan/emi-calculator` - EMI, totals and split
//! - `GET /api/loan/health` - Classifier availability
//! - `GET /api/loan/schemes` - Government scheme catalogue
//! - `GET /api/loan/requirements` - Documents and criteria

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::LoanAppState;
pub use routes::{loan_router, loan_routes};
