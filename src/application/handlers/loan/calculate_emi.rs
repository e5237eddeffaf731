//! CalculateEmiHandler - Pure repayment arithmetic.

use crate::domain::decision::EmiBreakdown;
use crate::domain::foundation::ValidationError;

#[derive(Debug, Clone, Copy)]
pub struct CalculateEmiQuery {
    pub loan_amount: f64,
    pub interest_rate_percent: f64,
    pub tenure_months: u32,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CalculateEmiHandler;

impl CalculateEmiHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle(&self, query: CalculateEmiQuery) -> Result<EmiBreakdown, ValidationError> {
        EmiBreakdown::compute(
            query.loan_amount,
            query.interest_rate_percent,
            query.tenure_months,
        )
    }
}
