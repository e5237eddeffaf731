//! Tenure unit reconciliation.
//!
//! Users give tenure in years. Amortization needs months. The model was fit
//! on years but only ever saw 2..=20 of them. Both derivations are made once,
//! here, and kept apart: months never reach the feature vector and the
//! clamped model value never reaches the EMI formula.

use serde::Serialize;

/// Smallest tenure (years) present in the model's training data.
pub const MODEL_TENURE_MIN_YEARS: u32 = 2;

/// Largest tenure (years) present in the model's training data.
pub const MODEL_TENURE_MAX_YEARS: u32 = 20;

/// The two representations of one entered tenure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReconciledTenure {
    /// Human-facing duration; drives EMI and display.
    pub tenure_months: u32,
    /// Model-facing duration; goes into the feature vector only.
    pub model_tenure_years: u32,
}

impl ReconciledTenure {
    /// Derives both representations from the years the user entered.
    pub fn from_entered_years(tenure_years: u32) -> Self {
        let tenure_months = tenure_years.saturating_mul(12);
        let rounded_years = (f64::from(tenure_months) / 12.0).round() as u32;
        Self {
            tenure_months,
            model_tenure_years: rounded_years.clamp(MODEL_TENURE_MIN_YEARS, MODEL_TENURE_MAX_YEARS),
        }
    }
}
