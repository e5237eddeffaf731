//! Outcome of one eligibility decision.

use serde::Serialize;

use super::finance::InterestTier;

/// Eligibility verdict plus the loan terms derived from it.
///
/// Values keep full precision; rounding is a presentation concern.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecisionResult {
    pub eligible: bool,
    /// Probability of the winning class, in `0..=1`.
    pub confidence: f64,
    pub recommended_amount: f64,
    pub emi: f64,
    pub interest_rate_percent: f64,
    pub interest_tier: InterestTier,
    pub tenure_months: u32,
}

impl DecisionResult {
    /// Confidence as a whole percentage, for messages.
    pub fn confidence_percent(&self) -> u32 {
        (self.confidence * 100.0).round().clamp(0.0, 100.0) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confidence_percent_rounds() {
        let result = DecisionResult {
            eligible: true,
            confidence: 0.876,
            recommended_amount: 0.0,
            emi: 0.0,
            interest_rate_percent: 8.5,
            interest_tier: InterestTier::Prime,
            tenure_months: 120,
        };
        assert_eq!(result.confidence_percent(), 88);
    }
}
