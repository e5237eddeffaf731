//! Loan terms: interest tier, recommended amount, EMI.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

/// The most a borrower is offered, as a multiple of annual income.
pub const INCOME_MULTIPLIER: f64 = 5.0;

/// Interest tier keyed by credit score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterestTier {
    /// Score 750 and above.
    Prime,
    /// Score 700 to 749.
    Standard,
    /// Score below 700.
    SubPrime,
}

impl InterestTier {
    pub fn for_credit_score(credit_score: u32) -> Self {
        match credit_score {
            750.. => InterestTier::Prime,
            700..=749 => InterestTier::Standard,
            _ => InterestTier::SubPrime,
        }
    }

    /// Annual rate in percent.
    pub fn rate_percent(&self) -> f64 {
        match self {
            InterestTier::Prime => 8.5,
            InterestTier::Standard => 10.0,
            InterestTier::SubPrime => 12.0,
        }
    }
}

/// Amount offered to an applicant.
///
/// Capped at [`INCOME_MULTIPLIER`] times annual income; zero when ineligible.
pub fn recommended_amount(eligible: bool, requested: f64, annual_income: f64) -> f64 {
    if eligible {
        requested.min(annual_income * INCOME_MULTIPLIER)
    } else {
        0.0
    }
}

/// Monthly instalment under standard amortization.
///
/// Returns 0 for a zero principal or a zero-month tenure.
pub fn monthly_emi(principal: f64, annual_rate_percent: f64, tenure_months: u32) -> f64 {
    if principal <= 0.0 || tenure_months == 0 {
        return 0.0;
    }
    let n = f64::from(tenure_months);
    let r = annual_rate_percent / 1200.0;
    let growth = (1.0 + r).powf(n);
    // Rates too small to register in (1 + r) fall back to the zero-rate case.
    if r > 0.0 && growth > 1.0 {
        principal * r * growth / (growth - 1.0)
    } else {
        principal / n
    }
}

/// Full repayment picture for a loan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EmiBreakdown {
    pub loan_amount: f64,
    pub interest_rate_percent: f64,
    pub tenure_months: u32,
    pub monthly_emi: f64,
    pub total_payment: f64,
    pub total_interest: f64,
    pub principal_percentage: f64,
    pub interest_percentage: f64,
}

impl EmiBreakdown {
    /// Computes the breakdown, rejecting inputs the formula cannot take.
    pub fn compute(
        loan_amount: f64,
        interest_rate_percent: f64,
        tenure_months: u32,
    ) -> Result<Self, ValidationError> {
        if !loan_amount.is_finite() || loan_amount < 0.0 {
            return Err(ValidationError::Negative {
                field: "loan_amount".to_string(),
                actual: loan_amount,
            });
        }
        if !interest_rate_percent.is_finite() || interest_rate_percent < 0.0 {
            return Err(ValidationError::Negative {
                field: "interest_rate".to_string(),
                actual: interest_rate_percent,
            });
        }
        if tenure_months == 0 {
            return Err(ValidationError::NotPositive {
                field: "tenure_months".to_string(),
                actual: 0.0,
            });
        }

        let monthly_emi = monthly_emi(loan_amount, interest_rate_percent, tenure_months);
        let total_payment = monthly_emi * f64::from(tenure_months);
        let total_interest = total_payment - loan_amount;
        let (principal_percentage, interest_percentage) = if total_payment > 0.0 {
            (
                loan_amount / total_payment * 100.0,
                total_interest / total_payment * 100.0,
            )
        } else {
            (0.0, 0.0)
        };

        Ok(Self {
            loan_amount,
            interest_rate_percent,
            tenure_months,
            monthly_emi,
            total_payment,
            total_interest,
            principal_percentage,
            interest_percentage,
        })
    }
}

/// Rounds to two decimal places for presentation.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn tier_boundaries() {
        assert_eq!(InterestTier::for_credit_score(900).rate_percent(), 8.5);
        assert_eq!(InterestTier::for_credit_score(750).rate_percent(), 8.5);
        assert_eq!(InterestTier::for_credit_score(749).rate_percent(), 10.0);
        assert_eq!(InterestTier::for_credit_score(700).rate_percent(), 10.0);
        assert_eq!(InterestTier::for_credit_score(699).rate_percent(), 12.0);
        assert_eq!(InterestTier::for_credit_score(300).rate_percent(), 12.0);
    }

    #[test]
    fn recommended_amount_is_capped_by_income() {
        assert_eq!(recommended_amount(true, 3_000_000.0, 1_200_000.0), 3_000_000.0);
        assert_eq!(recommended_amount(true, 9_000_000.0, 1_200_000.0), 6_000_000.0);
        assert_eq!(recommended_amount(false, 3_000_000.0, 1_200_000.0), 0.0);
    }

    #[test]
    fn emi_matches_amortization_formula() {
        let r: f64 = 8.5 / 1200.0;
        let growth = (1.0 + r).powi(120);
        let expected = 3_000_000.0 * r * growth / (growth - 1.0);
        let emi = monthly_emi(3_000_000.0, 8.5, 120);
        assert!((emi - expected).abs() < 1e-6);
        assert!((emi - 37_195.71).abs() < 0.01, "emi was {emi}");
    }

    #[test]
    fn zero_rate_divides_evenly() {
        assert_eq!(monthly_emi(120_000.0, 0.0, 12), 10_000.0);
    }

    #[test]
    fn zero_principal_or_tenure_gives_zero_emi() {
        assert_eq!(monthly_emi(0.0, 12.0, 60), 0.0);
        assert_eq!(monthly_emi(100_000.0, 12.0, 0), 0.0);
    }

    #[test]
    fn breakdown_totals_and_percentages() {
        let breakdown = EmiBreakdown::compute(500_000.0, 10.0, 60).unwrap();
        assert!((breakdown.total_payment - breakdown.monthly_emi * 60.0).abs() < 1e-6);
        assert!((breakdown.total_interest - (breakdown.total_payment - 500_000.0)).abs() < 1e-6);
        assert!((breakdown.principal_percentage + breakdown.interest_percentage - 100.0).abs() < 1e-9);
    }

    #[test]
    fn breakdown_rejects_bad_inputs() {
        assert!(EmiBreakdown::compute(100_000.0, 10.0, 0).is_err());
        assert!(EmiBreakdown::compute(-1.0, 10.0, 12).is_err());
        assert!(EmiBreakdown::compute(100_000.0, -0.5, 12).is_err());
    }

    #[test]
    fn breakdown_of_zero_loan_has_zero_percentages() {
        let breakdown = EmiBreakdown::compute(0.0, 10.0, 12).unwrap();
        assert_eq!(breakdown.monthly_emi, 0.0);
        assert_eq!(breakdown.principal_percentage, 0.0);
    }

    #[test]
    fn round2_rounds_half_away_from_zero() {
        assert_eq!(round2(37_195.456), 37_195.46);
        assert_eq!(round2(0.125), 0.13);
    }

    proptest! {
        #[test]
        fn emi_repays_at_least_the_principal(
            principal in 1_000.0f64..10_000_000.0,
            rate in 0.0f64..30.0,
            months in 1u32..=360,
        ) {
            let emi = monthly_emi(principal, rate, months);
            prop_assert!(emi > 0.0);
            prop_assert!(emi * f64::from(months) >= principal * (1.0 - 1e-9));
        }

        #[test]
        fn higher_rate_never_lowers_emi(
            principal in 1_000.0f64..10_000_000.0,
            rate in 0.1f64..29.0,
            months in 1u32..=360,
        ) {
            prop_assert!(monthly_emi(principal, rate + 1.0, months) >= monthly_emi(principal, rate, months));
        }
    }
}
