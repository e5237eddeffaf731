//! Decision pipeline: intake in, verdict and loan terms out.

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::errors::DecisionError;
use super::features::DecisionRequest;
use super::finance::{monthly_emi, recommended_amount, InterestTier};
use super::result::DecisionResult;
use super::tenure::ReconciledTenure;
use crate::domain::intake::LoanIntake;
use crate::ports::{Classifier, ClassifierError};

/// Runs one eligibility decision against a [`Classifier`].
///
/// Steps: validate, reconcile tenure, assemble features in the model's own
/// column order, classify, then derive terms from the human-facing tenure.
/// Any classifier failure aborts the decision; there is no fallback verdict.
#[derive(Clone)]
pub struct DecisionPipeline {
    classifier: Arc<dyn Classifier>,
}

impl DecisionPipeline {
    pub fn new(classifier: Arc<dyn Classifier>) -> Self {
        Self { classifier }
    }

    pub fn classifier(&self) -> &Arc<dyn Classifier> {
        &self.classifier
    }

    pub async fn decide(&self, intake: &LoanIntake) -> Result<DecisionResult, DecisionError> {
        intake.validate()?;

        if !self.classifier.is_available().await {
            warn!("Eligibility requested while classifier is not loaded");
            return Err(ClassifierError::not_loaded("classifier reports unavailable").into());
        }

        let tenure = ReconciledTenure::from_entered_years(intake.tenure_years);
        debug!(
            tenure_years = intake.tenure_years,
            tenure_months = tenure.tenure_months,
            model_tenure_years = tenure.model_tenure_years,
            "Reconciled tenure"
        );

        let order = self.classifier.feature_order().await?;
        let request = DecisionRequest::assemble(intake, &tenure, &order)?;

        let label = self.classifier.predict(&request).await?;
        let probabilities = self.classifier.predict_probabilities(&request).await?;
        let confidence = winning_probability(&probabilities)?;
        let eligible = label == self.classifier.positive_label();

        let tier = InterestTier::for_credit_score(intake.credit_score);
        let interest_rate_percent = tier.rate_percent();
        let recommended = recommended_amount(eligible, intake.loan_amount, intake.annual_income);
        let emi = monthly_emi(recommended, interest_rate_percent, tenure.tenure_months);

        info!(
            eligible,
            confidence,
            label,
            credit_score = intake.credit_score,
            "Eligibility decided"
        );

        Ok(DecisionResult {
            eligible,
            confidence,
            recommended_amount: recommended,
            emi,
            interest_rate_percent,
            interest_tier: tier,
            tenure_months: tenure.tenure_months,
        })
    }
}

/// Highest class probability, after sanity checks.
fn winning_probability(probabilities: &[f64]) -> Result<f64, DecisionError> {
    if probabilities.is_empty() {
        return Err(DecisionError::InvalidProbabilities("empty".to_string()));
    }
    if let Some(bad) = probabilities
        .iter()
        .find(|p| !p.is_finite() || **p < 0.0 || **p > 1.0)
    {
        return Err(DecisionError::InvalidProbabilities(format!(
            "{} is not a probability",
            bad
        )));
    }
    Ok(probabilities.iter().copied().fold(0.0, f64::max))
}
