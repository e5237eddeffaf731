//! CheckEligibilityHandler - Stateless decision for a complete application.
//!
//! Bypasses the dialogue: programmatic callers send the whole loan form at
//! once and get the decision plus the rendered messages back.

use tracing::{info, warn};

use crate::domain::decision::{DecisionError, DecisionPipeline, DecisionResult};
use crate::domain::foundation::{DomainError, Locale, ValidationError};
use crate::domain::intake::LoanIntake;
use crate::domain::messages::MessageComposer;

#[derive(Debug, Clone)]
pub struct CheckEligibilityCommand {
    pub intake: LoanIntake,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CheckEligibilityResult {
    pub result: DecisionResult,
    pub message_en: String,
    pub message_hi: String,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CheckEligibilityError {
    #[error("Invalid application: {0}")]
    Invalid(#[from] ValidationError),

    #[error("Classifier unavailable: {0}")]
    ClassifierUnavailable(String),

    #[error(transparent)]
    Domain(DomainError),
}

impl From<DecisionError> for CheckEligibilityError {
    fn from(err: DecisionError) -> Self {
        match err {
            DecisionError::InvalidIntake(e) => CheckEligibilityError::Invalid(e),
            DecisionError::FeatureOrder(_) => CheckEligibilityError::Domain(err.into()),
            other => CheckEligibilityError::ClassifierUnavailable(other.to_string()),
        }
    }
}

pub struct CheckEligibilityHandler {
    pipeline: DecisionPipeline,
    composer: MessageComposer,
}

impl CheckEligibilityHandler {
    pub fn new(pipeline: DecisionPipeline) -> Self {
        Self {
            pipeline,
            composer: MessageComposer::new(),
        }
    }

    pub async fn handle(
        &self,
        cmd: CheckEligibilityCommand,
    ) -> Result<CheckEligibilityResult, CheckEligibilityError> {
        let result = self.pipeline.decide(&cmd.intake).await.map_err(|err| {
            warn!(error = %err, "Stateless eligibility check failed");
            CheckEligibilityError::from(err)
        })?;

        info!(eligible = result.eligible, "Stateless eligibility check");
        Ok(CheckEligibilityResult {
            message_en: self.composer.decision(&result, Locale::En),
            message_hi: self.composer.decision(&result, Locale::Hi),
            result,
        })
    }

    pub async fn is_classifier_available(&self) -> bool {
        self.pipeline.classifier().is_available().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::classifier::MockClassifier;
    use crate::domain::intake::fixtures::{approvable, rejectable};
    use std::sync::Arc;

    fn handler(classifier: MockClassifier) -> CheckEligibilityHandler {
        CheckEligibilityHandler::new(DecisionPipeline::new(Arc::new(classifier)))
    }

    #[tokio::test]
    async fn approvable_applicant_gets_terms_and_both_messages() {
        let out = handler(MockClassifier::new())
            .handle(CheckEligibilityCommand {
                intake: approvable(),
            })
            .await
            .unwrap();

        assert!(out.result.eligible);
        assert_eq!(out.result.interest_rate_percent, 8.5);
        assert!(out.message_en.contains("₹3,000,000"));
        assert_ne!(out.message_en, out.message_hi);
    }

    #[tokio::test]
    async fn rejected_applicant_gets_zero_terms() {
        let out = handler(MockClassifier::new())
            .handle(CheckEligibilityCommand {
                intake: rejectable(),
            })
            .await
            .unwrap();

        assert!(!out.result.eligible);
        assert_eq!(out.result.recommended_amount, 0.0);
        assert_eq!(out.result.emi, 0.0);
    }

    #[tokio::test]
    async fn out_of_range_tenure_is_invalid() {
        let mut intake = approvable();
        intake.tenure_years = 31;

        let err = handler(MockClassifier::new())
            .handle(CheckEligibilityCommand { intake })
            .await
            .unwrap_err();

        assert!(matches!(err, CheckEligibilityError::Invalid(_)));
    }

    #[tokio::test]
    async fn unloaded_classifier_fails_closed() {
        let err = handler(MockClassifier::unavailable())
            .handle(CheckEligibilityCommand {
                intake: approvable(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, CheckEligibilityError::ClassifierUnavailable(_)));
    }
}
