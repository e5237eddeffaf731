//! Mock classifier for testing and local development.
//!
//! # Features
//!
//! - Scripted predictions, consumed in order
//! - Error injection for fail-closed testing
//! - Simulated latency for in-flight cancellation testing
//! - Request recording for verification
//!
//! When the script is empty the mock falls back to a credit-score rule
//! (score 650 and above is eligible), so whole dialogues can be driven
//! without scripting every call.
//!
//! # Example
//!
//! ```ignore
//! let classifier = MockClassifier::new().with_prediction(1, vec![0.1, 0.9]);
//! let label = classifier.predict(&request).await?;
//! assert_eq!(label, 1);
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::time::sleep;

use crate::domain::decision::{DecisionRequest, FeatureName};
use crate::ports::{Classifier, ClassifierError, ClassifierInfo};

/// Credit score at or above which the fallback rule approves.
pub const FALLBACK_APPROVAL_SCORE: f64 = 650.0;

/// A scripted answer.
#[derive(Debug, Clone)]
pub enum MockPrediction {
    Success { label: i64, probabilities: Vec<f64> },
    Error(ClassifierError),
}

/// Mock classifier.
#[derive(Debug, Clone)]
pub struct MockClassifier {
    available: bool,
    feature_order: Vec<String>,
    positive_label: i64,
    delay: Duration,
    script: Arc<Mutex<VecDeque<MockPrediction>>>,
    /// Probabilities for the label most recently returned by `predict`.
    pending_probabilities: Arc<Mutex<Option<Vec<f64>>>>,
    requests: Arc<Mutex<Vec<DecisionRequest>>>,
}

impl Default for MockClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl MockClassifier {
    /// Creates an available mock with the canonical feature order.
    pub fn new() -> Self {
        Self {
            available: true,
            feature_order: FeatureName::CANONICAL
                .iter()
                .map(|f| f.column().to_string())
                .collect(),
            positive_label: 1,
            delay: Duration::ZERO,
            script: Arc::new(Mutex::new(VecDeque::new())),
            pending_probabilities: Arc::new(Mutex::new(None)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Creates a mock that reports no model loaded.
    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::new()
        }
    }

    /// Queues a successful prediction.
    pub fn with_prediction(self, label: i64, probabilities: Vec<f64>) -> Self {
        lock(&self.script).push_back(MockPrediction::Success {
            label,
            probabilities,
        });
        self
    }

    /// Queues a failure.
    pub fn with_error(self, error: ClassifierError) -> Self {
        lock(&self.script).push_back(MockPrediction::Error(error));
        self
    }

    /// Overrides the declared feature order.
    pub fn with_feature_order(mut self, order: Vec<String>) -> Self {
        self.feature_order = order;
        self
    }

    /// Sets simulated latency per prediction.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Returns every feature vector passed to `predict`.
    pub fn recorded_requests(&self) -> Vec<DecisionRequest> {
        lock(&self.requests).clone()
    }

    /// Returns the number of `predict` calls.
    pub fn call_count(&self) -> usize {
        lock(&self.requests).len()
    }

    fn fallback(request: &DecisionRequest) -> MockPrediction {
        let score = request.get(FeatureName::CreditScore).unwrap_or(0.0);
        if score >= FALLBACK_APPROVAL_SCORE {
            MockPrediction::Success {
                label: 1,
                probabilities: vec![0.15, 0.85],
            }
        } else {
            MockPrediction::Success {
                label: 0,
                probabilities: vec![0.9, 0.1],
            }
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[async_trait]
impl Classifier for MockClassifier {
    async fn is_available(&self) -> bool {
        self.available
    }

    async fn feature_order(&self) -> Result<Vec<String>, ClassifierError> {
        if !self.available {
            return Err(ClassifierError::not_loaded("mock classifier is unavailable"));
        }
        Ok(self.feature_order.clone())
    }

    async fn predict(&self, request: &DecisionRequest) -> Result<i64, ClassifierError> {
        lock(&self.requests).push(request.clone());

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        let next = lock(&self.script)
            .pop_front()
            .unwrap_or_else(|| Self::fallback(request));

        match next {
            MockPrediction::Success {
                label,
                probabilities,
            } => {
                *lock(&self.pending_probabilities) = Some(probabilities);
                Ok(label)
            }
            MockPrediction::Error(err) => Err(err),
        }
    }

    async fn predict_probabilities(
        &self,
        request: &DecisionRequest,
    ) -> Result<Vec<f64>, ClassifierError> {
        let pending = lock(&self.pending_probabilities).take();
        match pending {
            Some(probabilities) => Ok(probabilities),
            None => match Self::fallback(request) {
                MockPrediction::Success { probabilities, .. } => Ok(probabilities),
                MockPrediction::Error(err) => Err(err),
            },
        }
    }

    fn positive_label(&self) -> i64 {
        self.positive_label
    }

    fn describe(&self) -> ClassifierInfo {
        ClassifierInfo {
            backend: "mock".to_string(),
            location: "in-memory".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::decision::ReconciledTenure;
    use crate::domain::intake::fixtures::{approvable, rejectable};

    fn request_for(intake: &crate::domain::intake::LoanIntake) -> DecisionRequest {
        DecisionRequest::canonical(intake, &ReconciledTenure::from_entered_years(intake.tenure_years))
    }

    #[tokio::test]
    async fn scripted_predictions_are_consumed_in_order() {
        let mock = MockClassifier::new()
            .with_prediction(0, vec![0.6, 0.4])
            .with_prediction(1, vec![0.3, 0.7]);
        let request = request_for(&approvable());

        assert_eq!(mock.predict(&request).await.unwrap(), 0);
        assert_eq!(mock.predict_probabilities(&request).await.unwrap(), vec![0.6, 0.4]);
        assert_eq!(mock.predict(&request).await.unwrap(), 1);
        assert_eq!(mock.predict_probabilities(&request).await.unwrap(), vec![0.3, 0.7]);
        assert_eq!(mock.call_count(), 2);
    }

    #[tokio::test]
    async fn fallback_rule_uses_credit_score() {
        let mock = MockClassifier::new();
        assert_eq!(mock.predict(&request_for(&approvable())).await.unwrap(), 1);
        assert_eq!(mock.predict(&request_for(&rejectable())).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn scripted_error_is_returned() {
        let mock = MockClassifier::new().with_error(ClassifierError::network("reset"));
        let err = mock.predict(&request_for(&approvable())).await.unwrap_err();
        assert_eq!(err, ClassifierError::network("reset"));
    }

    #[tokio::test]
    async fn unavailable_mock_has_no_feature_order() {
        let mock = MockClassifier::unavailable();
        assert!(!mock.is_available().await);
        assert!(mock.feature_order().await.is_err());
    }
}
