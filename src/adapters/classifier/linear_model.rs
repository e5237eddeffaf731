//! Linear model classifier - logistic regression loaded from a JSON artifact.
//!
//! Artifact layout:
//!
//! ```json
//! {
//!   "feature_names": ["no_of_dependents", "education", ...],
//!   "coefficients": [0.01, 0.4, ...],
//!   "intercept": -3.2,
//!   "means": [2.5, 0.5, ...],
//!   "scales": [1.7, 0.5, ...],
//!   "positive_label": 1
//! }
//! ```
//!
//! `means` and `scales` are optional standardization parameters. A missing
//! or malformed artifact leaves the classifier unavailable; it never guesses.

use async_trait::async_trait;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::domain::decision::DecisionRequest;
use crate::ports::{Classifier, ClassifierError, ClassifierInfo};

/// Parsed model artifact.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LinearModel {
    pub feature_names: Vec<String>,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
    #[serde(default)]
    pub means: Option<Vec<f64>>,
    #[serde(default)]
    pub scales: Option<Vec<f64>>,
    #[serde(default = "default_positive_label")]
    pub positive_label: i64,
}

fn default_positive_label() -> i64 {
    1
}

impl LinearModel {
    /// Parses and checks an artifact.
    pub fn from_json(raw: &str) -> Result<Self, ClassifierError> {
        let model: LinearModel = serde_json::from_str(raw)
            .map_err(|e| ClassifierError::not_loaded(format!("unreadable artifact: {}", e)))?;
        model.check()?;
        Ok(model)
    }

    fn check(&self) -> Result<(), ClassifierError> {
        let n = self.feature_names.len();
        if n == 0 {
            return Err(ClassifierError::not_loaded("artifact declares no features"));
        }
        let lengths = [
            Some(self.coefficients.len()),
            self.means.as_ref().map(Vec::len),
            self.scales.as_ref().map(Vec::len),
        ];
        if lengths.iter().flatten().any(|len| *len != n) {
            return Err(ClassifierError::not_loaded(
                "artifact vectors disagree with feature_names length",
            ));
        }
        if let Some(scales) = &self.scales {
            if scales.iter().any(|s| !s.is_finite() || *s == 0.0) {
                return Err(ClassifierError::not_loaded("artifact has a zero scale"));
            }
        }
        Ok(())
    }

    /// Probability of the positive class.
    pub fn positive_probability(&self, values: &[f64]) -> Result<f64, ClassifierError> {
        if values.len() != self.coefficients.len() {
            return Err(ClassifierError::FeatureMismatch {
                expected: self.coefficients.len(),
                actual: values.len(),
            });
        }

        let z = values
            .iter()
            .enumerate()
            .map(|(i, x)| {
                let mean = self.means.as_ref().map_or(0.0, |m| m[i]);
                let scale = self.scales.as_ref().map_or(1.0, |s| s[i]);
                self.coefficients[i] * (x - mean) / scale
            })
            .sum::<f64>()
            + self.intercept;

        Ok(1.0 / (1.0 + (-z).exp()))
    }
}

/// Classifier evaluating a [`LinearModel`] in-process.
#[derive(Debug, Clone)]
pub struct LinearModelClassifier {
    model: Option<LinearModel>,
    location: String,
}

impl LinearModelClassifier {
    /// Loads the artifact at `path`. Failure is logged and leaves the
    /// classifier unavailable.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path: PathBuf = path.as_ref().to_path_buf();
        let location = path.display().to_string();

        let model = std::fs::read_to_string(&path)
            .map_err(|e| ClassifierError::not_loaded(format!("{}: {}", location, e)))
            .and_then(|raw| LinearModel::from_json(&raw));

        match model {
            Ok(model) => {
                info!(
                    path = %location,
                    features = model.feature_names.len(),
                    "Loaded eligibility model"
                );
                Self {
                    model: Some(model),
                    location,
                }
            }
            Err(err) => {
                warn!(path = %location, error = %err, "Eligibility model not loaded");
                Self {
                    model: None,
                    location,
                }
            }
        }
    }

    pub fn from_model(model: LinearModel) -> Self {
        Self {
            model: Some(model),
            location: "in-memory".to_string(),
        }
    }

    fn model(&self) -> Result<&LinearModel, ClassifierError> {
        self.model
            .as_ref()
            .ok_or_else(|| ClassifierError::not_loaded(self.location.clone()))
    }
}

#[async_trait]
impl Classifier for LinearModelClassifier {
    async fn is_available(&self) -> bool {
        self.model.is_some()
    }

    async fn feature_order(&self) -> Result<Vec<String>, ClassifierError> {
        Ok(self.model()?.feature_names.clone())
    }

    async fn predict(&self, request: &DecisionRequest) -> Result<i64, ClassifierError> {
        let model = self.model()?;
        let p = model.positive_probability(request.values())?;
        Ok(if p >= 0.5 {
            model.positive_label
        } else {
            1 - model.positive_label
        })
    }

    async fn predict_probabilities(
        &self,
        request: &DecisionRequest,
    ) -> Result<Vec<f64>, ClassifierError> {
        let model = self.model()?;
        let p = model.positive_probability(request.values())?;
        // Index by class label: [P(0), P(1)].
        Ok(if model.positive_label == 1 {
            vec![1.0 - p, p]
        } else {
            vec![p, 1.0 - p]
        })
    }

    fn positive_label(&self) -> i64 {
        self.model
            .as_ref()
            .map_or_else(default_positive_label, |m| m.positive_label)
    }

    fn describe(&self) -> ClassifierInfo {
        ClassifierInfo {
            backend: "linear_model".to_string(),
            location: self.location.clone(),
        }
    }
}
