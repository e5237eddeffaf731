//! Classifier configuration

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use super::error::ValidationError;

/// Which classifier adapter to wire.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ClassifierBackend {
    /// Model served over HTTP by a sidecar.
    #[default]
    Http,
    /// Logistic model loaded from a JSON artifact.
    LinearModel,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClassifierConfig {
    #[serde(default)]
    pub backend: ClassifierBackend,

    /// Base URL of the model sidecar
    #[serde(default = "default_url")]
    pub url: String,

    /// Path to the linear model artifact
    #[serde(default = "default_model_path")]
    pub model_path: PathBuf,

    /// Per-attempt timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Retries after the first attempt on transient failures
    #[serde(default = "default_retries")]
    pub max_retries: u32,
}

impl ClassifierConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.timeout_secs == 0 || self.timeout_secs > 120 {
            return Err(ValidationError::InvalidTimeout);
        }
        if self.max_retries > 10 {
            return Err(ValidationError::TooManyRetries);
        }
        match self.backend {
            ClassifierBackend::Http => {
                if !self.url.starts_with("http://") && !self.url.starts_with("https://") {
                    return Err(ValidationError::InvalidUrl {
                        field: "classifier.url",
                        value: self.url.clone(),
                    });
                }
            }
            ClassifierBackend::LinearModel => {
                if self.model_path.as_os_str().is_empty() {
                    return Err(ValidationError::MissingRequired("CLASSIFIER__MODEL_PATH"));
                }
            }
        }
        Ok(())
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            backend: ClassifierBackend::default(),
            url: default_url(),
            model_path: default_model_path(),
            timeout_secs: default_timeout(),
            max_retries: default_retries(),
        }
    }
}

fn default_url() -> String {
    "http://localhost:8500".to_string()
}

fn default_model_path() -> PathBuf {
    PathBuf::from("models/loan_model.json")
}

fn default_timeout() -> u64 {
    10
}

fn default_retries() -> u32 {
    2
}
