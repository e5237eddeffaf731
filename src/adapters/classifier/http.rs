//! HTTP classifier - talks to a model-serving sidecar.
//!
//! The sidecar exposes three endpoints:
//!
//! - `GET  {base}/metadata`      -> `{"feature_names": [...], "positive_label": 1}`
//! - `POST {base}/predict`       -> `{"label": 1}`
//! - `POST {base}/predict_proba` -> `{"probabilities": [0.12, 0.88]}`
//!
//! Both POST bodies are `{"columns": [...], "values": [...]}` with values in
//! the order the metadata declared.
//!
//! # Configuration
//!
//! ```ignore
//! let config = HttpClassifierConfig::new("http://localhost:8500")
//!     .with_timeout(Duration::from_secs(5))
//!     .with_max_retries(2);
//!
//! let classifier = HttpClassifier::new(config)?;
//! ```
//!
//! Transient failures are retried with exponential backoff. When retries
//! run out the error is returned; no verdict is ever invented.

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::sync::OnceCell;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::domain::decision::DecisionRequest;
use crate::ports::{Classifier, ClassifierError, ClassifierInfo};

/// Configuration for the HTTP classifier.
#[derive(Debug, Clone)]
pub struct HttpClassifierConfig {
    /// Base URL of the model service.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Maximum retries on transient failures.
    pub max_retries: u32,
    /// First backoff step; doubles per retry.
    pub retry_backoff: Duration,
}

impl HttpClassifierConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(10),
            max_retries: 2,
            retry_backoff: Duration::from_secs(1),
        }
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the maximum retry count.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Sets the first backoff step.
    pub fn with_retry_backoff(mut self, backoff: Duration) -> Self {
        self.retry_backoff = backoff;
        self
    }
}

#[derive(Debug, Clone, Deserialize)]
struct ModelMetadata {
    feature_names: Vec<String>,
    #[serde(default = "default_positive_label")]
    positive_label: i64,
}

fn default_positive_label() -> i64 {
    1
}

#[derive(Debug, Serialize)]
struct PredictBody<'a> {
    columns: Vec<&'static str>,
    values: &'a [f64],
}

#[derive(Debug, Deserialize)]
struct LabelResponse {
    label: i64,
}

#[derive(Debug, Deserialize)]
struct ProbabilityResponse {
    probabilities: Vec<f64>,
}

/// Classifier backed by a remote model service.
pub struct HttpClassifier {
    config: HttpClassifierConfig,
    client: Client,
    metadata: OnceCell<ModelMetadata>,
}

impl HttpClassifier {
    pub fn new(config: HttpClassifierConfig) -> Result<Self, ClassifierError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ClassifierError::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            config,
            client,
            metadata: OnceCell::new(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url, path)
    }

    fn map_send_error(&self, e: reqwest::Error) -> ClassifierError {
        if e.is_timeout() {
            ClassifierError::Timeout {
                timeout_secs: self.config.timeout.as_secs(),
            }
        } else if e.is_connect() {
            ClassifierError::network(format!("Connection failed: {}", e))
        } else {
            ClassifierError::network(e.to_string())
        }
    }

    async fn handle_response_status(response: Response) -> Result<Response, ClassifierError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        match status.as_u16() {
            409 | 503 if body.contains("not loaded") => Err(ClassifierError::not_loaded(body)),
            code => Err(ClassifierError::Service {
                status: code,
                message: body,
            }),
        }
    }

    /// Runs `attempt` until it succeeds, fails permanently, or retries run out.
    async fn with_retries<T, F, Fut>(&self, operation: &str, attempt: F) -> Result<T, ClassifierError>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = Result<T, ClassifierError>>,
    {
        let mut retry_count = 0;

        loop {
            match attempt().await {
                Ok(value) => return Ok(value),
                Err(err) => {
                    if !err.is_retryable() || retry_count >= self.config.max_retries {
                        warn!(operation, retries = retry_count, error = %err, "Classifier call failed");
                        return Err(err);
                    }
                    let backoff = self.config.retry_backoff * (1 << retry_count);
                    debug!(operation, ?backoff, error = %err, "Retrying classifier call");
                    sleep(backoff).await;
                    retry_count += 1;
                }
            }
        }
    }

    async fn fetch_metadata(&self) -> Result<ModelMetadata, ClassifierError> {
        self.with_retries("metadata", || async move {
            let response = self
                .client
                .get(self.url("metadata"))
                .send()
                .await
                .map_err(|e| self.map_send_error(e))?;
            let response = Self::handle_response_status(response).await?;
            response
                .json::<ModelMetadata>()
                .await
                .map_err(|e| ClassifierError::invalid_response(format!("metadata: {}", e)))
        })
        .await
    }

    async fn metadata(&self) -> Result<&ModelMetadata, ClassifierError> {
        self.metadata.get_or_try_init(|| self.fetch_metadata()).await
    }

    async fn post<R>(&self, path: &str, request: &DecisionRequest) -> Result<R, ClassifierError>
    where
        R: for<'de> Deserialize<'de>,
    {
        let expected = self.metadata().await?.feature_names.len();
        if request.values().len() != expected {
            return Err(ClassifierError::FeatureMismatch {
                expected,
                actual: request.values().len(),
            });
        }

        let body = PredictBody {
            columns: request.columns(),
            values: request.values(),
        };
        let body = &body;

        self.with_retries(path, || async move {
            let response = self
                .client
                .post(self.url(path))
                .json(body)
                .send()
                .await
                .map_err(|e| self.map_send_error(e))?;
            let response = Self::handle_response_status(response).await?;
            response
                .json::<R>()
                .await
                .map_err(|e| ClassifierError::invalid_response(format!("{}: {}", path, e)))
        })
        .await
    }
}

#[async_trait]
impl Classifier for HttpClassifier {
    async fn is_available(&self) -> bool {
        match self.metadata().await {
            Ok(_) => true,
            Err(err) => {
                warn!(error = %err, "Classifier metadata unavailable");
                false
            }
        }
    }

    async fn feature_order(&self) -> Result<Vec<String>, ClassifierError> {
        Ok(self.metadata().await?.feature_names.clone())
    }

    async fn predict(&self, request: &DecisionRequest) -> Result<i64, ClassifierError> {
        let response: LabelResponse = self.post("predict", request).await?;
        Ok(response.label)
    }

    async fn predict_probabilities(
        &self,
        request: &DecisionRequest,
    ) -> Result<Vec<f64>, ClassifierError> {
        let response: ProbabilityResponse = self.post("predict_proba", request).await?;
        Ok(response.probabilities)
    }

    fn positive_label(&self) -> i64 {
        self.metadata
            .get()
            .map(|m| m.positive_label)
            .unwrap_or_else(default_positive_label)
    }

    fn describe(&self) -> ClassifierInfo {
        ClassifierInfo {
            backend: "http".to_string(),
            location: self.config.base_url.clone(),
        }
    }
}
