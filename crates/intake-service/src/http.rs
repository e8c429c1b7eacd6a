//! HTTP client for the model computation service
//!
//! # Features
//!
//! - `POST {endpoint}/api/model` with the reconciled assumptions as a flat
//!   `{field: value}` object, the submission id in `X-Submission-Id`
//! - Retry logic with exponential backoff for transport and server errors
//! - The service's own `{"error": ...}` message surfaced on rejection
//! - Timeout handling
//!
//! # Examples
//!
//! ```no_run
//! use intake_service::HttpModelService;
//!
//! let service = HttpModelService::new("http://localhost:8000").unwrap();
//! // `service.compute(&assumptions).await` inside an async context
//! ```

use crate::error::ServiceError;
use crate::wire::{parse_outputs, ErrorBody, HealthBody, ModelRequest, SUBMISSION_ID_HEADER};
use intake_domain::traits::ModelService;
use intake_domain::{AssumptionSet, ModelOutputs};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

/// Default model service endpoint
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000";

/// Default timeout for model requests (30 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default number of attempts per request
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Model computation service reached over HTTP
#[derive(Debug, Clone)]
pub struct HttpModelService {
    endpoint: String,
    client: reqwest::Client,
    max_retries: u32,
    backoff_base: Duration,
}

impl HttpModelService {
    /// Create a client for `endpoint` with the default timeout
    pub fn new(endpoint: impl Into<String>) -> Result<Self, ServiceError> {
        Self::with_timeout(endpoint, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a client with an explicit request timeout
    pub fn with_timeout(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, ServiceError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ServiceError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            client,
            max_retries: DEFAULT_MAX_RETRIES,
            backoff_base: Duration::from_secs(1),
        })
    }

    /// Set the maximum number of attempts (at least one is always made)
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries.max(1);
        self
    }

    /// Set the first backoff delay; later delays double
    pub fn with_backoff(mut self, base: Duration) -> Self {
        self.backoff_base = base;
        self
    }

    /// The configured endpoint
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Check `GET {endpoint}/api/health`
    pub async fn health(&self) -> Result<bool, ServiceError> {
        let url = format!("{}/api/health", self.endpoint);
        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Ok(false);
        }
        let body: HealthBody = response.json().await?;
        Ok(body.status == "ok")
    }

    /// Run the model over an assumption set
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The service is unreachable after every retry
    /// - The service rejects the assumptions (4xx); not retried
    /// - The response is not a model document
    pub async fn run_model(&self, assumptions: &AssumptionSet) -> Result<ModelOutputs, ServiceError> {
        let url = format!("{}/api/model", self.endpoint);
        let request_body = ModelRequest::from_assumptions(assumptions);
        let submission_id = assumptions.id.to_string();

        // Retry logic with exponential backoff
        let mut attempts = 0;
        let mut last_error = None;

        while attempts < self.max_retries {
            let request = self
                .client
                .post(&url)
                .header(SUBMISSION_ID_HEADER, submission_id.as_str())
                .json(&request_body);
            match request.send().await {
                Ok(response) => {
                    let status = response.status();
                    let body = response.text().await?;
                    if status.is_success() {
                        debug!("Model service answered submission {}", assumptions.id);
                        return parse_outputs(&body);
                    }
                    let message = serde_json::from_str::<ErrorBody>(&body)
                        .map(|b| b.error)
                        .unwrap_or_else(|_| format!("HTTP {}: {}", status, body));
                    if status.is_client_error() {
                        return Err(ServiceError::Rejected(message));
                    }
                    last_error = Some(ServiceError::Communication(message));
                }
                Err(e) => {
                    last_error = Some(ServiceError::Communication(format!("Request failed: {}", e)));
                }
            }

            attempts += 1;
            if attempts < self.max_retries {
                // Exponential backoff: base, 2x base, 4x base, ...
                let delay = self.backoff_base * 2u32.pow(attempts - 1);
                warn!("Model request attempt {} failed, retrying in {:?}", attempts, delay);
                tokio::time::sleep(delay).await;
            }
        }

        Err(last_error.unwrap_or_else(|| ServiceError::Communication("Max retries exceeded".to_string())))
    }
}

impl ModelService for HttpModelService {
    type Error = ServiceError;

    fn compute(
        &self,
        assumptions: &AssumptionSet,
    ) -> impl Future<Output = Result<ModelOutputs, Self::Error>> + Send {
        self.run_model(assumptions)
    }
}
