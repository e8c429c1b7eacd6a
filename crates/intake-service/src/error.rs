//! Error types for the model service client

use thiserror::Error;

/// Errors that can occur talking to the model computation service
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Network or transport failure (retried)
    #[error("Communication error: {0}")]
    Communication(String),

    /// The service refused the assumptions; carries its error message
    #[error("Model rejected the assumptions: {0}")]
    Rejected(String),

    /// The service answered with something that is not a model document
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Client could not be built
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for ServiceError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ServiceError::InvalidResponse(e.to_string())
        } else if e.is_builder() {
            ServiceError::Config(e.to_string())
        } else {
            ServiceError::Communication(e.to_string())
        }
    }
}

impl From<serde_json::Error> for ServiceError {
    fn from(e: serde_json::Error) -> Self {
        ServiceError::InvalidResponse(format!("JSON parsing error: {}", e))
    }
}
