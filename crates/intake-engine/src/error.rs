//! Error types for the resolution engine.

use intake_extractor::ExtractorError;
use intake_policy::PolicyError;
use thiserror::Error;

/// Engine operation errors
///
/// Every variant is recoverable; an operation that returns one has left the
/// record set untouched.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Field key not in the registry
    #[error("Unknown field: {0}")]
    UnknownField(String),

    /// Confirming a field that has no value
    #[error("Field '{0}' has no value to confirm")]
    EmptyField(String),

    /// Remediating a field that already has a value
    #[error("Field '{0}' already has a value")]
    FieldNotEmpty(String),

    /// A submission is outstanding; resolution is closed until it finishes
    #[error("A submission is in flight")]
    SubmissionInFlight,

    /// Finishing a submission that was never started
    #[error("No submission is pending")]
    NoPendingSubmission,

    /// The record set failed submission validation
    #[error("{0}")]
    Validation(#[from] PolicyError),

    /// The model computation service reported a failure
    #[error("Model service error: {0}")]
    Service(String),

    /// Invalid engine configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<ExtractorError> for EngineError {
    fn from(e: ExtractorError) -> Self {
        EngineError::Config(format!("Extractor: {}", e))
    }
}
