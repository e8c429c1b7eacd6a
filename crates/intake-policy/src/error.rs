//! Policy error types

use crate::validator::RejectionReason;
use thiserror::Error;

/// Errors that can occur during merge or submission validation
#[derive(Error, Debug)]
pub enum PolicyError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Required fields have neither a confirmed value nor a default
    #[error("Unresolved fields: {}", .0.join(", "))]
    Unresolved(Vec<String>),

    /// One or more values failed typing or range checks
    #[error("Submission refused: {}", describe(.0))]
    Refused(Vec<RejectionReason>),
}

fn describe(reasons: &[RejectionReason]) -> String {
    reasons
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
