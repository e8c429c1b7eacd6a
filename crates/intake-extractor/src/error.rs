//! Error types for the Extractor

use thiserror::Error;

/// Errors that can occur while building the recognizer set
///
/// Running a recognizer never fails; only construction can.
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// A recognizer pattern failed to compile
    #[error("Pattern error: {0}")]
    Pattern(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<regex::Error> for ExtractorError {
    fn from(e: regex::Error) -> Self {
        ExtractorError::Pattern(e.to_string())
    }
}
