//! Request and response types for extraction

use intake_domain::Candidate;
use serde::{Deserialize, Serialize};

/// Recognizer category; each owns one pattern family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Numerals with optional currency mark and magnitude suffix
    Quantity,
    /// "by <date>" deadline phrases
    Period,
    /// Verb plus noun phrase
    Action,
    /// Project or plan names
    Entity,
}

impl Category {
    /// All categories in default run order
    pub fn all() -> [Category; 4] {
        [Category::Quantity, Category::Period, Category::Action, Category::Entity]
    }

    /// Get the category name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Quantity => "quantity",
            Category::Period => "period",
            Category::Action => "action",
            Category::Entity => "entity",
        }
    }
}

/// One recognizer hit
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    /// Field the candidate is for
    pub field: String,

    /// Category of the recognizer that produced it
    pub category: Category,

    /// The proposed value
    pub candidate: Candidate,
}

/// Result of running every enabled recognizer over one text
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    /// Hits in recognizer order, at most one per field
    pub extractions: Vec<Extraction>,

    /// Metadata about the run
    pub metadata: ExtractionMetadata,
}

impl ExtractionResult {
    /// Candidate for a field, if any recognizer matched it
    pub fn candidate(&self, field: &str) -> Option<&Candidate> {
        self.extractions
            .iter()
            .find(|e| e.field == field)
            .map(|e| &e.candidate)
    }

    /// Whether nothing matched
    pub fn is_empty(&self) -> bool {
        self.extractions.is_empty()
    }
}

/// Metadata about an extraction run
#[derive(Debug, Clone)]
pub struct ExtractionMetadata {
    /// Length of the input text in characters
    pub text_length: usize,

    /// Number of characters actually scanned
    pub scanned_length: usize,

    /// Number of recognizers run
    pub recognizers_run: usize,

    /// Processing time in microseconds
    pub processing_time_us: u64,
}

impl ExtractionMetadata {
    /// Whether the input was cut to the configured maximum
    pub fn truncated(&self) -> bool {
        self.scanned_length < self.text_length
    }
}
