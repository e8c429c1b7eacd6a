//! Intake Extractor
//!
//! Pattern-based recognizers that turn free text into field candidates.
//!
//! # Overview
//!
//! Each recognizer owns one pattern family and a fixed confidence score:
//!
//! | Category | Default field  | Confidence |
//! |----------|----------------|------------|
//! | quantity | `budget`       | 0.86 with a magnitude suffix, else 0.72 |
//! | period   | `timeline`     | 0.78 |
//! | action   | `goal`         | 0.67 |
//! | entity   | `project_name` | 0.64 |
//!
//! Recognizers are independent and pure. Each yields at most one candidate
//! (the first match), and no match is simply no candidate.
//!
//! # Architecture
//!
//! ```text
//! Text → Extractor → [quantity, period, action, entity] → Candidates → Engine
//! ```
//!
//! # Example Usage
//!
//! ```
//! use intake_extractor::{Extractor, ExtractorConfig};
//!
//! let extractor = Extractor::new(ExtractorConfig::default()).unwrap();
//! let result = extractor.extract("Build a new mobile app by Q3 2025 with a budget of $250k");
//!
//! assert_eq!(result.candidate("goal").unwrap().value, "build a new mobile app");
//! assert_eq!(result.candidate("timeline").unwrap().value, "Q3 2025");
//! assert_eq!(result.candidate("budget").unwrap().value, "$250k");
//! ```

#![warn(missing_docs)]

mod error;
mod config;
mod types;
mod patterns;
mod extractor;


pub use error::ExtractorError;
pub use config::{ExtractorConfig, FieldTargets};
pub use types::{Category, Extraction, ExtractionMetadata, ExtractionResult};
pub use patterns::{
    ActionRecognizer, EntityRecognizer, PeriodRecognizer, QuantityRecognizer,
    ACTION_CONFIDENCE, BARE_QUANTITY_CONFIDENCE, ENTITY_CONFIDENCE, PERIOD_CONFIDENCE,
    SCALED_QUANTITY_CONFIDENCE,
};
pub use extractor::Extractor;
