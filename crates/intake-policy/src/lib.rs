//! Intake Policy
//!
//! Decides what happens when a candidate meets a field record, and what
//! leaves the engine when the record set is submitted.
//!
//! The policy provides:
//! - Last-writer-wins merging with threshold-based auto-confirmation
//! - Advisory merges that never confirm (research notes)
//! - Typing of raw text into currency, percent, date and boolean values
//! - Submission validation (confirmation, defaults, ranges, closed sets)
//!
//! # Examples
//!
//! ```
//! use intake_domain::{Candidate, FieldRecord, SourceTag};
//! use intake_policy::{MergeDecision, MergeMode, ResolutionPolicy};
//!
//! let policy = ResolutionPolicy::default();
//! let candidate = Candidate::new("$250k", 0.86, SourceTag::NaturalLanguage);
//! let outcome = policy.merge(&FieldRecord::empty(), &candidate, MergeMode::Standard);
//!
//! assert_eq!(outcome.decision, MergeDecision::Accepted);
//! assert!(outcome.record.confirmed);
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod merge;
mod typing;
mod validator;

pub use config::{PolicyConfig, ValidationConfig};
pub use error::PolicyError;
pub use merge::{MergeDecision, MergeMode, MergeOutcome, ResolutionPolicy};
pub use typing::{coerce, parse_amount, parse_bool, parse_percent};
pub use validator::{RejectionReason, SubmissionValidator, ValidationResult, ValidationStatus};
