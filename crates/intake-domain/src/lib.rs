//! Intake Domain Layer
//!
//! This crate contains the core vocabulary of the assumption resolution engine.
//! It has no dependencies beyond `uuid` and defines the value objects and trait
//! interfaces that the extractor, policy, engine and service crates share.
//!
//! ## Key Concepts
//!
//! - **Field Registry**: the fixed set of assumption slots a session resolves
//! - **Candidate**: an unconfirmed proposal for a field value from one source
//! - **Field Record**: the canonical, engine-owned state of one field
//! - **Source Tag**: where a value came from (audit trail and display tiering)
//! - **Review State**: the confirmation lifecycle derived from a record
//!
//! ## Architecture
//!
//! - Pure data and classification logic only
//! - No I/O, no async runtime, no serialization framework
//! - Trait definitions for extractors and the model computation service

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod candidate;
pub mod confidence;
pub mod field;
pub mod provenance;
pub mod record;
pub mod review;
pub mod submission;
pub mod traits;

// Re-exports for convenience
pub use candidate::Candidate;
pub use confidence::{Confidence, ConfidenceTier, AUTO_CONFIRM_THRESHOLD};
pub use field::{FieldDefinition, FieldRegistry, SchemaProvenance, ValidationRule, ValueType};
pub use provenance::{RemediationChoice, SourceTag};
pub use record::FieldRecord;
pub use review::ReviewState;
pub use submission::{AssumptionSet, ModelOutputs, ResolvedAssumption, SubmissionId, TypedValue};
