//! Trait definitions for pluggable components
//!
//! These traits define the seams between resolution logic and the parts
//! that recognize text or talk to the outside world.

use crate::{AssumptionSet, Candidate, ModelOutputs};
use std::future::Future;

/// A recognizer that proposes a value for one field from free text
///
/// Implemented by the extractor layer (intake-extractor). Implementations
/// are pure: the same text always yields the same answer, and a missing
/// match is `None`, never an error.
pub trait FieldExtractor {
    /// Short recognizer name used in logs
    fn name(&self) -> &'static str;

    /// Key of the field this recognizer populates
    fn field(&self) -> &str;

    /// Propose at most one candidate (the first match)
    fn extract(&self, text: &str) -> Option<Candidate>;
}

/// The external model computation backend
///
/// Implemented by the service layer (intake-service)
pub trait ModelService {
    /// Error type for service calls
    type Error: std::fmt::Display;

    /// Compute model outputs from a reconciled assumption set
    fn compute(
        &self,
        assumptions: &AssumptionSet,
    ) -> impl Future<Output = Result<ModelOutputs, Self::Error>> + Send;
}
