//! Candidate values proposed by a source

use crate::{Confidence, SourceTag};

/// An unconfirmed proposal for one field's value
///
/// Produced by exactly one adapter/extractor pair and discarded once merged.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    /// Proposed value
    pub value: String,

    /// Score fixed by the producing recognizer or adapter
    pub confidence: Confidence,

    /// Source that produced the proposal
    pub provenance: SourceTag,
}

impl Candidate {
    /// Create a new candidate
    pub fn new(value: impl Into<String>, confidence: impl Into<Confidence>, provenance: SourceTag) -> Self {
        Self {
            value: value.into(),
            confidence: confidence.into(),
            provenance,
        }
    }

    /// An explicit clear: empty value, zero confidence, no provenance
    pub fn cleared() -> Self {
        Self {
            value: String::new(),
            confidence: Confidence::ZERO,
            provenance: SourceTag::Unassigned,
        }
    }

    /// Whether this candidate clears the field
    pub fn is_clear(&self) -> bool {
        self.value.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_candidate() {
        let candidate = Candidate::new("$250k", 0.86, SourceTag::NaturalLanguage);
        assert_eq!(candidate.value, "$250k");
        assert_eq!(candidate.confidence.value(), 0.86);
        assert!(!candidate.is_clear());
    }

    #[test]
    fn test_cleared_candidate() {
        let candidate = Candidate::cleared();
        assert!(candidate.is_clear());
        assert_eq!(candidate.confidence, Confidence::ZERO);
        assert_eq!(candidate.provenance, SourceTag::Unassigned);
    }
}
