//! Field record - the canonical, engine-owned state of one field

use crate::{Confidence, RemediationChoice, ReviewState, SourceTag};

/// Canonical state of one field
///
/// Exactly one record exists per registered field. Records are replaced
/// wholesale on every mutation; a fresh record is empty, zero-confidence,
/// unassigned and unconfirmed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FieldRecord {
    /// Current value (empty when unset)
    pub value: String,

    /// Confidence in the current value
    pub confidence: Confidence,

    /// Where the current value came from
    pub provenance: SourceTag,

    /// Whether the value is trusted
    pub confirmed: bool,

    /// How an empty value is going to be filled
    pub remediation: Option<RemediationChoice>,
}

impl FieldRecord {
    /// An empty, unconfirmed record
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether the record holds no value
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Observable review state
    pub fn review_state(&self) -> ReviewState {
        ReviewState::classify(self)
    }

    /// Check the record invariants
    ///
    /// - confirmed implies a value
    /// - an empty value has zero confidence and either no provenance or
    ///   the `missing-*` tag matching its remediation choice
    pub fn check_invariants(&self) -> Result<(), String> {
        if self.confirmed && self.is_empty() {
            return Err("confirmed record has an empty value".to_string());
        }
        if self.is_empty() {
            if self.confidence != Confidence::ZERO {
                return Err(format!("empty record has confidence {}", self.confidence));
            }
            let expected = self
                .remediation
                .map(|choice| choice.provenance())
                .unwrap_or(SourceTag::Unassigned);
            if self.provenance != expected {
                return Err(format!(
                    "empty record has provenance '{}', expected '{}'",
                    self.provenance, expected
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_record_is_valid() {
        let record = FieldRecord::empty();
        assert!(record.is_empty());
        assert!(!record.confirmed);
        assert_eq!(record.provenance, SourceTag::Unassigned);
        assert!(record.check_invariants().is_ok());
        assert_eq!(record.review_state(), ReviewState::Unset);
    }

    #[test]
    fn test_confirmed_empty_violates() {
        let record = FieldRecord {
            confirmed: true,
            ..FieldRecord::empty()
        };
        assert!(record.check_invariants().is_err());
    }

    #[test]
    fn test_remediated_empty_is_valid() {
        let record = FieldRecord {
            provenance: SourceTag::MissingAssumed,
            remediation: Some(RemediationChoice::Assumed),
            ..FieldRecord::empty()
        };
        assert!(record.check_invariants().is_ok());

        let mismatched = FieldRecord {
            provenance: SourceTag::MissingPublic,
            remediation: Some(RemediationChoice::Assumed),
            ..FieldRecord::empty()
        };
        assert!(mismatched.check_invariants().is_err());
    }

    #[test]
    fn test_empty_with_confidence_violates() {
        let record = FieldRecord {
            confidence: Confidence::new(0.4),
            ..FieldRecord::empty()
        };
        assert!(record.check_invariants().is_err());
    }
}
