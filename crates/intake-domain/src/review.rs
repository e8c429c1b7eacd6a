//! Review state - the confirmation lifecycle of a field

use crate::FieldRecord;

/// Observable review state of a field
///
/// Derived from the record, never stored:
/// - Unset: no value
/// - ProposedLowConfidence: a value below the auto-confirm threshold, unconfirmed
/// - ProposedHighConfidence: a value at or above the threshold that a reviewer un-confirmed
/// - Confirmed: trusted, either automatically or by a reviewer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReviewState {
    /// Field has no value
    Unset,

    /// Value present but not trusted
    ProposedLowConfidence,

    /// Value scored high enough but not currently confirmed
    ProposedHighConfidence,

    /// Value trusted
    Confirmed,
}

impl ReviewState {
    /// Classify a record
    pub fn classify(record: &FieldRecord) -> Self {
        if record.is_empty() {
            ReviewState::Unset
        } else if record.confirmed {
            ReviewState::Confirmed
        } else if record.confidence.auto_confirms() {
            ReviewState::ProposedHighConfidence
        } else {
            ReviewState::ProposedLowConfidence
        }
    }

    /// Get the state name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewState::Unset => "unset",
            ReviewState::ProposedLowConfidence => "proposed-low",
            ReviewState::ProposedHighConfidence => "proposed-high",
            ReviewState::Confirmed => "confirmed",
        }
    }

    /// Whether a reviewer still has to act on this field
    pub fn needs_review(&self) -> bool {
        !matches!(self, ReviewState::Confirmed)
    }
}

impl std::fmt::Display for ReviewState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Confidence, SourceTag};

    fn record(value: &str, confidence: f64, confirmed: bool) -> FieldRecord {
        FieldRecord {
            value: value.to_string(),
            confidence: Confidence::new(confidence),
            provenance: SourceTag::NaturalLanguage,
            confirmed,
            remediation: None,
        }
    }

    #[test]
    fn test_state_classification() {
        assert_eq!(FieldRecord::empty().review_state(), ReviewState::Unset);
        assert_eq!(record("x", 0.67, false).review_state(), ReviewState::ProposedLowConfidence);
        assert_eq!(record("x", 0.86, false).review_state(), ReviewState::ProposedHighConfidence);
        assert_eq!(record("x", 0.86, true).review_state(), ReviewState::Confirmed);
        assert_eq!(record("x", 0.2, true).review_state(), ReviewState::Confirmed);
    }

    #[test]
    fn test_needs_review() {
        assert!(ReviewState::Unset.needs_review());
        assert!(ReviewState::ProposedHighConfidence.needs_review());
        assert!(!ReviewState::Confirmed.needs_review());
    }
}
