//! Display rows for the record set

use intake_domain::{Confidence, ConfidenceTier, FieldDefinition, FieldRecord, RemediationChoice, ReviewState, SourceTag};

/// One field as shown to a reviewer
#[derive(Debug, Clone, PartialEq)]
pub struct FieldRow {
    /// Field key
    pub key: String,
    /// Display label
    pub label: String,
    /// Whether the schema requires the field
    pub required: bool,
    /// Current value (empty when unset)
    pub value: String,
    /// Confidence score
    pub confidence: Confidence,
    /// Display tier of the score
    pub tier: ConfidenceTier,
    /// Source of the value
    pub provenance: SourceTag,
    /// Derived review state
    pub state: ReviewState,
    /// Remediation choice for an empty field
    pub remediation: Option<RemediationChoice>,
}

impl FieldRow {
    /// Build a row from a definition and its record
    pub fn new(definition: &FieldDefinition, record: &FieldRecord) -> Self {
        Self {
            key: definition.key.clone(),
            label: definition.label.clone(),
            required: definition.required,
            value: record.value.clone(),
            confidence: record.confidence,
            tier: record.confidence.tier(),
            provenance: record.provenance,
            state: record.review_state(),
            remediation: record.remediation,
        }
    }

    /// Whether a reviewer should look at this field
    ///
    /// Missing values, scores under `threshold` and unconfirmed values all
    /// qualify.
    pub fn needs_review(&self, threshold: f64) -> bool {
        self.value.is_empty() || !self.confidence.meets(threshold) || self.state.needs_review()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_from_record() {
        let definition = FieldDefinition::new("budget", "Budget").required();
        let record = FieldRecord {
            value: "$250k".to_string(),
            confidence: Confidence::new(0.86),
            provenance: SourceTag::NaturalLanguage,
            confirmed: true,
            remediation: None,
        };
        let row = FieldRow::new(&definition, &record);

        assert_eq!(row.label, "Budget");
        assert!(row.required);
        assert_eq!(row.tier, ConfidenceTier::High);
        assert_eq!(row.state, ReviewState::Confirmed);
        assert!(!row.needs_review(0.5));
    }

    #[test]
    fn test_confirmed_low_score_still_queued() {
        let definition = FieldDefinition::new("goal", "Goal");
        let record = FieldRecord {
            value: "grow".to_string(),
            confidence: Confidence::new(0.3),
            provenance: SourceTag::Manual,
            confirmed: true,
            remediation: None,
        };
        assert!(FieldRow::new(&definition, &record).needs_review(0.5));
    }
}
