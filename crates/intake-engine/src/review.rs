//! Review transitions triggered by a reviewer
//!
//! Each function maps the current record to its replacement or refuses.
//! None of them fire on their own; the engine calls them on explicit
//! caller actions only.

use crate::error::EngineError;
use intake_domain::{Confidence, FieldRecord, RemediationChoice, SourceTag};

/// Manual edit of a field's value
///
/// A non-empty value is confirmed at `confidence`. The provenance becomes
/// `manual` only when no source was recorded; a prior source tag is kept.
/// An empty value unconfirms the field and falls back to its remediation tag.
pub fn edit(current: &FieldRecord, value: &str, confidence: f64) -> FieldRecord {
    let value = value.trim();
    if value.is_empty() {
        return FieldRecord {
            provenance: current
                .remediation
                .map(|choice| choice.provenance())
                .unwrap_or(SourceTag::Unassigned),
            remediation: current.remediation,
            ..FieldRecord::empty()
        };
    }

    let provenance = if current.provenance.is_assigned() && !current.provenance.is_missing() {
        current.provenance
    } else {
        SourceTag::Manual
    };

    FieldRecord {
        value: value.to_string(),
        confidence: Confidence::new(confidence),
        provenance,
        confirmed: true,
        remediation: None,
    }
}

/// Set or clear the confirmation flag, nothing else
pub fn set_confirmed(key: &str, current: &FieldRecord, confirmed: bool) -> Result<FieldRecord, EngineError> {
    if confirmed && current.is_empty() {
        return Err(EngineError::EmptyField(key.to_string()));
    }
    Ok(FieldRecord {
        confirmed,
        ..current.clone()
    })
}

/// Record how an empty field will be filled
pub fn remediate(key: &str, current: &FieldRecord, choice: RemediationChoice) -> Result<FieldRecord, EngineError> {
    if !current.is_empty() {
        return Err(EngineError::FieldNotEmpty(key.to_string()));
    }
    Ok(FieldRecord {
        provenance: choice.provenance(),
        remediation: Some(choice),
        ..FieldRecord::empty()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use intake_domain::ReviewState;

    fn proposed(value: &str, provenance: SourceTag) -> FieldRecord {
        FieldRecord {
            value: value.to_string(),
            confidence: Confidence::new(0.67),
            provenance,
            confirmed: false,
            remediation: None,
        }
    }

    #[test]
    fn test_edit_empty_field_is_manual() {
        let record = edit(&FieldRecord::empty(), "Apollo", 0.9);
        assert_eq!(record.provenance, SourceTag::Manual);
        assert_eq!(record.confidence, Confidence::new(0.9));
        assert!(record.confirmed);
        assert_eq!(record.review_state(), ReviewState::Confirmed);
    }

    #[test]
    fn test_edit_keeps_recorded_source() {
        let current = proposed("build an app", SourceTag::NaturalLanguage);
        let record = edit(&current, "build a mobile app", 0.9);
        assert_eq!(record.provenance, SourceTag::NaturalLanguage);
        assert_eq!(record.value, "build a mobile app");
        assert!(record.confirmed);
    }

    #[test]
    fn test_edit_fills_remediated_gap() {
        let current = remediate("budget", &FieldRecord::empty(), RemediationChoice::Manual).unwrap();
        let record = edit(&current, "$90k", 0.9);
        assert_eq!(record.provenance, SourceTag::Manual);
        assert_eq!(record.remediation, None);
    }

    #[test]
    fn test_edit_to_empty_unconfirms() {
        let current = proposed("build an app", SourceTag::Structured);
        let record = edit(&current, "  ", 0.9);
        assert_eq!(record, FieldRecord::empty());
        assert!(record.check_invariants().is_ok());
    }

    #[test]
    fn test_confirm_only_touches_flag() {
        let current = proposed("build an app", SourceTag::NaturalLanguage);
        let record = set_confirmed("goal", &current, true).unwrap();
        assert!(record.confirmed);
        assert_eq!(record.confidence, current.confidence);
        assert_eq!(record.provenance, current.provenance);

        let record = set_confirmed("goal", &record, false).unwrap();
        assert_eq!(record, current);
    }

    #[test]
    fn test_confirm_empty_refused() {
        let result = set_confirmed("budget", &FieldRecord::empty(), true);
        assert!(matches!(result, Err(EngineError::EmptyField(key)) if key == "budget"));
        assert!(set_confirmed("budget", &FieldRecord::empty(), false).is_ok());
    }

    #[test]
    fn test_remediate_empty_field() {
        let record = remediate("budget", &FieldRecord::empty(), RemediationChoice::Assumed).unwrap();
        assert_eq!(record.provenance, SourceTag::MissingAssumed);
        assert_eq!(record.remediation, Some(RemediationChoice::Assumed));
        assert!(record.value.is_empty());
        assert!(!record.confirmed);
        assert!(record.check_invariants().is_ok());
    }

    #[test]
    fn test_remediate_filled_field_refused() {
        let current = proposed("$250k", SourceTag::NaturalLanguage);
        let result = remediate("budget", &current, RemediationChoice::Public);
        assert!(matches!(result, Err(EngineError::FieldNotEmpty(_))));
    }
}
