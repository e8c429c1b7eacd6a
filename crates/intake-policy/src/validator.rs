//! Submission validation: turning records into a typed assumption set

use crate::config::ValidationConfig;
use crate::error::PolicyError;
use crate::typing::coerce;
use intake_domain::{
    AssumptionSet, FieldDefinition, FieldRecord, FieldRegistry, ResolvedAssumption,
    SchemaProvenance, SourceTag, SubmissionId, TypedValue, ValueType,
};
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

/// Result of submission validation
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether the record set may be submitted
    pub status: ValidationStatus,

    /// Rejection reasons (if any)
    pub reasons: Vec<RejectionReason>,

    /// Typed values in registry order
    pub values: Vec<ResolvedAssumption>,
}

impl ValidationResult {
    /// Whether validation passed
    pub fn is_accepted(&self) -> bool {
        self.status == ValidationStatus::Accepted
    }

    /// Keys rejected because nothing resolved them
    pub fn unresolved_keys(&self) -> Vec<String> {
        self.reasons
            .iter()
            .filter_map(|r| match r {
                RejectionReason::Unresolved { key } => Some(key.clone()),
                _ => None,
            })
            .collect()
    }
}

/// Validation status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationStatus {
    /// Ready to submit
    Accepted,

    /// Submission refused
    Rejected,
}

/// Reasons for rejection
#[derive(Debug, Clone, PartialEq)]
pub enum RejectionReason {
    /// Required field with no usable value and no default
    Unresolved {
        /// Field key
        key: String,
    },

    /// Value does not parse as the field's type
    InvalidType {
        /// Field key
        key: String,
        /// Raw value
        value: String,
        /// Expected type
        expected: ValueType,
    },

    /// Numeric value outside the field's bounds
    OutOfRange {
        /// Field key
        key: String,
        /// Typed value
        value: f64,
        /// Inclusive lower bound
        min: Option<f64>,
        /// Inclusive upper bound
        max: Option<f64>,
    },

    /// Value not in the field's closed set
    NotAllowed {
        /// Field key
        key: String,
        /// Raw value
        value: String,
        /// Accepted values
        allowed: Vec<String>,
    },
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectionReason::Unresolved { key } => {
                write!(f, "{}: no confirmed value and no default", key)
            }
            RejectionReason::InvalidType { key, value, expected } => {
                write!(f, "{}: '{}' is not a valid {}", key, value, expected.as_str())
            }
            RejectionReason::OutOfRange { key, value, min, max } => {
                let bound = |b: &Option<f64>| b.map(|v| v.to_string()).unwrap_or_else(|| "..".to_string());
                write!(f, "{}: {} is outside [{}, {}]", key, value, bound(min), bound(max))
            }
            RejectionReason::NotAllowed { key, value, allowed } => {
                write!(f, "{}: '{}' is not one of {}", key, value, allowed.join(", "))
            }
        }
    }
}

/// Validates and types the record set before it leaves the engine
#[derive(Debug, Clone, Default)]
pub struct SubmissionValidator {
    config: ValidationConfig,
}

impl SubmissionValidator {
    /// Create a new validator with the given configuration
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Get the active configuration
    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Validate every registered field
    ///
    /// A field contributes its value when it is non-empty and (unless the
    /// configuration says otherwise) confirmed. Otherwise the schema default
    /// stands in. A required field with neither is unresolved; an optional one
    /// is left out.
    pub fn validate(
        &self,
        registry: &FieldRegistry,
        records: &BTreeMap<String, FieldRecord>,
    ) -> ValidationResult {
        let mut reasons = Vec::new();
        let mut values = Vec::new();

        for definition in registry.iter() {
            let record = records.get(&definition.key);
            let usable = record.filter(|r| !r.is_empty() && (r.confirmed || !self.config.require_confirmation));

            let (raw, provenance, defaulted) = match (usable, &definition.default_value) {
                (Some(record), _) => (record.value.as_str(), record.provenance, false),
                (None, Some(default)) if self.config.use_schema_defaults => {
                    let provenance = record
                        .map(|r| r.provenance)
                        .filter(SourceTag::is_missing)
                        .unwrap_or_else(|| default_provenance(definition.provenance));
                    (default.as_str(), provenance, true)
                }
                _ => {
                    if definition.required {
                        reasons.push(RejectionReason::Unresolved {
                            key: definition.key.clone(),
                        });
                    } else {
                        debug!("Optional field '{}' left out of submission", definition.key);
                    }
                    continue;
                }
            };

            match self.check(definition, raw) {
                Ok(value) => values.push(ResolvedAssumption {
                    key: definition.key.clone(),
                    value,
                    provenance,
                    defaulted,
                }),
                Err(reason) => reasons.push(reason),
            }
        }

        let status = if reasons.is_empty() {
            ValidationStatus::Accepted
        } else {
            ValidationStatus::Rejected
        };

        ValidationResult { status, reasons, values }
    }

    /// Validate and build the assumption set for a submission
    pub fn assemble(
        &self,
        id: SubmissionId,
        registry: &FieldRegistry,
        records: &BTreeMap<String, FieldRecord>,
    ) -> Result<AssumptionSet, PolicyError> {
        let result = self.validate(registry, records);
        if result.is_accepted() {
            return Ok(AssumptionSet {
                id,
                values: result.values,
            });
        }

        let unresolved = result.unresolved_keys();
        if unresolved.len() == result.reasons.len() {
            Err(PolicyError::Unresolved(unresolved))
        } else {
            Err(PolicyError::Refused(result.reasons))
        }
    }

    /// Type one raw value and apply the field's rule
    fn check(&self, definition: &FieldDefinition, raw: &str) -> Result<TypedValue, RejectionReason> {
        let rule = &definition.rule;
        let value = coerce(raw, rule.value_type).ok_or_else(|| RejectionReason::InvalidType {
            key: definition.key.clone(),
            value: raw.to_string(),
            expected: rule.value_type,
        })?;

        if self.config.validate_ranges {
            if let Some(number) = value.as_f64() {
                let below = rule.min.is_some_and(|min| number < min);
                let above = rule.max.is_some_and(|max| number > max);
                if below || above {
                    return Err(RejectionReason::OutOfRange {
                        key: definition.key.clone(),
                        value: number,
                        min: rule.min,
                        max: rule.max,
                    });
                }
            }
        }

        if self.config.validate_allowed_values && !rule.allowed_values.is_empty() {
            let normalized = raw.trim().to_lowercase();
            if !rule.allowed_values.iter().any(|a| a.to_lowercase() == normalized) {
                return Err(RejectionReason::NotAllowed {
                    key: definition.key.clone(),
                    value: raw.to_string(),
                    allowed: rule.allowed_values.clone(),
                });
            }
        }

        Ok(value)
    }
}

/// Provenance recorded for a schema default
fn default_provenance(provenance: SchemaProvenance) -> SourceTag {
    match provenance {
        SchemaProvenance::UserInput => SourceTag::MissingManual,
        SchemaProvenance::PublicData => SourceTag::MissingPublic,
        SchemaProvenance::AssumedBaseline => SourceTag::MissingAssumed,
    }
}
