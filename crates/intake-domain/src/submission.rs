//! Submission types - what crosses the boundary to the model computation service

use crate::SourceTag;
use std::collections::BTreeMap;
use std::fmt;

/// Identifier of one submission attempt, based on UUIDv7
///
/// Re-submitting while a submission is outstanding reuses the same id,
/// which lets the service deduplicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubmissionId(u128);

impl SubmissionId {
    /// Generate a new UUIDv7-based id
    ///
    /// # Examples
    ///
    /// ```
    /// use intake_domain::SubmissionId;
    ///
    /// let id = SubmissionId::new();
    /// assert!(id.value() > 0);
    /// ```
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7().as_u128())
    }

    /// Create from a raw u128 value
    pub fn from_value(value: u128) -> Self {
        Self(value)
    }

    /// Parse from a UUID string
    pub fn from_string(s: &str) -> Result<Self, String> {
        uuid::Uuid::parse_str(s)
            .map(|u| Self(u.as_u128()))
            .map_err(|e| format!("Invalid submission id: {}", e))
    }

    /// Get the raw u128 value
    pub fn value(&self) -> u128 {
        self.0
    }
}

impl Default for SubmissionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", uuid::Uuid::from_u128(self.0))
    }
}

/// A field value after typing against its validation rule
#[derive(Debug, Clone, PartialEq)]
pub enum TypedValue {
    /// Plain number
    Number(f64),
    /// Free text
    Text(String),
    /// ISO date (YYYY-MM-DD)
    Date(String),
    /// Fraction (0.05 for 5%)
    Percent(f64),
    /// Money amount in base units
    Currency(f64),
    /// Boolean flag
    Boolean(bool),
}

impl TypedValue {
    /// Numeric view, if the value is numeric
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            TypedValue::Number(v) | TypedValue::Percent(v) | TypedValue::Currency(v) => Some(*v),
            _ => None,
        }
    }
}

impl fmt::Display for TypedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypedValue::Number(v) | TypedValue::Currency(v) | TypedValue::Percent(v) => write!(f, "{}", v),
            TypedValue::Text(s) | TypedValue::Date(s) => f.write_str(s),
            TypedValue::Boolean(b) => write!(f, "{}", b),
        }
    }
}

/// One reconciled value ready for the model service
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedAssumption {
    /// Field key
    pub key: String,

    /// Typed value
    pub value: TypedValue,

    /// Source of the value at submission time
    pub provenance: SourceTag,

    /// Whether the schema default was used instead of a resolved value
    pub defaulted: bool,
}

/// The complete set handed to the model computation service
///
/// Holds at most one value per registered field key and always one for
/// every required field.
#[derive(Debug, Clone, PartialEq)]
pub struct AssumptionSet {
    /// Submission identifier
    pub id: SubmissionId,

    /// Values in registry order
    pub values: Vec<ResolvedAssumption>,
}

impl AssumptionSet {
    /// Look up a value by key
    pub fn get(&self, key: &str) -> Option<&TypedValue> {
        self.values.iter().find(|v| v.key == key).map(|v| &v.value)
    }

    /// Number of values
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Outputs returned by the model computation service
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ModelOutputs {
    /// Headline metrics (irr, moic, dscr, npv, ...)
    pub metrics: BTreeMap<String, f64>,

    /// Full response document as returned by the service
    pub document: String,
}

impl ModelOutputs {
    /// Look up a metric
    pub fn metric(&self, name: &str) -> Option<f64> {
        self.metrics.get(name).copied()
    }
}
