//! Field registry - the assumption slots a session resolves

/// Key of the project name field
pub const PROJECT_NAME: &str = "project_name";
/// Key of the goal field
pub const GOAL: &str = "goal";
/// Key of the timeline field
pub const TIMELINE: &str = "timeline";
/// Key of the budget field
pub const BUDGET: &str = "budget";

/// Value type a field is typed to at the submission boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ValueType {
    /// Plain number
    Number,
    /// Free text
    #[default]
    String,
    /// ISO calendar date (YYYY-MM-DD)
    Date,
    /// Fraction, accepts "5%" notation
    Percent,
    /// Money amount, accepts "$" and magnitude suffixes
    Currency,
    /// true/false
    Boolean,
}

impl ValueType {
    /// Get the type name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueType::Number => "number",
            ValueType::String => "string",
            ValueType::Date => "date",
            ValueType::Percent => "percent",
            ValueType::Currency => "currency",
            ValueType::Boolean => "boolean",
        }
    }

    /// Parse a type name
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "number" => Some(ValueType::Number),
            "string" | "text" => Some(ValueType::String),
            "date" => Some(ValueType::Date),
            "percent" => Some(ValueType::Percent),
            "currency" => Some(ValueType::Currency),
            "boolean" | "bool" => Some(ValueType::Boolean),
            _ => None,
        }
    }
}

/// Canonical provenance declared by a schema for a field's default value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SchemaProvenance {
    /// Expected to come from the user
    #[default]
    UserInput,
    /// Sourced from public data
    PublicData,
    /// A baseline assumption
    AssumedBaseline,
}

impl SchemaProvenance {
    /// Get the provenance name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaProvenance::UserInput => "user-input",
            SchemaProvenance::PublicData => "public-data",
            SchemaProvenance::AssumedBaseline => "assumed-baseline",
        }
    }

    /// Parse a provenance name (dash or underscore separated)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "user-input" => Some(SchemaProvenance::UserInput),
            "public-data" => Some(SchemaProvenance::PublicData),
            "assumed-baseline" => Some(SchemaProvenance::AssumedBaseline),
            _ => None,
        }
    }
}

/// Type and range rule applied when a value leaves the engine
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ValidationRule {
    /// Target value type
    pub value_type: ValueType,

    /// Inclusive lower bound for numeric types
    pub min: Option<f64>,

    /// Inclusive upper bound for numeric types
    pub max: Option<f64>,

    /// Closed set of accepted strings (empty means any)
    pub allowed_values: Vec<String>,
}

impl ValidationRule {
    /// Rule of the given type with no range
    pub fn of(value_type: ValueType) -> Self {
        Self {
            value_type,
            ..Self::default()
        }
    }

    /// Set inclusive bounds
    pub fn with_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    /// Restrict to a closed set of values
    pub fn with_allowed_values(mut self, values: Vec<String>) -> Self {
        self.allowed_values = values;
        self
    }
}

/// One assumption slot
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDefinition {
    /// Stable key (e.g. "budget")
    pub key: String,

    /// Display label
    pub label: String,

    /// Whether a value must be resolved before submission
    pub required: bool,

    /// Typing rule for submission
    pub rule: ValidationRule,

    /// Schema default used when the field is left unresolved
    pub default_value: Option<String>,

    /// Where the schema says the default comes from
    pub provenance: SchemaProvenance,
}

impl FieldDefinition {
    /// Create an optional free-text field
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            required: false,
            rule: ValidationRule::default(),
            default_value: None,
            provenance: SchemaProvenance::default(),
        }
    }

    /// Mark the field as required
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Set the typing rule
    pub fn with_rule(mut self, rule: ValidationRule) -> Self {
        self.rule = rule;
        self
    }

    /// Set the schema default
    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Set the canonical provenance
    pub fn with_provenance(mut self, provenance: SchemaProvenance) -> Self {
        self.provenance = provenance;
        self
    }
}

/// The fixed, ordered list of fields a session resolves
///
/// Keys are unique and non-empty; the registry never changes after
/// construction.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldRegistry {
    fields: Vec<FieldDefinition>,
}

impl FieldRegistry {
    /// Create a registry
    ///
    /// # Errors
    /// Returns error on an empty list, an empty key, or a duplicate key
    pub fn new(fields: Vec<FieldDefinition>) -> Result<Self, String> {
        if fields.is_empty() {
            return Err("Field registry cannot be empty".to_string());
        }
        for (idx, field) in fields.iter().enumerate() {
            if field.key.trim().is_empty() {
                return Err(format!("Field {} has an empty key", idx));
            }
            if fields[..idx].iter().any(|f| f.key == field.key) {
                return Err(format!("Duplicate field key: {}", field.key));
            }
        }
        Ok(Self { fields })
    }

    /// The built-in project intake registry
    pub fn intake() -> Self {
        Self {
            fields: vec![
                FieldDefinition::new(PROJECT_NAME, "Project name"),
                FieldDefinition::new(GOAL, "Goal").required(),
                FieldDefinition::new(TIMELINE, "Timeline").required(),
                FieldDefinition::new(BUDGET, "Budget")
                    .required()
                    .with_rule(ValidationRule::of(ValueType::Currency).with_range(Some(0.0), None)),
            ],
        }
    }

    /// Look up a field by key
    pub fn get(&self, key: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.key == key)
    }

    /// Whether the key is registered
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Display label for a key
    pub fn label(&self, key: &str) -> Option<&str> {
        self.get(key).map(|f| f.label.as_str())
    }

    /// Keys in registry order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.key.as_str())
    }

    /// Definitions in registry order
    pub fn iter(&self) -> std::slice::Iter<'_, FieldDefinition> {
        self.fields.iter()
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Always false for a constructed registry
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Default for FieldRegistry {
    fn default() -> Self {
        Self::intake()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intake_registry() {
        let registry = FieldRegistry::intake();
        let keys: Vec<&str> = registry.keys().collect();
        assert_eq!(keys, vec![PROJECT_NAME, GOAL, TIMELINE, BUDGET]);
        assert_eq!(registry.label(BUDGET), Some("Budget"));
        assert!(registry.get(GOAL).unwrap().required);
        assert!(!registry.get(PROJECT_NAME).unwrap().required);
        assert_eq!(registry.get(BUDGET).unwrap().rule.value_type, ValueType::Currency);
    }

    #[test]
    fn test_duplicate_keys_rejected() {
        let result = FieldRegistry::new(vec![
            FieldDefinition::new("rent", "Rent"),
            FieldDefinition::new("rent", "Rent again"),
        ]);
        assert!(result.unwrap_err().contains("Duplicate"));
    }

    #[test]
    fn test_empty_registry_rejected() {
        assert!(FieldRegistry::new(vec![]).is_err());
        assert!(FieldRegistry::new(vec![FieldDefinition::new(" ", "Blank")]).is_err());
    }

    #[test]
    fn test_type_and_provenance_parsing() {
        assert_eq!(ValueType::parse("Percent"), Some(ValueType::Percent));
        assert_eq!(ValueType::parse("bool"), Some(ValueType::Boolean));
        assert!(ValueType::parse("matrix").is_none());
        assert_eq!(
            SchemaProvenance::parse("assumed_baseline"),
            Some(SchemaProvenance::AssumedBaseline)
        );
        assert_eq!(SchemaProvenance::PublicData.as_str(), "public-data");
    }
}
