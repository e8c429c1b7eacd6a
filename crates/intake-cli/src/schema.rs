//! TOML schema files
//!
//! A schema file is a list of `[[fields]]` tables:
//!
//! ```toml
//! [[fields]]
//! key = "purchase_price"
//! label = "Purchase price"
//! required = true
//! type = "currency"
//! min = 0
//! default = 12500000
//! provenance = "user-input"
//! ```

use crate::error::{CliError, Result};
use intake_domain::{FieldDefinition, FieldRegistry, SchemaProvenance, ValidationRule, ValueType};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SchemaFile {
    #[serde(default)]
    fields: Vec<FieldSpec>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FieldSpec {
    key: String,
    label: Option<String>,
    #[serde(default)]
    required: bool,
    #[serde(rename = "type")]
    value_type: Option<String>,
    min: Option<f64>,
    max: Option<f64>,
    #[serde(default)]
    allowed_values: Vec<String>,
    default: Option<toml::Value>,
    provenance: Option<String>,
    /// Display unit; informational only
    #[allow(dead_code)]
    units: Option<String>,
}

impl FieldSpec {
    fn into_definition(self) -> Result<FieldDefinition> {
        let value_type = match self.value_type.as_deref() {
            Some(name) => ValueType::parse(name)
                .ok_or_else(|| CliError::Schema(format!("Field '{}': unknown type '{}'", self.key, name)))?,
            None => ValueType::String,
        };
        let provenance = match self.provenance.as_deref() {
            Some(name) => SchemaProvenance::parse(name)
                .ok_or_else(|| CliError::Schema(format!("Field '{}': unknown provenance '{}'", self.key, name)))?,
            None => SchemaProvenance::default(),
        };
        if let (Some(min), Some(max)) = (self.min, self.max) {
            if min > max {
                return Err(CliError::Schema(format!(
                    "Field '{}': min {} is above max {}",
                    self.key, min, max
                )));
            }
        }

        let label = self.label.unwrap_or_else(|| self.key.clone());
        let rule = ValidationRule::of(value_type)
            .with_range(self.min, self.max)
            .with_allowed_values(self.allowed_values);
        let mut definition = FieldDefinition::new(self.key, label)
            .with_rule(rule)
            .with_provenance(provenance);
        if self.required {
            definition = definition.required();
        }
        if let Some(default) = self.default {
            let text = default_text(&definition.key, default)?;
            definition = definition.with_default(text);
        }
        Ok(definition)
    }
}

/// Render a TOML default as the raw text a user would have typed
fn default_text(key: &str, value: toml::Value) -> Result<String> {
    match value {
        toml::Value::String(s) => Ok(s),
        toml::Value::Integer(i) => Ok(i.to_string()),
        toml::Value::Float(f) => Ok(f.to_string()),
        toml::Value::Boolean(b) => Ok(b.to_string()),
        toml::Value::Datetime(d) => Ok(d.to_string()),
        other => Err(CliError::Schema(format!(
            "Field '{}': default must be a scalar, got {}",
            key,
            other.type_str()
        ))),
    }
}

/// Parse a schema document into a registry
pub fn parse_schema(contents: &str) -> Result<FieldRegistry> {
    let file: SchemaFile = toml::from_str(contents)?;
    let fields = file
        .fields
        .into_iter()
        .map(FieldSpec::into_definition)
        .collect::<Result<Vec<_>>>()?;
    FieldRegistry::new(fields).map_err(CliError::Schema)
}

/// Load a schema file into a registry
pub fn load_schema(path: &Path) -> Result<FieldRegistry> {
    let contents = fs::read_to_string(path)
        .map_err(|e| CliError::Schema(format!("Cannot read {}: {}", path.display(), e)))?;
    parse_schema(&contents)
}
