//! Configuration for the Extractor

use crate::types::Category;
use intake_domain::field::{BUDGET, GOAL, PROJECT_NAME, TIMELINE};
use serde::{Deserialize, Serialize};

/// Which field each recognizer category populates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldTargets {
    /// Target of the quantity/currency recognizer
    pub quantity: String,

    /// Target of the period recognizer
    pub period: String,

    /// Target of the action-phrase recognizer
    pub action: String,

    /// Target of the named-entity recognizer
    pub entity: String,
}

impl FieldTargets {
    /// Target field for a category
    pub fn for_category(&self, category: Category) -> &str {
        match category {
            Category::Quantity => &self.quantity,
            Category::Period => &self.period,
            Category::Action => &self.action,
            Category::Entity => &self.entity,
        }
    }
}

impl Default for FieldTargets {
    fn default() -> Self {
        Self {
            quantity: BUDGET.to_string(),
            period: TIMELINE.to_string(),
            action: GOAL.to_string(),
            entity: PROJECT_NAME.to_string(),
        }
    }
}

/// Configuration for the Extractor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Maximum number of characters scanned; longer text is cut, not rejected.
    /// Unbounded when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_text_length: Option<usize>,

    /// Enabled recognizer categories, in run order
    pub categories: Vec<Category>,

    /// Field populated by each category
    #[serde(default)]
    pub targets: FieldTargets,
}

impl ExtractorConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_text_length == Some(0) {
            return Err("max_text_length must be greater than 0".to_string());
        }
        if self.categories.is_empty() {
            return Err("at least one recognizer category must be enabled".to_string());
        }
        for (idx, category) in self.categories.iter().enumerate() {
            if self.categories[..idx].contains(category) {
                return Err(format!("category '{}' is listed twice", category.as_str()));
            }
            if self.targets.for_category(*category).trim().is_empty() {
                return Err(format!("category '{}' has no target field", category.as_str()));
            }
        }
        let enabled: Vec<&str> = self
            .categories
            .iter()
            .map(|c| self.targets.for_category(*c))
            .collect();
        for (idx, target) in enabled.iter().enumerate() {
            if enabled[..idx].contains(target) {
                return Err(format!("field '{}' is targeted by two categories", target));
            }
        }
        Ok(())
    }
}

impl Default for ExtractorConfig {
    /// All four recognizers against the intake fields
    fn default() -> Self {
        Self {
            max_text_length: None,
            categories: Category::all().to_vec(),
            targets: FieldTargets::default(),
        }
    }
}

impl ExtractorConfig {
    /// Strict preset: short inputs, and no named-entity guessing
    pub fn strict() -> Self {
        Self {
            max_text_length: Some(2_000),
            categories: vec![Category::Quantity, Category::Period, Category::Action],
            targets: FieldTargets::default(),
        }
    }

    /// Lenient preset: any input length
    pub fn lenient() -> Self {
        Self {
            max_text_length: None,
            categories: Category::all().to_vec(),
            targets: FieldTargets::default(),
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str)
            .map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ExtractorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.categories.len(), 4);
    }

    #[test]
    fn test_presets_are_valid() {
        assert!(ExtractorConfig::strict().validate().is_ok());
        assert!(ExtractorConfig::lenient().validate().is_ok());
        assert!(!ExtractorConfig::strict().categories.contains(&Category::Entity));
    }

    #[test]
    fn test_invalid_max_text_length() {
        let mut config = ExtractorConfig::default();
        config.max_text_length = Some(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_shared_target_rejected() {
        let mut config = ExtractorConfig::default();
        config.targets.entity = GOAL.to_string();
        let err = config.validate().unwrap_err();
        assert!(err.contains("goal"));
    }

    #[test]
    fn test_duplicate_category_rejected() {
        let mut config = ExtractorConfig::default();
        config.categories.push(Category::Period);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = ExtractorConfig::strict();
        let toml_str = config.to_toml().unwrap();
        let parsed = ExtractorConfig::from_toml(&toml_str).unwrap();

        assert_eq!(config.max_text_length, parsed.max_text_length);
        assert_eq!(config.categories, parsed.categories);
        assert_eq!(config.targets, parsed.targets);
    }

    #[test]
    fn test_default_scans_everything() {
        let config = ExtractorConfig::default();
        assert_eq!(config.max_text_length, None);
        let parsed = ExtractorConfig::from_toml(&config.to_toml().unwrap()).unwrap();
        assert_eq!(parsed.max_text_length, None);
    }

    #[test]
    fn test_toml_targets_default_when_omitted() {
        let parsed = ExtractorConfig::from_toml(
            "max_text_length = 500\ncategories = [\"quantity\", \"period\"]\n",
        )
        .unwrap();
        assert_eq!(parsed.targets, FieldTargets::default());
        assert_eq!(parsed.categories, vec![Category::Quantity, Category::Period]);
    }
}
