//! Policy configuration

use intake_domain::AUTO_CONFIRM_THRESHOLD;
use serde::{Deserialize, Serialize};

/// Configuration for the merge policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Confidence at or above which a merged value is confirmed
    pub auto_confirm_threshold: f64,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            auto_confirm_threshold: AUTO_CONFIRM_THRESHOLD,
        }
    }
}

impl PolicyConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.auto_confirm_threshold) {
            return Err(format!(
                "auto_confirm_threshold {} is outside [0.0, 1.0]",
                self.auto_confirm_threshold
            ));
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

/// Configuration for submission validation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Only confirmed values are submitted; unconfirmed ones fall back to defaults
    pub require_confirmation: bool,

    /// Fill unresolved fields from the schema default
    pub use_schema_defaults: bool,

    /// Enforce `min`/`max` on numeric values
    pub validate_ranges: bool,

    /// Enforce `allowed_values`
    pub validate_allowed_values: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            require_confirmation: true,
            use_schema_defaults: true,
            validate_ranges: true,
            validate_allowed_values: true,
        }
    }
}

impl ValidationConfig {
    /// Create a permissive configuration: proposals count, no range checks
    pub fn permissive() -> Self {
        Self {
            require_confirmation: false,
            use_schema_defaults: true,
            validate_ranges: false,
            validate_allowed_values: false,
        }
    }

    /// Create a strict configuration: every field must be confirmed
    pub fn strict() -> Self {
        Self {
            require_confirmation: true,
            use_schema_defaults: false,
            validate_ranges: true,
            validate_allowed_values: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_config() {
        let config = PolicyConfig::default();
        assert_eq!(config.auto_confirm_threshold, 0.75);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_policy_threshold_out_of_range() {
        let config = PolicyConfig {
            auto_confirm_threshold: 1.5,
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_policy_toml_round_trip() {
        let config = PolicyConfig {
            auto_confirm_threshold: 0.6,
        };
        let parsed = PolicyConfig::from_toml(&config.to_toml().unwrap()).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_default_validation_config() {
        let config = ValidationConfig::default();
        assert!(config.require_confirmation);
        assert!(config.use_schema_defaults);
        assert!(config.validate_ranges);
    }

    #[test]
    fn test_permissive_config() {
        let config = ValidationConfig::permissive();
        assert!(!config.require_confirmation);
        assert!(!config.validate_ranges);
    }

    #[test]
    fn test_strict_config() {
        let config = ValidationConfig::strict();
        assert!(!config.use_schema_defaults);
        assert!(config.validate_allowed_values);
    }
}
