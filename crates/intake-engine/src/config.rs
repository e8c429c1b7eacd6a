//! Configuration for the resolution engine
//!
//! Fixes the scores the non-extracting adapters assign, the review threshold
//! and the configuration of the components the engine owns.

use intake_domain::field::GOAL;
use intake_extractor::ExtractorConfig;
use intake_policy::{PolicyConfig, ValidationConfig};
use serde::{Deserialize, Serialize};

/// Configuration for the Engine
///
/// # Examples
///
/// ```
/// use intake_engine::EngineConfig;
///
/// let config = EngineConfig::default();
/// assert_eq!(config.structured_confidence, 0.95);
/// assert_eq!(config.research_field, "goal");
///
/// let strict = EngineConfig::strict();
/// assert!(strict.validate().is_ok());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Confidence assigned to non-blank structured form values
    pub structured_confidence: f64,

    /// Confidence assigned to research notes
    pub research_confidence: f64,

    /// Field a research note is proposed for
    pub research_field: String,

    /// Confidence assigned to a non-empty manual edit
    pub manual_edit_confidence: f64,

    /// Confidence below which a field is queued for review
    pub review_threshold: f64,

    /// Merge policy
    pub policy: PolicyConfig,

    /// Natural-language extractor
    pub extractor: ExtractorConfig,

    /// Submission validation
    pub validation: ValidationConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            structured_confidence: 0.95,
            research_confidence: 0.7,
            research_field: GOAL.to_string(),
            manual_edit_confidence: 0.9,
            review_threshold: 0.5,
            policy: PolicyConfig::default(),
            extractor: ExtractorConfig::default(),
            validation: ValidationConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Strict configuration: short inputs, no entity guessing, no defaults
    pub fn strict() -> Self {
        Self {
            extractor: ExtractorConfig::strict(),
            validation: ValidationConfig::strict(),
            ..Self::default()
        }
    }

    /// Lenient configuration: long inputs, proposals may be submitted
    pub fn lenient() -> Self {
        Self {
            extractor: ExtractorConfig::lenient(),
            validation: ValidationConfig::permissive(),
            ..Self::default()
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        let scores = [
            ("structured_confidence", self.structured_confidence),
            ("research_confidence", self.research_confidence),
            ("manual_edit_confidence", self.manual_edit_confidence),
            ("review_threshold", self.review_threshold),
        ];
        for (name, value) in scores {
            if !(0.0..=1.0).contains(&value) {
                return Err(format!("{} {} is outside [0.0, 1.0]", name, value));
            }
        }
        if self.research_field.trim().is_empty() {
            return Err("research_field must not be empty".to_string());
        }
        self.policy.validate()?;
        self.extractor.validate()
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
