//! Merge policy: folding a candidate into a canonical record

use crate::config::PolicyConfig;
use crate::error::PolicyError;
use intake_domain::{Candidate, FieldRecord};
use tracing::debug;

/// How a merge treats confirmation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergeMode {
    /// Confirmed iff confidence meets the threshold
    #[default]
    Standard,
    /// Never confirmed, regardless of confidence (research notes)
    Advisory,
}

/// What a merge did to the record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeDecision {
    /// Value replaced and auto-confirmed
    Accepted,
    /// Value replaced but left for human review
    FlaggedForReview,
    /// Field reset to empty
    Cleared,
}

impl MergeDecision {
    /// Get the decision name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            MergeDecision::Accepted => "accepted",
            MergeDecision::FlaggedForReview => "flagged",
            MergeDecision::Cleared => "cleared",
        }
    }
}

/// Result of one merge
#[derive(Debug, Clone, PartialEq)]
pub struct MergeOutcome {
    /// Replacement record
    pub record: FieldRecord,

    /// Decision taken
    pub decision: MergeDecision,
}

/// Last-writer-wins merge policy with threshold-based confirmation
#[derive(Debug, Clone)]
pub struct ResolutionPolicy {
    config: PolicyConfig,
}

impl ResolutionPolicy {
    /// Create a new policy with the given configuration
    pub fn new(config: PolicyConfig) -> Result<Self, PolicyError> {
        config.validate().map_err(PolicyError::Config)?;
        Ok(Self { config })
    }

    /// Get the active configuration
    pub fn config(&self) -> &PolicyConfig {
        &self.config
    }

    /// Merge a candidate over the current record
    ///
    /// The candidate replaces value, confidence and provenance outright; no
    /// arbitration between sources. A blank candidate resets the field. Any
    /// remediation choice is dropped.
    pub fn merge(&self, current: &FieldRecord, candidate: &Candidate, mode: MergeMode) -> MergeOutcome {
        if candidate.is_clear() {
            return MergeOutcome {
                record: FieldRecord::empty(),
                decision: MergeDecision::Cleared,
            };
        }

        let confirmed = match mode {
            MergeMode::Standard => candidate.confidence.meets(self.config.auto_confirm_threshold),
            MergeMode::Advisory => false,
        };

        if current.confirmed && current.value != candidate.value {
            debug!(
                "Replacing confirmed value '{}' ({}) with '{}' ({})",
                current.value, current.provenance, candidate.value, candidate.provenance
            );
        }

        MergeOutcome {
            record: FieldRecord {
                value: candidate.value.clone(),
                confidence: candidate.confidence,
                provenance: candidate.provenance,
                confirmed,
                remediation: None,
            },
            decision: if confirmed {
                MergeDecision::Accepted
            } else {
                MergeDecision::FlaggedForReview
            },
        }
    }
}

impl Default for ResolutionPolicy {
    fn default() -> Self {
        Self {
            config: PolicyConfig::default(),
        }
    }
}
