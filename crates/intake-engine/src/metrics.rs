//! Counters for engine operations

use intake_policy::MergeDecision;

/// Metrics collected during a session
///
/// Tracks merge decisions, review actions and submission outcomes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineMetrics {
    /// Merges that auto-confirmed the value
    pub merges_accepted: usize,

    /// Merges that left the value for review
    pub merges_flagged: usize,

    /// Merges that cleared a field
    pub merges_cleared: usize,

    /// Proposals dropped because their field is not registered
    pub proposals_rejected: usize,

    /// Manual edits applied
    pub edits: usize,

    /// Confirmation flags set or cleared
    pub confirmations: usize,

    /// Remediation choices recorded
    pub remediations: usize,

    /// Submissions that returned outputs
    pub submissions_succeeded: usize,

    /// Submissions refused by validation or failed in the service
    pub submissions_failed: usize,
}

impl EngineMetrics {
    /// Create new empty metrics
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a merge decision
    pub fn record_merge(&mut self, decision: MergeDecision) {
        match decision {
            MergeDecision::Accepted => self.merges_accepted += 1,
            MergeDecision::FlaggedForReview => self.merges_flagged += 1,
            MergeDecision::Cleared => self.merges_cleared += 1,
        }
    }

    /// Record a dropped proposal
    pub fn record_rejection(&mut self) {
        self.proposals_rejected += 1;
    }

    /// Record a manual edit
    pub fn record_edit(&mut self) {
        self.edits += 1;
    }

    /// Record a confirmation change
    pub fn record_confirmation(&mut self) {
        self.confirmations += 1;
    }

    /// Record a remediation choice
    pub fn record_remediation(&mut self) {
        self.remediations += 1;
    }

    /// Record a submission outcome
    pub fn record_submission(&mut self, succeeded: bool) {
        if succeeded {
            self.submissions_succeeded += 1;
        } else {
            self.submissions_failed += 1;
        }
    }

    /// Total merges across all decisions
    pub fn total_merges(&self) -> usize {
        self.merges_accepted + self.merges_flagged + self.merges_cleared
    }

    /// Reset all metrics
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Generate a summary report of metrics
    pub fn summary(&self) -> String {
        let lines = [
            "Engine Metrics Summary".to_string(),
            "======================".to_string(),
            format!("Merges: {}", self.total_merges()),
            format!("  Accepted: {}", self.merges_accepted),
            format!("  Flagged for review: {}", self.merges_flagged),
            format!("  Cleared: {}", self.merges_cleared),
            format!("Rejected proposals: {}", self.proposals_rejected),
            String::new(),
            format!("Edits: {}", self.edits),
            format!("Confirmations: {}", self.confirmations),
            format!("Remediations: {}", self.remediations),
            String::new(),
            format!(
                "Submissions: {} succeeded, {} failed",
                self.submissions_succeeded, self.submissions_failed
            ),
        ];
        lines.join("\n")
    }
}
