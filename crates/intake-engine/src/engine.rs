//! The resolution engine: owned record state and its operations

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::metrics::EngineMetrics;
use crate::review;
use crate::source::{self, Input, Proposal};
use crate::table::FieldRow;
use intake_domain::traits::ModelService;
use intake_domain::{
    AssumptionSet, FieldDefinition, FieldRecord, FieldRegistry, ModelOutputs, RemediationChoice,
    SubmissionId,
};
use intake_extractor::Extractor;
use intake_policy::{ResolutionPolicy, SubmissionValidator};
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

/// Resolution engine for one intake session
///
/// Owns exactly one record per registered field for its whole lifetime.
/// Records change only through the methods below; every failed call leaves
/// them as they were.
pub struct Engine {
    registry: FieldRegistry,
    records: BTreeMap<String, FieldRecord>,
    extractor: Extractor,
    policy: ResolutionPolicy,
    validator: SubmissionValidator,
    config: EngineConfig,
    metrics: EngineMetrics,
    pending: Option<AssumptionSet>,
    last_outputs: Option<ModelOutputs>,
    last_error: Option<String>,
}

impl Engine {
    /// Create an engine over `registry`, every field starting empty
    pub fn new(registry: FieldRegistry, config: EngineConfig) -> Result<Self, EngineError> {
        config.validate().map_err(EngineError::Config)?;

        let extractor = Extractor::new(config.extractor.clone())?;
        let policy = ResolutionPolicy::new(config.policy.clone())?;
        let validator = SubmissionValidator::new(config.validation.clone());

        for field in extractor.fields().filter(|f| !registry.contains(f)) {
            debug!("Extractor field '{}' is not registered; its matches will be dropped", field);
        }

        let records = registry
            .keys()
            .map(|key| (key.to_string(), FieldRecord::empty()))
            .collect();

        info!("Engine initialized with {} fields", registry.len());

        Ok(Self {
            registry,
            records,
            extractor,
            policy,
            validator,
            config,
            metrics: EngineMetrics::new(),
            pending: None,
            last_outputs: None,
            last_error: None,
        })
    }

    /// Engine over the built-in intake registry with default configuration
    pub fn with_defaults() -> Result<Self, EngineError> {
        Self::new(FieldRegistry::intake(), EngineConfig::default())
    }

    /// The field registry
    pub fn registry(&self) -> &FieldRegistry {
        &self.registry
    }

    /// The active configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Session metrics
    pub fn metrics(&self) -> &EngineMetrics {
        &self.metrics
    }

    /// All records, keyed by field
    pub fn records(&self) -> &BTreeMap<String, FieldRecord> {
        &self.records
    }

    /// The record of one field
    pub fn record(&self, key: &str) -> Result<&FieldRecord, EngineError> {
        self.records
            .get(key)
            .ok_or_else(|| EngineError::UnknownField(key.to_string()))
    }

    /// Definitions and records in registry order
    pub fn fields(&self) -> impl Iterator<Item = (&FieldDefinition, &FieldRecord)> {
        self.registry
            .iter()
            .filter_map(|def| self.records.get(&def.key).map(|record| (def, record)))
    }

    /// Feed one input through its adapter and merge the proposals
    ///
    /// A structured input naming an unregistered field is refused as a whole.
    /// Extracted or research proposals for unregistered fields are dropped.
    pub fn resolve(&mut self, input: Input) -> Result<&BTreeMap<String, FieldRecord>, EngineError> {
        self.ensure_idle()?;

        let proposals = match &input {
            Input::NaturalLanguage(text) => source::natural_language(&self.extractor, text),
            Input::Structured(form) => {
                if let Some(unknown) = form.keys().find(|k| !self.registry.contains(k)) {
                    return Err(EngineError::UnknownField(unknown.clone()));
                }
                source::structured(form, self.config.structured_confidence)
            }
            Input::Research(text) => source::research(
                text,
                &self.config.research_field,
                self.config.research_confidence,
            ),
        };

        info!("Resolving {} input: {} proposals", input.channel(), proposals.len());
        for proposal in proposals {
            self.apply(proposal);
        }
        Ok(&self.records)
    }

    fn apply(&mut self, proposal: Proposal) {
        let Some(current) = self.records.get(&proposal.field) else {
            debug!("Dropping proposal for unregistered field '{}'", proposal.field);
            self.metrics.record_rejection();
            return;
        };

        let outcome = self.policy.merge(current, &proposal.candidate, proposal.mode);
        debug!(
            "Merged '{}' = '{}' ({}, {}): {}",
            proposal.field,
            outcome.record.value,
            outcome.record.confidence,
            outcome.record.provenance,
            outcome.decision.as_str()
        );
        self.metrics.record_merge(outcome.decision);
        self.store(&proposal.field, outcome.record);
    }

    /// Manually edit a field's value
    pub fn edit(&mut self, key: &str, value: &str) -> Result<&FieldRecord, EngineError> {
        self.ensure_idle()?;
        let record = review::edit(self.record(key)?, value, self.config.manual_edit_confidence);
        info!("Edited '{}'", key);
        self.metrics.record_edit();
        Ok(self.store(key, record))
    }

    /// Apply a batch of manual edits
    ///
    /// All keys are checked before anything changes.
    pub fn apply_edits(&mut self, edits: &BTreeMap<String, String>) -> Result<(), EngineError> {
        self.ensure_idle()?;
        if let Some(unknown) = edits.keys().find(|k| !self.records.contains_key(*k)) {
            return Err(EngineError::UnknownField(unknown.clone()));
        }
        for (key, value) in edits {
            self.edit(key, value)?;
        }
        Ok(())
    }

    /// Set or clear a field's confirmation flag
    pub fn set_confirmed(&mut self, key: &str, confirmed: bool) -> Result<&FieldRecord, EngineError> {
        self.ensure_idle()?;
        let record = review::set_confirmed(key, self.record(key)?, confirmed)?;
        info!("Set '{}' confirmed={}", key, confirmed);
        self.metrics.record_confirmation();
        Ok(self.store(key, record))
    }

    /// Record how an empty field will be filled
    pub fn remediate(&mut self, key: &str, choice: RemediationChoice) -> Result<&FieldRecord, EngineError> {
        self.ensure_idle()?;
        let record = review::remediate(key, self.record(key)?, choice)?;
        info!("Remediation '{}' recorded for '{}'", choice.as_str(), key);
        self.metrics.record_remediation();
        Ok(self.store(key, record))
    }

    /// Return every field to empty
    pub fn reset(&mut self) -> Result<(), EngineError> {
        self.ensure_idle()?;
        for record in self.records.values_mut() {
            *record = FieldRecord::empty();
        }
        self.last_outputs = None;
        self.last_error = None;
        info!("All fields reset");
        Ok(())
    }

    /// Rows for every field in registry order
    pub fn table(&self) -> Vec<FieldRow> {
        self.fields().map(|(def, record)| FieldRow::new(def, record)).collect()
    }

    /// Rows that are missing, scored under `threshold`, or unconfirmed
    pub fn review_queue(&self, threshold: f64) -> Vec<FieldRow> {
        self.table()
            .into_iter()
            .filter(|row| row.needs_review(threshold))
            .collect()
    }

    /// Review queue at the configured threshold
    pub fn default_review_queue(&self) -> Vec<FieldRow> {
        self.review_queue(self.config.review_threshold)
    }

    /// Whether a submission is outstanding
    pub fn is_submitting(&self) -> bool {
        self.pending.is_some()
    }

    /// The outstanding submission, if any
    pub fn pending_submission(&self) -> Option<&AssumptionSet> {
        self.pending.as_ref()
    }

    /// Outputs of the last successful submission
    pub fn last_outputs(&self) -> Option<&ModelOutputs> {
        self.last_outputs.as_ref()
    }

    /// Message of the last failed submission
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Validate the records and open a submission
    ///
    /// While a submission is open every mutating call fails with
    /// `SubmissionInFlight`. Calling this again returns the same open
    /// submission. Close it with `finish_submission` or `abort_submission`.
    pub fn begin_submission(&mut self) -> Result<&AssumptionSet, EngineError> {
        if self.pending.is_none() {
            let set = self.assemble()?;
            info!("Submission {} opened with {} values", set.id, set.len());
            self.pending = Some(set);
        }
        self.pending.as_ref().ok_or(EngineError::NoPendingSubmission)
    }

    /// Close the open submission with the service's answer
    ///
    /// Records are never touched; a failure is reported and remembered.
    pub fn finish_submission(
        &mut self,
        result: Result<ModelOutputs, String>,
    ) -> Result<&ModelOutputs, EngineError> {
        let set = self.pending.take().ok_or(EngineError::NoPendingSubmission)?;
        self.complete(&set, result)
    }

    /// Drop the open submission without an answer
    ///
    /// Returns the id of the abandoned submission. Nothing is counted.
    pub fn abort_submission(&mut self) -> Result<SubmissionId, EngineError> {
        let set = self.pending.take().ok_or(EngineError::NoPendingSubmission)?;
        info!("Submission {} aborted", set.id);
        Ok(set.id)
    }

    /// Submit the records to a model service and wait for the answer
    ///
    /// The engine stays idle while the request runs: `&mut self` already
    /// excludes other calls, and dropping the future part way leaves nothing
    /// open. A submission opened with `begin_submission` is taken over.
    pub async fn submit<S: ModelService>(&mut self, service: &S) -> Result<&ModelOutputs, EngineError> {
        let set = match self.pending.take() {
            Some(set) => set,
            None => self.assemble()?,
        };
        debug!("Submitting {} with {} values", set.id, set.len());
        let result = service.compute(&set).await.map_err(|e| e.to_string());
        self.complete(&set, result)
    }

    fn assemble(&mut self) -> Result<AssumptionSet, EngineError> {
        self.validator
            .assemble(SubmissionId::new(), &self.registry, &self.records)
            .map_err(|e| {
                warn!("Submission refused: {}", e);
                self.metrics.record_submission(false);
                self.last_error = Some(e.to_string());
                e.into()
            })
    }

    fn complete(
        &mut self,
        set: &AssumptionSet,
        result: Result<ModelOutputs, String>,
    ) -> Result<&ModelOutputs, EngineError> {
        match result {
            Ok(outputs) => {
                info!("Submission {} returned {} metrics", set.id, outputs.metrics.len());
                self.metrics.record_submission(true);
                self.last_error = None;
                Ok(&*self.last_outputs.insert(outputs))
            }
            Err(message) => {
                warn!("Submission {} failed: {}", set.id, message);
                self.metrics.record_submission(false);
                self.last_error = Some(message.clone());
                Err(EngineError::Service(message))
            }
        }
    }

    fn ensure_idle(&self) -> Result<(), EngineError> {
        match self.pending {
            Some(_) => Err(EngineError::SubmissionInFlight),
            None => Ok(()),
        }
    }

    fn store(&mut self, key: &str, record: FieldRecord) -> &FieldRecord {
        debug_assert!(record.check_invariants().is_ok(), "invariant broken for '{}'", key);
        let slot = self.records.entry(key.to_string()).or_default();
        *slot = record;
        slot
    }
}
