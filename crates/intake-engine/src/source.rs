//! Source adapters: raw input from each channel into proposals

use intake_domain::{Candidate, SourceTag};
use intake_extractor::Extractor;
use intake_policy::MergeMode;
use std::collections::BTreeMap;
use tracing::debug;

/// Raw input, tagged with the channel it arrived on
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    /// Free-text description, run through the extractors
    NaturalLanguage(String),

    /// Form fields; a blank value clears its field
    Structured(BTreeMap<String, String>),

    /// A research note, proposed verbatim and never auto-confirmed
    Research(String),
}

impl Input {
    /// Channel name used in logs
    pub fn channel(&self) -> &'static str {
        match self {
            Input::NaturalLanguage(_) => SourceTag::NaturalLanguage.as_str(),
            Input::Structured(_) => SourceTag::Structured.as_str(),
            Input::Research(_) => SourceTag::ResearchAssist.as_str(),
        }
    }

    /// Build a structured input from key/value pairs
    pub fn form<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Input::Structured(pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// One candidate bound for one field
#[derive(Debug, Clone, PartialEq)]
pub struct Proposal {
    /// Target field key
    pub field: String,

    /// Proposed value
    pub candidate: Candidate,

    /// How the merge treats confirmation
    pub mode: MergeMode,
}

/// Natural-language adapter
///
/// Fields no recognizer matched are absent, so free text that never mentions
/// a topic leaves that field alone.
pub fn natural_language(extractor: &Extractor, text: &str) -> Vec<Proposal> {
    let result = extractor.extract(text);
    debug!(
        "Natural-language input of {} chars produced {} candidates in {}us",
        result.metadata.text_length,
        result.extractions.len(),
        result.metadata.processing_time_us
    );
    result
        .extractions
        .into_iter()
        .map(|e| Proposal {
            field: e.field,
            candidate: e.candidate,
            mode: MergeMode::Standard,
        })
        .collect()
}

/// Structured-form adapter
///
/// Non-blank values are trimmed and scored `confidence`; blank values become
/// explicit clears.
pub fn structured(form: &BTreeMap<String, String>, confidence: f64) -> Vec<Proposal> {
    form.iter()
        .map(|(key, raw)| {
            let value = raw.trim();
            let candidate = if value.is_empty() {
                Candidate::cleared()
            } else {
                Candidate::new(value, confidence, SourceTag::Structured)
            };
            Proposal {
                field: key.clone(),
                candidate,
                mode: MergeMode::Standard,
            }
        })
        .collect()
}

/// Research-note adapter
///
/// The whole note becomes one advisory proposal for `field`. A blank note
/// proposes nothing.
pub fn research(text: &str, field: &str, confidence: f64) -> Vec<Proposal> {
    if text.trim().is_empty() {
        return Vec::new();
    }
    vec![Proposal {
        field: field.to_string(),
        candidate: Candidate::new(text, confidence, SourceTag::ResearchAssist),
        mode: MergeMode::Advisory,
    }]
}
