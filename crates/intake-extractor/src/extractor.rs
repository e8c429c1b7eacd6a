//! Core Extractor implementation

use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use crate::patterns::recognizer_for;
use crate::types::{Category, Extraction, ExtractionMetadata, ExtractionResult};
use intake_domain::traits::FieldExtractor;
use std::time::Instant;
use tracing::{debug, warn};

/// The Extractor runs every enabled recognizer over a text
///
/// Recognizers are compiled once at construction and are independent of
/// each other; each contributes at most one candidate per run.
pub struct Extractor {
    recognizers: Vec<(Category, Box<dyn FieldExtractor + Send + Sync>)>,
    config: ExtractorConfig,
}

impl Extractor {
    /// Create a new Extractor
    pub fn new(config: ExtractorConfig) -> Result<Self, ExtractorError> {
        config.validate().map_err(ExtractorError::Config)?;

        let recognizers = config
            .categories
            .iter()
            .map(|category| {
                let field = config.targets.for_category(*category);
                recognizer_for(*category, field).map(|r| (*category, r))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { recognizers, config })
    }

    /// Create an Extractor with default configuration
    pub fn default_config() -> Result<Self, ExtractorError> {
        Self::new(ExtractorConfig::default())
    }

    /// Fields this extractor can populate, in run order
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.recognizers.iter().map(|(_, r)| r.field())
    }

    /// Get the active configuration
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Run all recognizers over `text`
    ///
    /// Never fails; a text with no recognizable content yields an empty
    /// result. Text longer than a configured `max_text_length` is cut.
    pub fn extract(&self, text: &str) -> ExtractionResult {
        let start = Instant::now();
        let text_length = text.chars().count();
        let cut = self
            .config
            .max_text_length
            .and_then(|max| text.char_indices().nth(max).map(|(cut, _)| (max, cut)));
        let scanned = match cut {
            Some((max, cut)) => {
                warn!(
                    "Text of {} chars exceeds max_text_length {}, scanning prefix only",
                    text_length, max
                );
                &text[..cut]
            }
            None => text,
        };

        let mut extractions = Vec::new();
        for (category, recognizer) in &self.recognizers {
            match recognizer.extract(scanned) {
                Some(candidate) => {
                    debug!(
                        "Recognizer '{}' proposed '{}' for '{}' ({})",
                        recognizer.name(),
                        candidate.value,
                        recognizer.field(),
                        candidate.confidence
                    );
                    extractions.push(Extraction {
                        field: recognizer.field().to_string(),
                        category: *category,
                        candidate,
                    });
                }
                None => debug!("Recognizer '{}' found no match", recognizer.name()),
            }
        }

        ExtractionResult {
            extractions,
            metadata: ExtractionMetadata {
                text_length,
                scanned_length: scanned.chars().count(),
                recognizers_run: self.recognizers.len(),
                processing_time_us: start.elapsed().as_micros() as u64,
            },
        }
    }
}
