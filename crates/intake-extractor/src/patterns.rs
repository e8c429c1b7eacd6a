//! Pattern recognizers, one per field category
//!
//! Each recognizer owns one compiled pattern family and a fixed confidence
//! score. Scores are properties of the recognizer, not of match quality.

use crate::error::ExtractorError;
use crate::types::Category;
use intake_domain::traits::FieldExtractor;
use intake_domain::{Candidate, SourceTag};
use regex::Regex;

/// Confidence of an amount with an explicit magnitude suffix
pub const SCALED_QUANTITY_CONFIDENCE: f64 = 0.86;
/// Confidence of an amount without a magnitude suffix
pub const BARE_QUANTITY_CONFIDENCE: f64 = 0.72;
/// Confidence of a deadline phrase
pub const PERIOD_CONFIDENCE: f64 = 0.78;
/// Confidence of an action phrase
pub const ACTION_CONFIDENCE: f64 = 0.67;
/// Confidence of a project or plan name
pub const ENTITY_CONFIDENCE: f64 = 0.64;

const MONTHS: &str = "jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?";

const ACTION_VERBS: &str = "build|create|deliver|prepare|design|launch";

// A phrase ends at punctuation, end of text, or a trailing "by"/"with" clause
// (those introduce the deadline and budget, which other recognizers own).
const PHRASE_END: &str = r"(?:\s+(?:by|with)\b|[,.;!?\n]|$)";

/// A lazy phrase with nothing before the clause word swallows the clause itself
fn starts_with_clause_word(phrase: &str) -> bool {
    let lowered = phrase.to_lowercase();
    ["by", "with"]
        .iter()
        .any(|w| lowered == *w || lowered.starts_with(&format!("{} ", w)))
}

/// Build the recognizer for a category
pub fn recognizer_for(
    category: Category,
    field: &str,
) -> Result<Box<dyn FieldExtractor + Send + Sync>, ExtractorError> {
    Ok(match category {
        Category::Quantity => Box::new(QuantityRecognizer::new(field)?),
        Category::Period => Box::new(PeriodRecognizer::new(field)?),
        Category::Action => Box::new(ActionRecognizer::new(field)?),
        Category::Entity => Box::new(EntityRecognizer::new(field)?),
    })
}

/// Currency and quantity amounts ("$250k", "1.5 million", "$40,000", "1200")
///
/// Amounts carrying a currency mark or magnitude suffix are preferred over
/// bare numerals, and bare four-digit years are skipped, so that
/// "by Q3 2025 with a budget of $250k" yields "$250k".
pub struct QuantityRecognizer {
    field: String,
    marked: Regex,
    bare: Regex,
    suffix: Regex,
}

impl QuantityRecognizer {
    /// Compile the recognizer
    pub fn new(field: impl Into<String>) -> Result<Self, ExtractorError> {
        Ok(Self {
            field: field.into(),
            marked: Regex::new(
                r"(?i)\$\s?\b\d+(?:,\d{3})*(?:\.\d+)?(?:\s?(?:thousand|million|mm|k|m)\b)?|\b\d+(?:,\d{3})*(?:\.\d+)?\s?(?:thousand|million|mm|k|m)\b",
            )?,
            bare: Regex::new(r"\b\d+(?:,\d{3})*(?:\.\d+)?\b")?,
            suffix: Regex::new(r"(?i)(?:thousand|million|mm|k|m)$")?,
        })
    }

    fn is_year(token: &str) -> bool {
        token.len() == 4
            && (token.starts_with("19") || token.starts_with("20"))
            && token.chars().all(|c| c.is_ascii_digit())
    }

    fn first_bare<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.bare
            .find_iter(text)
            .filter(|m| !text[m.end()..].starts_with('%'))
            .map(|m| m.as_str())
            .find(|token| !Self::is_year(token))
    }
}

impl FieldExtractor for QuantityRecognizer {
    fn name(&self) -> &'static str {
        Category::Quantity.as_str()
    }

    fn field(&self) -> &str {
        &self.field
    }

    fn extract(&self, text: &str) -> Option<Candidate> {
        let value = match self.marked.find(text) {
            Some(m) => m.as_str().trim(),
            None => self.first_bare(text)?,
        };
        let confidence = if self.suffix.is_match(value) {
            SCALED_QUANTITY_CONFIDENCE
        } else {
            BARE_QUANTITY_CONFIDENCE
        };
        Some(Candidate::new(value, confidence, SourceTag::NaturalLanguage))
    }
}

/// Deadline phrases: "by" followed by a quarter-year, month-year or month-day
pub struct PeriodRecognizer {
    field: String,
    pattern: Regex,
}

impl PeriodRecognizer {
    /// Compile the recognizer
    pub fn new(field: impl Into<String>) -> Result<Self, ExtractorError> {
        let pattern = format!(
            r"(?i)\bby\s+(q[1-4]\s+(?:fy\s?)?\d{{4}}\b|(?:{months})\.?\s+\d{{4}}\b|(?:{months})\.?\s+\d{{1,2}}(?:st|nd|rd|th)?\b(?:,?\s+\d{{4}}\b)?)",
            months = MONTHS
        );
        Ok(Self {
            field: field.into(),
            pattern: Regex::new(&pattern)?,
        })
    }
}

impl FieldExtractor for PeriodRecognizer {
    fn name(&self) -> &'static str {
        Category::Period.as_str()
    }

    fn field(&self) -> &str {
        &self.field
    }

    fn extract(&self, text: &str) -> Option<Candidate> {
        let caps = self.pattern.captures(text)?;
        let value = caps.get(1)?.as_str().trim();
        Some(Candidate::new(value, PERIOD_CONFIDENCE, SourceTag::NaturalLanguage))
    }
}

/// Action phrases: a verb from a closed set and the phrase that follows it
///
/// The value is lower-cased ("Build a new app" becomes "build a new app").
pub struct ActionRecognizer {
    field: String,
    pattern: Regex,
}

impl ActionRecognizer {
    /// Compile the recognizer
    pub fn new(field: impl Into<String>) -> Result<Self, ExtractorError> {
        let pattern = format!(
            r"(?i)\b({verbs})\s+(.+?){end}",
            verbs = ACTION_VERBS,
            end = PHRASE_END
        );
        Ok(Self {
            field: field.into(),
            pattern: Regex::new(&pattern)?,
        })
    }
}

impl FieldExtractor for ActionRecognizer {
    fn name(&self) -> &'static str {
        Category::Action.as_str()
    }

    fn field(&self) -> &str {
        &self.field
    }

    fn extract(&self, text: &str) -> Option<Candidate> {
        let (verb, phrase) = self.pattern.captures_iter(text).find_map(|caps| {
            let verb = caps.get(1)?.as_str();
            let phrase = caps.get(2)?.as_str().trim();
            if phrase.is_empty() || starts_with_clause_word(phrase) {
                return None;
            }
            Some((verb, phrase))
        })?;
        let value = format!("{} {}", verb, phrase).to_lowercase();
        Some(Candidate::new(value, ACTION_CONFIDENCE, SourceTag::NaturalLanguage))
    }
}

/// Project or plan names, only when the text mentions a project or plan
///
/// "a project called Apollo" yields "Apollo"; the marker word is optional.
pub struct EntityRecognizer {
    field: String,
    trigger: Regex,
    pattern: Regex,
}

impl EntityRecognizer {
    /// Compile the recognizer
    pub fn new(field: impl Into<String>) -> Result<Self, ExtractorError> {
        let pattern = format!(
            r"(?i)\b(?:project|plan)\b\s+(?:(?:called|named)\s+)?(.+?){end}",
            end = PHRASE_END
        );
        Ok(Self {
            field: field.into(),
            trigger: Regex::new(r"(?i)\b(?:project|plan)\b")?,
            pattern: Regex::new(&pattern)?,
        })
    }
}

impl FieldExtractor for EntityRecognizer {
    fn name(&self) -> &'static str {
        Category::Entity.as_str()
    }

    fn field(&self) -> &str {
        &self.field
    }

    fn extract(&self, text: &str) -> Option<Candidate> {
        if !self.trigger.is_match(text) {
            return None;
        }
        let value = self.pattern.captures_iter(text).find_map(|caps| {
            let value = caps.get(1)?.as_str().trim();
            if value.is_empty() || starts_with_clause_word(value) {
                return None;
            }
            Some(value)
        })?;
        Some(Candidate::new(value, ENTITY_CONFIDENCE, SourceTag::NaturalLanguage))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value_of(extractor: &dyn FieldExtractor, text: &str) -> Option<(String, f64)> {
        extractor
            .extract(text)
            .map(|c| (c.value, c.confidence.value()))
    }

    #[test]
    fn test_quantity_scaled_amount() {
        let r = QuantityRecognizer::new("budget").unwrap();
        assert_eq!(
            value_of(&r, "Build a new mobile app by Q3 2025 with a budget of $250k"),
            Some(("$250k".to_string(), 0.86))
        );
        assert_eq!(
            value_of(&r, "roughly 1.5 million for the fit-out"),
            Some(("1.5 million".to_string(), 0.86))
        );
    }

    #[test]
    fn test_quantity_currency_without_suffix() {
        let r = QuantityRecognizer::new("budget").unwrap();
        assert_eq!(
            value_of(&r, "We can spend $40,000 on this"),
            Some(("$40,000".to_string(), 0.72))
        );
    }

    #[test]
    fn test_quantity_bare_number_skips_years_and_percentages() {
        let r = QuantityRecognizer::new("budget").unwrap();
        assert_eq!(
            value_of(&r, "In 2025 grow 10% and spend 1200"),
            Some(("1200".to_string(), 0.72))
        );
        assert_eq!(value_of(&r, "Finish by March 2026"), None);
    }

    #[test]
    fn test_quantity_ignores_quarter_digit() {
        let r = QuantityRecognizer::new("budget").unwrap();
        assert_eq!(value_of(&r, "Ship in Q3"), None);
    }

    #[test]
    fn test_period_quarter_year() {
        let r = PeriodRecognizer::new("timeline").unwrap();
        assert_eq!(
            value_of(&r, "Build a new mobile app by Q3 2025 with a budget of $250k"),
            Some(("Q3 2025".to_string(), 0.78))
        );
    }

    #[test]
    fn test_period_month_forms() {
        let r = PeriodRecognizer::new("timeline").unwrap();
        assert_eq!(value_of(&r, "done by March 2026.").map(|v| v.0), Some("March 2026".to_string()));
        assert_eq!(
            value_of(&r, "deliver by Sept 15, 2025").map(|v| v.0),
            Some("Sept 15, 2025".to_string())
        );
        assert_eq!(value_of(&r, "due by june 30").map(|v| v.0), Some("june 30".to_string()));
    }

    #[test]
    fn test_period_requires_by() {
        let r = PeriodRecognizer::new("timeline").unwrap();
        assert_eq!(value_of(&r, "sometime in Q3 2025"), None);
        assert_eq!(value_of(&r, "by the way, nothing here"), None);
    }

    #[test]
    fn test_action_phrase() {
        let r = ActionRecognizer::new("goal").unwrap();
        assert_eq!(
            value_of(&r, "Build a new mobile app by Q3 2025 with a budget of $250k"),
            Some(("build a new mobile app".to_string(), 0.67))
        );
        assert_eq!(
            value_of(&r, "We want to launch a loyalty program, then expand.").map(|v| v.0),
            Some("launch a loyalty program".to_string())
        );
    }

    #[test]
    fn test_action_skips_bare_deadline() {
        let r = ActionRecognizer::new("goal").unwrap();
        assert_eq!(value_of(&r, "Deliver by Sept 15, 2025"), None);
    }

    #[test]
    fn test_action_requires_known_verb() {
        let r = ActionRecognizer::new("goal").unwrap();
        assert_eq!(value_of(&r, "Expand into three new markets"), None);
        assert_eq!(value_of(&r, "The rebuilding effort"), None);
    }

    #[test]
    fn test_entity_called_marker() {
        let r = EntityRecognizer::new("project_name").unwrap();
        assert_eq!(
            value_of(&r, "Kick off a project called Apollo Retail, by May 2026"),
            Some(("Apollo Retail".to_string(), 0.64))
        );
        assert_eq!(
            value_of(&r, "Our plan named Horizon.").map(|v| v.0),
            Some("Horizon".to_string())
        );
    }

    #[test]
    fn test_entity_requires_trigger_word() {
        let r = EntityRecognizer::new("project_name").unwrap();
        assert_eq!(value_of(&r, "Build a new mobile app by Q3 2025"), None);
        assert_eq!(value_of(&r, "Something called Zephyr"), None);
        assert_eq!(value_of(&r, "The projected revenue is high"), None);
    }

    #[test]
    fn test_entity_rejects_bare_clause() {
        let r = EntityRecognizer::new("project_name").unwrap();
        assert_eq!(value_of(&r, "Finish the project by June 2026"), None);
    }

    #[test]
    fn test_recognizer_for_sets_field() {
        let r = recognizer_for(Category::Period, "deadline").unwrap();
        assert_eq!(r.field(), "deadline");
        assert_eq!(r.name(), "period");
    }
}
