//! Provenance tags for field values

/// Where a field value came from
///
/// Tags are kept on every record for audit and drive the confidence
/// display. The three `Missing*` tags record how an empty field is
/// expected to be filled, not a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SourceTag {
    /// Pattern extraction from a free-text description
    NaturalLanguage,

    /// A structured form field
    Structured,

    /// A research note (advisory, never auto-confirmed)
    ResearchAssist,

    /// Typed in by a reviewer
    Manual,

    /// Gap to be filled manually
    MissingManual,

    /// Gap to be filled from public data
    MissingPublic,

    /// Gap to be filled by an assumed baseline
    MissingAssumed,

    /// No source recorded yet
    #[default]
    Unassigned,
}

impl SourceTag {
    /// Get the tag as its wire string
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceTag::NaturalLanguage => "natural-language",
            SourceTag::Structured => "structured",
            SourceTag::ResearchAssist => "research-assist",
            SourceTag::Manual => "manual",
            SourceTag::MissingManual => "missing-manual",
            SourceTag::MissingPublic => "missing-public",
            SourceTag::MissingAssumed => "missing-assumed",
            SourceTag::Unassigned => "unassigned",
        }
    }

    /// Parse a tag from a string; the empty string means `Unassigned`
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "natural-language" | "nl" => Some(SourceTag::NaturalLanguage),
            "structured" | "form" => Some(SourceTag::Structured),
            "research-assist" | "research" => Some(SourceTag::ResearchAssist),
            "manual" => Some(SourceTag::Manual),
            "missing-manual" => Some(SourceTag::MissingManual),
            "missing-public" => Some(SourceTag::MissingPublic),
            "missing-assumed" => Some(SourceTag::MissingAssumed),
            "unassigned" | "" => Some(SourceTag::Unassigned),
            _ => None,
        }
    }

    /// Whether any source has been recorded
    pub fn is_assigned(&self) -> bool {
        !matches!(self, SourceTag::Unassigned)
    }

    /// Whether this tag records a remediation choice
    pub fn is_missing(&self) -> bool {
        matches!(
            self,
            SourceTag::MissingManual | SourceTag::MissingPublic | SourceTag::MissingAssumed
        )
    }
}

impl std::fmt::Display for SourceTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SourceTag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid source tag: {}", s))
    }
}

/// How a reviewer intends to fill a field that has no value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RemediationChoice {
    /// The reviewer will type it in
    Manual,
    /// It will be looked up in public data
    Public,
    /// A baseline assumption will be used
    Assumed,
}

impl RemediationChoice {
    /// Get the choice name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            RemediationChoice::Manual => "manual",
            RemediationChoice::Public => "public",
            RemediationChoice::Assumed => "assumed",
        }
    }

    /// Parse a choice from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "manual" => Some(RemediationChoice::Manual),
            "public" => Some(RemediationChoice::Public),
            "assumed" => Some(RemediationChoice::Assumed),
            _ => None,
        }
    }

    /// The `missing-*` provenance this choice derives
    pub fn provenance(&self) -> SourceTag {
        match self {
            RemediationChoice::Manual => SourceTag::MissingManual,
            RemediationChoice::Public => SourceTag::MissingPublic,
            RemediationChoice::Assumed => SourceTag::MissingAssumed,
        }
    }
}

impl std::str::FromStr for RemediationChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid remediation choice: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_strings() {
        assert_eq!(SourceTag::NaturalLanguage.as_str(), "natural-language");
        assert_eq!(SourceTag::ResearchAssist.to_string(), "research-assist");
        assert_eq!(SourceTag::default(), SourceTag::Unassigned);
    }

    #[test]
    fn test_tag_parse() {
        assert_eq!(SourceTag::parse("Structured"), Some(SourceTag::Structured));
        assert_eq!(SourceTag::parse(""), Some(SourceTag::Unassigned));
        assert_eq!("missing-public".parse::<SourceTag>(), Ok(SourceTag::MissingPublic));
        assert!("telepathy".parse::<SourceTag>().is_err());
    }

    #[test]
    fn test_remediation_provenance() {
        assert_eq!(RemediationChoice::Manual.provenance(), SourceTag::MissingManual);
        assert_eq!(RemediationChoice::Public.provenance(), SourceTag::MissingPublic);
        assert_eq!(RemediationChoice::Assumed.provenance(), SourceTag::MissingAssumed);
        assert!(RemediationChoice::Assumed.provenance().is_missing());
        assert!(!SourceTag::Manual.is_missing());
    }

    #[test]
    fn test_remediation_parse() {
        assert_eq!(RemediationChoice::parse("ASSUMED"), Some(RemediationChoice::Assumed));
        assert!(RemediationChoice::parse("guess").is_none());
    }
}
