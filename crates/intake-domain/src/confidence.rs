//! Confidence scores and display tiering

/// Confidence at or above which a merged value is trusted without sign-off
pub const AUTO_CONFIRM_THRESHOLD: f64 = 0.75;

/// Lower bound of the "high" display tier
pub const HIGH_TIER_THRESHOLD: f64 = 0.8;

/// Lower bound of the "medium" display tier
pub const MEDIUM_TIER_THRESHOLD: f64 = 0.5;

/// A confidence score, always within [0.0, 1.0]
///
/// Construction never fails: out-of-range input is clamped and
/// non-numeric input (NaN, absent, unparsable) becomes 0.0.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Confidence(f64);

impl Confidence {
    /// Zero confidence, used for empty records
    pub const ZERO: Confidence = Confidence(0.0);

    /// Create a confidence, clamping into [0, 1]
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self::ZERO;
        }
        Self(value.clamp(0.0, 1.0))
    }

    /// Create from an optional raw score; absent means zero
    pub fn from_raw(raw: Option<f64>) -> Self {
        raw.map(Self::new).unwrap_or(Self::ZERO)
    }

    /// Parse from text; anything that is not a number means zero
    pub fn parse(raw: &str) -> Self {
        raw.trim().parse::<f64>().map(Self::new).unwrap_or(Self::ZERO)
    }

    /// Get the raw score
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Whether this confidence reaches `threshold`
    pub fn meets(&self, threshold: f64) -> bool {
        self.0 >= threshold
    }

    /// Whether this confidence is high enough to auto-confirm
    pub fn auto_confirms(&self) -> bool {
        self.meets(AUTO_CONFIRM_THRESHOLD)
    }

    /// Display tier for this score
    pub fn tier(&self) -> ConfidenceTier {
        ConfidenceTier::of(*self)
    }
}

impl From<f64> for Confidence {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// Display tier used when presenting confidence to a reviewer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfidenceTier {
    /// Below 0.5
    Low,
    /// 0.5 up to 0.8
    Medium,
    /// 0.8 and above
    High,
}

impl ConfidenceTier {
    /// Classify a confidence score
    pub fn of(confidence: Confidence) -> Self {
        if confidence.meets(HIGH_TIER_THRESHOLD) {
            ConfidenceTier::High
        } else if confidence.meets(MEDIUM_TIER_THRESHOLD) {
            ConfidenceTier::Medium
        } else {
            ConfidenceTier::Low
        }
    }

    /// Get the tier name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfidenceTier::Low => "low",
            ConfidenceTier::Medium => "medium",
            ConfidenceTier::High => "high",
        }
    }
}
