//! Typing raw field text into submission values

use chrono::NaiveDate;
use intake_domain::{TypedValue, ValueType};

// Longest first so "mm" is tried before "m"
const MAGNITUDES: [(&str, f64); 5] = [
    ("thousand", 1_000.0),
    ("million", 1_000_000.0),
    ("mm", 1_000_000.0),
    ("k", 1_000.0),
    ("m", 1_000_000.0),
];

/// Parse an amount such as "$250k", "1.5 million" or "40,000"
pub fn parse_amount(raw: &str) -> Option<f64> {
    let lowered = raw.trim().to_lowercase().replace(',', "");
    let unsigned = lowered.trim_start_matches('$').trim();

    let (number, scale) = MAGNITUDES
        .iter()
        .find_map(|(suffix, scale)| unsigned.strip_suffix(suffix).map(|n| (n.trim(), *scale)))
        .unwrap_or((unsigned, 1.0));

    number
        .parse::<f64>()
        .ok()
        .map(|v| v * scale)
        .filter(|v| v.is_finite())
}

/// Parse a percentage: "5%" is 0.05, a bare number passes through
pub fn parse_percent(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    match trimmed.strip_suffix('%') {
        Some(number) => number.trim().parse::<f64>().ok().map(|v| v / 100.0),
        None => trimmed.parse::<f64>().ok(),
    }
    .filter(|v| v.is_finite())
}

/// Parse a boolean flag
pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "true" | "yes" | "y" | "1" => Some(true),
        "false" | "no" | "n" | "0" => Some(false),
        _ => None,
    }
}

/// Type a raw value according to a field's value type
pub fn coerce(raw: &str, value_type: ValueType) -> Option<TypedValue> {
    match value_type {
        ValueType::String => Some(TypedValue::Text(raw.to_string())),
        ValueType::Number => parse_amount(raw).map(TypedValue::Number),
        ValueType::Currency => parse_amount(raw).map(TypedValue::Currency),
        ValueType::Percent => parse_percent(raw).map(TypedValue::Percent),
        ValueType::Boolean => parse_bool(raw).map(TypedValue::Boolean),
        ValueType::Date => NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
            .ok()
            .map(|d| TypedValue::Date(d.format("%Y-%m-%d").to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amounts() {
        assert_eq!(parse_amount("$250k"), Some(250_000.0));
        assert_eq!(parse_amount("$40,000"), Some(40_000.0));
        assert_eq!(parse_amount("1.5 million"), Some(1_500_000.0));
        assert_eq!(parse_amount("$2M"), Some(2_000_000.0));
        assert_eq!(parse_amount("3mm"), Some(3_000_000.0));
        assert_eq!(parse_amount("1200"), Some(1200.0));
        assert_eq!(parse_amount("about a lot"), None);
        assert_eq!(parse_amount(""), None);
    }

    #[test]
    fn test_scaled_overflow_is_not_an_amount() {
        assert_eq!(parse_amount("1e308k"), None);
        assert_eq!(parse_amount("$1e303 million"), None);
        assert_eq!(parse_amount("inf"), None);
        assert_eq!(coerce("1e308k", ValueType::Currency), None);
        assert!(parse_amount("1e300k").is_some_and(f64::is_finite));
    }

    #[test]
    fn test_percent() {
        assert_eq!(parse_percent("5%"), Some(0.05));
        assert_eq!(parse_percent("0.065"), Some(0.065));
        assert_eq!(parse_percent("five"), None);
    }

    #[test]
    fn test_bool() {
        assert_eq!(parse_bool("Yes"), Some(true));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }

    #[test]
    fn test_coerce_by_type() {
        assert_eq!(coerce("$250k", ValueType::Currency), Some(TypedValue::Currency(250_000.0)));
        assert_eq!(
            coerce("2025-09-30", ValueType::Date),
            Some(TypedValue::Date("2025-09-30".to_string()))
        );
        assert_eq!(coerce("Q3 2025", ValueType::Date), None);
        assert_eq!(
            coerce("Q3 2025", ValueType::String),
            Some(TypedValue::Text("Q3 2025".to_string()))
        );
        assert_eq!(coerce("true", ValueType::Boolean), Some(TypedValue::Boolean(true)));
    }
}
