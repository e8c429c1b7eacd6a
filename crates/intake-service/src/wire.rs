//! JSON shapes exchanged with the model computation service

use crate::error::ServiceError;
use intake_domain::{AssumptionSet, ModelOutputs, TypedValue};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// Headline metrics read from the `kpis` object
pub const KPI_NAMES: [&str; 4] = ["irr", "moic", "dscr", "npv"];

/// Header carrying the submission id alongside the request body
pub const SUBMISSION_ID_HEADER: &str = "X-Submission-Id";

/// Request body for `POST /api/model`
///
/// A flat `{field: value}` object. The service reads top-level keys and
/// skips the ones it does not know, so nothing else goes in the body.
#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct ModelRequest {
    /// One value per submitted field
    pub fields: Map<String, Value>,
}

impl ModelRequest {
    /// Build the request body from an assumption set
    pub fn from_assumptions(set: &AssumptionSet) -> Self {
        let fields = set
            .values
            .iter()
            .map(|v| (v.key.clone(), to_json(&v.value)))
            .collect();
        Self { fields }
    }
}

/// Error body returned with a non-2xx status
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    /// Message from the service
    pub error: String,
}

/// Health check body for `GET /api/health`
#[derive(Debug, Deserialize)]
pub struct HealthBody {
    /// "ok" when the service is up
    pub status: String,
}

fn to_json(value: &TypedValue) -> Value {
    match value {
        TypedValue::Number(v) | TypedValue::Percent(v) | TypedValue::Currency(v) => {
            Number::from_f64(*v).map(Value::Number).unwrap_or(Value::Null)
        }
        TypedValue::Text(s) | TypedValue::Date(s) => Value::String(s.clone()),
        TypedValue::Boolean(b) => Value::Bool(*b),
    }
}

/// Parse a model document into outputs
///
/// The document must be a JSON object with a `kpis` object. Headline metrics
/// that are null or missing (an IRR that does not converge) are left out.
pub fn parse_outputs(body: &str) -> Result<ModelOutputs, ServiceError> {
    let document: Value = serde_json::from_str(body)?;
    let kpis = document
        .get("kpis")
        .and_then(Value::as_object)
        .ok_or_else(|| ServiceError::InvalidResponse("response has no kpis object".to_string()))?;

    let metrics = KPI_NAMES
        .iter()
        .filter_map(|name| kpis.get(*name).and_then(Value::as_f64).map(|v| (name.to_string(), v)))
        .collect();

    Ok(ModelOutputs {
        metrics,
        document: serde_json::to_string_pretty(&document)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use intake_domain::{ResolvedAssumption, SourceTag, SubmissionId};

    #[test]
    fn test_request_from_assumptions() {
        let set = AssumptionSet {
            id: SubmissionId::from_value(42),
            values: vec![
                ResolvedAssumption {
                    key: "purchase_price".to_string(),
                    value: TypedValue::Currency(1_250_000.0),
                    provenance: SourceTag::Structured,
                    defaulted: false,
                },
                ResolvedAssumption {
                    key: "strategy".to_string(),
                    value: TypedValue::Text("core".to_string()),
                    provenance: SourceTag::Manual,
                    defaulted: false,
                },
            ],
        };
        let request = ModelRequest::from_assumptions(&set);
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["purchase_price"], 1_250_000.0);
        assert_eq!(json["strategy"], "core");
        assert_eq!(json.as_object().map(|o| o.len()), Some(2));
    }

    #[test]
    fn test_parse_outputs() {
        let body = r#"{
            "assumptions": {"purchase_price": 1000000},
            "kpis": {"irr": 0.142, "moic": 1.9, "dscr": 1.35, "npv": 250000.5, "equity": 400000}
        }"#;
        let outputs = parse_outputs(body).unwrap();

        assert_eq!(outputs.metric("irr"), Some(0.142));
        assert_eq!(outputs.metric("npv"), Some(250000.5));
        assert_eq!(outputs.metric("equity"), None);
        assert_eq!(outputs.metrics.len(), 4);
        assert!(outputs.document.contains("purchase_price"));
    }

    #[test]
    fn test_null_irr_is_skipped() {
        let outputs = parse_outputs(r#"{"kpis": {"irr": null, "moic": 1.1}}"#).unwrap();
        assert_eq!(outputs.metric("irr"), None);
        assert_eq!(outputs.metric("moic"), Some(1.1));
    }

    #[test]
    fn test_missing_kpis_is_invalid() {
        assert!(matches!(parse_outputs(r#"{"model": {}}"#), Err(ServiceError::InvalidResponse(_))));
        assert!(matches!(parse_outputs("not json"), Err(ServiceError::InvalidResponse(_))));
    }
}
