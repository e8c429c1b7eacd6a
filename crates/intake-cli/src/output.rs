//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use crate::export::{export_document, flatten};
use colored::*;
use intake_domain::{ConfidenceTier, FieldRegistry, ModelOutputs, ReviewState};
use intake_engine::{Engine, FieldRow};
use intake_service::KPI_NAMES;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// The configured format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Format the full record set.
    pub fn format_records(&self, mode: &str, engine: &Engine) -> Result<String> {
        match self.format {
            OutputFormat::Table => Ok(self.format_rows_table(&engine.table())),
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&export_document(mode, engine))?),
            OutputFormat::Flat => Ok(format_flat(&export_document(mode, engine))),
        }
    }

    /// Format the fields awaiting review.
    pub fn format_queue(&self, rows: &[FieldRow]) -> String {
        if rows.is_empty() {
            return self.success("Every field is confirmed.");
        }
        self.format_rows_table(rows)
    }

    /// Format rows as a table.
    fn format_rows_table(&self, rows: &[FieldRow]) -> String {
        let mut builder = Builder::default();
        builder.push_record(["Key", "Label", "Value", "Confidence", "Source", "State", "Remediation"]);

        for row in rows {
            let label = if row.required {
                format!("{} *", row.label)
            } else {
                row.label.clone()
            };
            let confidence = format!("{} ({})", row.confidence, row.tier.as_str());
            builder.push_record([
                row.key.clone(),
                label,
                row.value.clone(),
                self.tier_color(row.tier, &confidence),
                row.provenance.to_string(),
                self.state_color(row.state),
                row.remediation.map(|c| c.as_str().to_string()).unwrap_or_default(),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        table.to_string()
    }

    /// Format the field definitions of a registry.
    pub fn format_schema(&self, registry: &FieldRegistry) -> Result<String> {
        match self.format {
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Key", "Label", "Required", "Type", "Range", "Default", "Provenance"]);
                for field in registry.iter() {
                    let range = match (field.rule.min, field.rule.max) {
                        (None, None) if field.rule.allowed_values.is_empty() => String::new(),
                        (None, None) => field.rule.allowed_values.join(" | "),
                        (min, max) => format!(
                            "{} .. {}",
                            min.map(|v| v.to_string()).unwrap_or_default(),
                            max.map(|v| v.to_string()).unwrap_or_default()
                        ),
                    };
                    builder.push_record([
                        field.key.clone(),
                        field.label.clone(),
                        if field.required { "yes" } else { "no" }.to_string(),
                        field.rule.value_type.as_str().to_string(),
                        range,
                        field.default_value.clone().unwrap_or_default(),
                        field.provenance.as_str().to_string(),
                    ]);
                }
                let mut table = builder.build();
                table
                    .with(Style::rounded())
                    .with(Modify::new(Rows::first()).with(Alignment::center()));
                Ok(table.to_string())
            }
            OutputFormat::Json | OutputFormat::Flat => {
                let fields: Vec<serde_json::Value> = registry
                    .iter()
                    .map(|field| {
                        serde_json::json!({
                            "key": field.key,
                            "label": field.label,
                            "required": field.required,
                            "type": field.rule.value_type.as_str(),
                            "min": field.rule.min,
                            "max": field.rule.max,
                            "allowed_values": field.rule.allowed_values,
                            "default": field.default_value,
                            "provenance": field.provenance.as_str(),
                        })
                    })
                    .collect();
                let document = serde_json::json!({ "fields": fields });
                if self.format == OutputFormat::Json {
                    Ok(serde_json::to_string_pretty(&document)?)
                } else {
                    Ok(format_flat(&document))
                }
            }
        }
    }

    /// Format the answer of the model service.
    pub fn format_outputs(&self, outputs: &ModelOutputs) -> Result<String> {
        match self.format {
            OutputFormat::Table => {
                if outputs.metrics.is_empty() {
                    return Ok(self.warning("The model returned no metrics."));
                }
                let mut builder = Builder::default();
                builder.push_record(["Metric", "Value"]);
                // Headline KPIs first, then anything else the model reported
                let known = KPI_NAMES.iter().filter_map(|name| outputs.metrics.get_key_value(*name));
                let extra = outputs
                    .metrics
                    .iter()
                    .filter(|(name, _)| !KPI_NAMES.contains(&name.as_str()));
                for (name, value) in known.chain(extra) {
                    builder.push_record([name.to_uppercase(), format_metric(name, *value)]);
                }
                let mut table = builder.build();
                table.with(Style::rounded());
                Ok(table.to_string())
            }
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&outputs_document(outputs)?)?),
            OutputFormat::Flat => Ok(format_flat(&outputs_document(outputs)?)),
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    fn tier_color(&self, tier: ConfidenceTier, text: &str) -> String {
        match tier {
            ConfidenceTier::High => self.colorize(text, "green"),
            ConfidenceTier::Medium => self.colorize(text, "yellow"),
            ConfidenceTier::Low => self.colorize(text, "red"),
        }
    }

    fn state_color(&self, state: ReviewState) -> String {
        match state {
            ReviewState::Confirmed => self.colorize(state.as_str(), "green"),
            ReviewState::ProposedHighConfidence => self.colorize(state.as_str(), "cyan"),
            ReviewState::ProposedLowConfidence => self.colorize(state.as_str(), "yellow"),
            ReviewState::Unset => self.colorize(state.as_str(), "magenta"),
        }
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            "magenta" => text.magenta().to_string(),
            _ => text.to_string(),
        }
    }
}

/// The raw service document, or the metrics alone when there is none
fn outputs_document(outputs: &ModelOutputs) -> Result<serde_json::Value> {
    if outputs.document.trim().is_empty() {
        return Ok(serde_json::json!({ "kpis": outputs.metrics }));
    }
    Ok(serde_json::from_str(&outputs.document)?)
}

/// Render one metric the way it is read: IRR as a percent, NPV in dollars,
/// multiples to two places.
fn format_metric(name: &str, value: f64) -> String {
    if !value.is_finite() {
        return "-".to_string();
    }
    match name {
        "irr" => format!("{:.2}%", value * 100.0),
        "npv" => format_usd(value),
        "moic" | "dscr" => format!("{:.2}", value),
        _ => format!("{:.4}", value),
    }
}

/// Whole dollars with thousands separators
fn format_usd(value: f64) -> String {
    let digits = format!("{:.0}", value.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if value.round() < 0.0 { "-" } else { "" };
    format!("{}${}", sign, grouped)
}

fn format_flat(document: &serde_json::Value) -> String {
    flatten(document)
        .into_iter()
        .map(|(path, value)| format!("{} = {}", path, value))
        .collect::<Vec<_>>()
        .join("\n")
}
