//! One-shot resolve and export commands.

use crate::cli::{ExportArgs, InputArgs, ResolveArgs};
use crate::config::{OutputFormat, Profile};
use crate::error::Result;
use crate::export::DEFAULT_MODE;
use crate::output::Formatter;
use intake_engine::{Engine, Input};
use std::collections::BTreeMap;
use tracing::info;

/// Feed every input to the engine: text, form, research, edits, then
/// confirmations.
pub fn apply_inputs(engine: &mut Engine, input: &InputArgs) -> Result<()> {
    for text in &input.text {
        engine.resolve(Input::NaturalLanguage(text.clone()))?;
    }
    if !input.form.is_empty() {
        let form: BTreeMap<String, String> = input.form.iter().cloned().collect();
        engine.resolve(Input::Structured(form))?;
    }
    for note in &input.research {
        engine.resolve(Input::Research(note.clone()))?;
    }
    if !input.edit.is_empty() {
        let edits: BTreeMap<String, String> = input.edit.iter().cloned().collect();
        engine.apply_edits(&edits)?;
    }
    for key in &input.confirm {
        engine.set_confirmed(key, true)?;
    }
    info!("Applied inputs: {}", engine.metrics().summary());
    Ok(())
}

/// Execute the resolve command.
pub async fn execute_resolve(
    args: ResolveArgs,
    engine: &mut Engine,
    profile: &Profile,
    formatter: &Formatter,
) -> Result<()> {
    apply_inputs(engine, &args.input)?;
    println!("{}", formatter.format_records(DEFAULT_MODE, engine)?);

    if args.submit {
        super::execute_submit(engine, profile, formatter).await?;
    } else if formatter.format() == OutputFormat::Table {
        let pending = engine.default_review_queue().len();
        if pending > 0 {
            println!("{}", formatter.warning(&format!("{} field(s) need review", pending)));
        }
    }
    Ok(())
}

/// Execute the export command.
pub fn execute_export(args: ExportArgs, engine: &mut Engine, formatter: &Formatter) -> Result<()> {
    apply_inputs(engine, &args.input)?;
    println!("{}", export_text(&args.mode, engine, formatter)?);
    Ok(())
}

/// Render the export document in the formatter's format.
///
/// Table output has no export shape, so it falls back to JSON.
pub fn export_text(mode: &str, engine: &Engine, formatter: &Formatter) -> Result<String> {
    let format = match formatter.format() {
        OutputFormat::Table => OutputFormat::Json,
        format => format,
    };
    Formatter::new(format, false).format_records(mode, engine)
}
