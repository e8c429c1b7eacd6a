//! Schema command implementation.

use crate::error::Result;
use crate::output::Formatter;
use intake_domain::FieldRegistry;

/// Print the field definitions being resolved.
pub fn execute_schema(registry: &FieldRegistry, formatter: &Formatter) -> Result<()> {
    println!("{}", formatter.format_schema(registry)?);
    Ok(())
}
