//! Submit command implementation.

use crate::config::Profile;
use crate::error::Result;
use crate::output::Formatter;
use intake_engine::Engine;

/// Send the reconciled assumptions to the profile's model service.
///
/// A failed submission leaves every record as it was; the error is
/// returned for the caller to show.
pub async fn execute_submit(engine: &mut Engine, profile: &Profile, formatter: &Formatter) -> Result<()> {
    let service = profile.client()?;
    println!(
        "{}",
        formatter.info(&format!("Submitting to {}", service.endpoint()))
    );

    let outputs = engine.submit(&service).await?;
    println!("{}", formatter.format_outputs(outputs)?);
    println!("{}", formatter.success("Model run complete"));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use crate::error::CliError;
    use intake_engine::{EngineError, Input};

    #[tokio::test]
    async fn test_unresolved_fields_refused_before_any_request() {
        let mut engine = Engine::with_defaults().unwrap();
        engine.resolve(Input::form([("goal", "Launch")])).unwrap();
        // Nothing listens on port 9; a request would be a communication error
        let profile = Profile {
            service_url: "http://127.0.0.1:9".to_string(),
            max_retries: 1,
            timeout_secs: 1,
        };
        let formatter = Formatter::new(OutputFormat::Table, false);

        let err = execute_submit(&mut engine, &profile, &formatter).await.unwrap_err();
        assert!(matches!(err, CliError::Engine(EngineError::Validation(_))));
        assert!(!engine.is_submitting());
    }
}
