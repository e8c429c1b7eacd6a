//! CLI command definitions and argument parsing.

use crate::export::DEFAULT_MODE;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Intake - Resolve financial-model assumptions from text, forms and research notes.
#[derive(Debug, Parser)]
#[command(name = "intake")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "INTAKE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Profile to use
    #[arg(short, long, global = true)]
    pub profile: Option<String>,

    /// Schema file (TOML `[[fields]]`) replacing the built-in fields
    #[arg(short, long, global = true)]
    pub schema: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// `{mode, fields}` JSON document
    Json,
    /// Flattened `path = value` lines
    Flat,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Resolve inputs once and print the field table
    Resolve(ResolveArgs),

    /// Resolve inputs once and print the export document
    Export(ExportArgs),

    /// List the fields being resolved
    Schema,

    /// Manage configuration profiles
    Profile(ProfileArgs),

    /// Enter interactive REPL mode
    Repl,
}

/// Inputs for a one-shot resolution.
///
/// Applied in a fixed order: text, form, research, edits, confirmations.
#[derive(Debug, Clone, Default, Args)]
pub struct InputArgs {
    /// Natural-language description
    #[arg(short, long)]
    pub text: Vec<String>,

    /// Structured form value (`key=value`; an empty value clears the field)
    #[arg(long, value_parser = parse_pair)]
    pub form: Vec<(String, String)>,

    /// Research note
    #[arg(short, long)]
    pub research: Vec<String>,

    /// Manual edit (`key=value`)
    #[arg(short, long, value_parser = parse_pair)]
    pub edit: Vec<(String, String)>,

    /// Confirm a field after resolution
    #[arg(long)]
    pub confirm: Vec<String>,
}

/// Arguments for the resolve command.
#[derive(Debug, Args)]
pub struct ResolveArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Submit the result to the model service
    #[arg(long)]
    pub submit: bool,
}

/// Arguments for the export command.
#[derive(Debug, Args)]
pub struct ExportArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Mode label written into the document
    #[arg(short, long, default_value = DEFAULT_MODE)]
    pub mode: String,
}

/// Arguments for profile management.
#[derive(Debug, Args)]
pub struct ProfileArgs {
    #[command(subcommand)]
    pub action: ProfileAction,
}

/// Profile management actions.
#[derive(Debug, Subcommand)]
pub enum ProfileAction {
    /// List all profiles
    List,

    /// Show active profile
    Show,

    /// Switch to a different profile
    Switch {
        /// Profile name
        name: String,
    },

    /// Create or update a profile
    Set {
        /// Profile name
        name: String,
        /// Model service URL
        #[arg(short, long)]
        url: String,
        /// Attempts per model request
        #[arg(long)]
        retries: Option<u32>,
        /// Request timeout in seconds
        #[arg(long)]
        timeout: Option<u64>,
    },

    /// Delete a profile
    Delete {
        /// Profile name
        name: String,
    },
}

/// Split `key=value`; the value may be empty or contain `=`.
pub fn parse_pair(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("Invalid pair '{}'. Expected 'key=value'", s))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("Invalid pair '{}'. The key is empty", s));
    }
    Ok((key.to_string(), value.trim().to_string()))
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Flat => crate::config::OutputFormat::Flat,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_command_means_repl() {
        let cli = Cli::parse_from(["intake"]);
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn test_resolve_command() {
        let cli = Cli::parse_from([
            "intake",
            "resolve",
            "--text",
            "Build a new mobile app by Q3 2025",
            "--form",
            "budget=$250k",
            "--form",
            "project_name=",
            "--confirm",
            "goal",
            "--submit",
        ]);
        match cli.command {
            Some(Command::Resolve(args)) => {
                assert_eq!(args.input.text.len(), 1);
                assert_eq!(
                    args.input.form,
                    vec![
                        ("budget".to_string(), "$250k".to_string()),
                        ("project_name".to_string(), String::new()),
                    ]
                );
                assert_eq!(args.input.confirm, vec!["goal".to_string()]);
                assert!(args.submit);
            }
            _ => panic!("Expected Resolve command"),
        }
    }

    #[test]
    fn test_export_default_mode() {
        let cli = Cli::parse_from(["intake", "-f", "json", "export", "-r", "Expand into Europe"]);
        match cli.command {
            Some(Command::Export(args)) => {
                assert_eq!(args.mode, DEFAULT_MODE);
                assert_eq!(args.input.research, vec!["Expand into Europe".to_string()]);
            }
            _ => panic!("Expected Export command"),
        }
        assert!(matches!(cli.format, Some(CliFormat::Json)));
    }

    #[test]
    fn test_parse_pair() {
        assert_eq!(parse_pair("budget=$1m").unwrap(), ("budget".to_string(), "$1m".to_string()));
        assert_eq!(parse_pair("note=a=b").unwrap(), ("note".to_string(), "a=b".to_string()));
        assert!(parse_pair("budget").is_err());
        assert!(parse_pair("=5").is_err());
    }
}
