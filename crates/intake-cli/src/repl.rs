//! Interactive REPL (Read-Eval-Print Loop) mode.

use crate::cli::parse_pair;
use crate::commands;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::export::DEFAULT_MODE;
use crate::output::Formatter;
use intake_domain::RemediationChoice;
use intake_engine::{Engine, Input};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Run the interactive REPL.
pub async fn run_repl(engine: &mut Engine, config: &Config, formatter: &Formatter) -> Result<()> {
    println!("{}", formatter.info("Intake REPL - Type 'help' for commands, 'quit' to exit"));
    println!();

    let editor_config = rustyline::Config::builder()
        .max_history_size(config.settings.history_size)
        .map_err(|e| CliError::Config(format!("Invalid history size: {}", e)))?
        .build();
    let mut editor = DefaultEditor::with_config(editor_config)
        .map_err(|e| CliError::Io(std::io::Error::other(format!("Failed to initialize editor: {}", e))))?;

    // Load history
    let history_path = get_history_path()?;
    let _ = editor.load_history(&history_path);

    loop {
        let pending = engine.default_review_queue().len();
        let prompt = if pending == 0 {
            "intake> ".to_string()
        } else {
            format!("intake ({} to review)> ", pending)
        };

        match editor.readline(&prompt) {
            Ok(line) => {
                let line = line.trim();

                if line.is_empty() {
                    continue;
                }

                editor.add_history_entry(line).ok();

                match parse_repl_command(line) {
                    Ok(ReplCommand::Exit) => {
                        println!("{}", formatter.info("Goodbye!"));
                        break;
                    }
                    Ok(ReplCommand::Help) => {
                        print_help(formatter);
                    }
                    Ok(cmd) => {
                        if let Err(e) = execute_repl_command(cmd, engine, config, formatter).await {
                            eprintln!("{}", formatter.error(&e.to_string()));
                        }
                    }
                    Err(e) => {
                        eprintln!("{}", formatter.error(&e.to_string()));
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", formatter.info("Use 'quit' to exit"));
            }
            Err(ReadlineError::Eof) => {
                break;
            }
            Err(err) => {
                eprintln!("{}", formatter.error(&format!("Error: {}", err)));
                break;
            }
        }
    }

    // Save history
    editor.save_history(&history_path).ok();

    Ok(())
}

/// REPL command type.
#[derive(Debug, Clone, PartialEq)]
enum ReplCommand {
    Exit,
    Help,
    NaturalLanguage(String),
    Form(BTreeMap<String, String>),
    Research(String),
    Edit(String, String),
    Confirm(String, bool),
    Remediate(String, RemediationChoice),
    Show,
    Queue(Option<f64>),
    Export(String),
    Submit,
    Reset,
    Metrics,
}

/// Parse a REPL command line.
fn parse_repl_command(line: &str) -> Result<ReplCommand> {
    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    match command {
        "exit" | "quit" | "q" => Ok(ReplCommand::Exit),
        "help" | "?" => Ok(ReplCommand::Help),
        "nl" | "text" => Ok(ReplCommand::NaturalLanguage(require(rest, "nl <description>")?)),
        "form" => parse_form(rest),
        "research" => Ok(ReplCommand::Research(require(rest, "research <note>")?)),
        "edit" => {
            // An empty value is a valid edit: it clears the field
            let key = first_word(rest, "edit <key> [value]")?;
            let value = rest[key.len()..].trim().to_string();
            Ok(ReplCommand::Edit(key, value))
        }
        "confirm" => Ok(ReplCommand::Confirm(first_word(rest, "confirm <key>")?, true)),
        "unconfirm" => Ok(ReplCommand::Confirm(first_word(rest, "unconfirm <key>")?, false)),
        "remediate" => {
            let usage = "remediate <key> <manual|public|assumed>";
            let parts: Vec<&str> = rest.split_whitespace().collect();
            if parts.len() != 2 {
                return Err(CliError::InvalidInput(format!("Usage: {}", usage)));
            }
            let choice = RemediationChoice::parse(parts[1]).ok_or_else(|| {
                CliError::InvalidInput(format!("Unknown remediation '{}'. Usage: {}", parts[1], usage))
            })?;
            Ok(ReplCommand::Remediate(parts[0].to_string(), choice))
        }
        "show" | "ls" => Ok(ReplCommand::Show),
        "queue" => {
            if rest.is_empty() {
                return Ok(ReplCommand::Queue(None));
            }
            let threshold: f64 = rest
                .parse()
                .map_err(|_| CliError::InvalidInput(format!("Invalid threshold '{}'", rest)))?;
            if !(0.0..=1.0).contains(&threshold) {
                return Err(CliError::InvalidInput("Threshold must be between 0.0 and 1.0".to_string()));
            }
            Ok(ReplCommand::Queue(Some(threshold)))
        }
        "export" => Ok(ReplCommand::Export(if rest.is_empty() {
            DEFAULT_MODE.to_string()
        } else {
            rest.to_string()
        })),
        "submit" => Ok(ReplCommand::Submit),
        "reset" => Ok(ReplCommand::Reset),
        "metrics" => Ok(ReplCommand::Metrics),
        _ => Err(CliError::InvalidInput(format!(
            "Unknown command: {}. Type 'help' for available commands.",
            command
        ))),
    }
}

/// `form key=value more words key2=value2`: a word without `=` continues
/// the previous value.
fn parse_form(rest: &str) -> Result<ReplCommand> {
    let usage = "Usage: form <key>=<value> [<key>=<value> ...]";
    let mut form: Vec<(String, String)> = Vec::new();

    for word in rest.split_whitespace() {
        if word.contains('=') {
            form.push(parse_pair(word).map_err(CliError::InvalidInput)?);
        } else if let Some((_, value)) = form.last_mut() {
            if !value.is_empty() {
                value.push(' ');
            }
            value.push_str(word);
        } else {
            return Err(CliError::InvalidInput(usage.to_string()));
        }
    }
    if form.is_empty() {
        return Err(CliError::InvalidInput(usage.to_string()));
    }
    Ok(ReplCommand::Form(form.into_iter().collect()))
}

fn require(rest: &str, usage: &str) -> Result<String> {
    if rest.is_empty() {
        return Err(CliError::InvalidInput(format!("Usage: {}", usage)));
    }
    Ok(rest.to_string())
}

fn first_word(rest: &str, usage: &str) -> Result<String> {
    rest.split_whitespace()
        .next()
        .map(str::to_string)
        .ok_or_else(|| CliError::InvalidInput(format!("Usage: {}", usage)))
}

/// Execute a REPL command.
async fn execute_repl_command(
    cmd: ReplCommand,
    engine: &mut Engine,
    config: &Config,
    formatter: &Formatter,
) -> Result<()> {
    match cmd {
        ReplCommand::NaturalLanguage(text) => {
            engine.resolve(Input::NaturalLanguage(text))?;
            println!("{}", formatter.format_records(DEFAULT_MODE, engine)?);
        }
        ReplCommand::Form(form) => {
            engine.resolve(Input::Structured(form))?;
            println!("{}", formatter.format_records(DEFAULT_MODE, engine)?);
        }
        ReplCommand::Research(note) => {
            engine.resolve(Input::Research(note))?;
            println!("{}", formatter.format_records(DEFAULT_MODE, engine)?);
        }
        ReplCommand::Edit(key, value) => {
            let record = engine.edit(&key, &value)?;
            let message = if record.is_empty() {
                format!("Cleared '{}'", key)
            } else {
                format!("Set '{}' to '{}'", key, record.value)
            };
            println!("{}", formatter.success(&message));
        }
        ReplCommand::Confirm(key, confirmed) => {
            engine.set_confirmed(&key, confirmed)?;
            let verb = if confirmed { "Confirmed" } else { "Unconfirmed" };
            println!("{}", formatter.success(&format!("{} '{}'", verb, key)));
        }
        ReplCommand::Remediate(key, choice) => {
            let record = engine.remediate(&key, choice)?;
            println!(
                "{}",
                formatter.success(&format!("'{}' will be filled as {}", key, record.provenance))
            );
        }
        ReplCommand::Show => {
            println!("{}", formatter.format_records(DEFAULT_MODE, engine)?);
        }
        ReplCommand::Queue(threshold) => {
            let rows = match threshold {
                Some(threshold) => engine.review_queue(threshold),
                None => engine.default_review_queue(),
            };
            println!("{}", formatter.format_queue(&rows));
        }
        ReplCommand::Export(mode) => {
            println!("{}", commands::export_text(&mode, engine, formatter)?);
        }
        ReplCommand::Submit => {
            let profile = config.get_active_profile()?;
            commands::execute_submit(engine, profile, formatter).await?;
        }
        ReplCommand::Reset => {
            engine.reset()?;
            println!("{}", formatter.success("All fields cleared"));
        }
        ReplCommand::Metrics => {
            println!("{}", engine.metrics().summary());
        }
        ReplCommand::Exit | ReplCommand::Help => {}
    }

    Ok(())
}

fn get_history_path() -> Result<PathBuf> {
    let home = dirs::home_dir().ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
    let intake_dir = home.join(".intake");
    std::fs::create_dir_all(&intake_dir)?;
    Ok(intake_dir.join("history.txt"))
}

fn print_help(formatter: &Formatter) {
    println!("{}", formatter.info("Available commands:"));
    println!();
    println!("  nl <description>               - Extract fields from a free-text description");
    println!("  form <key>=<value> ...         - Set form fields (empty value clears)");
    println!("  research <note>                - Propose a research note for review");
    println!("  edit <key> [value]             - Manually set a field (no value clears it)");
    println!("  confirm <key>                  - Mark a field as trusted");
    println!("  unconfirm <key>                - Send a field back for review");
    println!("  remediate <key> <choice>       - Choose how an empty field gets filled");
    println!("    choice: manual | public | assumed");
    println!("  show                           - Show every field");
    println!("  queue [threshold]              - Show fields awaiting review");
    println!("  export [mode]                  - Print the export document");
    println!("  submit                         - Run the model on the confirmed fields");
    println!("  reset                          - Clear every field");
    println!("  metrics                        - Show session counters");
    println!("  help, ?                        - Show this help");
    println!("  quit, exit, q                  - Exit REPL");
    println!();
}
