//! Intake CLI - Resolve financial-model assumptions from the command line.

use anyhow::Context;
use clap::Parser;
use intake_cli::commands;
use intake_cli::repl;
use intake_cli::{Cli, Command, Config, Formatter};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

/// Log to stderr; `INTAKE_LOG` sets the filter unless `--verbose` is given.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env("INTAKE_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    // Load or create config
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::load().unwrap_or_else(|_| {
            let cfg = Config::default();
            cfg.save().ok();
            cfg
        }),
    };

    // Override profile if specified
    if let Some(profile_name) = cli.profile {
        config.switch_profile(profile_name)?;
    }

    // Determine output format
    let format = cli.format.map(Into::into).unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    let formatter = Formatter::new(format, color_enabled);

    let command = match cli.command {
        Some(Command::Profile(args)) => {
            commands::execute_profile(args, &mut config, &formatter)?;
            return Ok(());
        }
        command => command,
    };

    let mut engine = commands::build_engine(&config, cli.schema.as_deref()).context("Failed to set up the engine")?;

    match command {
        None | Some(Command::Repl) => {
            repl::run_repl(&mut engine, &config, &formatter).await?;
        }
        Some(Command::Resolve(args)) => {
            let profile = config.get_active_profile()?;
            commands::execute_resolve(args, &mut engine, profile, &formatter).await?;
        }
        Some(Command::Export(args)) => {
            commands::execute_export(args, &mut engine, &formatter)?;
        }
        Some(Command::Schema) => {
            commands::execute_schema(engine.registry(), &formatter)?;
        }
        Some(Command::Profile(_)) => unreachable!(),
    }

    Ok(())
}
