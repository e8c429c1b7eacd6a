//! Intake CLI library.
//!
//! This library provides the core functionality for the `intake` command-line
//! interface: configuration and schema loading, command execution, the
//! interactive review loop, and output formatting.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod export;
pub mod output;
pub mod repl;
pub mod schema;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;
