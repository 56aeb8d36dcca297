//! Core CLI types - Cli, Command and argument structs

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::types::OutputFormat;

/// Flujo: streaming-model evaluation harness
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "flujo")]
#[command(version)]
#[command(
    about = "Evaluate incremental learners on data streams (prequential, delayed, held-out, k-fold)"
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Run an evaluation task from YAML configuration
    Run(RunArgs),

    /// Validate a configuration file without running it
    Validate(ValidateArgs),
}

/// Arguments for the run command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct RunArgs {
    /// Path to YAML configuration file
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,

    /// Write the final learning curve here (overrides `output.path`)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Encoding of the final learning curve (overrides `output.format`)
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Status polling interval in milliseconds
    #[arg(long, default_value = "500")]
    pub progress_ms: u64,
}

/// Arguments for the validate command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct ValidateArgs {
    /// Path to YAML configuration file
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,

    /// Show detailed validation report
    #[arg(short, long)]
    pub detailed: bool,
}

/// Parse arguments, returning clap's error instead of exiting
pub fn parse_args<I, T>(args: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(args)
}
