//! Flujo CLI
//!
//! Runs evaluation tasks described by YAML run specifications.
//!
//! # Usage
//!
//! ```bash
//! # Run an evaluation and write the final curve
//! flujo run config.yaml --output curve.csv
//!
//! # Follow progress while it runs
//! flujo -v run config.yaml --progress-ms 200
//!
//! # Validate config
//! flujo validate config.yaml --detailed
//! ```
//!
//! Library diagnostics go to stderr through `tracing`; set `RUST_LOG` to
//! change the filter (default `warn`, `info` with `--verbose`).

use clap::Parser;
use flujo::cli::{run_command, Cli};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: bool) {
    let default = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).compact().init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run_command(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
