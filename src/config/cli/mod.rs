//! CLI argument parsing
//!
//! # Usage
//!
//! ```bash
//! flujo run config.yaml
//! flujo run config.yaml --output curve.json --format json
//! flujo validate config.yaml --detailed
//! ```

mod core;
mod types;

pub use core::{parse_args, Cli, Command, RunArgs, ValidateArgs};
pub use types::OutputFormat;
