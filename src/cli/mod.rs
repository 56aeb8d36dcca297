//! CLI module for flujo
//!
//! This module contains the CLI command handlers and output helpers.

mod commands;
mod logging;

pub use commands::run_command;
pub use logging::LogLevel;

// Re-export Cli from config for convenience
pub use crate::config::Cli;
