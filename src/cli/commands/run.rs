//! Run command implementation

use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::{build_task, load_spec, OutputFormat, RunArgs, RunSpec};
use crate::eval::curve::LearningCurve;
use crate::error::{Error, Result};
use crate::task::{TaskResult, TaskThread};
use std::fs;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

/// Resolve where the final curve goes: CLI flags win over `output` in the spec
pub fn resolve_output(args: &RunArgs, spec: &RunSpec) -> Option<(PathBuf, OutputFormat)> {
    let path = args.output.clone().or_else(|| spec.output.as_ref().map(|o| o.path.clone()))?;
    let format = args.format.or_else(|| spec.output.as_ref().map(|o| o.format)).unwrap_or_default();
    Some((path, format))
}

/// Write a learning curve in the requested encoding
pub fn write_curve(curve: &LearningCurve, path: &Path, format: OutputFormat) -> Result<()> {
    let body = match format {
        OutputFormat::Csv => curve.to_csv(),
        OutputFormat::Json => serde_json::to_string_pretty(curve)?,
    };
    fs::write(path, body)
        .map_err(|e| Error::io(format!("writing result file {}", path.display()), e))
}

/// Announce line for a task that has not started yet
pub fn format_task(task: &TaskThread) -> String {
    format!("Task: {}", task.monitor().current_activity_description())
}

/// One progress line for a running task; the seconds are wall-clock time
pub fn format_progress(task: &TaskThread) -> String {
    let fraction = task
        .current_activity_fraction_complete()
        .map_or_else(String::new, |f| format!(" ({:.1}%)", f * 100.0));
    format!(
        "[{}] {:.1}s wall {}{}",
        task.current_status_string(),
        task.elapsed_seconds(),
        task.current_activity_string(),
        fraction
    )
}

pub fn run_run(args: RunArgs, level: LogLevel) -> std::result::Result<(), String> {
    log(level, LogLevel::Normal, &format!("Loading config: {}", args.config.display()));
    let spec = load_spec(&args.config).map_err(|e| format!("Config error: {e}"))?;

    let task = TaskThread::new(build_task(&spec));
    log(level, LogLevel::Normal, &format_task(&task));
    task.start().map_err(|e| format!("Failed to start task: {e}"))?;

    let interval = Duration::from_millis(args.progress_ms.max(1));
    while !task.is_complete() {
        thread::sleep(interval);
        log(level, LogLevel::Verbose, &format_progress(&task));
    }

    let result = task.join().ok_or_else(|| "Task finished without a result".to_string())?;
    let curve = match &result {
        TaskResult::Failed { report } => {
            return Err(format!("Task failed after {:.2}s\n{report}", task.elapsed_seconds()));
        }
        TaskResult::Completed { curve } => curve,
        TaskResult::Cancelled { curve } => match curve {
            Some(curve) => curve,
            None => return Err("Task was cancelled before producing a result".to_string()),
        },
    };

    log(
        level,
        LogLevel::Normal,
        &format!(
            "Task {} in {:.2}s wall ({} learning curve entries)",
            task.current_status_string(),
            task.elapsed_seconds(),
            curve.num_entries()
        ),
    );

    match resolve_output(&args, &spec) {
        Some((path, format)) => {
            write_curve(curve, &path, format).map_err(|e| format!("Output error: {e}"))?;
            log(level, LogLevel::Normal, &format!("Wrote {format} result to {}", path.display()));
        }
        None if level != LogLevel::Quiet => print!("{}", curve.to_csv()),
        None => {}
    }

    Ok(())
}
