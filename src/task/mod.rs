//! Task execution and control
//!
//! This module provides the pieces that run an evaluation protocol and let
//! a controller observe it:
//! - `Task` - unit of work with a single `run` contract
//! - `TaskResult` - what a finished task hands back
//! - `TaskMonitor` - pause/cancel/progress/preview channel
//! - `TaskThread` - runs a task on its own thread and tracks its lifecycle
//! - `FailedTaskReport` - structured cause of a FAILED task

mod monitor;
mod report;
mod thread;


pub use monitor::{ResultPreviewListener, TaskMonitor};
pub use report::FailedTaskReport;
pub use thread::{ListenerId, TaskCompletionListener, TaskStatus, TaskThread};

use crate::eval::curve::LearningCurve;
use crate::Result;
use serde::{Deserialize, Serialize};

/// Outcome of a task run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum TaskResult {
    /// The task ran to completion
    Completed { curve: LearningCurve },
    /// The task stopped on request; carries the partial curve if one exists
    Cancelled { curve: Option<LearningCurve> },
    /// The task raised an error or panicked
    Failed { report: FailedTaskReport },
}

impl TaskResult {
    /// Learning curve carried by this result, complete or partial
    pub fn curve(&self) -> Option<&LearningCurve> {
        match self {
            Self::Completed { curve } => Some(curve),
            Self::Cancelled { curve } => curve.as_ref(),
            Self::Failed { .. } => None,
        }
    }

    /// Failure report, if the task failed
    pub fn failure(&self) -> Option<&FailedTaskReport> {
        match self {
            Self::Failed { report } => Some(report),
            _ => None,
        }
    }

    /// Whether the task was cancelled
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }
}

/// A runnable unit of work
pub trait Task: Send {
    /// Short description shown as the initial activity
    fn purpose(&self) -> String;

    /// Run to completion, checking `monitor` at the task's own checkpoints
    ///
    /// Returns `Cancelled` when the monitor requested an abort. Errors are
    /// reserved for resource failures such as an unwritable output file.
    fn run(&mut self, monitor: &TaskMonitor) -> Result<TaskResult>;
}
