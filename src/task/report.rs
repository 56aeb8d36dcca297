//! Structured failure report for tasks that did not finish

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::error::Error as StdError;
use std::fmt;

/// Why a task ended in the FAILED state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailedTaskReport {
    /// Top-level failure message
    pub message: String,
    /// Underlying causes, outermost first
    pub causes: Vec<String>,
    /// When the failure was captured
    pub failed_at: DateTime<Utc>,
}

impl FailedTaskReport {
    /// Build a report from an error, walking its `source()` chain
    pub fn from_error(err: &(dyn StdError + 'static)) -> Self {
        let mut causes = Vec::new();
        let mut source = err.source();
        while let Some(cause) = source {
            causes.push(cause.to_string());
            source = cause.source();
        }
        Self { message: err.to_string(), causes, failed_at: Utc::now() }
    }

    /// Build a report from a caught panic payload
    pub fn from_panic(payload: &(dyn Any + Send)) -> Self {
        let detail = payload
            .downcast_ref::<&str>()
            .map(|s| (*s).to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic payload".to_string());
        Self { message: "Task panicked".to_string(), causes: vec![detail], failed_at: Utc::now() }
    }
}

impl fmt::Display for FailedTaskReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Failure reason: {}", self.message)?;
        for cause in &self.causes {
            write!(f, "\n  caused by: {cause}")?;
        }
        Ok(())
    }
}
