//! Configuration validation logic

use super::error::ValidationError;
use crate::config::schema::{EvaluatorSpec, RunSpec, StreamSpec, TaskSpec};
use std::path::Path;

/// Validate a run specification
///
/// Checks:
/// - Budgets and cadences are positive
/// - Label masking is a probability, on a protocol that supports it
/// - Protocol settings are in range
/// - Stream and evaluator settings are in range
/// - Output files can be created (their directory exists)
pub fn validate_spec(spec: &RunSpec) -> Result<(), ValidationError> {
    let eval = &spec.evaluation;

    if eval.instance_limit == Some(0) {
        return Err(ValidationError::InvalidInstanceLimit(0));
    }
    if eval.time_limit_secs == Some(0) {
        return Err(ValidationError::InvalidTimeLimit(0));
    }
    if eval.mem_check_frequency == 0 {
        return Err(ValidationError::InvalidMemCheckFrequency(0));
    }
    if eval.monitor_update_interval == 0 {
        return Err(ValidationError::InvalidMonitorInterval(0));
    }
    if let Some(p) = eval.label_probability {
        if !(0.0..=1.0).contains(&p) {
            return Err(ValidationError::InvalidLabelProbability(p));
        }
        if !matches!(spec.task, TaskSpec::Prequential | TaskSpec::Delayed(_)) {
            return Err(ValidationError::UnsupportedLabelProbability(spec.task.protocol_name()));
        }
    }

    match &spec.task {
        TaskSpec::Prequential => {}
        TaskSpec::Chunks(chunks) => {
            if chunks.chunk_size == 0 {
                return Err(ValidationError::InvalidChunkSize(0));
            }
        }
        TaskSpec::Delayed(delayed) => {
            if delayed.delay == 0 {
                return Err(ValidationError::InvalidDelay(0));
            }
        }
        TaskSpec::HeldOut(held_out) => {
            if held_out.test_size == 0 {
                return Err(ValidationError::InvalidTestSize(0));
            }
        }
        TaskSpec::Kfold(kfold) => {
            if kfold.folds == 0 {
                return Err(ValidationError::InvalidFolds(0));
            }
            if kfold.delay == Some(0) {
                return Err(ValidationError::InvalidDelay(0));
            }
        }
    }

    match &spec.stream {
        StreamSpec::Hyperplane { num_features, noise, .. } => {
            if *num_features == 0 {
                return Err(ValidationError::InvalidNumFeatures(0));
            }
            if !(0.0..=1.0).contains(noise) {
                return Err(ValidationError::InvalidNoise(*noise));
            }
        }
        StreamSpec::Inline { num_classes, examples } => {
            if *num_classes == 0 {
                return Err(ValidationError::InvalidNumClasses(0));
            }
            if let Some(first) = examples.first() {
                let expected = first.features.len();
                let mismatch =
                    examples.iter().enumerate().find(|(_, ex)| ex.features.len() != expected);
                if let Some((index, ex)) = mismatch {
                    let found = ex.features.len();
                    return Err(ValidationError::InconsistentFeatures { index, expected, found });
                }
            }
        }
    }

    if let EvaluatorSpec::Window { width: 0 } = spec.evaluator {
        return Err(ValidationError::InvalidWindowWidth(0));
    }

    let outputs = [
        eval.dump_file.as_deref(),
        eval.prediction_file.as_deref(),
        spec.output.as_ref().map(|o| o.path.as_path()),
    ];
    for path in outputs.into_iter().flatten() {
        check_parent_dir(path)?;
    }

    Ok(())
}

fn check_parent_dir(path: &Path) -> Result<(), ValidationError> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() && !dir.is_dir() => {
            Err(ValidationError::OutputDirNotFound(dir.display().to_string()))
        }
        _ => Ok(()),
    }
}
