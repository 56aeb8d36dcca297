//! Validation error types

/// Validation error type
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid instance limit: {0} (must be > 0 when set)")]
    InvalidInstanceLimit(u64),

    #[error("Invalid time limit: {0} seconds (must be > 0 when set)")]
    InvalidTimeLimit(u64),

    #[error("Invalid memory check frequency: {0} (must be > 0)")]
    InvalidMemCheckFrequency(u64),

    #[error("Invalid monitor update interval: {0} (must be > 0)")]
    InvalidMonitorInterval(u64),

    #[error("Invalid label probability: {0} (must be in [0.0, 1.0])")]
    InvalidLabelProbability(f64),

    #[error("label_probability is not supported by the {0} protocol")]
    UnsupportedLabelProbability(&'static str),

    #[error("Invalid delay: {0} (must be > 0)")]
    InvalidDelay(u64),

    #[error("Invalid chunk size: {0} (must be > 0)")]
    InvalidChunkSize(u64),

    #[error("Invalid held-out test size: {0} (must be > 0)")]
    InvalidTestSize(u64),

    #[error("Invalid number of folds: {0} (must be > 0)")]
    InvalidFolds(usize),

    #[error("Invalid number of features: {0} (must be > 0)")]
    InvalidNumFeatures(usize),

    #[error("Invalid noise: {0} (must be in [0.0, 1.0])")]
    InvalidNoise(f64),

    #[error("Invalid number of classes: {0} (must be > 0)")]
    InvalidNumClasses(usize),

    #[error("Inline example {index} has {found} features (expected {expected})")]
    InconsistentFeatures { index: usize, expected: usize, found: usize },

    #[error("Invalid window width: {0} (must be > 0)")]
    InvalidWindowWidth(usize),

    #[error("Output directory does not exist: {0}")]
    OutputDirNotFound(String),
}
