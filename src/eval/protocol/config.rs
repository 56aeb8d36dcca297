//! Evaluation protocol settings
//!
//! Every cadence and budget the loops use lives here and is handed to the
//! protocol constructor by value.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Settings shared by every protocol
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationConfig {
    /// Maximum number of instances to process (`None` = unlimited)
    #[serde(default = "default_instance_limit")]
    pub instance_limit: Option<u64>,

    /// Maximum evaluation seconds (`None` = unlimited)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_limit_secs: Option<u64>,

    /// Instances between snapshots; 0 keeps only the final forced snapshot
    #[serde(default = "default_frequency")]
    pub sample_frequency: u64,

    /// Instances between model size checks
    #[serde(default = "default_frequency")]
    pub mem_check_frequency: u64,

    /// Stop once the model grows beyond this many bytes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_memory_bytes: Option<u64>,

    /// Instances between abort checks and progress updates
    #[serde(default = "default_monitor_update_interval")]
    pub monitor_update_interval: u64,

    /// File receiving each snapshot as it is produced
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dump_file: Option<PathBuf>,

    /// File receiving one `predicted,true` line per tested example
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prediction_file: Option<PathBuf>,

    /// Seed for randomizable learners, bootstrap weights and label masking
    #[serde(default = "default_random_seed")]
    pub random_seed: u64,

    /// Chance that a tested example keeps its label for training (prequential
    /// and delayed only); `None` trains on every label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_probability: Option<f64>,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            instance_limit: default_instance_limit(),
            time_limit_secs: None,
            sample_frequency: default_frequency(),
            mem_check_frequency: default_frequency(),
            max_memory_bytes: None,
            monitor_update_interval: default_monitor_update_interval(),
            dump_file: None,
            prediction_file: None,
            random_seed: default_random_seed(),
            label_probability: None,
        }
    }
}

fn default_instance_limit() -> Option<u64> {
    Some(100_000_000)
}

fn default_frequency() -> u64 {
    100_000
}

fn default_monitor_update_interval() -> u64 {
    10
}

fn default_random_seed() -> u64 {
    1
}

/// Delayed-label settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DelayConfig {
    /// Steps between arrival and training (at least 1)
    #[serde(default = "default_delay")]
    pub delay: u64,

    /// Warm-up instances that are never tested
    #[serde(default = "default_delay")]
    pub initial_window: u64,

    /// Train on warm-up instances immediately instead of delaying them
    #[serde(default)]
    pub train_on_initial_window: bool,

    /// Once the buffer head is due, train on everything but the newest instance
    #[serde(default)]
    pub train_in_batches: bool,
}

impl Default for DelayConfig {
    fn default() -> Self {
        Self {
            delay: default_delay(),
            initial_window: default_delay(),
            train_on_initial_window: false,
            train_in_batches: false,
        }
    }
}

fn default_delay() -> u64 {
    1000
}

/// Periodic held-out settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeldOutConfig {
    /// Instances in each held-out pass
    #[serde(default = "default_test_size")]
    pub test_size: u64,

    /// Total training instances (0 = unlimited)
    #[serde(default)]
    pub train_size: u64,

    /// Training seconds after which the run stops
    #[serde(default = "default_train_time_secs")]
    pub train_time_secs: u64,

    /// Cache the first `test_size` instances and replay them every round
    #[serde(default)]
    pub cache_test: bool,
}

impl Default for HeldOutConfig {
    fn default() -> Self {
        Self {
            test_size: default_test_size(),
            train_size: 0,
            train_time_secs: default_train_time_secs(),
            cache_test: false,
        }
    }
}

fn default_test_size() -> u64 {
    1_000_000
}

fn default_train_time_secs() -> u64 {
    36_000
}

/// Chunked test-then-train settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkConfig {
    /// Instances per chunk
    #[serde(default = "default_chunk_size")]
    pub chunk_size: u64,
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self { chunk_size: default_chunk_size() }
    }
}

fn default_chunk_size() -> u64 {
    1000
}

/// How each k-fold member picks its training weight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationMode {
    /// Member `i` skips instances with `index % k == i`
    #[default]
    CrossValidation,
    /// Weight drawn from Poisson(1) per member
    Bootstrap,
    /// Member `i` trains only on instances with `index % k == i`
    SplitValidation,
}

/// K-fold online validation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KFoldConfig {
    /// Number of members
    #[serde(default = "default_folds")]
    pub folds: usize,

    /// Weighting scheme
    #[serde(default)]
    pub validation: ValidationMode,

    /// Per-member label delay (`None` = train immediately)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delay: Option<u64>,
}

impl Default for KFoldConfig {
    fn default() -> Self {
        Self { folds: default_folds(), validation: ValidationMode::default(), delay: None }
    }
}

fn default_folds() -> usize {
    10
}
