//! YAML schema for declarative evaluation runs
//!
//! ```yaml
//! task:
//!   protocol: delayed
//!   delay: 500
//! evaluation:
//!   sample_frequency: 10000
//!   dump_file: curve.csv
//! stream:
//!   kind: hyperplane
//!   num_features: 10
//!   max_instances: 100000
//! learner:
//!   kind: majority_class
//! evaluator:
//!   kind: window
//!   width: 1000
//! ```

use super::cli::OutputFormat;
use crate::eval::protocol::{ChunkConfig, DelayConfig, EvaluationConfig, HeldOutConfig, KFoldConfig};
use crate::stream::Example;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Complete run specification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSpec {
    /// Evaluation protocol and its protocol-specific settings
    pub task: TaskSpec,

    /// Budgets, sampling cadence and output files shared by every protocol
    #[serde(default)]
    pub evaluation: EvaluationConfig,

    /// Example source
    pub stream: StreamSpec,

    /// Learner under evaluation
    #[serde(default)]
    pub learner: LearnerSpec,

    /// Performance evaluator
    #[serde(default)]
    pub evaluator: EvaluatorSpec,

    /// Where the CLI writes the final learning curve
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<OutputSpec>,
}

/// Evaluation protocol, tagged by `protocol`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "protocol", rename_all = "snake_case")]
pub enum TaskSpec {
    /// Interleaved test-then-train
    Prequential,
    /// Test-then-train on chunks of examples
    Chunks(ChunkConfig),
    /// Train `delay` examples after arrival
    Delayed(DelayConfig),
    /// Train in blocks and test on a held-out set
    HeldOut(HeldOutConfig),
    /// Cross-validation, bootstrap or split-validation over learner copies
    Kfold(KFoldConfig),
}

impl TaskSpec {
    /// Protocol name as written in YAML
    pub fn protocol_name(&self) -> &'static str {
        match self {
            TaskSpec::Prequential => "prequential",
            TaskSpec::Chunks(_) => "chunks",
            TaskSpec::Delayed(_) => "delayed",
            TaskSpec::HeldOut(_) => "held_out",
            TaskSpec::Kfold(_) => "kfold",
        }
    }
}

/// Example source, tagged by `kind`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StreamSpec {
    /// Seeded synthetic hyperplane generator
    Hyperplane {
        #[serde(default = "default_seed")]
        seed: u64,
        #[serde(default = "default_num_features")]
        num_features: usize,
        #[serde(default)]
        noise: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max_instances: Option<u64>,
    },
    /// Examples listed in the file itself
    Inline {
        #[serde(default = "default_num_classes")]
        num_classes: usize,
        examples: Vec<InlineExample>,
    },
}

fn default_seed() -> u64 {
    1
}

fn default_num_features() -> usize {
    10
}

fn default_num_classes() -> usize {
    2
}

/// One example of an inline stream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InlineExample {
    pub features: Vec<f64>,
    #[serde(default)]
    pub label: Option<f64>,
    #[serde(default = "default_weight")]
    pub weight: f64,
}

fn default_weight() -> f64 {
    1.0
}

impl From<&InlineExample> for Example {
    fn from(inline: &InlineExample) -> Self {
        Example { features: inline.features.clone(), label: inline.label, weight: inline.weight }
    }
}

/// Learner under evaluation, tagged by `kind`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LearnerSpec {
    /// Predicts the most frequent class seen so far
    #[default]
    MajorityClass,
    /// Predicts the last label seen
    NoChange,
}

/// Performance evaluator, tagged by `kind`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EvaluatorSpec {
    /// Cumulative accuracy and kappa
    #[default]
    Basic,
    /// Accuracy and kappa over the most recent `width` examples
    Window {
        #[serde(default = "default_window_width")]
        width: usize,
    },
}

fn default_window_width() -> usize {
    1000
}

/// Final result file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputSpec {
    pub path: PathBuf,
    #[serde(default)]
    pub format: OutputFormat,
}
