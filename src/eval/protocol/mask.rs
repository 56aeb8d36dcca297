//! Random label withholding for semi-supervised runs
//!
//! Each tested example keeps its label with probability `label_probability`.
//! The draw is taken from a generator seeded with the run's random seed, so
//! the same configuration always hides the same examples.

use super::config::EvaluationConfig;
use crate::eval::curve::Measurement;
use crate::stream::Example;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Protocol measurement counting examples trained without their label
pub const UNLABELED_INSTANCES: &str = "Unlabeled instances";

/// Decides which examples reach the learner without their label
#[derive(Debug, Clone)]
pub struct LabelMask {
    label_probability: f64,
    rng: StdRng,
    unlabeled: u64,
}

impl LabelMask {
    pub fn new(label_probability: f64, seed: u64) -> Self {
        Self { label_probability, rng: StdRng::seed_from_u64(seed), unlabeled: 0 }
    }

    /// Mask for runs with `label_probability` set, seeded with the run's seed
    pub fn from_config(config: &EvaluationConfig) -> Option<Self> {
        config.label_probability.map(|p| Self::new(p, config.random_seed))
    }

    /// Whether `example` may be trained on with its label
    ///
    /// One draw is taken per call. Examples that arrive without a label are
    /// counted as unlabeled whatever the draw says.
    pub fn keeps_label(&mut self, example: &Example) -> bool {
        let drawn = self.label_probability > self.rng.random::<f64>();
        let keeps = drawn && example.label.is_some();
        if !keeps {
            self.unlabeled += 1;
        }
        keeps
    }

    /// Examples hidden so far
    pub fn unlabeled(&self) -> u64 {
        self.unlabeled
    }

    pub fn measurement(&self) -> Measurement {
        Measurement::new(UNLABELED_INSTANCES, self.unlabeled as f64)
    }
}
