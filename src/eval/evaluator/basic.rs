//! Cumulative classification evaluator

use super::tally::{Outcome, Tally};
use super::Evaluator;
use crate::eval::curve::Measurement;
use crate::learner::max_index;
use crate::stream::Example;

/// Accuracy and kappa over every result seen since the last reset
#[derive(Clone, Debug, Default)]
pub struct BasicClassificationEvaluator {
    tally: Tally,
}

impl BasicClassificationEvaluator {
    /// Create an empty evaluator
    pub fn new() -> Self {
        Self::default()
    }
}

impl Evaluator for BasicClassificationEvaluator {
    fn add_result(&mut self, example: &Example, votes: &[f64]) {
        let Some(truth) = example.class_index() else {
            return;
        };
        if example.weight <= 0.0 {
            return;
        }
        self.tally.add(Outcome { truth, predicted: max_index(votes), weight: example.weight });
    }

    fn performance_measurements(&self) -> Vec<Measurement> {
        self.tally.measurements()
    }

    fn reset(&mut self) {
        self.tally = Tally::default();
    }

    fn copy(&self) -> Box<dyn Evaluator> {
        Box::new(self.clone())
    }
}
