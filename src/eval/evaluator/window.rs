//! Sliding-window classification evaluator

use super::tally::{Outcome, Tally};
use super::Evaluator;
use crate::eval::curve::Measurement;
use crate::learner::max_index;
use crate::stream::Example;
use std::collections::VecDeque;

/// Accuracy and kappa over the most recent `width` results
#[derive(Clone, Debug)]
pub struct WindowClassificationEvaluator {
    width: usize,
    window: VecDeque<Outcome>,
    tally: Tally,
}

impl WindowClassificationEvaluator {
    /// Create an evaluator over a window of `width` results
    pub fn new(width: usize) -> Self {
        let width = width.max(1);
        Self { width, window: VecDeque::with_capacity(width), tally: Tally::default() }
    }

    /// Window width
    pub fn width(&self) -> usize {
        self.width
    }
}

impl Default for WindowClassificationEvaluator {
    fn default() -> Self {
        Self::new(1000)
    }
}

impl Evaluator for WindowClassificationEvaluator {
    fn add_result(&mut self, example: &Example, votes: &[f64]) {
        let Some(truth) = example.class_index() else {
            return;
        };
        if example.weight <= 0.0 {
            return;
        }
        let outcome = Outcome { truth, predicted: max_index(votes), weight: example.weight };
        if self.window.len() == self.width {
            if let Some(oldest) = self.window.pop_front() {
                self.tally.remove(oldest);
            }
        }
        self.window.push_back(outcome);
        self.tally.add(outcome);
    }

    fn performance_measurements(&self) -> Vec<Measurement> {
        self.tally.measurements()
    }

    fn reset(&mut self) {
        self.window.clear();
        self.tally = Tally::default();
    }

    fn copy(&self) -> Box<dyn Evaluator> {
        Box::new(self.clone())
    }
}
