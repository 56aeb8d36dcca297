//! Weighted confusion counts shared by the classification evaluators

use super::{ACCURACY_PERCENT, CLASSIFIED_INSTANCES, KAPPA_PERCENT};
use crate::eval::curve::Measurement;

/// One evaluated prediction
#[derive(Clone, Copy, Debug, PartialEq)]
pub(super) struct Outcome {
    pub truth: usize,
    pub predicted: Option<usize>,
    pub weight: f64,
}

/// Running weighted counts of true and predicted classes
#[derive(Clone, Debug, Default)]
pub(super) struct Tally {
    total_weight: f64,
    correct_weight: f64,
    true_weights: Vec<f64>,
    predicted_weights: Vec<f64>,
}

impl Tally {
    pub fn add(&mut self, outcome: Outcome) {
        self.apply(outcome, 1.0);
    }

    pub fn remove(&mut self, outcome: Outcome) {
        self.apply(outcome, -1.0);
    }

    fn apply(&mut self, outcome: Outcome, sign: f64) {
        let w = outcome.weight * sign;
        self.total_weight += w;
        bump(&mut self.true_weights, outcome.truth, w);
        if let Some(p) = outcome.predicted {
            bump(&mut self.predicted_weights, p, w);
            if p == outcome.truth {
                self.correct_weight += w;
            }
        }
    }

    pub fn accuracy(&self) -> f64 {
        if self.total_weight > 0.0 {
            self.correct_weight / self.total_weight
        } else {
            0.0
        }
    }

    /// Cohen's kappa; 0 when chance agreement is total
    pub fn kappa(&self) -> f64 {
        if self.total_weight <= 0.0 {
            return 0.0;
        }
        let chance: f64 = self
            .true_weights
            .iter()
            .enumerate()
            .map(|(c, t)| {
                let p = self.predicted_weights.get(c).copied().unwrap_or(0.0);
                (t / self.total_weight) * (p / self.total_weight)
            })
            .sum();
        if (1.0 - chance).abs() < f64::EPSILON {
            return 0.0;
        }
        (self.accuracy() - chance) / (1.0 - chance)
    }

    pub fn measurements(&self) -> Vec<Measurement> {
        vec![
            Measurement::new(CLASSIFIED_INSTANCES, self.total_weight),
            Measurement::new(ACCURACY_PERCENT, self.accuracy() * 100.0),
            Measurement::new(KAPPA_PERCENT, self.kappa() * 100.0),
        ]
    }
}

fn bump(counts: &mut Vec<f64>, index: usize, by: f64) {
    if index >= counts.len() {
        counts.resize(index + 1, 0.0);
    }
    counts[index] += by;
}
