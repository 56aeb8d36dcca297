//! Seeded synthetic hyperplane generator

use super::{Example, Stream, StreamHeader};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Two-class stream separated by a random hyperplane
///
/// Features are drawn uniformly from `[0, 1)`. The label is 1 when the
/// weighted feature sum reaches half of the total weight, 0 otherwise, and is
/// flipped with probability `noise`.
#[derive(Debug, Clone)]
pub struct HyperplaneStream {
    header: StreamHeader,
    seed: u64,
    noise: f64,
    max_instances: Option<u64>,
    weights: Vec<f64>,
    rng: StdRng,
    produced: u64,
}

impl HyperplaneStream {
    /// Create a generator with `num_features` attributes
    pub fn new(seed: u64, num_features: usize) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let weights = (0..num_features).map(|_| rng.random::<f64>()).collect();
        Self {
            header: StreamHeader::new("hyperplane", num_features, 2),
            seed,
            noise: 0.0,
            max_instances: None,
            weights,
            rng,
            produced: 0,
        }
    }

    /// Probability of flipping each label
    pub fn with_noise(mut self, noise: f64) -> Self {
        self.noise = noise.clamp(0.0, 1.0);
        self
    }

    /// Stop after `max` examples
    pub fn with_max_instances(mut self, max: u64) -> Self {
        self.max_instances = Some(max);
        self
    }
}

impl Stream for HyperplaneStream {
    fn header(&self) -> &StreamHeader {
        &self.header
    }

    fn has_more_instances(&self) -> bool {
        self.max_instances.is_none_or(|max| self.produced < max)
    }

    fn next_instance(&mut self) -> Option<Example> {
        if !self.has_more_instances() {
            return None;
        }
        let features: Vec<f64> =
            (0..self.weights.len()).map(|_| self.rng.random::<f64>()).collect();
        let sum: f64 = features.iter().zip(&self.weights).map(|(x, w)| x * w).sum();
        let threshold = self.weights.iter().sum::<f64>() / 2.0;
        let mut label = if sum >= threshold { 1.0 } else { 0.0 };
        if self.noise > 0.0 && self.rng.random::<f64>() < self.noise {
            label = 1.0 - label;
        }
        self.produced += 1;
        Some(Example::new(features, label))
    }

    fn estimated_remaining_instances(&self) -> Option<u64> {
        self.max_instances.map(|max| max.saturating_sub(self.produced))
    }

    fn restart(&mut self) {
        let fresh = Self::new(self.seed, self.weights.len());
        self.weights = fresh.weights;
        self.rng = fresh.rng;
        self.produced = 0;
    }
}
