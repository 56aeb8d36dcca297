//! Baseline learners

use super::Learner;
use crate::eval::curve::Measurement;
use crate::stream::{Example, StreamHeader};

/// Predicts the class with the largest accumulated training weight
#[derive(Clone, Debug, Default)]
pub struct MajorityClass {
    class_weights: Vec<f64>,
}

impl MajorityClass {
    /// Create an untrained majority-class learner
    pub fn new() -> Self {
        Self::default()
    }
}

impl Learner for MajorityClass {
    fn set_model_context(&mut self, header: &StreamHeader) {
        if self.class_weights.len() < header.num_classes {
            self.class_weights.resize(header.num_classes, 0.0);
        }
    }

    fn train_on_instance(&mut self, example: &Example) {
        let Some(class) = example.class_index() else {
            return;
        };
        if class >= self.class_weights.len() {
            self.class_weights.resize(class + 1, 0.0);
        }
        self.class_weights[class] += example.weight;
    }

    fn votes_for_instance(&self, _example: &Example) -> Vec<f64> {
        self.class_weights.clone()
    }

    fn measure_byte_size(&self) -> usize {
        std::mem::size_of::<Self>() + self.class_weights.capacity() * std::mem::size_of::<f64>()
    }

    fn copy(&self) -> Box<dyn Learner> {
        Box::new(self.clone())
    }

    fn reset_learning(&mut self) {
        self.class_weights.iter_mut().for_each(|w| *w = 0.0);
    }

    fn model_measurements(&self) -> Vec<Measurement> {
        let observed = self.class_weights.iter().filter(|w| **w > 0.0).count();
        vec![Measurement::new("observed classes", observed as f64)]
    }
}

/// Predicts the label of the most recent training example
#[derive(Clone, Debug, Default)]
pub struct NoChange {
    last_label: Option<usize>,
    num_classes: usize,
}

impl NoChange {
    /// Create an untrained no-change learner
    pub fn new() -> Self {
        Self::default()
    }
}

impl Learner for NoChange {
    fn set_model_context(&mut self, header: &StreamHeader) {
        self.num_classes = header.num_classes;
    }

    fn train_on_instance(&mut self, example: &Example) {
        if let Some(class) = example.class_index() {
            self.last_label = Some(class);
            self.num_classes = self.num_classes.max(class + 1);
        }
    }

    fn votes_for_instance(&self, _example: &Example) -> Vec<f64> {
        let mut votes = vec![0.0; self.num_classes];
        if let Some(class) = self.last_label {
            votes[class] = 1.0;
        }
        votes
    }

    fn measure_byte_size(&self) -> usize {
        std::mem::size_of::<Self>()
    }

    fn copy(&self) -> Box<dyn Learner> {
        Box::new(self.clone())
    }

    fn reset_learning(&mut self) {
        self.last_label = None;
    }
}
