//! Learner capability consumed by the evaluation protocols
//!
//! The harness never looks inside a model: it asks for votes, trains, copies
//! and measures byte size. [`MajorityClass`] and [`NoChange`] are reference
//! baselines so an evaluation can be run without any external model.

mod baseline;

pub use baseline::{MajorityClass, NoChange};

use crate::eval::curve::Measurement;
use crate::stream::{Example, StreamHeader};

/// A trainable model under evaluation
pub trait Learner: Send {
    /// Inform the model of the stream schema before any training
    fn set_model_context(&mut self, _header: &StreamHeader) {}

    /// Train on one (weighted) example
    fn train_on_instance(&mut self, example: &Example);

    /// Class votes (or a single regression value) for `example`
    fn votes_for_instance(&self, example: &Example) -> Vec<f64>;

    /// Approximate in-memory model size in bytes
    fn measure_byte_size(&self) -> usize;

    /// Deep copy, including learned state
    fn copy(&self) -> Box<dyn Learner>;

    /// Forget everything learned so far
    fn reset_learning(&mut self) {}

    /// Whether the model consumes a random seed
    fn is_randomizable(&self) -> bool {
        false
    }

    /// Seed the model's randomness
    fn set_random_seed(&mut self, _seed: u64) {}

    /// Model-specific measurements appended to each snapshot
    fn model_measurements(&self) -> Vec<Measurement> {
        Vec::new()
    }
}

/// Index of the largest vote, ties resolved towards the lower index
pub fn max_index(votes: &[f64]) -> Option<usize> {
    votes
        .iter()
        .enumerate()
        .fold(None, |best: Option<(usize, f64)>, (i, &v)| match best {
            Some((_, b)) if b >= v => best,
            _ => Some((i, v)),
        })
        .map(|(i, _)| i)
}
