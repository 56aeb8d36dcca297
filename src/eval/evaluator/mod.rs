//! Performance evaluators
//!
//! An [`Evaluator`] accumulates `(example, votes)` pairs and reports the
//! current performance as measurements. Protocols treat it as opaque:
//! they feed it, read it at sampling points, reset it (held-out rounds)
//! and copy it (one per k-fold member).

mod basic;
mod tally;
mod window;


pub use basic::BasicClassificationEvaluator;
pub use window::WindowClassificationEvaluator;

use crate::eval::curve::Measurement;
use crate::stream::Example;

/// Measurement name for the number of evaluated instances
pub const CLASSIFIED_INSTANCES: &str = "classified instances";
/// Measurement name for accuracy
pub const ACCURACY_PERCENT: &str = "classifications correct (percent)";
/// Measurement name for Cohen's kappa
pub const KAPPA_PERCENT: &str = "Kappa Statistic (percent)";

/// Accumulator of prediction-vs-truth statistics
pub trait Evaluator: Send {
    /// Record the votes produced for `example` (whose label is the truth)
    fn add_result(&mut self, example: &Example, votes: &[f64]);

    /// Current performance
    fn performance_measurements(&self) -> Vec<Measurement>;

    /// Discard accumulated state
    fn reset(&mut self);

    /// Deep copy
    fn copy(&self) -> Box<dyn Evaluator>;
}
