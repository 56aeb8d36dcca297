//! Example streams
//!
//! A [`Stream`] yields [`Example`]s one at a time. Streams are external
//! collaborators of the harness; the two built-in sources exist so the
//! binary and the test-suite have something to evaluate against:
//!
//! - [`VecStream`] - an in-memory, restartable stream (also used to cache
//!   held-out test sets)
//! - [`HyperplaneStream`] - a seeded synthetic two-class generator

mod hyperplane;
mod memory;

pub use hyperplane::HyperplaneStream;
pub use memory::VecStream;

use serde::{Deserialize, Serialize};

/// One stream record: features, an optional label and a training weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Example {
    /// Feature values
    pub features: Vec<f64>,
    /// Class index or regression target; `None` when withheld
    pub label: Option<f64>,
    /// Instance weight
    pub weight: f64,
}

impl Example {
    /// Create a labeled example with unit weight
    pub fn new(features: Vec<f64>, label: f64) -> Self {
        Self { features, label: Some(label), weight: 1.0 }
    }

    /// Create an unlabeled example with unit weight
    pub fn unlabeled(features: Vec<f64>) -> Self {
        Self { features, label: None, weight: 1.0 }
    }

    /// Copy of this example with the label withheld
    #[must_use]
    pub fn with_label_hidden(&self) -> Self {
        Self { features: self.features.clone(), label: None, weight: self.weight }
    }

    /// Copy of this example with a different weight
    #[must_use]
    pub fn with_weight(&self, weight: f64) -> Self {
        Self { features: self.features.clone(), label: self.label, weight }
    }

    /// Label as a class index, if present and non-negative
    pub fn class_index(&self) -> Option<usize> {
        self.label.filter(|l| *l >= 0.0).map(|l| l as usize)
    }
}

/// Schema shared by every example of a stream
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamHeader {
    /// Relation name
    pub name: String,
    /// Number of feature attributes
    pub num_features: usize,
    /// Number of classes (0 for regression streams)
    pub num_classes: usize,
}

impl StreamHeader {
    /// Create a new header
    pub fn new(name: impl Into<String>, num_features: usize, num_classes: usize) -> Self {
        Self { name: name.into(), num_features, num_classes }
    }
}

/// A source of examples
pub trait Stream: Send {
    /// Schema of the examples this stream yields
    fn header(&self) -> &StreamHeader;

    /// Whether another example is available
    fn has_more_instances(&self) -> bool;

    /// Next example, or `None` once exhausted
    fn next_instance(&mut self) -> Option<Example>;

    /// Advisory count of remaining examples; `None` when unknown
    fn estimated_remaining_instances(&self) -> Option<u64>;

    /// Rewind to the first example
    fn restart(&mut self);
}

impl<S: Stream + ?Sized> Stream for Box<S> {
    fn header(&self) -> &StreamHeader {
        (**self).header()
    }

    fn has_more_instances(&self) -> bool {
        (**self).has_more_instances()
    }

    fn next_instance(&mut self) -> Option<Example> {
        (**self).next_instance()
    }

    fn estimated_remaining_instances(&self) -> Option<u64> {
        (**self).estimated_remaining_instances()
    }

    fn restart(&mut self) {
        (**self).restart();
    }
}
