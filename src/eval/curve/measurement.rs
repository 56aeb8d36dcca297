//! Named numeric samples

use serde::{Deserialize, Serialize};
use std::fmt;

/// An immutable `(name, value)` sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    name: String,
    value: f64,
}

impl Measurement {
    /// Create a new measurement
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self { name: name.into(), value }
    }

    /// Measurement name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Measurement value
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Find a measurement by name
    pub fn find<'a>(measurements: &'a [Measurement], name: &str) -> Option<&'a Measurement> {
        measurements.iter().find(|m| m.name == name)
    }

    /// Per-name arithmetic mean over several measurement sets
    ///
    /// Names and their order come from the first set. A name missing from
    /// some sets is averaged over the sets that carry it.
    pub fn average(sets: &[Vec<Measurement>]) -> Vec<Measurement> {
        let Some(first) = sets.first() else {
            return Vec::new();
        };
        first
            .iter()
            .map(|m| {
                let values: Vec<f64> = sets
                    .iter()
                    .filter_map(|set| Self::find(set, &m.name).map(Measurement::value))
                    .collect();
                let mean = values.iter().sum::<f64>() / values.len() as f64;
                Measurement::new(m.name.clone(), mean)
            })
            .collect()
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.name, self.value)
    }
}
