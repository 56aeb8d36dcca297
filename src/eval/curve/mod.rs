//! Learning curves
//!
//! A [`LearningCurve`] is the append-only record of one evaluation run: one
//! [`Snapshot`] per sampling point. Its textual projection
//! ([`LearningCurve::header_to_string`] / [`LearningCurve::entry_to_string`])
//! is shared by the incremental dump file and by the final export, so a dump
//! written line by line during a run is byte-identical to
//! [`LearningCurve::to_csv`] on the finished curve.

mod measurement;

#[cfg(test)]
mod tests;

pub use measurement::Measurement;

use serde::{Deserialize, Serialize};
use std::io::Write;

/// Placeholder for a header name an entry does not carry
const MISSING_VALUE: &str = "?";

/// One entry of a learning curve: the measurements taken at one sampling point
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    measurements: Vec<Measurement>,
}

impl Snapshot {
    /// Create a snapshot from measurements
    pub fn new(measurements: Vec<Measurement>) -> Self {
        Self { measurements }
    }

    /// Concatenate protocol, evaluator and model measurements
    pub fn from_parts(
        protocol: Vec<Measurement>,
        performance: Vec<Measurement>,
        model: Vec<Measurement>,
    ) -> Self {
        let mut measurements = protocol;
        measurements.extend(performance);
        measurements.extend(model);
        Self { measurements }
    }

    /// All measurements in insertion order
    pub fn measurements(&self) -> &[Measurement] {
        &self.measurements
    }

    /// Value of the measurement called `name`
    pub fn value(&self, name: &str) -> Option<f64> {
        Measurement::find(&self.measurements, name).map(Measurement::value)
    }

    /// Number of measurements
    pub fn len(&self) -> usize {
        self.measurements.len()
    }

    /// Check if the snapshot is empty
    pub fn is_empty(&self) -> bool {
        self.measurements.is_empty()
    }
}

/// Ordered, append-only sequence of snapshots with a fixed header
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningCurve {
    ordering_measurement_name: String,
    header: Vec<String>,
    entries: Vec<Snapshot>,
}

impl LearningCurve {
    /// Create an empty curve ordered by `ordering_measurement_name`
    pub fn new(ordering_measurement_name: impl Into<String>) -> Self {
        Self {
            ordering_measurement_name: ordering_measurement_name.into(),
            header: Vec::new(),
            entries: Vec::new(),
        }
    }

    /// Name of the measurement entries are ordered by
    pub fn ordering_measurement_name(&self) -> &str {
        &self.ordering_measurement_name
    }

    /// Append an entry
    ///
    /// The first entry fixes the header. Later entries are projected onto it
    /// by name; a mismatch is logged, never rejected.
    pub fn insert_entry(&mut self, entry: Snapshot) {
        if self.entries.is_empty() && self.header.is_empty() {
            self.header = entry.measurements.iter().map(|m| m.name().to_string()).collect();
        } else if entry.len() != self.header.len() {
            tracing::warn!(
                expected = self.header.len(),
                actual = entry.len(),
                "learning curve entry arity differs from header"
            );
        }
        self.entries.push(entry);
    }

    /// Number of entries
    pub fn num_entries(&self) -> usize {
        self.entries.len()
    }

    /// Check if no entry was recorded
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry at `index`
    pub fn entry(&self, index: usize) -> Option<&Snapshot> {
        self.entries.get(index)
    }

    /// All entries in creation order
    pub fn entries(&self) -> &[Snapshot] {
        &self.entries
    }

    /// Measurement names fixed by the first entry
    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// Values of one column, skipping entries that lack it
    pub fn column(&self, name: &str) -> Vec<f64> {
        self.entries.iter().filter_map(|e| e.value(name)).collect()
    }

    /// Comma-joined header line
    pub fn header_to_string(&self) -> String {
        self.header.join(",")
    }

    /// Comma-joined values of entry `index`, in header order
    pub fn entry_to_string(&self, index: usize) -> Option<String> {
        let entry = self.entries.get(index)?;
        let fields: Vec<String> = self
            .header
            .iter()
            .map(|name| {
                entry
                    .value(name)
                    .map_or_else(|| MISSING_VALUE.to_string(), |v| v.to_string())
            })
            .collect();
        Some(fields.join(","))
    }

    /// Header line followed by one line per entry, each newline-terminated
    pub fn to_csv(&self) -> String {
        let mut out = String::new();
        if self.header.is_empty() {
            return out;
        }
        out.push_str(&self.header_to_string());
        out.push('\n');
        for line in (0..self.entries.len()).filter_map(|i| self.entry_to_string(i)) {
            out.push_str(&line);
            out.push('\n');
        }
        out
    }

    /// Write [`Self::to_csv`] to `writer`
    pub fn write_csv<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.write_all(self.to_csv().as_bytes())?;
        writer.flush()
    }
}
