//! In-memory restartable stream

use super::{Example, Stream, StreamHeader};

/// Stream over a fixed vector of examples
#[derive(Debug, Clone)]
pub struct VecStream {
    header: StreamHeader,
    examples: Vec<Example>,
    position: usize,
}

impl VecStream {
    /// Create a stream over `examples`
    pub fn new(header: StreamHeader, examples: Vec<Example>) -> Self {
        Self { header, examples, position: 0 }
    }

    /// Number of examples held
    pub fn len(&self) -> usize {
        self.examples.len()
    }

    /// Check if the stream holds no examples
    pub fn is_empty(&self) -> bool {
        self.examples.is_empty()
    }
}

impl Stream for VecStream {
    fn header(&self) -> &StreamHeader {
        &self.header
    }

    fn has_more_instances(&self) -> bool {
        self.position < self.examples.len()
    }

    fn next_instance(&mut self) -> Option<Example> {
        let example = self.examples.get(self.position).cloned()?;
        self.position += 1;
        Some(example)
    }

    fn estimated_remaining_instances(&self) -> Option<u64> {
        Some((self.examples.len() - self.position) as u64)
    }

    fn restart(&mut self) {
        self.position = 0;
    }
}
