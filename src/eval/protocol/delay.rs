//! FIFO of examples waiting for their label to become available

use crate::stream::Example;
use std::collections::VecDeque;

/// Examples queued with the step at which they may be trained on
///
/// Steps are pushed in non-decreasing order, so only the head ever needs
/// to be inspected.
#[derive(Debug, Clone)]
pub struct DelayBuffer {
    delay: u64,
    queue: VecDeque<(u64, Example)>,
}

impl DelayBuffer {
    /// Create a buffer releasing examples `delay` steps after arrival (at least 1)
    pub fn new(delay: u64) -> Self {
        Self { delay: delay.max(1), queue: VecDeque::new() }
    }

    /// Steps between arrival and release
    pub fn delay(&self) -> u64 {
        self.delay
    }

    /// Queue `example`, which arrived at `step`
    pub fn push(&mut self, step: u64, example: Example) {
        self.queue.push_back((step + self.delay, example));
    }

    /// Whether the head is due at `step`
    pub fn head_due(&self, step: u64) -> bool {
        self.queue.front().is_some_and(|(release_at, _)| *release_at <= step)
    }

    /// Pop the head if it is due at `step`
    pub fn pop_due(&mut self, step: u64) -> Option<Example> {
        if self.head_due(step) {
            self.queue.pop_front().map(|(_, example)| example)
        } else {
            None
        }
    }

    /// Remove every queued example except the newest
    pub fn drain_all_but_newest(&mut self) -> Vec<Example> {
        let keep = self.queue.len().min(1);
        let n = self.queue.len() - keep;
        self.queue.drain(..n).map(|(_, example)| example).collect()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
