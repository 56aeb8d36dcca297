//! Shared fixtures for integration tests
#![allow(dead_code)]

use flujo::stream::{Example, Stream, StreamHeader, VecStream};
use flujo::task::TaskMonitor;
use flujo::Learner;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

/// Example `i` carries features `[i, i % 2]` and label `i % 2`
pub fn indexed_examples(n: usize) -> Vec<Example> {
    (0..n).map(|i| Example::new(vec![i as f64, (i % 2) as f64], (i % 2) as f64)).collect()
}

pub fn indexed(n: usize) -> Box<dyn Stream> {
    Box::new(VecStream::new(StreamHeader::new("indexed", 2, 2), indexed_examples(n)))
}

/// One training call seen by a [`Recorder`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainCall {
    /// Ensemble member that trained (`usize::MAX` for the prototype)
    pub member: usize,
    /// One-based processing step: tests performed by this member so far, plus one
    pub step: u64,
    /// Stream index of the example
    pub index: usize,
    pub weight: f64,
}

/// Zero-error learner that logs every training call
///
/// Votes for the label stored in feature 1. Copies become numbered ensemble
/// members sharing the same log.
#[derive(Clone)]
pub struct Recorder {
    member: usize,
    next_member: Arc<AtomicU64>,
    tests: Arc<AtomicU64>,
    log: Arc<Mutex<Vec<TrainCall>>>,
    bytes: usize,
}

impl Recorder {
    pub fn new() -> Self {
        Self {
            member: usize::MAX,
            next_member: Arc::new(AtomicU64::new(0)),
            tests: Arc::new(AtomicU64::new(0)),
            log: Arc::new(Mutex::new(Vec::new())),
            bytes: 4096,
        }
    }

    pub fn calls(&self) -> Vec<TrainCall> {
        self.log.lock().unwrap().clone()
    }

    /// Indices member `member` trained on, in training order
    pub fn trained_by(&self, member: usize) -> Vec<usize> {
        self.calls().iter().filter(|c| c.member == member).map(|c| c.index).collect()
    }
}

impl Learner for Recorder {
    fn train_on_instance(&mut self, example: &Example) {
        self.log.lock().unwrap().push(TrainCall {
            member: self.member,
            step: self.tests.load(Ordering::SeqCst) + 1,
            index: example.features[0] as usize,
            weight: example.weight,
        });
    }

    fn votes_for_instance(&self, example: &Example) -> Vec<f64> {
        self.tests.fetch_add(1, Ordering::SeqCst);
        let mut votes = vec![0.0, 0.0];
        votes[example.features[1] as usize] = 1.0;
        votes
    }

    fn measure_byte_size(&self) -> usize {
        self.bytes
    }

    fn copy(&self) -> Box<dyn Learner> {
        let member = self.next_member.fetch_add(1, Ordering::SeqCst) as usize;
        Box::new(Recorder { member, tests: Arc::new(AtomicU64::new(0)), ..self.clone() })
    }
}

/// Learner that counts training calls, optionally sleeping in each one
///
/// `steps` counts tests and training calls together. With `cancel_at` set,
/// the learner requests cancellation from inside step number `cancel_at`.
#[derive(Clone)]
pub struct Counting {
    pub trained: Arc<AtomicU64>,
    pub steps: Arc<AtomicU64>,
    pub sleep: Option<std::time::Duration>,
    pub panic_at: Option<u64>,
    pub cancel_at: Option<(u64, Arc<TaskMonitor>)>,
}

impl Counting {
    pub fn new() -> Self {
        Self {
            trained: Arc::new(AtomicU64::new(0)),
            steps: Arc::new(AtomicU64::new(0)),
            sleep: None,
            panic_at: None,
            cancel_at: None,
        }
    }

    pub fn count(&self) -> u64 {
        self.trained.load(Ordering::SeqCst)
    }

    pub fn step_count(&self) -> u64 {
        self.steps.load(Ordering::SeqCst)
    }

    fn step(&self) {
        let n = self.steps.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some((at, monitor)) = &self.cancel_at {
            if *at == n {
                monitor.request_cancel();
            }
        }
    }
}

impl Learner for Counting {
    fn train_on_instance(&mut self, _example: &Example) {
        self.step();
        let n = self.trained.fetch_add(1, Ordering::SeqCst) + 1;
        if self.panic_at == Some(n) {
            panic!("learner diverged at example {n}");
        }
        if let Some(d) = self.sleep {
            std::thread::sleep(d);
        }
    }

    fn votes_for_instance(&self, _example: &Example) -> Vec<f64> {
        self.step();
        vec![1.0, 0.0]
    }

    fn measure_byte_size(&self) -> usize {
        512 + 8 * self.count() as usize
    }

    fn copy(&self) -> Box<dyn Learner> {
        Box::new(self.clone())
    }
}

/// Indexed stream that requests cancellation while yielding example `cancel_at` (1-based)
pub struct CancellingStream {
    inner: VecStream,
    yielded: u64,
    cancel_at: u64,
    monitor: Arc<TaskMonitor>,
}

impl CancellingStream {
    pub fn new(n: usize, cancel_at: u64, monitor: Arc<TaskMonitor>) -> Self {
        let inner = VecStream::new(StreamHeader::new("indexed", 2, 2), indexed_examples(n));
        Self { inner, yielded: 0, cancel_at, monitor }
    }
}

impl Stream for CancellingStream {
    fn header(&self) -> &StreamHeader {
        self.inner.header()
    }

    fn has_more_instances(&self) -> bool {
        self.inner.has_more_instances()
    }

    fn next_instance(&mut self) -> Option<Example> {
        self.yielded += 1;
        if self.yielded == self.cancel_at {
            self.monitor.request_cancel();
        }
        self.inner.next_instance()
    }

    fn estimated_remaining_instances(&self) -> Option<u64> {
        self.inner.estimated_remaining_instances()
    }

    fn restart(&mut self) {
        self.inner.restart();
        self.yielded = 0;
    }
}
