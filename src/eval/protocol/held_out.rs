//! Periodic held-out evaluation
//!
//! Alternates training blocks of `sample_frequency` examples with a full
//! pass over a held-out test set. The evaluator is reset before each pass,
//! so every snapshot describes one round rather than the whole run.
//!
//! With `cache_test` the first `test_size` examples are set aside and
//! replayed every round. Without it each round tests on the next
//! `test_size` examples of the live stream, which therefore differ between
//! rounds.

use super::config::{EvaluationConfig, HeldOutConfig};
use super::harness::{prepare_learner, Harness};
use crate::eval::curve::{Measurement, Snapshot};
use crate::eval::evaluator::Evaluator;
use crate::learner::Learner;
use crate::stream::{Stream, VecStream};
use crate::task::{Task, TaskMonitor, TaskResult};
use crate::Result;
use std::time::Instant;

/// Ordering measurement of the held-out curve
pub const HELD_OUT_INSTANCES: &str = "evaluation instances";

/// Trains in blocks and tests on a held-out set after each block
pub struct PeriodicHeldOut {
    learner: Box<dyn Learner>,
    stream: Box<dyn Stream>,
    evaluator: Box<dyn Evaluator>,
    config: EvaluationConfig,
    held_out: HeldOutConfig,
}

impl PeriodicHeldOut {
    pub fn new(
        learner: Box<dyn Learner>,
        stream: Box<dyn Stream>,
        evaluator: Box<dyn Evaluator>,
        config: EvaluationConfig,
        held_out: HeldOutConfig,
    ) -> Self {
        Self { learner, stream, evaluator, config, held_out }
    }

    fn cache_test_set(&mut self, harness: &Harness<'_>) -> Option<VecStream> {
        harness.monitor().set_current_activity("Caching test examples...", None);
        let test_size = self.held_out.test_size;
        let mut cached = Vec::new();
        while (cached.len() as u64) < test_size {
            let Some(example) = self.stream.next_instance() else {
                break;
            };
            cached.push(example);
            let n = cached.len() as u64;
            if harness.checkpoint_due(n)
                && harness.checkpoint_at(Some(n as f64 / test_size as f64))
            {
                return None;
            }
        }
        Some(VecStream::new(self.stream.header().clone(), cached))
    }

    fn train_fraction(&self, processed: u64) -> Option<f64> {
        (self.held_out.train_size > 0).then(|| processed as f64 / self.held_out.train_size as f64)
    }
}

impl Task for PeriodicHeldOut {
    fn purpose(&self) -> String {
        "Evaluates a learner on a stream by periodically testing on a held-out set".into()
    }

    fn run(&mut self, monitor: &TaskMonitor) -> Result<TaskResult> {
        prepare_learner(self.learner.as_mut(), self.stream.header(), self.config.random_seed);
        let mut harness = Harness::new(&self.config, monitor, HELD_OUT_INSTANCES)?;

        let mut cache = None;
        if self.held_out.cache_test {
            match self.cache_test_set(&harness) {
                Some(stream) => cache = Some(stream),
                None => return Ok(harness.cancelled()),
            }
        }

        let test_size = self.held_out.test_size;
        let train_size = self.held_out.train_size;
        let block = match self.config.sample_frequency {
            0 => u64::MAX,
            n => n,
        };
        let mut processed = 0u64;
        let mut total_train_time = 0.0;

        while (train_size == 0 || processed < train_size) && self.stream.has_more_instances() {
            monitor.set_current_activity_description("Training...");
            let block_start = processed;
            let target = processed.saturating_add(block);
            let train_start = Instant::now();
            while processed < target && self.stream.has_more_instances() {
                let Some(example) = self.stream.next_instance() else {
                    break;
                };
                self.learner.train_on_instance(&example);
                processed += 1;
                if harness.checkpoint_due(processed)
                    && harness.checkpoint_at(self.train_fraction(processed))
                {
                    return Ok(harness.cancelled());
                }
            }
            let last_train_time = train_start.elapsed().as_secs_f64();
            total_train_time += last_train_time;
            if total_train_time > self.held_out.train_time_secs as f64 {
                tracing::info!(total_train_time, "training time budget spent");
                break;
            }

            if let Some(cached) = cache.as_mut() {
                cached.restart();
            }
            self.evaluator.reset();
            let activity = match self.train_fraction(processed) {
                Some(f) => format!("Testing (after {:.2}% training)...", f * 100.0),
                None => format!("Testing (after {processed} training examples)..."),
            };
            monitor.set_current_activity_description(activity);

            let test_start = Instant::now();
            let mut tested = 0u64;
            while tested < test_size {
                let source: &mut dyn Stream = match cache.as_mut() {
                    Some(cached) => cached,
                    None => self.stream.as_mut(),
                };
                if !source.has_more_instances() {
                    break;
                }
                let Some(example) = source.next_instance() else {
                    break;
                };
                let votes = self.learner.votes_for_instance(&example);
                self.evaluator.add_result(&example, &votes);
                tested += 1;
                if harness.checkpoint_due(tested)
                    && harness.checkpoint_at(Some(tested as f64 / test_size as f64))
                {
                    return Ok(harness.cancelled());
                }
            }
            if tested != test_size {
                tracing::info!(tested, test_size, "stream ended before a full held-out pass");
                break;
            }
            let test_time = test_start.elapsed().as_secs_f64();

            let protocol = vec![
                Measurement::new(HELD_OUT_INSTANCES, processed as f64),
                Measurement::new("total train time", total_train_time),
                Measurement::new("total train speed", processed as f64 / total_train_time),
                Measurement::new("last train time", last_train_time),
                Measurement::new(
                    "last train speed",
                    (processed - block_start) as f64 / last_train_time,
                ),
                Measurement::new("test time", test_time),
                Measurement::new("test speed", test_size as f64 / test_time),
            ];
            let snapshot = Snapshot::from_parts(
                protocol,
                self.evaluator.performance_measurements(),
                self.learner.model_measurements(),
            );
            harness.record(processed, snapshot)?;
            harness.service_preview();
        }
        Ok(harness.completed())
    }
}
