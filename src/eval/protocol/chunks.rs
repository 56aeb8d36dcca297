//! Chunked test-then-train evaluation
//!
//! Each chunk is tested as a whole with the model trained on all previous
//! chunks, then used for training. The first chunk is only trained on.
//!
//! Abort checks follow the tests and training calls themselves, not the chunk
//! boundaries, so a cancelled run stops within `monitor_update_interval`
//! steps even when chunks are much larger.

use super::config::{ChunkConfig, EvaluationConfig};
use super::harness::{
    prepare_learner, Harness, EVALUATION_INSTANCES, EVALUATION_TIME, RAM_HOURS,
};
use crate::eval::curve::{Measurement, Snapshot};
use crate::eval::evaluator::Evaluator;
use crate::learner::Learner;
use crate::stream::Stream;
use crate::task::{Task, TaskMonitor, TaskResult};
use crate::Result;
use std::time::{Duration, Instant};

/// Tests on each chunk before training on it
pub struct InterleavedChunks {
    learner: Box<dyn Learner>,
    stream: Box<dyn Stream>,
    evaluator: Box<dyn Evaluator>,
    config: EvaluationConfig,
    chunks: ChunkConfig,
}

impl InterleavedChunks {
    pub fn new(
        learner: Box<dyn Learner>,
        stream: Box<dyn Stream>,
        evaluator: Box<dyn Evaluator>,
        config: EvaluationConfig,
        chunks: ChunkConfig,
    ) -> Self {
        Self { learner, stream, evaluator, config, chunks }
    }
}

impl Task for InterleavedChunks {
    fn purpose(&self) -> String {
        "Evaluates a learner on a stream by testing then training with chunks of data in sequence"
            .into()
    }

    fn run(&mut self, monitor: &TaskMonitor) -> Result<TaskResult> {
        prepare_learner(self.learner.as_mut(), self.stream.header(), self.config.random_seed);
        let mut harness = Harness::new(&self.config, monitor, EVALUATION_INSTANCES)?;
        monitor.set_current_activity("Evaluating learner...", None);

        let chunk_size = self.chunks.chunk_size.max(1);
        let mut processed = 0u64;
        // Tests plus training calls, the unit of the abort-check cadence
        let mut steps = 0u64;
        let mut first_chunk = true;
        let mut sample_test = Duration::ZERO;
        let mut sample_train = Duration::ZERO;
        let mut chunks_since_sample = 0u32;

        while self.stream.has_more_instances() && harness.within_budget(processed) {
            let target = self
                .config
                .instance_limit
                .map_or(chunk_size, |limit| chunk_size.min(limit.saturating_sub(processed)));
            let mut chunk = Vec::with_capacity(target as usize);
            while (chunk.len() as u64) < target {
                let Some(example) = self.stream.next_instance() else {
                    break;
                };
                chunk.push(example);
                if harness.checkpoint_due(chunk.len() as u64)
                    && harness.checkpoint(processed, self.stream.estimated_remaining_instances())
                {
                    return Ok(harness.cancelled());
                }
            }
            if chunk.is_empty() {
                break;
            }

            let test_start = Instant::now();
            if first_chunk {
                first_chunk = false;
            } else {
                for example in &chunk {
                    let votes = self.learner.votes_for_instance(example);
                    self.evaluator.add_result(example, &votes);
                    steps += 1;
                    if harness.checkpoint_due(steps) {
                        let remaining = self.stream.estimated_remaining_instances();
                        if harness.checkpoint(processed, remaining) {
                            return Ok(harness.cancelled());
                        }
                    }
                }
            }
            sample_test += test_start.elapsed();

            let train_start = Instant::now();
            for example in &chunk {
                self.learner.train_on_instance(example);
                processed += 1;
                steps += 1;
                if harness.checkpoint_due(steps) {
                    let remaining = self.stream.estimated_remaining_instances();
                    if harness.checkpoint(processed, remaining) {
                        return Ok(harness.cancelled());
                    }
                }
            }
            sample_train += train_start.elapsed();
            chunks_since_sample += 1;

            if harness.should_sample(processed, self.stream.has_more_instances()) {
                let bytes = self.learner.measure_byte_size() as f64;
                let cost = harness.accrue_ram_hours_over(bytes, sample_train + sample_test);
                let chunks = f64::from(chunks_since_sample);
                let chunk_len = chunk.len() as f64;
                let avg_train = sample_train.as_secs_f64() / chunks;
                let avg_test = sample_test.as_secs_f64() / chunks;
                sample_train = Duration::ZERO;
                sample_test = Duration::ZERO;
                chunks_since_sample = 0;

                let protocol = vec![
                    Measurement::new(EVALUATION_INSTANCES, processed as f64),
                    Measurement::new(EVALUATION_TIME, harness.elapsed_secs()),
                    Measurement::new("average chunk train time", avg_train),
                    Measurement::new("average chunk train speed", chunk_len / avg_train),
                    Measurement::new("average chunk test time", avg_test),
                    Measurement::new("average chunk test speed", chunk_len / avg_test),
                    Measurement::new(RAM_HOURS, cost),
                ];
                let snapshot = Snapshot::from_parts(
                    protocol,
                    self.evaluator.performance_measurements(),
                    self.learner.model_measurements(),
                );
                harness.record(processed, snapshot)?;
            }

            if harness.memory_exceeded(processed, || self.learner.measure_byte_size()) {
                break;
            }
        }
        Ok(harness.completed())
    }
}
