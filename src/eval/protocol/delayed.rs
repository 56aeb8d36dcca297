//! Test-then-train evaluation with delayed labels
//!
//! Every example is tested as soon as it arrives, with its label hidden,
//! but only trained on `delay` steps later. Steps are 1-based: the example
//! arriving at step `s` is trained at step `s + delay`, before that step's
//! own test.
//!
//! With `label_probability` set, an example whose label is withheld never
//! enters the delay buffer. The learner sees it once, unlabeled, right after
//! it is tested. Warm-up examples are never masked.

use super::config::{DelayConfig, EvaluationConfig};
use super::delay::DelayBuffer;
use super::harness::{prepare_learner, Harness, EVALUATION_INSTANCES};
use super::mask::LabelMask;
use super::sink::PredictionWriter;
use crate::eval::evaluator::Evaluator;
use crate::learner::{max_index, Learner};
use crate::stream::Stream;
use crate::task::{Task, TaskMonitor, TaskResult};
use crate::Result;

/// Prequential evaluation where labels arrive after a fixed number of examples
pub struct DelayedPrequential {
    learner: Box<dyn Learner>,
    stream: Box<dyn Stream>,
    evaluator: Box<dyn Evaluator>,
    config: EvaluationConfig,
    delay: DelayConfig,
}

impl DelayedPrequential {
    pub fn new(
        learner: Box<dyn Learner>,
        stream: Box<dyn Stream>,
        evaluator: Box<dyn Evaluator>,
        config: EvaluationConfig,
        delay: DelayConfig,
    ) -> Self {
        Self { learner, stream, evaluator, config, delay }
    }
}

impl Task for DelayedPrequential {
    fn purpose(&self) -> String {
        "Evaluates a learner by testing each example and training on it only after the arrival \
         of other examples"
            .into()
    }

    fn run(&mut self, monitor: &TaskMonitor) -> Result<TaskResult> {
        prepare_learner(self.learner.as_mut(), self.stream.header(), self.config.random_seed);
        let mut harness = Harness::new(&self.config, monitor, EVALUATION_INSTANCES)?;
        let mut predictions =
            self.config.prediction_file.as_ref().map(PredictionWriter::open).transpose()?;
        let mut mask = LabelMask::from_config(&self.config);
        monitor.set_current_activity("Evaluating learner...", None);

        let mut buffer = DelayBuffer::new(self.delay.delay);
        let window = self.delay.initial_window;
        let mut processed = 0u64;

        while self.stream.has_more_instances() && harness.within_budget(processed) {
            let Some(example) = self.stream.next_instance() else {
                break;
            };
            processed += 1;

            if processed <= window {
                if self.delay.train_on_initial_window {
                    self.learner.train_on_instance(&example);
                } else if window - processed < buffer.delay() {
                    buffer.push(processed, example);
                }
                if processed == window {
                    harness.reset_sample_clock();
                }
            } else {
                let labeled = mask.as_mut().is_none_or(|mask| mask.keeps_label(&example));
                if labeled {
                    buffer.push(processed, example.clone());
                }
                if self.delay.train_in_batches {
                    if buffer.head_due(processed) {
                        for due in buffer.drain_all_but_newest() {
                            self.learner.train_on_instance(&due);
                        }
                    }
                } else {
                    while let Some(due) = buffer.pop_due(processed) {
                        self.learner.train_on_instance(&due);
                    }
                }

                let votes = self.learner.votes_for_instance(&example.with_label_hidden());
                if let Some(out) = predictions.as_mut() {
                    out.write(max_index(&votes), example.label)?;
                }
                self.evaluator.add_result(&example, &votes);
                if !labeled {
                    self.learner.train_on_instance(&example.with_label_hidden());
                }

                if harness.should_sample(processed, self.stream.has_more_instances()) {
                    harness.record_standard_with(
                        processed,
                        self.learner.measure_byte_size() as f64,
                        mask.iter().map(LabelMask::measurement).collect(),
                        self.evaluator.performance_measurements(),
                        self.learner.model_measurements(),
                    )?;
                }
            }

            if harness.memory_exceeded(processed, || self.learner.measure_byte_size()) {
                break;
            }
            if harness.checkpoint_due(processed)
                && harness.checkpoint(processed, self.stream.estimated_remaining_instances())
            {
                return Ok(harness.cancelled());
            }
        }
        Ok(harness.completed())
    }
}
