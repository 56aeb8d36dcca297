//! Interleaved test-then-train evaluation
//!
//! With `label_probability` set, each example is still tested with its label
//! but may be trained on with the label hidden, and every snapshot reports
//! how many examples went unlabeled.

use super::config::EvaluationConfig;
use super::harness::{prepare_learner, Harness, EVALUATION_INSTANCES};
use super::mask::LabelMask;
use super::sink::PredictionWriter;
use crate::eval::evaluator::Evaluator;
use crate::learner::{max_index, Learner};
use crate::stream::Stream;
use crate::task::{Task, TaskMonitor, TaskResult};
use crate::Result;

/// Tests the learner on every example, then trains on it
pub struct Prequential {
    learner: Box<dyn Learner>,
    stream: Box<dyn Stream>,
    evaluator: Box<dyn Evaluator>,
    config: EvaluationConfig,
}

impl Prequential {
    pub fn new(
        learner: Box<dyn Learner>,
        stream: Box<dyn Stream>,
        evaluator: Box<dyn Evaluator>,
        config: EvaluationConfig,
    ) -> Self {
        Self { learner, stream, evaluator, config }
    }

    /// Learner under evaluation
    pub fn learner(&self) -> &dyn Learner {
        self.learner.as_ref()
    }
}

impl Task for Prequential {
    fn purpose(&self) -> String {
        "Evaluates a learner by testing then training with each example in sequence".into()
    }

    fn run(&mut self, monitor: &TaskMonitor) -> Result<TaskResult> {
        prepare_learner(self.learner.as_mut(), self.stream.header(), self.config.random_seed);
        let mut harness = Harness::new(&self.config, monitor, EVALUATION_INSTANCES)?;
        let mut predictions =
            self.config.prediction_file.as_ref().map(PredictionWriter::open).transpose()?;
        let mut mask = LabelMask::from_config(&self.config);
        monitor.set_current_activity("Evaluating learner...", None);

        let mut processed = 0u64;
        while self.stream.has_more_instances() && harness.within_budget(processed) {
            let Some(example) = self.stream.next_instance() else {
                break;
            };
            let votes = self.learner.votes_for_instance(&example);
            if let Some(out) = predictions.as_mut() {
                out.write(max_index(&votes), example.label)?;
            }
            self.evaluator.add_result(&example, &votes);
            match mask.as_mut().map(|mask| mask.keeps_label(&example)) {
                Some(false) => {
                    self.learner.train_on_instance(&example.with_label_hidden());
                }
                _ => self.learner.train_on_instance(&example),
            }
            processed += 1;

            if harness.should_sample(processed, self.stream.has_more_instances()) {
                harness.record_standard_with(
                    processed,
                    self.learner.measure_byte_size() as f64,
                    mask.iter().map(LabelMask::measurement).collect(),
                    self.evaluator.performance_measurements(),
                    self.learner.model_measurements(),
                )?;
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
