//! K-fold online validation: cross-validation, bootstrap and split-validation
//!
//! `folds` independent (learner, evaluator) members share one stream. Every
//! member is tested on each example before any member trains on it; the
//! training weight of each member is then chosen by the validation mode.
//! Example indices are 0-based.

use super::config::{EvaluationConfig, KFoldConfig, ValidationMode};
use super::delay::DelayBuffer;
use super::harness::{prepare_learner, Harness, EVALUATION_INSTANCES};
use crate::eval::curve::Measurement;
use crate::eval::evaluator::Evaluator;
use crate::learner::Learner;
use crate::stream::Stream;
use crate::task::{Task, TaskMonitor, TaskResult};
use crate::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Number of times member `member` of `folds` trains on example `index`
pub fn training_weight(
    mode: ValidationMode,
    index: u64,
    member: usize,
    folds: usize,
    rng: &mut impl Rng,
) -> u32 {
    let held_out = index % folds.max(1) as u64 == member as u64;
    match mode {
        ValidationMode::CrossValidation => u32::from(!held_out),
        ValidationMode::SplitValidation => u32::from(held_out),
        ValidationMode::Bootstrap => poisson_one(rng),
    }
}

/// Draw from Poisson(1) by multiplying uniforms (Knuth)
fn poisson_one(rng: &mut impl Rng) -> u32 {
    let threshold = (-1.0f64).exp();
    let mut k = 0;
    let mut p = 1.0;
    loop {
        p *= rng.random::<f64>();
        if p <= threshold {
            return k;
        }
        k += 1;
    }
}

struct Member {
    learner: Box<dyn Learner>,
    evaluator: Box<dyn Evaluator>,
    buffer: Option<DelayBuffer>,
}

/// Ensemble of learner copies evaluated on a shared stream
pub struct KFoldPrequential {
    learner: Box<dyn Learner>,
    stream: Box<dyn Stream>,
    evaluator: Box<dyn Evaluator>,
    config: EvaluationConfig,
    kfold: KFoldConfig,
}

impl KFoldPrequential {
    pub fn new(
        learner: Box<dyn Learner>,
        stream: Box<dyn Stream>,
        evaluator: Box<dyn Evaluator>,
        config: EvaluationConfig,
        kfold: KFoldConfig,
    ) -> Self {
        Self { learner, stream, evaluator, config, kfold }
    }

    fn members(&mut self) -> Vec<Member> {
        self.learner.reset_learning();
        prepare_learner(self.learner.as_mut(), self.stream.header(), self.config.random_seed);
        (0..self.kfold.folds.max(1))
            .map(|_| {
                let mut learner = self.learner.copy();
                learner.set_model_context(self.stream.header());
                Member {
                    learner,
                    evaluator: self.evaluator.copy(),
                    buffer: self.kfold.delay.map(DelayBuffer::new),
                }
            })
            .collect()
    }
}

impl Task for KFoldPrequential {
    fn purpose(&self) -> String {
        match self.kfold.delay {
            Some(_) => "Evaluates a learner with delayed k-fold online validation".into(),
            None => "Evaluates a learner with k-fold online validation".into(),
        }
    }

    fn run(&mut self, monitor: &TaskMonitor) -> Result<TaskResult> {
        let mut members = self.members();
        let folds = members.len();
        let mut rng = StdRng::seed_from_u64(self.config.random_seed);
        let mut harness = Harness::new(&self.config, monitor, EVALUATION_INSTANCES)?;
        monitor.set_current_activity("Evaluating learner...", None);

        let mut processed = 0u64;
        while self.stream.has_more_instances() && harness.within_budget(processed) {
            let Some(example) = self.stream.next_instance() else {
                break;
            };
            let index = processed;
            processed += 1;

            for member in &mut members {
                let votes = member.learner.votes_for_instance(&example);
                member.evaluator.add_result(&example, &votes);
            }

            for (i, member) in members.iter_mut().enumerate() {
                let k = training_weight(self.kfold.validation, index, i, folds, &mut rng);
                match member.buffer.as_mut() {
                    None => {
                        if k > 0 {
                            let weighted = example.with_weight(example.weight * f64::from(k));
                            member.learner.train_on_instance(&weighted);
                        }
                    }
                    Some(buffer) => {
                        if k > 0 {
                            let weighted = example.with_weight(example.weight * f64::from(k));
                            buffer.push(processed, weighted);
                        }
                        while let Some(due) = buffer.pop_due(processed) {
                            member.learner.train_on_instance(&due);
                        }
                    }
                }
            }

            if harness.should_sample(processed, self.stream.has_more_instances()) {
                let bytes: f64 = members.iter().map(|m| m.learner.measure_byte_size() as f64).sum();
                let performance: Vec<Vec<Measurement>> =
                    members.iter().map(|m| m.evaluator.performance_measurements()).collect();
                let performance = Measurement::average(&performance);
                harness.record_standard(processed, bytes, performance, Vec::new())?;
            }
            let model_bytes = || members.iter().map(|m| m.learner.measure_byte_size()).sum();
            if harness.memory_exceeded(processed, model_bytes) {
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
