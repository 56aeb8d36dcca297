//! Build evaluation tasks from a run specification

use super::schema::{EvaluatorSpec, LearnerSpec, RunSpec, StreamSpec, TaskSpec};
use crate::eval::evaluator::{
    BasicClassificationEvaluator, Evaluator, WindowClassificationEvaluator,
};
use crate::eval::protocol::{
    DelayedPrequential, InterleavedChunks, KFoldPrequential, PeriodicHeldOut, Prequential,
};
use crate::learner::{Learner, MajorityClass, NoChange};
use crate::stream::{Example, HyperplaneStream, Stream, StreamHeader, VecStream};
use crate::task::Task;

/// Build the example source
pub fn build_stream(spec: &StreamSpec) -> Box<dyn Stream> {
    match spec {
        StreamSpec::Hyperplane { seed, num_features, noise, max_instances } => {
            let stream = HyperplaneStream::new(*seed, *num_features).with_noise(*noise);
            match max_instances {
                Some(max) => Box::new(stream.with_max_instances(*max)),
                None => Box::new(stream),
            }
        }
        StreamSpec::Inline { num_classes, examples } => {
            let num_features = examples.first().map_or(0, |ex| ex.features.len());
            let header = StreamHeader::new("inline", num_features, *num_classes);
            Box::new(VecStream::new(header, examples.iter().map(Example::from).collect()))
        }
    }
}

/// Build the learner under evaluation
pub fn build_learner(spec: LearnerSpec) -> Box<dyn Learner> {
    match spec {
        LearnerSpec::MajorityClass => Box::new(MajorityClass::new()),
        LearnerSpec::NoChange => Box::new(NoChange::new()),
    }
}

/// Build the performance evaluator
pub fn build_evaluator(spec: EvaluatorSpec) -> Box<dyn Evaluator> {
    match spec {
        EvaluatorSpec::Basic => Box::new(BasicClassificationEvaluator::new()),
        EvaluatorSpec::Window { width } => Box::new(WindowClassificationEvaluator::new(width)),
    }
}

/// Build a ready-to-run task
///
/// The spec is expected to have passed [`validate_spec`](super::validate_spec).
pub fn build_task(spec: &RunSpec) -> Box<dyn Task> {
    let learner = build_learner(spec.learner);
    let stream = build_stream(&spec.stream);
    let evaluator = build_evaluator(spec.evaluator);
    let config = spec.evaluation.clone();
    match &spec.task {
        TaskSpec::Prequential => Box::new(Prequential::new(learner, stream, evaluator, config)),
        TaskSpec::Chunks(chunks) => {
            Box::new(InterleavedChunks::new(learner, stream, evaluator, config, chunks.clone()))
        }
        TaskSpec::Delayed(delay) => {
            Box::new(DelayedPrequential::new(learner, stream, evaluator, config, delay.clone()))
        }
        TaskSpec::HeldOut(held_out) => {
            Box::new(PeriodicHeldOut::new(learner, stream, evaluator, config, held_out.clone()))
        }
        TaskSpec::Kfold(kfold) => {
            Box::new(KFoldPrequential::new(learner, stream, evaluator, config, kfold.clone()))
        }
    }
}
