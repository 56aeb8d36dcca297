//! Evaluation protocols
//!
//! Each protocol is a [`Task`](crate::task::Task) that pulls examples from a
//! stream, drives a learner and one or more evaluators, and appends
//! snapshots to a learning curve:
//!
//! - [`Prequential`] - test then train on every example
//! - [`InterleavedChunks`] - test then train on chunks of examples
//! - [`DelayedPrequential`] - train only `delay` examples after arrival
//! - [`PeriodicHeldOut`] - train in blocks, test on a held-out set
//! - [`KFoldPrequential`] - cross-validation, bootstrap or split-validation
//!   over an ensemble of learner copies
//!
//! The loop bookkeeping (budgets, sampling, abort checks, progress, previews,
//! dump file) lives in [`Harness`]. Prequential and delayed runs can also hide
//! a random share of labels from the learner through [`LabelMask`].

mod chunks;
mod config;
mod delay;
mod delayed;
mod harness;
mod held_out;
mod kfold;
mod mask;
mod prequential;
mod sink;


pub use chunks::InterleavedChunks;
pub use config::{
    ChunkConfig, DelayConfig, EvaluationConfig, HeldOutConfig, KFoldConfig, ValidationMode,
};
pub use delay::DelayBuffer;
pub use delayed::DelayedPrequential;
pub use harness::{
    prepare_learner, ram_hours, Harness, EVALUATION_INSTANCES, EVALUATION_TIME, RAM_HOURS,
};
pub use held_out::{PeriodicHeldOut, HELD_OUT_INSTANCES};
pub use kfold::{training_weight, KFoldPrequential};
pub use mask::{LabelMask, UNLABELED_INSTANCES};
pub use prequential::Prequential;
pub use sink::{DumpWriter, PredictionWriter};
