//! Streaming evaluation
//!
//! ## Architecture
//!
//! - `curve`: measurements, snapshots and the learning curve they form
//! - `evaluator`: performance accumulators fed with `(example, votes)` pairs
//! - `protocol`: the evaluation tasks and the loop harness they share
//!
//! ## Example
//!
//! ```ignore
//! use flujo::eval::{EvaluationConfig, Prequential, BasicClassificationEvaluator};
//! use flujo::learner::MajorityClass;
//! use flujo::stream::HyperplaneStream;
//! use flujo::task::TaskThread;
//!
//! let task = Prequential::new(
//!     Box::new(MajorityClass::new()),
//!     Box::new(HyperplaneStream::new(1, 10).with_max_instances(10_000)),
//!     Box::new(BasicClassificationEvaluator::new()),
//!     EvaluationConfig { sample_frequency: 1000, ..Default::default() },
//! );
//! let thread = TaskThread::new(Box::new(task));
//! thread.start()?;
//! let result = thread.join();
//! ```

pub mod curve;
pub mod evaluator;
pub mod protocol;

pub use curve::{LearningCurve, Measurement, Snapshot};
pub use evaluator::{BasicClassificationEvaluator, Evaluator, WindowClassificationEvaluator};
pub use protocol::{
    ChunkConfig, DelayConfig, DelayedPrequential, EvaluationConfig, HeldOutConfig,
    InterleavedChunks, KFoldConfig, KFoldPrequential, PeriodicHeldOut, Prequential,
    ValidationMode,
};
