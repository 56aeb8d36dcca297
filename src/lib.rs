//! Streaming-model evaluation harness.
//!
//! Flujo runs incremental learners over example streams under an evaluation
//! protocol and records what it measures as a learning curve:
//! - Prequential, delayed, chunked, periodic held-out and k-fold protocols
//! - Cooperative pause, resume and cancellation through a task monitor
//! - Background task threads with progress, previews and completion listeners
//! - Incremental CSV dumps and per-example prediction files
//!
//! # Example
//!
//! ```no_run
//! use flujo::config::{build_task, load_spec};
//! use flujo::task::TaskThread;
//!
//! let spec = load_spec("run.yaml")?;
//! let task = TaskThread::new(build_task(&spec));
//! task.start()?;
//! if let Some(curve) = task.join().as_ref().and_then(|r| r.curve()) {
//!     print!("{}", curve.to_csv());
//! }
//! # Ok::<(), flujo::Error>(())
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod eval;
pub mod learner;
pub mod stream;
pub mod task;

pub use error::{Error, Result};
pub use eval::{Evaluator, LearningCurve, Measurement, Snapshot};
pub use learner::Learner;
pub use stream::{Example, Stream, StreamHeader};
pub use task::{Task, TaskMonitor, TaskResult, TaskStatus, TaskThread};
