//! Declarative run configuration
//!
//! A YAML [`RunSpec`] names the protocol, the stream, the learner and the
//! evaluator of one evaluation run. [`load_spec`] reads and validates it and
//! [`build_task`] turns it into a task ready for a
//! [`TaskThread`](crate::task::TaskThread).

mod builder;
mod cli;
mod loader;
mod schema;
mod validate;

pub use builder::{build_evaluator, build_learner, build_stream, build_task};
pub use cli::{parse_args, Cli, Command, OutputFormat, RunArgs, ValidateArgs};
pub use loader::{load_spec, parse_spec};
pub use schema::{
    EvaluatorSpec, InlineExample, LearnerSpec, OutputSpec, RunSpec, StreamSpec, TaskSpec,
};
pub use validate::{validate_spec, ValidationError};
