//! Configuration validation
//!
//! Validates run specifications before a task is built from them.

mod error;
mod validator;

#[cfg(test)]
mod proptests;

pub use error::ValidationError;
pub use validator::validate_spec;
