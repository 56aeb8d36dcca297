//! Loading run specifications from YAML

use super::schema::RunSpec;
use super::validate::validate_spec;
use crate::error::{Error, Result};
use std::fs;
use std::path::Path;

/// Read, parse and validate a run specification
///
/// Read and parse failures map to [`Error::Config`]; a spec that parses but
/// holds out-of-range values maps to [`Error::Validation`].
pub fn load_spec<P: AsRef<Path>>(path: P) -> Result<RunSpec> {
    let path = path.as_ref();
    let yaml = fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Failed to read config file {}: {e}", path.display())))?;
    let spec = parse_spec(&yaml)?;
    validate_spec(&spec)?;
    Ok(spec)
}

/// Parse a run specification without validating it
pub fn parse_spec(yaml: &str) -> Result<RunSpec> {
    serde_yaml::from_str(yaml)
        .map_err(|e| Error::Config(format!("Failed to parse YAML config: {e}")))
}
