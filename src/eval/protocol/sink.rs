//! Line-oriented output files written while a protocol runs
//!
//! Both files are opened in append mode and flushed after every line so a
//! reader tailing them always sees whole records.

use crate::eval::curve::LearningCurve;
use crate::{Error, Result};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

fn open_append(path: &Path) -> std::io::Result<BufWriter<File>> {
    OpenOptions::new().create(true).append(true).open(path).map(BufWriter::new)
}

/// Incremental copy of a learning curve
#[derive(Debug)]
pub struct DumpWriter {
    path: PathBuf,
    out: BufWriter<File>,
    header_written: bool,
}

impl DumpWriter {
    /// Open (or create) the dump file for appending
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let out =
            open_append(&path).map_err(|source| Error::DumpFile { path: path.clone(), source })?;
        Ok(Self { path, out, header_written: false })
    }

    /// Append the newest entry of `curve`, preceded by the header on first use
    pub fn append_latest(&mut self, curve: &LearningCurve) -> Result<()> {
        let newest = curve.num_entries().checked_sub(1);
        let Some(line) = newest.and_then(|i| curve.entry_to_string(i)) else {
            return Ok(());
        };
        let result = (|| -> std::io::Result<()> {
            if !self.header_written {
                writeln!(self.out, "{}", curve.header_to_string())?;
                self.header_written = true;
            }
            writeln!(self.out, "{line}")?;
            self.out.flush()
        })();
        result.map_err(|source| Error::DumpFile { path: self.path.clone(), source })
    }
}

/// Per-example prediction log
#[derive(Debug)]
pub struct PredictionWriter {
    path: PathBuf,
    out: BufWriter<File>,
}

impl PredictionWriter {
    /// Open (or create) the prediction file for appending
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let out = open_append(&path)
            .map_err(|source| Error::PredictionFile { path: path.clone(), source })?;
        Ok(Self { path, out })
    }

    /// Append `"<predicted>,<true>"`; either side is `?` when unknown
    pub fn write(&mut self, predicted: Option<usize>, truth: Option<f64>) -> Result<()> {
        let predicted = predicted.map_or_else(|| "?".to_string(), |p| p.to_string());
        let truth = truth.map_or_else(|| "?".to_string(), |t| (t as i64).to_string());
        writeln!(self.out, "{predicted},{truth}")
            .and_then(|()| self.out.flush())
            .map_err(|source| Error::PredictionFile { path: self.path.clone(), source })
    }
}
