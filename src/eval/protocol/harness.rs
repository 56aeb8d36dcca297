//! Loop machinery shared by every protocol
//!
//! A [`Harness`] owns the learning curve of one run together with its dump
//! file, the evaluation clock and the RAM-Hours accumulator. Protocols drive
//! their own loops and call into it for budgets, sampling, abort checks,
//! progress and previews.

use super::config::EvaluationConfig;
use super::sink::DumpWriter;
use crate::eval::curve::{LearningCurve, Measurement, Snapshot};
use crate::learner::Learner;
use crate::stream::StreamHeader;
use crate::task::{TaskMonitor, TaskResult};
use crate::Result;
use std::time::{Duration, Instant};

/// Ordering measurement of the streaming protocols
pub const EVALUATION_INSTANCES: &str = "learning evaluation instances";
/// Seconds since the evaluation loop started
pub const EVALUATION_TIME: &str = "evaluation time (seconds)";
/// Accumulated model cost
pub const RAM_HOURS: &str = "model cost (RAM-Hours)";

const BYTES_PER_GB: f64 = 1024.0 * 1024.0 * 1024.0;
const SECS_PER_HOUR: f64 = 3600.0;

/// Seed, reset and contextualize a learner before its first example
pub fn prepare_learner(learner: &mut dyn Learner, header: &StreamHeader, seed: u64) {
    if learner.is_randomizable() {
        learner.set_random_seed(seed);
        learner.reset_learning();
    }
    learner.set_model_context(header);
}

/// RAM-Hours accrued by `bytes` held for `duration`
pub fn ram_hours(bytes: f64, duration: Duration) -> f64 {
    (bytes / BYTES_PER_GB) * (duration.as_secs_f64() / SECS_PER_HOUR)
}

/// Per-run evaluation state
pub struct Harness<'m> {
    config: EvaluationConfig,
    monitor: &'m TaskMonitor,
    curve: LearningCurve,
    dump: Option<DumpWriter>,
    started: Instant,
    last_sample: Instant,
    ram_hours: f64,
    last_sampled: Option<u64>,
}

impl<'m> Harness<'m> {
    /// Start the clock and open the dump file, if configured
    pub fn new(
        config: &EvaluationConfig,
        monitor: &'m TaskMonitor,
        ordering: &str,
    ) -> Result<Self> {
        let dump = config.dump_file.as_ref().map(DumpWriter::open).transpose()?;
        let now = Instant::now();
        Ok(Self {
            config: config.clone(),
            monitor,
            curve: LearningCurve::new(ordering),
            dump,
            started: now,
            last_sample: now,
            ram_hours: 0.0,
            last_sampled: None,
        })
    }

    pub fn monitor(&self) -> &TaskMonitor {
        self.monitor
    }

    pub fn curve(&self) -> &LearningCurve {
        &self.curve
    }

    /// Seconds since the harness was created
    pub fn elapsed_secs(&self) -> f64 {
        self.started.elapsed().as_secs_f64()
    }

    /// Whether another instance may be processed under the instance and time limits
    pub fn within_budget(&self, processed: u64) -> bool {
        let instances_ok = self.config.instance_limit.is_none_or(|limit| processed < limit);
        let time_ok =
            self.config.time_limit_secs.is_none_or(|secs| self.elapsed_secs() < secs as f64);
        instances_ok && time_ok
    }

    /// Whether a snapshot is due after `processed` instances
    ///
    /// Periodic every `sample_frequency` instances, plus one forced snapshot
    /// when the stream ran dry or the instance limit was reached.
    pub fn should_sample(&self, processed: u64, stream_has_more: bool) -> bool {
        if processed == 0 || self.last_sampled == Some(processed) {
            return false;
        }
        let frequency = self.config.sample_frequency;
        let periodic = frequency > 0 && processed % frequency == 0;
        let at_limit = self.config.instance_limit.is_some_and(|limit| processed >= limit);
        periodic || !stream_has_more || at_limit
    }

    /// Restart the RAM-Hours interval from now
    pub fn reset_sample_clock(&mut self) {
        self.last_sample = Instant::now();
    }

    /// Add `bytes` held since the previous sample; returns the running total
    pub fn accrue_ram_hours(&mut self, bytes: f64) -> f64 {
        let now = Instant::now();
        let interval = now.duration_since(self.last_sample);
        self.last_sample = now;
        self.accrue_ram_hours_over(bytes, interval)
    }

    /// Add `bytes` held for `duration`; returns the running total
    pub fn accrue_ram_hours_over(&mut self, bytes: f64, duration: Duration) -> f64 {
        self.ram_hours += ram_hours(bytes, duration);
        self.ram_hours
    }

    /// Append a snapshot taken after `processed` instances
    pub fn record(&mut self, processed: u64, snapshot: Snapshot) -> Result<()> {
        self.curve.insert_entry(snapshot);
        self.last_sampled = Some(processed);
        tracing::debug!(processed, entries = self.curve.num_entries(), "recorded snapshot");
        if let Some(dump) = self.dump.as_mut() {
            dump.append_latest(&self.curve)?;
        }
        Ok(())
    }

    /// Record the instances/time/RAM-Hours snapshot used by the streaming protocols
    pub fn record_standard(
        &mut self,
        processed: u64,
        model_bytes: f64,
        performance: Vec<Measurement>,
        model: Vec<Measurement>,
    ) -> Result<()> {
        self.record_standard_with(processed, model_bytes, Vec::new(), performance, model)
    }

    /// Like [`record_standard`](Self::record_standard), with `extra` protocol
    /// measurements appended after the RAM-Hours column
    pub fn record_standard_with(
        &mut self,
        processed: u64,
        model_bytes: f64,
        extra: Vec<Measurement>,
        performance: Vec<Measurement>,
        model: Vec<Measurement>,
    ) -> Result<()> {
        let cost = self.accrue_ram_hours(model_bytes);
        let mut protocol = vec![
            Measurement::new(EVALUATION_INSTANCES, processed as f64),
            Measurement::new(EVALUATION_TIME, self.elapsed_secs()),
            Measurement::new(RAM_HOURS, cost),
        ];
        protocol.extend(extra);
        self.record(processed, Snapshot::from_parts(protocol, performance, model))
    }

    /// Whether `processed` falls on the abort-check cadence
    pub fn checkpoint_due(&self, processed: u64) -> bool {
        processed % self.config.monitor_update_interval.max(1) == 0
    }

    /// Abort check, progress update and preview servicing
    ///
    /// Blocks while paused. Returns true when the run must stop.
    pub fn checkpoint(&self, processed: u64, estimated_remaining: Option<u64>) -> bool {
        self.checkpoint_at(self.progress(processed, estimated_remaining))
    }

    /// [`checkpoint`](Self::checkpoint) for loops that compute their own fraction complete
    pub fn checkpoint_at(&self, fraction_complete: Option<f64>) -> bool {
        if self.monitor.task_should_abort() {
            tracing::info!(fraction_complete, "evaluation cancelled");
            return true;
        }
        self.monitor.set_current_activity_fraction_complete(fraction_complete);
        self.service_preview();
        false
    }

    /// Fraction complete, clamping the stream's estimate by the instance limit
    pub fn progress(&self, processed: u64, estimated_remaining: Option<u64>) -> Option<f64> {
        let limit_remaining =
            self.config.instance_limit.map(|limit| limit.saturating_sub(processed));
        let remaining = match (estimated_remaining, limit_remaining) {
            (Some(estimate), Some(limit)) => Some(estimate.min(limit)),
            (estimate, limit) => estimate.or(limit),
        }?;
        let total = processed + remaining;
        Some(if total == 0 { 1.0 } else { processed as f64 / total as f64 })
    }

    /// Hand a copy of the curve to a waiting consumer
    pub fn service_preview(&self) {
        if self.monitor.result_preview_requested() {
            self.monitor.set_latest_result_preview(Some(self.curve.clone()));
        }
    }

    /// Whether the model outgrew the configured size on a check step
    pub fn memory_exceeded(&self, processed: u64, model_bytes: impl FnOnce() -> usize) -> bool {
        let Some(max) = self.config.max_memory_bytes else {
            return false;
        };
        let frequency = self.config.mem_check_frequency;
        if frequency == 0 || processed % frequency != 0 {
            return false;
        }
        let bytes = model_bytes() as u64;
        if bytes > max {
            tracing::warn!(
                processed,
                bytes,
                max,
                "model exceeded memory limit, stopping evaluation"
            );
            return true;
        }
        false
    }

    /// Finish normally
    pub fn completed(self) -> TaskResult {
        tracing::info!(entries = self.curve.num_entries(), "evaluation finished");
        TaskResult::Completed { curve: self.curve }
    }

    /// Finish after an abort, keeping the partial curve
    pub fn cancelled(self) -> TaskResult {
        TaskResult::Cancelled { curve: Some(self.curve) }
    }
}
