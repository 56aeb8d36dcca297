//! Task thread: lifecycle, timing and completion fan-out for one task

use super::monitor::{ResultPreviewListener, TaskMonitor};
use super::report::FailedTaskReport;
use super::{Task, TaskResult};
use crate::eval::curve::LearningCurve;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Instant;

/// Lifecycle state of a task thread
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    NotStarted,
    Running,
    Paused,
    Cancelling,
    Cancelled,
    Completed,
    Failed,
}

impl TaskStatus {
    /// Whether this is a terminal state
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Cancelled | Self::Completed | Self::Failed)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::NotStarted => "not started",
            Self::Running => "running",
            Self::Paused => "paused",
            Self::Cancelling => "cancelling",
            Self::Cancelled => "cancelled",
            Self::Completed => "completed",
            Self::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// Notified once when a task thread reaches a terminal state
pub trait TaskCompletionListener: Send + Sync {
    fn task_completed(&self, thread: &TaskThread);
}

impl<F> TaskCompletionListener for F
where
    F: Fn(&TaskThread) + Send + Sync,
{
    fn task_completed(&self, thread: &TaskThread) {
        self(thread)
    }
}

/// Handle returned by [`TaskThread::add_completion_listener`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

struct Lifecycle {
    status: TaskStatus,
    started: Option<Instant>,
    ended: Option<Instant>,
    final_result: Option<TaskResult>,
    preview_grab_secs: f64,
}

struct Inner {
    task: Mutex<Option<Box<dyn Task>>>,
    monitor: TaskMonitor,
    lifecycle: Mutex<Lifecycle>,
    listeners: Mutex<Vec<(ListenerId, Arc<dyn TaskCompletionListener>)>>,
    next_listener: AtomicU64,
    handle: Mutex<Option<JoinHandle<()>>>,
}

/// Runs a [`Task`] on a dedicated thread
///
/// Cloning yields another handle to the same thread state.
#[derive(Clone)]
pub struct TaskThread {
    inner: Arc<Inner>,
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

impl TaskThread {
    /// Wrap a task; nothing runs until [`start`](Self::start)
    pub fn new(task: Box<dyn Task>) -> Self {
        let monitor = TaskMonitor::new();
        monitor.set_current_activity(task.purpose(), None);
        Self {
            inner: Arc::new(Inner {
                task: Mutex::new(Some(task)),
                monitor,
                lifecycle: Mutex::new(Lifecycle {
                    status: TaskStatus::NotStarted,
                    started: None,
                    ended: None,
                    final_result: None,
                    preview_grab_secs: 0.0,
                }),
                listeners: Mutex::new(Vec::new()),
                next_listener: AtomicU64::new(0),
                handle: Mutex::new(None),
            }),
        }
    }

    /// Move to RUNNING and spawn the worker thread
    ///
    /// Has no effect unless the thread is NOT_STARTED.
    pub fn start(&self) -> Result<()> {
        if !self.begin() {
            return Ok(());
        }
        let worker = self.clone();
        let handle = thread::Builder::new()
            .name("flujo-task".into())
            .spawn(move || worker.execute())
            .map_err(|e| Error::io("spawning task thread", e))?;
        *lock(&self.inner.handle) = Some(handle);
        Ok(())
    }

    /// Run the task on the calling thread, returning its final result
    pub fn run_blocking(&self) -> Option<TaskResult> {
        if self.begin() {
            self.execute();
        }
        self.final_result()
    }

    /// Wait for a started thread to finish and return its final result
    pub fn join(&self) -> Option<TaskResult> {
        let handle = lock(&self.inner.handle).take();
        if let Some(handle) = handle {
            if handle.join().is_err() {
                tracing::error!("task thread terminated abnormally");
            }
        }
        self.final_result()
    }

    fn begin(&self) -> bool {
        let mut lifecycle = lock(&self.inner.lifecycle);
        if lifecycle.status != TaskStatus::NotStarted {
            return false;
        }
        lifecycle.status = TaskStatus::Running;
        lifecycle.started = Some(Instant::now());
        true
    }

    fn execute(&self) {
        let inner = &self.inner;
        let Some(mut task) = lock(&inner.task).take() else {
            return;
        };
        let purpose = task.purpose();
        tracing::info!(task = %purpose, "task started");

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| task.run(&inner.monitor)));
        *lock(&inner.task) = Some(task);

        let cancelled = inner.monitor.is_cancelled();
        let (status, result) = match outcome {
            Ok(Ok(result)) if cancelled => {
                let curve = match result {
                    TaskResult::Completed { curve } => Some(curve),
                    other => other.curve().cloned(),
                };
                (TaskStatus::Cancelled, TaskResult::Cancelled { curve })
            }
            Ok(Ok(result)) => (TaskStatus::Completed, result),
            Ok(Err(err)) => {
                tracing::error!(task = %purpose, error = %err, "task failed");
                let report = FailedTaskReport::from_error(&err);
                (TaskStatus::Failed, TaskResult::Failed { report })
            }
            Err(payload) => {
                let report = FailedTaskReport::from_panic(payload.as_ref());
                tracing::error!(task = %purpose, cause = ?report.causes, "task panicked");
                (TaskStatus::Failed, TaskResult::Failed { report })
            }
        };

        {
            let mut lifecycle = lock(&inner.lifecycle);
            lifecycle.status = status;
            lifecycle.ended = Some(Instant::now());
            lifecycle.final_result = Some(result);
        }
        tracing::info!(task = %purpose, status = %status, "task finished");

        self.fire_task_completed();
        inner.monitor.set_latest_result_preview(None);
    }

    fn fire_task_completed(&self) {
        let listeners = std::mem::take(&mut *lock(&self.inner.listeners));
        for (_, listener) in listeners {
            listener.task_completed(self);
        }
    }

    /// Pause a RUNNING task at its next checkpoint
    pub fn pause_task(&self) {
        let mut lifecycle = lock(&self.inner.lifecycle);
        if lifecycle.status == TaskStatus::Running {
            self.inner.monitor.request_pause();
            lifecycle.status = TaskStatus::Paused;
        }
    }

    /// Resume a PAUSED task
    pub fn resume_task(&self) {
        let mut lifecycle = lock(&self.inner.lifecycle);
        if lifecycle.status == TaskStatus::Paused {
            self.inner.monitor.request_resume();
            lifecycle.status = TaskStatus::Running;
        }
    }

    /// Cancel a RUNNING or PAUSED task
    pub fn cancel_task(&self) {
        let mut lifecycle = lock(&self.inner.lifecycle);
        if matches!(lifecycle.status, TaskStatus::Running | TaskStatus::Paused) {
            self.inner.monitor.request_cancel();
            lifecycle.status = TaskStatus::Cancelling;
        }
    }

    /// Current lifecycle state
    pub fn status(&self) -> TaskStatus {
        lock(&self.inner.lifecycle).status
    }

    /// Current lifecycle state as display text
    pub fn current_status_string(&self) -> String {
        self.status().to_string()
    }

    /// Wall-clock seconds since start, frozen once terminal
    ///
    /// Includes time spent paused and waiting on the stream; it is not CPU time.
    pub fn elapsed_seconds(&self) -> f64 {
        let lifecycle = lock(&self.inner.lifecycle);
        match (lifecycle.started, lifecycle.ended) {
            (None, _) => 0.0,
            (Some(start), Some(end)) => end.duration_since(start).as_secs_f64(),
            (Some(start), None) => start.elapsed().as_secs_f64(),
        }
    }

    /// Activity description; empty before start and after completion
    pub fn current_activity_string(&self) -> String {
        let status = self.status();
        if status == TaskStatus::NotStarted || status.is_terminal() {
            String::new()
        } else {
            self.inner.monitor.current_activity_description()
        }
    }

    /// Completed fraction in `[0, 1]`; `None` while indeterminate
    pub fn current_activity_fraction_complete(&self) -> Option<f64> {
        match self.status() {
            TaskStatus::NotStarted => Some(0.0),
            TaskStatus::Running | TaskStatus::Paused | TaskStatus::Cancelling => {
                self.inner.monitor.current_activity_fraction_complete()
            }
            TaskStatus::Cancelled | TaskStatus::Completed | TaskStatus::Failed => Some(1.0),
        }
    }

    /// Whether a terminal state has been reached
    pub fn is_complete(&self) -> bool {
        self.status().is_terminal()
    }

    /// Final result, available once terminal
    pub fn final_result(&self) -> Option<TaskResult> {
        lock(&self.inner.lifecycle).final_result.clone()
    }

    /// Register a completion listener
    pub fn add_completion_listener(
        &self,
        listener: impl TaskCompletionListener + 'static,
    ) -> ListenerId {
        let id = ListenerId(self.inner.next_listener.fetch_add(1, Ordering::Relaxed));
        lock(&self.inner.listeners).push((id, Arc::new(listener)));
        id
    }

    /// Unregister a completion listener; returns whether it was present
    pub fn remove_completion_listener(&self, id: ListenerId) -> bool {
        let mut listeners = lock(&self.inner.listeners);
        let before = listeners.len();
        listeners.retain(|(lid, _)| *lid != id);
        listeners.len() != before
    }

    /// Request a preview and record the grab time
    pub fn get_preview(&self, listener: Option<Arc<dyn ResultPreviewListener>>) {
        self.inner.monitor.request_result_preview(listener);
        let elapsed = self.elapsed_seconds();
        lock(&self.inner.lifecycle).preview_grab_secs = elapsed;
    }

    /// Latest installed preview
    pub fn latest_result_preview(&self) -> Option<LearningCurve> {
        self.inner.monitor.latest_result_preview()
    }

    /// Elapsed seconds at the time of the last preview request
    pub fn latest_preview_grab_time_seconds(&self) -> f64 {
        lock(&self.inner.lifecycle).preview_grab_secs
    }

    /// Monitor shared with the running task
    pub fn monitor(&self) -> &TaskMonitor {
        &self.inner.monitor
    }

    /// Run `f` against the wrapped task; `None` while the task is executing
    pub fn with_task<R>(&self, f: impl FnOnce(&dyn Task) -> R) -> Option<R> {
        lock(&self.inner.task).as_ref().map(|task| f(&**task))
    }
}

impl fmt::Debug for TaskThread {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskThread")
            .field("status", &self.status())
            .field("elapsed_seconds", &self.elapsed_seconds())
            .finish()
    }
}
