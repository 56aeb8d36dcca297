//! Control and progress channel between a running task and its observers
//!
//! One producer (the evaluation loop) writes activity and preview fields;
//! any number of consumers read them and request pause, resume, cancel or a
//! preview. The only place the producer ever blocks is
//! [`TaskMonitor::task_should_abort`], which parks the calling thread on a
//! condition variable while a pause is in effect.

use crate::eval::curve::LearningCurve;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};

/// Notified when a requested preview has been installed
pub trait ResultPreviewListener: Send + Sync {
    /// Called once per fulfilled request
    fn latest_preview_changed(&self);
}

impl<F> ResultPreviewListener for F
where
    F: Fn() + Send + Sync,
{
    fn latest_preview_changed(&self) {
        self()
    }
}

#[derive(Debug, Default)]
struct Activity {
    description: String,
    fraction_complete: Option<f64>,
}

#[derive(Default)]
struct Preview {
    latest: Option<LearningCurve>,
    listener: Option<Arc<dyn ResultPreviewListener>>,
}

/// Shared task control state
pub struct TaskMonitor {
    cancel_requested: AtomicBool,
    preview_requested: AtomicBool,
    paused: Mutex<bool>,
    resumed: Condvar,
    activity: Mutex<Activity>,
    preview: Mutex<Preview>,
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

impl TaskMonitor {
    /// Create a monitor with no pending requests
    pub fn new() -> Self {
        Self {
            cancel_requested: AtomicBool::new(false),
            preview_requested: AtomicBool::new(false),
            paused: Mutex::new(false),
            resumed: Condvar::new(),
            activity: Mutex::new(Activity::default()),
            preview: Mutex::new(Preview::default()),
        }
    }

    // -- Producer side --

    /// Set the activity description and its completed fraction (`None` = indeterminate)
    pub fn set_current_activity(
        &self,
        description: impl Into<String>,
        fraction_complete: Option<f64>,
    ) {
        let mut activity = lock(&self.activity);
        activity.description = description.into();
        activity.fraction_complete = fraction_complete.map(|f| f.clamp(0.0, 1.0));
    }

    /// Set only the activity description
    pub fn set_current_activity_description(&self, description: impl Into<String>) {
        lock(&self.activity).description = description.into();
    }

    /// Set only the completed fraction (`None` = indeterminate)
    pub fn set_current_activity_fraction_complete(&self, fraction_complete: Option<f64>) {
        lock(&self.activity).fraction_complete = fraction_complete.map(|f| f.clamp(0.0, 1.0));
    }

    /// Checkpoint called by protocol loops
    ///
    /// Blocks while a pause is in effect, until resumed or cancelled.
    /// Returns true iff cancellation was requested.
    pub fn task_should_abort(&self) -> bool {
        let mut paused = lock(&self.paused);
        while *paused && !self.is_cancelled() {
            paused = self.resumed.wait(paused).unwrap_or_else(PoisonError::into_inner);
        }
        self.is_cancelled()
    }

    /// Whether a consumer is waiting for a preview
    pub fn result_preview_requested(&self) -> bool {
        self.preview_requested.load(Ordering::Acquire)
    }

    /// Install a preview, clear the request and notify its listener once
    pub fn set_latest_result_preview(&self, preview: Option<LearningCurve>) {
        let listener = {
            let mut state = lock(&self.preview);
            state.latest = preview;
            self.preview_requested.store(false, Ordering::Release);
            state.listener.take()
        };
        if let Some(listener) = listener {
            listener.latest_preview_changed();
        }
    }

    // -- Consumer side --

    /// Ask the task to pause at its next checkpoint
    pub fn request_pause(&self) {
        *lock(&self.paused) = true;
    }

    /// Clear a pause and wake a parked task
    pub fn request_resume(&self) {
        *lock(&self.paused) = false;
        self.resumed.notify_all();
    }

    /// Ask the task to stop; also releases a pause
    pub fn request_cancel(&self) {
        self.cancel_requested.store(true, Ordering::Release);
        self.request_resume();
    }

    /// Ask for a preview, optionally registering a one-shot listener
    pub fn request_result_preview(&self, listener: Option<Arc<dyn ResultPreviewListener>>) {
        lock(&self.preview).listener = listener;
        self.preview_requested.store(true, Ordering::Release);
    }

    /// Whether cancellation was requested
    pub fn is_cancelled(&self) -> bool {
        self.cancel_requested.load(Ordering::Acquire)
    }

    /// Whether a pause is in effect
    pub fn is_paused(&self) -> bool {
        *lock(&self.paused)
    }

    /// Current activity description
    pub fn current_activity_description(&self) -> String {
        lock(&self.activity).description.clone()
    }

    /// Completed fraction of the current activity, `None` when indeterminate
    pub fn current_activity_fraction_complete(&self) -> Option<f64> {
        lock(&self.activity).fraction_complete
    }

    /// Copy of the most recently installed preview
    pub fn latest_result_preview(&self) -> Option<LearningCurve> {
        lock(&self.preview).latest.clone()
    }
}

impl Default for TaskMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TaskMonitor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskMonitor")
            .field("cancel_requested", &self.is_cancelled())
            .field("paused", &self.is_paused())
            .field("preview_requested", &self.result_preview_requested())
            .field("activity", &*lock(&self.activity))
            .finish()
    }
}
