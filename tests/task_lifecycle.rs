//! Task thread control: cancellation, pause/resume and failure capture

mod common;

use common::{indexed, CancellingStream, Counting};
use flujo::eval::evaluator::BasicClassificationEvaluator;
use flujo::eval::protocol::{
    ChunkConfig, EvaluationConfig, InterleavedChunks, Prequential, EVALUATION_INSTANCES,
};
use flujo::task::{Task, TaskMonitor, TaskResult, TaskStatus, TaskThread};
use proptest::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tempfile::TempDir;

fn wait_for(what: &str, mut condition: impl FnMut() -> bool) {
    let deadline = Instant::now() + Duration::from_secs(10);
    while !condition() {
        assert!(Instant::now() < deadline, "timed out waiting for {what}");
        std::thread::sleep(Duration::from_millis(1));
    }
}

fn prequential(learner: &Counting, n: usize, config: EvaluationConfig) -> Box<dyn Task> {
    Box::new(Prequential::new(
        Box::new(learner.clone()),
        indexed(n),
        Box::new(BasicClassificationEvaluator::new()),
        config,
    ))
}

// =============================================================================
// Cancellation bound
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn prop_cancel_processes_at_most_k_more(cancel_at in 1u64..400, k in 1u64..25) {
        let monitor = Arc::new(TaskMonitor::new());
        let learner = Counting::new();
        let mut task = Prequential::new(
            Box::new(learner.clone()),
            Box::new(CancellingStream::new(1000, cancel_at, Arc::clone(&monitor))),
            Box::new(BasicClassificationEvaluator::new()),
            EvaluationConfig {
                sample_frequency: 50,
                monitor_update_interval: k,
                ..Default::default()
            },
        );
        let result = task.run(&monitor).unwrap();

        prop_assert!(result.is_cancelled());
        // Example `cancel_at` was already in flight when the request arrived.
        let after_request = learner.count() - (cancel_at - 1);
        prop_assert!(
            after_request >= 1 && after_request <= k,
            "processed {} after cancel",
            after_request
        );
        if let Some(curve) = result.curve() {
            let processed = learner.count() as f64;
            prop_assert!(curve.column(EVALUATION_INSTANCES).iter().all(|&v| v <= processed));
        }
    }

    #[test]
    fn prop_chunks_cancel_mid_chunk_processes_at_most_k_more(
        cancel_at in 1u64..8000,
        k in 1u64..25
    ) {
        // 5000 examples in chunks of 1000: the first chunk is only trained on,
        // the other four are tested then trained, 9000 steps in all.
        let monitor = Arc::new(TaskMonitor::new());
        let cancel = Some((cancel_at, Arc::clone(&monitor)));
        let learner = Counting { cancel_at: cancel, ..Counting::new() };
        let mut task = InterleavedChunks::new(
            Box::new(learner.clone()),
            indexed(5000),
            Box::new(BasicClassificationEvaluator::new()),
            EvaluationConfig {
                sample_frequency: 1000,
                monitor_update_interval: k,
                ..Default::default()
            },
            ChunkConfig { chunk_size: 1000 },
        );
        let result = task.run(&monitor).unwrap();

        prop_assert!(result.is_cancelled());
        let after_request = learner.step_count() - cancel_at;
        prop_assert!(after_request <= k, "{} steps after cancel with K = {}", after_request, k);
    }
}

#[test]
fn test_cancel_through_thread_keeps_partial_curve() {
    let learner = Counting { sleep: Some(Duration::from_micros(200)), ..Counting::new() };
    let config = EvaluationConfig { sample_frequency: 100, ..Default::default() };
    let thread = TaskThread::new(prequential(&learner, 100_000, config));
    thread.start().unwrap();
    wait_for("three samples", || learner.count() >= 350);

    thread.cancel_task();
    let result = thread.join().unwrap();

    assert_eq!(thread.status(), TaskStatus::Cancelled);
    let curve = result.curve().expect("partial curve");
    assert!(curve.num_entries() >= 3);
    assert!(learner.count() < 100_000);
    assert_eq!(thread.current_activity_fraction_complete(), Some(1.0));
}

// =============================================================================
// Pause / resume
// =============================================================================

#[test]
fn test_pause_blocks_until_resume() {
    let learner = Counting { sleep: Some(Duration::from_millis(1)), ..Counting::new() };
    let config = EvaluationConfig { sample_frequency: 100, ..Default::default() };
    let thread = TaskThread::new(prequential(&learner, 400, config));
    thread.start().unwrap();
    wait_for("training to begin", || learner.count() >= 20);

    thread.pause_task();
    assert_eq!(thread.status(), TaskStatus::Paused);
    assert_eq!(thread.current_status_string(), "paused");
    std::thread::sleep(Duration::from_millis(40));
    let parked = learner.count();
    std::thread::sleep(Duration::from_millis(60));
    assert_eq!(learner.count(), parked, "loop kept running while paused");

    thread.resume_task();
    assert_eq!(thread.status(), TaskStatus::Running);
    let result = thread.join().unwrap();

    assert_eq!(thread.status(), TaskStatus::Completed);
    assert_eq!(learner.count(), 400);
    assert_eq!(
        result.curve().map(|c| c.column(EVALUATION_INSTANCES)),
        Some(vec![100.0, 200.0, 300.0, 400.0])
    );
}

#[test]
fn test_cancel_while_paused_releases_the_loop() {
    let learner = Counting { sleep: Some(Duration::from_millis(1)), ..Counting::new() };
    let thread = TaskThread::new(prequential(&learner, 10_000, EvaluationConfig::default()));
    thread.start().unwrap();
    wait_for("training to begin", || learner.count() >= 10);

    thread.pause_task();
    std::thread::sleep(Duration::from_millis(30));
    thread.cancel_task();
    let result = thread.join().unwrap();

    assert!(result.is_cancelled());
    assert_eq!(thread.status(), TaskStatus::Cancelled);
}

// =============================================================================
// Failures
// =============================================================================

#[test]
fn test_learner_panic_fails_task() {
    let learner = Counting { panic_at: Some(5), ..Counting::new() };
    let thread = TaskThread::new(prequential(&learner, 50, EvaluationConfig::default()));
    let fired = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&fired);
    thread.add_completion_listener(move |_: &TaskThread| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    thread.start().unwrap();
    let result = thread.join().unwrap();

    assert_eq!(thread.status(), TaskStatus::Failed);
    assert_eq!(thread.current_status_string(), "failed");
    let report = result.failure().expect("failure report");
    assert_eq!(report.message, "Task panicked");
    assert_eq!(report.causes, vec!["learner diverged at example 5".to_string()]);
    assert_eq!(fired.load(Ordering::SeqCst), 1);
}

#[test]
fn test_unwritable_dump_fails_task_with_cause() {
    let dir = TempDir::new().unwrap();
    let config =
        EvaluationConfig { dump_file: Some(dir.path().to_path_buf()), ..Default::default() };
    let learner = Counting::new();
    let thread = TaskThread::new(prequential(&learner, 50, config));

    let result = thread.run_blocking().unwrap();

    assert_eq!(thread.status(), TaskStatus::Failed);
    match result {
        TaskResult::Failed { report } => {
            assert!(report.message.starts_with("Unable to write immediate result file"));
            assert_eq!(report.causes.len(), 1);
        }
        other => panic!("expected failure, got {other:?}"),
    }
    assert_eq!(learner.count(), 0);
}

#[test]
fn test_independent_threads_run_concurrently() {
    let learners: Vec<Counting> = (0..4).map(|_| Counting::new()).collect();
    let config = EvaluationConfig { sample_frequency: 100, ..Default::default() };
    let threads: Vec<TaskThread> =
        learners.iter().map(|l| TaskThread::new(prequential(l, 300, config.clone()))).collect();
    for t in &threads {
        t.start().unwrap();
    }
    for t in &threads {
        let result = t.join().unwrap();
        assert_eq!(result.curve().map(|c| c.num_entries()), Some(3));
    }
    assert!(learners.iter().all(|l| l.count() == 300));
}
