//! Validate command implementation

use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::{
    load_spec, EvaluatorSpec, LearnerSpec, RunSpec, StreamSpec, TaskSpec, ValidateArgs,
};

/// Format protocol settings as a string
pub fn format_task_info(spec: &RunSpec) -> String {
    let mut lines = vec![format!("  Protocol: {}", spec.task.protocol_name())];
    match &spec.task {
        TaskSpec::Prequential => {}
        TaskSpec::Chunks(chunks) => lines.push(format!("  Chunk size: {}", chunks.chunk_size)),
        TaskSpec::Delayed(delay) => {
            lines.push(format!("  Delay: {}", delay.delay));
            lines.push(format!("  Initial window: {}", delay.initial_window));
            if delay.train_on_initial_window {
                lines.push("  Train on initial window: yes".to_string());
            }
            if delay.train_in_batches {
                lines.push("  Train in batches: yes".to_string());
            }
        }
        TaskSpec::HeldOut(held_out) => {
            lines.push(format!("  Test size: {}", held_out.test_size));
            if held_out.train_size > 0 {
                lines.push(format!("  Train size: {}", held_out.train_size));
            }
            lines.push(format!("  Train time budget: {}s", held_out.train_time_secs));
            lines.push(format!("  Cache test set: {}", held_out.cache_test));
        }
        TaskSpec::Kfold(kfold) => {
            lines.push(format!("  Folds: {}", kfold.folds));
            lines.push(format!("  Validation: {:?}", kfold.validation));
            if let Some(delay) = kfold.delay {
                lines.push(format!("  Delay: {delay}"));
            }
        }
    }
    lines.join("\n")
}

/// Format budgets and output files as a string
pub fn format_evaluation_info(spec: &RunSpec) -> String {
    let eval = &spec.evaluation;
    let mut lines = vec![
        match eval.instance_limit {
            Some(limit) => format!("  Instance limit: {limit}"),
            None => "  Instance limit: none".to_string(),
        },
        format!("  Sample frequency: {}", eval.sample_frequency),
    ];
    if let Some(secs) = eval.time_limit_secs {
        lines.push(format!("  Time limit: {secs}s"));
    }
    if let Some(bytes) = eval.max_memory_bytes {
        let every = eval.mem_check_frequency;
        lines.push(format!("  Max model size: {bytes} bytes (checked every {every})"));
    }
    if let Some(p) = eval.label_probability {
        lines.push(format!("  Label probability: {p} (seed {})", eval.random_seed));
    }
    if let Some(dump) = &eval.dump_file {
        lines.push(format!("  Dump file: {}", dump.display()));
    }
    if let Some(predictions) = &eval.prediction_file {
        lines.push(format!("  Prediction file: {}", predictions.display()));
    }
    lines.join("\n")
}

/// Format stream, learner and evaluator as a string
pub fn format_components_info(spec: &RunSpec) -> String {
    let stream = match &spec.stream {
        StreamSpec::Hyperplane { seed, num_features, noise, max_instances } => {
            let max = max_instances.map_or_else(|| "unbounded".to_string(), |m| m.to_string());
            format!(
                "hyperplane (seed {seed}, {num_features} features, noise {noise}, {max} instances)"
            )
        }
        StreamSpec::Inline { num_classes, examples } => {
            format!("inline ({} examples, {num_classes} classes)", examples.len())
        }
    };
    let learner = match spec.learner {
        LearnerSpec::MajorityClass => "majority class",
        LearnerSpec::NoChange => "no change",
    };
    let evaluator = match spec.evaluator {
        EvaluatorSpec::Basic => "basic classification".to_string(),
        EvaluatorSpec::Window { width } => format!("window classification (width {width})"),
    };
    format!("  Stream: {stream}\n  Learner: {learner}\n  Evaluator: {evaluator}")
}

/// Print detailed configuration summary
pub fn print_detailed_summary(spec: &RunSpec) {
    println!();
    println!("Configuration Summary:");
    println!("{}", format_task_info(spec));
    println!();
    println!("{}", format_evaluation_info(spec));
    println!();
    println!("{}", format_components_info(spec));
}

pub fn run_validate(args: ValidateArgs, level: LogLevel) -> Result<(), String> {
    log(level, LogLevel::Normal, &format!("Validating config: {}", args.config.display()));

    let spec = load_spec(&args.config).map_err(|e| format!("Config error: {e}"))?;

    log(level, LogLevel::Normal, "Configuration is valid");

    if args.detailed && level != LogLevel::Quiet {
        print_detailed_summary(&spec);
    }

    Ok(())
}
