//! Property-based tests for configuration validation

use super::error::ValidationError;
use super::validator::validate_spec;
use crate::config::schema::*;
use crate::eval::protocol::{EvaluationConfig, KFoldConfig, ValidationMode};
use proptest::prelude::*;

fn arb_validation_mode() -> impl Strategy<Value = ValidationMode> {
    prop::sample::select(vec![
        ValidationMode::CrossValidation,
        ValidationMode::Bootstrap,
        ValidationMode::SplitValidation,
    ])
}

fn arb_valid_spec() -> impl Strategy<Value = RunSpec> {
    (
        1usize..32,                         // folds
        arb_validation_mode(),              // validation
        proptest::option::of(1u64..5000),   // delay
        1usize..64,                         // num_features
        0.0f64..=1.0,                       // noise
        0u64..100_000,                      // sample_frequency
        1u64..1000,                         // monitor_update_interval
    )
        .prop_map(|(folds, validation, delay, num_features, noise, frequency, interval)| RunSpec {
            task: TaskSpec::Kfold(KFoldConfig { folds, validation, delay }),
            evaluation: EvaluationConfig {
                sample_frequency: frequency,
                monitor_update_interval: interval,
                ..Default::default()
            },
            stream: StreamSpec::Hyperplane { seed: 1, num_features, noise, max_instances: None },
            learner: LearnerSpec::NoChange,
            evaluator: EvaluatorSpec::Basic,
            output: None,
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_valid_spec_passes(spec in arb_valid_spec()) {
        prop_assert!(validate_spec(&spec).is_ok());
    }

    #[test]
    fn prop_noise_outside_unit_interval_rejected(
        spec in arb_valid_spec(),
        noise in 1.0001f64..100.0
    ) {
        let mut spec = spec;
        spec.stream =
            StreamSpec::Hyperplane { seed: 1, num_features: 3, noise, max_instances: None };
        prop_assert_eq!(validate_spec(&spec), Err(ValidationError::InvalidNoise(noise)));
    }

    #[test]
    fn prop_yaml_round_trip_keeps_validity(spec in arb_valid_spec()) {
        let yaml = serde_yaml::to_string(&spec).unwrap();
        let parsed: RunSpec = serde_yaml::from_str(&yaml).unwrap();
        prop_assert!(validate_spec(&parsed).is_ok());
        prop_assert_eq!(parsed.task, spec.task);
    }
}
