//! Tests for learning curves

use super::*;

fn snapshot(instances: f64, accuracy: f64) -> Snapshot {
    Snapshot::new(vec![
        Measurement::new("learning evaluation instances", instances),
        Measurement::new("accuracy", accuracy),
    ])
}

#[test]
fn test_first_entry_fixes_header() {
    let mut curve = LearningCurve::new("learning evaluation instances");
    assert!(curve.is_empty());
    assert_eq!(curve.header_to_string(), "");

    curve.insert_entry(snapshot(100.0, 50.0));
    assert_eq!(curve.header(), ["learning evaluation instances", "accuracy"]);
    assert_eq!(curve.header_to_string(), "learning evaluation instances,accuracy");
    assert_eq!(curve.num_entries(), 1);
}

#[test]
fn test_entry_to_string_formats_values() {
    let mut curve = LearningCurve::new("learning evaluation instances");
    curve.insert_entry(snapshot(100.0, 87.5));
    curve.insert_entry(snapshot(200.0, 0.1));
    assert_eq!(curve.entry_to_string(0).as_deref(), Some("100,87.5"));
    assert_eq!(curve.entry_to_string(1).as_deref(), Some("200,0.1"));
    assert_eq!(curve.entry_to_string(2), None);
}

#[test]
fn test_entry_missing_header_name_renders_placeholder() {
    let mut curve = LearningCurve::new("n");
    curve.insert_entry(snapshot(1.0, 2.0));
    curve.insert_entry(Snapshot::new(vec![Measurement::new("learning evaluation instances", 2.0)]));
    assert_eq!(curve.entry_to_string(1).as_deref(), Some("2,?"));
}

#[test]
fn test_to_csv_layout() {
    let mut curve = LearningCurve::new("learning evaluation instances");
    curve.insert_entry(snapshot(10.0, 1.0));
    curve.insert_entry(snapshot(20.0, 2.0));
    assert_eq!(curve.to_csv(), "learning evaluation instances,accuracy\n10,1\n20,2\n");
}

#[test]
fn test_write_csv_matches_to_csv() {
    let mut curve = LearningCurve::new("n");
    curve.insert_entry(snapshot(10.0, 1.0));
    let mut buf = Vec::new();
    curve.write_csv(&mut buf).unwrap();
    assert_eq!(String::from_utf8(buf).unwrap(), curve.to_csv());
}

#[test]
fn test_copy_is_independent_of_original() {
    let mut curve = LearningCurve::new("n");
    curve.insert_entry(snapshot(10.0, 1.0));
    let copy = curve.clone();
    curve.insert_entry(snapshot(20.0, 2.0));
    assert_eq!(copy.num_entries(), 1);
    assert_eq!(curve.num_entries(), 2);
}

#[test]
fn test_column_extraction() {
    let mut curve = LearningCurve::new("n");
    for i in 1..=3 {
        curve.insert_entry(snapshot(f64::from(i) * 100.0, 90.0));
    }
    assert_eq!(curve.column("learning evaluation instances"), vec![100.0, 200.0, 300.0]);
    assert!(curve.column("nope").is_empty());
}

#[test]
fn test_snapshot_from_parts_order() {
    let s = Snapshot::from_parts(
        vec![Measurement::new("a", 1.0)],
        vec![Measurement::new("b", 2.0)],
        vec![Measurement::new("c", 3.0)],
    );
    let names: Vec<&str> = s.measurements().iter().map(Measurement::name).collect();
    assert_eq!(names, ["a", "b", "c"]);
    assert_eq!(s.value("b"), Some(2.0));
    assert_eq!(s.len(), 3);
    assert!(!s.is_empty());
}

#[test]
fn test_curve_serde_roundtrip() {
    let mut curve = LearningCurve::new("n");
    curve.insert_entry(snapshot(5.0, 0.5));
    let json = serde_json::to_string(&curve).unwrap();
    let back: LearningCurve = serde_json::from_str(&json).unwrap();
    assert_eq!(back, curve);
}

mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Incremental line-by-line projection equals the one-shot export
        #[test]
        fn incremental_projection_matches_export(
            values in proptest::collection::vec(0.0f64..1e6, 1..40)
        ) {
            let mut curve = LearningCurve::new("n");
            let mut incremental = String::new();
            for (i, v) in values.iter().enumerate() {
                curve.insert_entry(snapshot((i + 1) as f64, *v));
                if i == 0 {
                    incremental.push_str(&curve.header_to_string());
                    incremental.push('\n');
                }
                incremental.push_str(&curve.entry_to_string(curve.num_entries() - 1).unwrap());
                incremental.push('\n');
            }
            prop_assert_eq!(incremental, curve.to_csv());
        }
    }
}
