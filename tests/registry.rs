//! Loading model artifacts from disk and predicting through the shared pipeline.

use std::fs;
use std::path::Path;

use health_guard::app::pipeline::{run_prediction, submit};
use health_guard::domain::{Domain, Label, Outcome};
use health_guard::features::FormValues;
use health_guard::models::{ModelPaths, ModelRegistry};

fn bundled() -> ModelRegistry {
    ModelRegistry::load(&ModelPaths::new(env!("CARGO_MANIFEST_DIR")))
}

fn write(root: &Path, domain: Domain, body: &str) {
    let path = ModelPaths::new(root).path_for(domain);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, body).unwrap();
}

#[test]
fn bundled_artifacts_all_load() {
    let registry = bundled();
    assert!(registry.failed_domains().is_empty(), "{registry:?}");
    let families: Vec<String> = registry
        .report()
        .into_iter()
        .map(|s| s.state.unwrap().family)
        .collect();
    assert_eq!(families, vec!["tree", "linear", "forest", "linear"]);
}

#[test]
fn diabetes_reference_case_is_stable() {
    let registry = bundled();
    let mut values = FormValues::defaults(Domain::Diabetes);
    for a in ["glucose=100", "bmi=25.0", "age=30"] {
        values.apply_assignment(a).unwrap();
    }
    let first = run_prediction(&registry, &values).unwrap();
    let second = run_prediction(&registry, &values).unwrap();
    assert_eq!(first.label, Label::Negative);
    assert_eq!(first, second);
    assert_eq!(first.message(), "Result: Not Diabetic");
}

#[test]
fn heart_forest_votes_on_defaults() {
    // cp=0 votes 0, thalach=150 votes 1, oldpeak=1.0 votes 1
    let registry = bundled();
    let values = FormValues::defaults(Domain::Heart);
    assert_eq!(run_prediction(&registry, &values).unwrap().label, Label::Positive);
}

#[test]
fn parkinsons_linear_boundary_moves_with_ppe() {
    let registry = bundled();
    let mut values = FormValues::defaults(Domain::Parkinsons);
    assert_eq!(run_prediction(&registry, &values).unwrap().label, Label::Negative);
    values.apply_assignment("ppe=0.3").unwrap();
    assert_eq!(run_prediction(&registry, &values).unwrap().label, Label::Positive);
}

#[test]
fn corrupt_artifact_only_disables_its_domain() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        Domain::Autism,
        r#"{"n_features": 5, "model": {"kind": "tree", "nodes": [{"label": 1}]}}"#,
    );
    write(dir.path(), Domain::Diabetes, "{ not json");
    write(
        dir.path(),
        Domain::Heart,
        r#"{"n_features": 13, "model": {"kind": "tree", "nodes": [{"feature": 0, "threshold": 1.0, "left": 5, "right": 6}]}}"#,
    );

    let registry = ModelRegistry::load(&ModelPaths::new(dir.path()));
    assert_eq!(
        registry.failed_domains(),
        vec![Domain::Diabetes, Domain::Heart, Domain::Parkinsons]
    );

    let autism = submit(&registry, &FormValues::defaults(Domain::Autism));
    assert_eq!(
        autism,
        Outcome::Predicted {
            domain: Domain::Autism,
            label: Label::Positive
        }
    );

    match submit(&registry, &FormValues::defaults(Domain::Diabetes)) {
        Outcome::Failed(reason) => assert!(reason.starts_with("Diabetes model is not available")),
        other => panic!("expected failure, got {other:?}"),
    }
}

#[test]
fn wrong_width_artifact_fails_at_predict_time() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        Domain::Parkinsons,
        r#"{"n_features": 22, "model": {"kind": "tree", "nodes": [{"label": 0}]}}"#,
    );
    let registry = ModelRegistry::load(&ModelPaths::new(dir.path()));
    assert!(registry.is_available(Domain::Parkinsons));

    let outcome = submit(&registry, &FormValues::defaults(Domain::Parkinsons));
    assert_eq!(
        outcome.message(),
        "Prediction error: model expects 22 features, got 13"
    );
}
