//! Shared prediction dispatch used by both the CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! widget values -> typed input -> feature vector -> registry -> label
//!
//! The CLI and the TUI can then focus on presentation (printing vs widgets).

use tracing::{debug, info, warn};

use crate::domain::{Domain, Label, Outcome};
use crate::error::SubmitError;
use crate::features::{DomainInput, FormValues};
use crate::models::ModelRegistry;

/// Everything computed for one submission.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionRun {
    pub input: DomainInput,
    pub vector: Vec<f64>,
    pub label: Label,
}

impl PredictionRun {
    pub fn domain(&self) -> Domain {
        self.input.domain()
    }

    pub fn message(&self) -> &'static str {
        self.domain().message(self.label)
    }
}

/// Collect all fields at once, map them, and ask the domain's model.
pub fn run_prediction(registry: &ModelRegistry, values: &FormValues) -> Result<PredictionRun, SubmitError> {
    let input = DomainInput::from_values(values)?;
    let vector = input.to_vector();
    let domain = input.domain();
    debug!(domain = domain.key(), features = ?vector, "dispatching prediction");

    let label = registry.predict(domain, &vector)?;
    info!(domain = domain.key(), label = label.class(), "prediction complete");

    Ok(PredictionRun { input, vector, label })
}

/// Like [`run_prediction`], but every failure becomes an inline outcome.
pub fn submit(registry: &ModelRegistry, values: &FormValues) -> Outcome {
    match run_prediction(registry, values) {
        Ok(run) => Outcome::Predicted {
            domain: run.domain(),
            label: run.label,
        },
        Err(err) => {
            warn!(domain = values.domain().key(), error = %err, "prediction failed");
            Outcome::Failed(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::error::PredictError;
    use crate::models::{Classifier, check_features};

    /// Labels by a threshold on the first feature and records every vector.
    struct Recording {
        n: usize,
        threshold: f64,
        seen: Arc<Mutex<Vec<Vec<f64>>>>,
    }

    impl Classifier for Recording {
        fn n_features(&self) -> usize {
            self.n
        }
        fn family(&self) -> &str {
            "recording"
        }
        fn predict(&self, features: &[f64]) -> Result<Label, PredictError> {
            check_features(self.n, features)?;
            self.seen.lock().unwrap().push(features.to_vec());
            Ok(if features[0] > self.threshold {
                Label::Positive
            } else {
                Label::Negative
            })
        }
    }

    fn registry_with(domain: Domain, n: usize, threshold: f64) -> (ModelRegistry, Arc<Mutex<Vec<Vec<f64>>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let model = Recording {
            n,
            threshold,
            seen: Arc::clone(&seen),
        };
        let registry = ModelRegistry::from_classifiers([(domain, Box::new(model) as Box<dyn Classifier>)]);
        (registry, seen)
    }

    #[test]
    fn autism_defaults_reach_the_model_positionally() {
        let (registry, seen) = registry_with(Domain::Autism, 5, 50.0);
        let values = FormValues::defaults(Domain::Autism);

        let run = run_prediction(&registry, &values).unwrap();
        assert_eq!(run.label, Label::Negative);
        assert_eq!(run.message(), "Result: Not Autistic");
        assert_eq!(*seen.lock().unwrap(), vec![vec![18.0, 1.0, 0.0, 0.0, 0.0]]);
    }

    #[test]
    fn identical_submissions_give_identical_outcomes() {
        let (registry, _) = registry_with(Domain::Diabetes, 8, 1.0);
        let mut values = FormValues::defaults(Domain::Diabetes);
        values.apply_assignment("glucose=100").unwrap();
        values.apply_assignment("bmi=25.0").unwrap();
        values.apply_assignment("age=30").unwrap();

        let first = submit(&registry, &values);
        let second = submit(&registry, &values);
        assert_eq!(first, second);
        assert_eq!(first.message(), second.message());
    }

    #[test]
    fn unavailable_model_is_an_inline_failure() {
        let (registry, _) = registry_with(Domain::Diabetes, 8, 1.0);
        let outcome = submit(&registry, &FormValues::defaults(Domain::Heart));
        match outcome {
            Outcome::Failed(reason) => assert!(reason.contains("Heart Disease model is not available")),
            other => panic!("expected failure, got {other:?}"),
        }

        // Other domains are unaffected.
        let ok = submit(&registry, &FormValues::defaults(Domain::Diabetes));
        assert!(matches!(ok, Outcome::Predicted { .. }));
    }

    #[test]
    fn shape_mismatch_is_reported_not_panicked() {
        let (registry, seen) = registry_with(Domain::Parkinsons, 22, 0.0);
        let outcome = submit(&registry, &FormValues::defaults(Domain::Parkinsons));
        assert_eq!(
            outcome,
            Outcome::Failed("model expects 22 features, got 13".to_string())
        );
        assert!(seen.lock().unwrap().is_empty());
    }
}
