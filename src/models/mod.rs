//! Pre-trained classifiers and the registry that owns them.
//!
//! Models are opaque: the rest of the application only ever calls
//! `Classifier::predict` with a feature vector and gets a `Label` back.

pub mod artifact;
pub mod registry;

pub use artifact::{ArtifactFile, LoadedModel, ModelSpec};
pub use registry::{LoadStatus, ModelPaths, ModelRegistry, ModelSummary};

use crate::domain::Label;
use crate::error::PredictError;

/// A read-only binary classifier.
///
/// Implementations must be pure: the same vector always yields the same label.
pub trait Classifier: Send + Sync {
    /// Number of features the model was trained on.
    fn n_features(&self) -> usize;

    /// Short family name for status output (`linear`, `tree`, ...).
    fn family(&self) -> &str;

    fn predict(&self, features: &[f64]) -> Result<Label, PredictError>;
}

/// Reject vectors the model cannot score.
pub fn check_features(expected: usize, features: &[f64]) -> Result<(), PredictError> {
    if features.len() != expected {
        return Err(PredictError::FeatureCount {
            expected,
            actual: features.len(),
        });
    }
    if let Some(index) = features.iter().position(|v| !v.is_finite()) {
        return Err(PredictError::NonFinite { index });
    }
    Ok(())
}
