//! Model artifact files.
//!
//! An artifact is a JSON document describing an already-trained classifier:
//!
//! ```json
//! {
//!   "name": "diabetes-logreg",
//!   "n_features": 8,
//!   "model": { "kind": "linear", "coefficients": [...], "intercept": -8.4 }
//! }
//! ```
//!
//! Three families are supported:
//! - `linear`: `w·x + b > 0` after optional standard scaling (logistic
//!   regression and linear SVMs export to this)
//! - `tree`: a flat node array in the usual sklearn export shape
//! - `forest`: several trees, majority vote, ties go to class 0
//!
//! Structure is validated once at load time so `predict` never has to.

use std::fs;
use std::path::Path;

use nalgebra::DVector;
use serde::{Deserialize, Serialize};

use crate::domain::Label;
use crate::error::{ModelError, PredictError};
use crate::models::{Classifier, check_features};

/// On-disk representation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactFile {
    #[serde(default)]
    pub name: Option<String>,
    /// Free-form provenance note (dataset, date, ...).
    #[serde(default)]
    pub trained_on: Option<String>,
    pub n_features: usize,
    pub model: ModelSpec,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ModelSpec {
    Linear(LinearSpec),
    Tree(TreeSpec),
    Forest(ForestSpec),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearSpec {
    pub coefficients: Vec<f64>,
    pub intercept: f64,
    #[serde(default)]
    pub scaler: Option<ScalerSpec>,
}

/// `(x - mean) / scale`, applied per feature before the dot product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScalerSpec {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeSpec {
    /// Node 0 is the root. Children always have a larger index than their parent.
    pub nodes: Vec<NodeSpec>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeSpec {
    /// `x[feature] <= threshold` goes left.
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        label: u8,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForestSpec {
    pub trees: Vec<TreeSpec>,
}

/// A validated, ready-to-score model.
#[derive(Debug, Clone)]
pub struct LoadedModel {
    name: Option<String>,
    n_features: usize,
    compiled: Compiled,
}

#[derive(Debug, Clone)]
enum Compiled {
    Linear {
        weights: DVector<f64>,
        intercept: f64,
        mean: DVector<f64>,
        inv_scale: DVector<f64>,
    },
    Tree(Vec<NodeSpec>),
    Forest(Vec<Vec<NodeSpec>>),
}

impl LoadedModel {
    /// Read, parse and validate an artifact file.
    pub fn from_file(path: &Path) -> Result<Self, ModelError> {
        let text = fs::read_to_string(path).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let artifact: ArtifactFile = serde_json::from_str(&text).map_err(|source| ModelError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        Self::compile(artifact)
    }

    pub fn compile(artifact: ArtifactFile) -> Result<Self, ModelError> {
        let n = artifact.n_features;
        if n == 0 {
            return Err(ModelError::Malformed("n_features must be at least 1".into()));
        }

        let compiled = match artifact.model {
            ModelSpec::Linear(spec) => compile_linear(spec, n)?,
            ModelSpec::Tree(spec) => {
                validate_tree(&spec.nodes, n)?;
                Compiled::Tree(spec.nodes)
            }
            ModelSpec::Forest(spec) => {
                if spec.trees.is_empty() {
                    return Err(ModelError::Malformed("forest has no trees".into()));
                }
                for (i, tree) in spec.trees.iter().enumerate() {
                    validate_tree(&tree.nodes, n)
                        .map_err(|e| ModelError::Malformed(format!("tree {i}: {e}")))?;
                }
                Compiled::Forest(spec.trees.into_iter().map(|t| t.nodes).collect())
            }
        };

        Ok(Self {
            name: artifact.name,
            n_features: n,
            compiled,
        })
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

impl Classifier for LoadedModel {
    fn n_features(&self) -> usize {
        self.n_features
    }

    fn family(&self) -> &str {
        match self.compiled {
            Compiled::Linear { .. } => "linear",
            Compiled::Tree(_) => "tree",
            Compiled::Forest(_) => "forest",
        }
    }

    fn predict(&self, features: &[f64]) -> Result<Label, PredictError> {
        check_features(self.n_features, features)?;

        let class = match &self.compiled {
            Compiled::Linear {
                weights,
                intercept,
                mean,
                inv_scale,
            } => {
                let x = DVector::from_column_slice(features);
                let z = (x - mean).component_mul(inv_scale);
                let score = weights.dot(&z) + intercept;
                u8::from(score > 0.0)
            }
            Compiled::Tree(nodes) => eval_tree(nodes, features),
            Compiled::Forest(trees) => {
                let positive = trees.iter().filter(|t| eval_tree(t, features) == 1).count();
                u8::from(positive * 2 > trees.len())
            }
        };

        Ok(Label::from_class(class))
    }
}

fn compile_linear(spec: LinearSpec, n: usize) -> Result<Compiled, ModelError> {
    if spec.coefficients.len() != n {
        return Err(ModelError::Malformed(format!(
            "{} coefficients for {n} features",
            spec.coefficients.len()
        )));
    }
    if !spec.intercept.is_finite() || spec.coefficients.iter().any(|c| !c.is_finite()) {
        return Err(ModelError::Malformed("non-finite coefficient".into()));
    }

    let (mean, inv_scale) = match spec.scaler {
        Some(scaler) => {
            if scaler.mean.len() != n || scaler.scale.len() != n {
                return Err(ModelError::Malformed(format!(
                    "scaler has {} means and {} scales for {n} features",
                    scaler.mean.len(),
                    scaler.scale.len()
                )));
            }
            if scaler.mean.iter().chain(&scaler.scale).any(|v| !v.is_finite()) {
                return Err(ModelError::Malformed("non-finite scaler entry".into()));
            }
            // A zero scale means a constant training column; leave it unscaled.
            let inv: Vec<f64> = scaler
                .scale
                .iter()
                .map(|s| if *s == 0.0 { 1.0 } else { 1.0 / s })
                .collect();
            (DVector::from_vec(scaler.mean), DVector::from_vec(inv))
        }
        None => (DVector::zeros(n), DVector::from_element(n, 1.0)),
    };

    Ok(Compiled::Linear {
        weights: DVector::from_vec(spec.coefficients),
        intercept: spec.intercept,
        mean,
        inv_scale,
    })
}

fn validate_tree(nodes: &[NodeSpec], n_features: usize) -> Result<(), ModelError> {
    if nodes.is_empty() {
        return Err(ModelError::Malformed("tree has no nodes".into()));
    }
    for (i, node) in nodes.iter().enumerate() {
        match *node {
            NodeSpec::Split {
                feature,
                threshold,
                left,
                right,
            } => {
                if feature >= n_features {
                    return Err(ModelError::Malformed(format!(
                        "node {i} splits on feature {feature}, model has {n_features}"
                    )));
                }
                if !threshold.is_finite() {
                    return Err(ModelError::Malformed(format!("node {i} has a non-finite threshold")));
                }
                for child in [left, right] {
                    if child <= i || child >= nodes.len() {
                        return Err(ModelError::Malformed(format!(
                            "node {i} points at invalid child {child}"
                        )));
                    }
                }
            }
            NodeSpec::Leaf { label } => {
                if label > 1 {
                    return Err(ModelError::Malformed(format!(
                        "node {i} has label {label}, expected 0 or 1"
                    )));
                }
            }
        }
    }
    Ok(())
}

/// Walk from the root to a leaf. Validation guarantees termination and
/// in-bounds indices.
fn eval_tree(nodes: &[NodeSpec], x: &[f64]) -> u8 {
    let mut i = 0;
    loop {
        match nodes[i] {
            NodeSpec::Leaf { label } => return label,
            NodeSpec::Split {
                feature,
                threshold,
                left,
                right,
            } => {
                i = if x[feature] <= threshold { left } else { right };
            }
        }
    }
}
