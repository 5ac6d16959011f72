//! The model registry.
//!
//! Built once at startup and then only read. Every domain's artifact loads
//! independently: a missing or corrupt file marks that one domain unavailable
//! and leaves the others usable.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::domain::{Domain, Label};
use crate::error::PredictError;
use crate::models::{Classifier, LoadedModel};

/// Where artifacts live on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelPaths {
    root: PathBuf,
}

impl ModelPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, domain: Domain) -> PathBuf {
        self.root.join(domain.artifact_path())
    }
}

enum Slot {
    Ready(Box<dyn Classifier>),
    Failed(String),
}

/// Per-domain result of loading, for status output.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadStatus {
    pub domain: Domain,
    pub source: String,
    pub state: Result<ModelSummary, String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModelSummary {
    pub family: String,
    pub n_features: usize,
}

pub struct ModelRegistry {
    slots: BTreeMap<Domain, (String, Slot)>,
}

impl ModelRegistry {
    /// Load all four artifacts. Never fails as a whole.
    pub fn load(paths: &ModelPaths) -> Self {
        let mut slots = BTreeMap::new();
        for domain in Domain::ALL {
            let path = paths.path_for(domain);
            let source = path.display().to_string();
            let slot = match LoadedModel::from_file(&path) {
                Ok(model) => {
                    if model.n_features() != domain.feature_count() {
                        // Still usable; every submission will report the mismatch.
                        warn!(
                            domain = domain.key(),
                            expected = domain.feature_count(),
                            actual = model.n_features(),
                            "model feature count does not match the form"
                        );
                    }
                    info!(
                        domain = domain.key(),
                        path = %source,
                        family = model.family(),
                        name = model.name().unwrap_or("-"),
                        "loaded model"
                    );
                    Slot::Ready(Box::new(model))
                }
                Err(err) => {
                    warn!(domain = domain.key(), error = %err, "model unavailable");
                    Slot::Failed(err.to_string())
                }
            };
            slots.insert(domain, (source, slot));
        }
        Self { slots }
    }

    /// Build a registry from in-memory classifiers. Domains without one are
    /// marked unavailable.
    pub fn from_classifiers(models: impl IntoIterator<Item = (Domain, Box<dyn Classifier>)>) -> Self {
        let mut slots: BTreeMap<Domain, (String, Slot)> = Domain::ALL
            .into_iter()
            .map(|d| (d, ("<memory>".to_string(), Slot::Failed("not loaded".to_string()))))
            .collect();
        for (domain, model) in models {
            slots.insert(domain, ("<memory>".to_string(), Slot::Ready(model)));
        }
        Self { slots }
    }

    pub fn predict(&self, domain: Domain, features: &[f64]) -> Result<Label, PredictError> {
        match self.slots.get(&domain) {
            Some((_, Slot::Ready(model))) => model.predict(features),
            Some((_, Slot::Failed(reason))) => Err(PredictError::Unavailable {
                domain,
                reason: reason.clone(),
            }),
            None => Err(PredictError::Unavailable {
                domain,
                reason: "not registered".to_string(),
            }),
        }
    }

    pub fn is_available(&self, domain: Domain) -> bool {
        matches!(self.slots.get(&domain), Some((_, Slot::Ready(_))))
    }

    /// Status for every domain, in `Domain::ALL` order.
    pub fn report(&self) -> Vec<LoadStatus> {
        self.slots
            .iter()
            .map(|(domain, (source, slot))| LoadStatus {
                domain: *domain,
                source: source.clone(),
                state: match slot {
                    Slot::Ready(model) => Ok(ModelSummary {
                        family: model.family().to_string(),
                        n_features: model.n_features(),
                    }),
                    Slot::Failed(reason) => Err(reason.clone()),
                },
            })
            .collect()
    }

    pub fn failed_domains(&self) -> Vec<Domain> {
        self.slots
            .iter()
            .filter(|(_, (_, slot))| matches!(slot, Slot::Failed(_)))
            .map(|(domain, _)| *domain)
            .collect()
    }
}

impl std::fmt::Debug for ModelRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelRegistry")
            .field("available", &Domain::ALL.iter().filter(|d| self.is_available(**d)).collect::<Vec<_>>())
            .field("failed", &self.failed_domains())
            .finish()
    }
}
