//! Model scorer seam and the portable logistic artifact.
//!
//! The blender only ever talks to `ModelScorer`, so the pretrained
//! members stay swappable: a JSON logistic export in production, a
//! `MockScorer` in tests. An artifact is a standard scaler plus
//! logistic coefficients, exported against a named feature contract.

use std::path::Path;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{EnsembleError, Result};
use crate::features::{FeatureVector, FEATURE_CONTRACT, FEATURE_COUNT};

/// One member of the ensemble: maps a feature vector to a probability
/// of chronic kidney disease in [0, 1].
#[async_trait]
pub trait ModelScorer: Send + Sync {
    /// Stable model name used in contributions and error messages.
    fn name(&self) -> &str;

    async fn predict(&self, features: &FeatureVector) -> Result<f64>;
}

/// On-disk artifact format: standardisation parameters and logistic
/// regression weights, all in feature-contract order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactSpec {
    pub name: String,
    pub feature_contract: String,
    pub scaler_mean: Vec<f64>,
    pub scaler_std: Vec<f64>,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

/// A loaded, validated artifact. Inference standardises the features,
/// applies the linear model and squashes through a sigmoid.
#[derive(Debug, Clone)]
pub struct LogisticArtifact {
    spec: ArtifactSpec,
}

impl LogisticArtifact {
    /// Load and validate an artifact from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let started = Instant::now();
        let model = path.display().to_string();
        let raw = std::fs::read_to_string(path).map_err(|err| EnsembleError::ModelLoad {
            model: model.clone(),
            reason: err.to_string(),
        })?;
        let spec: ArtifactSpec =
            serde_json::from_str(&raw).map_err(|err| EnsembleError::ModelLoad {
                model,
                reason: err.to_string(),
            })?;
        let artifact = Self::from_spec(spec)?;
        info!(
            model = %artifact.spec.name,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "model artifact loaded"
        );
        Ok(artifact)
    }

    /// Validate an in-memory artifact spec.
    pub fn from_spec(spec: ArtifactSpec) -> Result<Self> {
        if spec.name.trim().is_empty() {
            return Err(EnsembleError::ModelLoad {
                model: "<unnamed>".to_string(),
                reason: "artifact has no model name".to_string(),
            });
        }
        if spec.feature_contract != FEATURE_CONTRACT {
            return Err(EnsembleError::ContractMismatch {
                model: spec.name,
                artifact: spec.feature_contract,
                expected: FEATURE_CONTRACT.to_string(),
            });
        }
        for (label, values) in [
            ("scaler_mean", &spec.scaler_mean),
            ("scaler_std", &spec.scaler_std),
            ("coefficients", &spec.coefficients),
        ] {
            if values.len() != FEATURE_COUNT {
                return Err(EnsembleError::ModelLoad {
                    model: spec.name,
                    reason: format!(
                        "{label} has {} entries, feature contract requires {FEATURE_COUNT}",
                        values.len()
                    ),
                });
            }
            if values.iter().any(|value| !value.is_finite()) {
                return Err(EnsembleError::ModelLoad {
                    model: spec.name,
                    reason: format!("{label} contains a non-finite value"),
                });
            }
        }
        if spec.scaler_std.iter().any(|std| *std <= 0.0) {
            return Err(EnsembleError::ModelLoad {
                model: spec.name,
                reason: "scaler_std must be strictly positive".to_string(),
            });
        }
        if !spec.intercept.is_finite() {
            return Err(EnsembleError::ModelLoad {
                model: spec.name,
                reason: "intercept is not finite".to_string(),
            });
        }
        Ok(LogisticArtifact { spec })
    }
}

#[async_trait]
impl ModelScorer for LogisticArtifact {
    fn name(&self) -> &str {
        &self.spec.name
    }

    async fn predict(&self, features: &FeatureVector) -> Result<f64> {
        let margin: f64 = features
            .as_slice()
            .iter()
            .zip(&self.spec.scaler_mean)
            .zip(&self.spec.scaler_std)
            .zip(&self.spec.coefficients)
            .map(|(((x, mean), std), weight)| (x - mean) / std * weight)
            .sum::<f64>()
            + self.spec.intercept;
        Ok(sigmoid(margin))
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

/// Scripted scorer for tests: fixed probability, optional latency,
/// optional hard failure.
pub struct MockScorer {
    name: String,
    probability: f64,
    fail: bool,
    delay: Option<Duration>,
}

impl MockScorer {
    pub fn new(name: &str, probability: f64) -> Self {
        MockScorer {
            name: name.to_string(),
            probability,
            fail: false,
            delay: None,
        }
    }

    /// A scorer that always reports itself unavailable.
    pub fn failing(name: &str) -> Self {
        MockScorer {
            name: name.to_string(),
            probability: 0.0,
            fail: true,
            delay: None,
        }
    }

    /// Delay every prediction, for timeout tests.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[async_trait]
impl ModelScorer for MockScorer {
    fn name(&self) -> &str {
        &self.name
    }

    async fn predict(&self, _features: &FeatureVector) -> Result<f64> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail {
            return Err(EnsembleError::ModelUnavailable {
                model: self.name.clone(),
            });
        }
        Ok(self.probability)
    }
}
