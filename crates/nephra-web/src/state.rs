//! Shared application state for the web server.

use std::path::Path;
use std::sync::Arc;

use nephra_ensemble::{EnsembleBlender, LogisticArtifact};

use crate::config::ServiceConfig;

/// Shared state injected into every Axum handler.
#[derive(Clone)]
pub struct AppState {
    pub config: ServiceConfig,
    pub blender: EnsembleBlender,
}

impl AppState {
    pub fn new(config: ServiceConfig, blender: EnsembleBlender) -> Self {
        Self { config, blender }
    }

    /// Load the three model artifacts named in the config and wire up
    /// the blender. Fails fast: a service with a missing or mismatched
    /// artifact never starts serving.
    pub fn from_config(config: ServiceConfig) -> anyhow::Result<Self> {
        let lightgbm = LogisticArtifact::from_path(Path::new(&config.models.lightgbm))?;
        let catboost = LogisticArtifact::from_path(Path::new(&config.models.catboost))?;
        let mlp = LogisticArtifact::from_path(Path::new(&config.models.mlp))?;

        let blender = EnsembleBlender::new(
            Arc::new(lightgbm),
            Arc::new(catboost),
            Arc::new(mlp),
            config.weights,
            config.inference_timeout(),
        );

        Ok(Self::new(config, blender))
    }
}

pub type SharedState = Arc<AppState>;
