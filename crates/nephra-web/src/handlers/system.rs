//! Health probe.

use axum::{extract::State, Json};
use serde::Serialize;

use nephra_ensemble::FEATURE_CONTRACT;

use crate::state::SharedState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub feature_contract: &'static str,
    pub models: Vec<String>,
}

/// GET /health — liveness plus the loaded model roster and the feature
/// contract this build was compiled against.
pub async fn health(State(state): State<SharedState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        feature_contract: FEATURE_CONTRACT,
        models: state
            .blender
            .model_names()
            .iter()
            .map(|name| name.to_string())
            .collect(),
    })
}
