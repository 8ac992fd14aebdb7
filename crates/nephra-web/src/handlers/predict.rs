//! Ensemble prediction endpoint.

use axum::{extract::State, response::IntoResponse, Json};
use tracing::info;

use nephra_common::ApiError;
use nephra_ensemble::{FeatureVector, PredictRequest};

use crate::state::SharedState;

/// POST /predict — project the request onto the model feature contract
/// and blend the three member probabilities. Missing or invalid fields
/// return 400; a failed or slow model returns 503 naming the model.
pub async fn predict(
    State(state): State<SharedState>,
    Json(request): Json<PredictRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let features = FeatureVector::try_from(&request)?;
    let prediction = state.blender.blend(&features).await?;

    info!(
        risk_score = prediction.risk_score,
        level = %prediction.risk_level,
        "ensemble prediction served"
    );

    Ok(Json(prediction))
}
