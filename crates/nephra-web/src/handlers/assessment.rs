//! Questionnaire endpoints: scoring and report download.

use axum::{extract::State, response::IntoResponse, Json};
use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use nephra_common::ApiError;
use nephra_core::{build_recommendations, render_report, score, Assessment, AssessmentSubmission};

use crate::state::SharedState;

/// POST /calculate — validate a submission, score it and attach
/// recommendations. Validation failures return 400 with the offending
/// field named in the message.
pub async fn calculate(
    State(_state): State<SharedState>,
    Json(submission): Json<AssessmentSubmission>,
) -> Result<impl IntoResponse, ApiError> {
    let answers = submission.parse()?;
    let result = score(&answers);
    let recommendations = build_recommendations(&result);

    info!(
        total = result.total_score,
        level = %result.risk_level,
        urgent = result.urgent_warning,
        "assessment scored"
    );

    Ok(Json(Assessment {
        id: Uuid::new_v4(),
        result,
        recommendations,
    }))
}

/// POST /download-report — flatten a completed assessment into the
/// plain-text report plus the filename to save it under.
pub async fn download_report(
    State(_state): State<SharedState>,
    Json(assessment): Json<Assessment>,
) -> Result<impl IntoResponse, ApiError> {
    let report = render_report(&assessment, Utc::now());
    info!(filename = %report.filename, "report rendered");
    Ok(Json(report))
}
