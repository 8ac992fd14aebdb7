//! Error taxonomy for the HTTP boundary.
//!
//! Every failure that reaches a handler collapses into one of three
//! buckets with a fixed status code each. Validation messages name the
//! offending field and are safe to echo to the caller; internal errors
//! are logged server-side and replaced with a generic message.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The request payload failed validation. The message names the
    /// offending field and is returned to the caller verbatim.
    #[error("{0}")]
    Validation(String),

    /// A model in the ensemble could not produce a probability. The
    /// message names the model, never the underlying cause.
    #[error("{0}")]
    ModelFailure(String),

    /// Anything unexpected. Logged in full, reported generically.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::ModelFailure(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            ApiError::Internal(err) => {
                tracing::error!(error = %err, "unhandled internal error");
                "internal server error".to_string()
            }
            other => other.to_string(),
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes_per_variant() {
        assert_eq!(
            ApiError::Validation("missing required field 'age'".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::ModelFailure("model 'catboost' is unavailable".into()).status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            ApiError::Internal(anyhow::anyhow!("boom")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_validation_message_preserved() {
        let err = ApiError::Validation("unknown value 'maybe' for field 'diabetes'".into());
        assert_eq!(err.to_string(), "unknown value 'maybe' for field 'diabetes'");
    }
}
