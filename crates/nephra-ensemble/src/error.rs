//! Error types for feature projection, artifact loading and inference.

use thiserror::Error;

use nephra_common::ApiError;

#[derive(Debug, Error)]
pub enum EnsembleError {
    #[error("missing required field '{0}'")]
    MissingField(&'static str),

    #[error("field '{field}' must be a finite non-negative number, got '{value}'")]
    InvalidField { field: &'static str, value: String },

    #[error("model '{model}' failed to load: {reason}")]
    ModelLoad { model: String, reason: String },

    #[error("model '{model}' was exported against feature contract '{artifact}', this build expects '{expected}'")]
    ContractMismatch {
        model: String,
        artifact: String,
        expected: String,
    },

    #[error("model '{model}' is unavailable")]
    ModelUnavailable { model: String },

    #[error("model '{model}' timed out after {timeout_ms} ms")]
    Timeout { model: String, timeout_ms: u64 },

    #[error("model '{model}' produced an out-of-range probability {value}")]
    InvalidProbability { model: String, value: f64 },
}

impl From<EnsembleError> for ApiError {
    fn from(err: EnsembleError) -> Self {
        match err {
            EnsembleError::MissingField(_) | EnsembleError::InvalidField { .. } => {
                ApiError::Validation(err.to_string())
            }
            // Model-side failures surface as service unavailability;
            // the message names the model, never the underlying cause.
            _ => ApiError::ModelFailure(err.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, EnsembleError>;
