//! Feature projection for the pretrained model ensemble.
//!
//! The models were trained against a fixed, ordered feature vector.
//! That contract is frozen here and versioned; every artifact declares
//! the contract version it was exported against and loading fails on a
//! mismatch. Do not extend the vector without cutting a new contract
//! version and re-exporting the artifacts.

use serde::{Deserialize, Serialize};

use crate::error::EnsembleError;

/// Version tag of the feature contract below.
pub const FEATURE_CONTRACT: &str = "v1";

/// Number of features in the contract.
pub const FEATURE_COUNT: usize = 4;

/// Feature order the models were trained on.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = ["age", "sex_male", "bmi", "hypertension"];

/// Ordered numeric input for one inference call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    pub fn new(age: f64, sex_male: f64, bmi: f64, hypertension: f64) -> Self {
        FeatureVector([age, sex_male, bmi, hypertension])
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

/// Raw prediction request, one field per contract feature. Fields are
/// optional so validation, not deserialization, reports what is
/// missing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PredictRequest {
    pub age: Option<f64>,
    pub sex: Option<String>,
    pub bmi: Option<f64>,
    pub hypertension: Option<String>,
}

impl TryFrom<&PredictRequest> for FeatureVector {
    type Error = EnsembleError;

    /// Project raw fields onto the contract order. Binary encodings:
    /// sex is 1.0 for "male" and 0.0 otherwise, hypertension is 1.0
    /// for "yes" and 0.0 otherwise.
    fn try_from(request: &PredictRequest) -> Result<Self, EnsembleError> {
        let age = required_number("age", request.age)?;
        let sex = required_text("sex", &request.sex)?;
        let bmi = required_number("bmi", request.bmi)?;
        if bmi <= 0.0 {
            return Err(EnsembleError::InvalidField {
                field: "bmi",
                value: bmi.to_string(),
            });
        }
        let hypertension = required_text("hypertension", &request.hypertension)?;

        Ok(FeatureVector::new(
            age,
            binary(&sex, "male"),
            bmi,
            binary(&hypertension, "yes"),
        ))
    }
}

fn required_number(field: &'static str, value: Option<f64>) -> Result<f64, EnsembleError> {
    let number = value.ok_or(EnsembleError::MissingField(field))?;
    if !number.is_finite() || number < 0.0 {
        return Err(EnsembleError::InvalidField {
            field,
            value: number.to_string(),
        });
    }
    Ok(number)
}

fn required_text(field: &'static str, value: &Option<String>) -> Result<String, EnsembleError> {
    match value.as_deref().map(str::trim) {
        Some(text) if !text.is_empty() => Ok(text.to_string()),
        _ => Err(EnsembleError::MissingField(field)),
    }
}

fn binary(value: &str, positive: &str) -> f64 {
    if value == positive {
        1.0
    } else {
        0.0
    }
}
