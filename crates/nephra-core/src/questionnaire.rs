//! Questionnaire intake: raw submission, typed answers, validation.
//!
//! A submission arrives as loosely-typed form fields. `parse()` turns it
//! into `QuestionnaireAnswers` or fails with a `ValidationError` naming
//! the offending field. Nothing downstream ever sees an unvalidated
//! value; there are no silent defaults for scored fields.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use nephra_common::ApiError;

/// Validation failure for a single submission field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("missing required field '{0}'")]
    MissingField(&'static str),

    #[error("field '{field}' must be a non-negative whole number, got '{value}'")]
    InvalidInteger { field: &'static str, value: String },

    #[error("field '{field}' must be a positive number, got '{value}'")]
    InvalidNumber { field: &'static str, value: String },

    #[error("unknown value '{value}' for field '{field}'")]
    UnknownValue { field: &'static str, value: String },
}

impl ValidationError {
    /// Name of the field that failed validation.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::MissingField(field) => field,
            ValidationError::InvalidInteger { field, .. } => field,
            ValidationError::InvalidNumber { field, .. } => field,
            ValidationError::UnknownValue { field, .. } => field,
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::Validation(err.to_string())
    }
}

/// A scalar field as submitted. Intake forms post every value as a
/// string; JSON clients post native numbers. Both are accepted and
/// normalised to text before validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Number(f64),
}

impl FieldValue {
    fn as_text(&self) -> String {
        match self {
            FieldValue::Text(text) => text.trim().to_string(),
            FieldValue::Number(number) => number.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
    Other,
}

impl Sex {
    fn from_input(value: &str) -> Option<Self> {
        match value {
            "male" => Some(Sex::Male),
            "female" => Some(Sex::Female),
            "other" => Some(Sex::Other),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Race {
    Black,
    White,
    Asian,
    Hispanic,
    Other,
}

impl Race {
    fn from_input(value: &str) -> Option<Self> {
        match value {
            "black" => Some(Race::Black),
            "white" => Some(Race::White),
            "asian" => Some(Race::Asian),
            "hispanic" => Some(Race::Hispanic),
            "other" => Some(Race::Other),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Hypertension {
    No,
    Borderline,
    Yes,
}

impl Hypertension {
    fn from_input(value: &str) -> Option<Self> {
        match value {
            "no" => Some(Hypertension::No),
            "borderline" => Some(Hypertension::Borderline),
            "yes" => Some(Hypertension::Yes),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Diabetes {
    No,
    Prediabetes,
    Type1,
    Type2,
}

impl Diabetes {
    fn from_input(value: &str) -> Option<Self> {
        match value {
            "no" => Some(Diabetes::No),
            "prediabetes" => Some(Diabetes::Prediabetes),
            "type1" => Some(Diabetes::Type1),
            "type2" => Some(Diabetes::Type2),
            _ => None,
        }
    }

    pub fn is_diabetic(&self) -> bool {
        !matches!(self, Diabetes::No)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FamilyHistory {
    No,
    Parents,
    Siblings,
    Both,
}

impl FamilyHistory {
    fn from_input(value: &str) -> Option<Self> {
        match value {
            "no" => Some(FamilyHistory::No),
            "parents" => Some(FamilyHistory::Parents),
            "siblings" => Some(FamilyHistory::Siblings),
            "both" => Some(FamilyHistory::Both),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FamilyDisease {
    Ckd,
    Diabetes,
    Hypertension,
    Heart,
}

impl FamilyDisease {
    fn from_input(value: &str) -> Option<Self> {
        match value {
            "ckd" => Some(FamilyDisease::Ckd),
            "diabetes" => Some(FamilyDisease::Diabetes),
            "hypertension" => Some(FamilyDisease::Hypertension),
            "heart" => Some(FamilyDisease::Heart),
            _ => None,
        }
    }

    /// Long form used in factor notes and reports.
    pub fn display_name(&self) -> &'static str {
        match self {
            FamilyDisease::Ckd => "Chronic Kidney Disease",
            FamilyDisease::Diabetes => "Diabetes",
            FamilyDisease::Hypertension => "Hypertension",
            FamilyDisease::Heart => "Heart Disease",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Smoking {
    Never,
    Former,
    Current,
}

impl Smoking {
    fn from_input(value: &str) -> Option<Self> {
        match value {
            "never" => Some(Smoking::Never),
            "former" => Some(Smoking::Former),
            "current" => Some(Smoking::Current),
            _ => None,
        }
    }
}

/// Self-reported symptoms. `Pain` (lower back or flank pain) is the
/// red-flag symptom: it triggers the urgent warning on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Symptom {
    Fatigue,
    Swelling,
    Urination,
    Appetite,
    Nausea,
    Sleep,
    Pain,
}

impl Symptom {
    fn from_input(value: &str) -> Option<Self> {
        match value {
            "fatigue" => Some(Symptom::Fatigue),
            "swelling" => Some(Symptom::Swelling),
            "urination" => Some(Symptom::Urination),
            "appetite" => Some(Symptom::Appetite),
            "nausea" => Some(Symptom::Nausea),
            "sleep" => Some(Symptom::Sleep),
            "pain" => Some(Symptom::Pain),
            _ => None,
        }
    }
}

/// Raw questionnaire submission, field names as posted by the intake
/// form. Scalars are optional here so that validation, not
/// deserialization, reports what is missing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssessmentSubmission {
    pub age: Option<FieldValue>,
    pub sex: Option<FieldValue>,
    pub race: Option<FieldValue>,
    pub hypertension: Option<FieldValue>,
    pub diabetes: Option<FieldValue>,
    pub duration: Option<FieldValue>,
    pub family_history: Option<FieldValue>,
    #[serde(default)]
    pub family_diseases: Vec<String>,
    pub bmi: Option<FieldValue>,
    pub smoking: Option<FieldValue>,
    pub cardiovascular: Option<FieldValue>,
    #[serde(default)]
    pub symptoms: Vec<String>,
}

/// Fully validated questionnaire answers. Every scored field is typed
/// and in range; this is the only input the scorer accepts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionnaireAnswers {
    pub age: u32,
    pub sex: Sex,
    pub race: Race,
    pub hypertension: Hypertension,
    pub diabetes: Diabetes,
    /// Years since diabetes diagnosis. Ignored by the scorer when
    /// `diabetes` is `No`.
    pub duration: u32,
    pub family_history: FamilyHistory,
    pub family_diseases: Vec<FamilyDisease>,
    pub bmi: f64,
    pub smoking: Smoking,
    pub cardiovascular: bool,
    pub symptoms: Vec<Symptom>,
}

impl AssessmentSubmission {
    /// Validate the submission into typed answers.
    ///
    /// Fails on the first problem found, in field order, so the caller
    /// gets one actionable message per round trip.
    pub fn parse(&self) -> Result<QuestionnaireAnswers, ValidationError> {
        let age = parse_u32("age", &require(&self.age, "age")?)?;
        let sex = parse_choice("sex", &require(&self.sex, "sex")?, Sex::from_input)?;
        let race = parse_choice("race", &require(&self.race, "race")?, Race::from_input)?;
        let hypertension = parse_choice(
            "hypertension",
            &require(&self.hypertension, "hypertension")?,
            Hypertension::from_input,
        )?;
        let diabetes = parse_choice(
            "diabetes",
            &require(&self.diabetes, "diabetes")?,
            Diabetes::from_input,
        )?;
        let duration = match self.duration.as_ref().map(FieldValue::as_text) {
            Some(text) if !text.is_empty() => parse_u32("duration", &text)?,
            _ => 0,
        };
        let family_history = parse_choice(
            "family_history",
            &require(&self.family_history, "family_history")?,
            FamilyHistory::from_input,
        )?;
        let family_diseases = parse_set(
            "family_diseases",
            &self.family_diseases,
            FamilyDisease::from_input,
        )?;
        let bmi = parse_positive_f64("bmi", &require(&self.bmi, "bmi")?)?;
        let smoking = parse_choice("smoking", &require(&self.smoking, "smoking")?, Smoking::from_input)?;
        let cardiovascular = parse_yes_no("cardiovascular", &require(&self.cardiovascular, "cardiovascular")?)?;
        let symptoms = parse_set("symptoms", &self.symptoms, Symptom::from_input)?;

        Ok(QuestionnaireAnswers {
            age,
            sex,
            race,
            hypertension,
            diabetes,
            duration,
            family_history,
            family_diseases,
            bmi,
            smoking,
            cardiovascular,
            symptoms,
        })
    }
}

fn require(value: &Option<FieldValue>, field: &'static str) -> Result<String, ValidationError> {
    match value.as_ref().map(FieldValue::as_text) {
        Some(text) if !text.is_empty() => Ok(text),
        _ => Err(ValidationError::MissingField(field)),
    }
}

fn parse_u32(field: &'static str, value: &str) -> Result<u32, ValidationError> {
    value.parse::<u32>().map_err(|_| ValidationError::InvalidInteger {
        field,
        value: value.to_string(),
    })
}

fn parse_positive_f64(field: &'static str, value: &str) -> Result<f64, ValidationError> {
    match value.parse::<f64>() {
        Ok(number) if number.is_finite() && number > 0.0 => Ok(number),
        _ => Err(ValidationError::InvalidNumber {
            field,
            value: value.to_string(),
        }),
    }
}

fn parse_yes_no(field: &'static str, value: &str) -> Result<bool, ValidationError> {
    match value {
        "yes" => Ok(true),
        "no" => Ok(false),
        _ => Err(ValidationError::UnknownValue {
            field,
            value: value.to_string(),
        }),
    }
}

fn parse_choice<T>(
    field: &'static str,
    value: &str,
    from_input: fn(&str) -> Option<T>,
) -> Result<T, ValidationError> {
    from_input(value).ok_or_else(|| ValidationError::UnknownValue {
        field,
        value: value.to_string(),
    })
}

/// Parse a checkbox list into typed values, dropping duplicates while
/// keeping submission order.
fn parse_set<T: PartialEq>(
    field: &'static str,
    values: &[String],
    from_input: fn(&str) -> Option<T>,
) -> Result<Vec<T>, ValidationError> {
    let mut parsed = Vec::with_capacity(values.len());
    for raw in values {
        let trimmed = raw.trim();
        let item = from_input(trimmed).ok_or_else(|| ValidationError::UnknownValue {
            field,
            value: trimmed.to_string(),
        })?;
        if !parsed.contains(&item) {
            parsed.push(item);
        }
    }
    Ok(parsed)
}
