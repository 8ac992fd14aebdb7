//! Additive risk scoring over validated questionnaire answers.
//!
//! Ten clinical factors are always evaluated, in a fixed order, each
//! contributing a bounded number of points. The total tiers into a
//! risk level with an estimated five-year risk band, and a separate
//! urgency check flags red-flag presentations independently of tier.

use serde::{Deserialize, Serialize};

use nephra_common::RiskLevel;

use crate::questionnaire::{
    Diabetes, FamilyDisease, FamilyHistory, Hypertension, QuestionnaireAnswers, Race, Smoking,
    Symptom,
};

/// Total at or above which the assessment tiers as high risk.
pub const HIGH_RISK_THRESHOLD: u32 = 10;
/// Total at or above which the assessment tiers as moderate risk.
pub const MODERATE_RISK_THRESHOLD: u32 = 6;
/// Total at or above which the urgent flag fires regardless of tier.
pub const URGENT_SCORE_THRESHOLD: u32 = 12;
/// Symptom count at or above which the urgent flag fires.
pub const URGENT_SYMPTOM_COUNT: usize = 4;
/// Years of type 1 diabetes at or above which the urgent flag fires.
pub const URGENT_TYPE1_DURATION: u32 = 10;
/// Display denominator for the point total.
pub const SCORE_SCALE: u32 = 20;

/// Category a factor is reported under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FactorCategory {
    Demographics,
    #[serde(rename = "Medical Conditions")]
    MedicalConditions,
    #[serde(rename = "Family History")]
    FamilyHistory,
    Lifestyle,
    Symptoms,
}

impl std::fmt::Display for FactorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            FactorCategory::Demographics => "Demographics",
            FactorCategory::MedicalConditions => "Medical Conditions",
            FactorCategory::FamilyHistory => "Family History",
            FactorCategory::Lifestyle => "Lifestyle",
            FactorCategory::Symptoms => "Symptoms",
        };
        write!(f, "{label}")
    }
}

/// One scored factor: what it was, what it earned, what it could have
/// earned. Zero-point factors are kept so callers always see all ten.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreFactor {
    pub label: String,
    pub points: u32,
    pub max_points: u32,
    pub category: FactorCategory,
    pub note: Option<String>,
}

impl ScoreFactor {
    fn new(label: &str, points: u32, max_points: u32, category: FactorCategory) -> Self {
        ScoreFactor {
            label: label.to_string(),
            points,
            max_points,
            category,
            note: None,
        }
    }

    fn with_note(mut self, note: String) -> Self {
        self.note = Some(note);
        self
    }
}

/// Scored assessment: the point total, its tier, the full factor
/// breakdown and the echoed answers it was computed from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskResult {
    pub total_score: u32,
    pub risk_level: RiskLevel,
    /// Estimated five-year risk band for the tier, e.g. "20-50%".
    pub risk_percentage: String,
    pub factors: Vec<ScoreFactor>,
    pub urgent_warning: bool,
    pub symptom_count: usize,
    pub has_pain: bool,
    /// Long-form family disease list, e.g. "Chronic Kidney Disease, Diabetes".
    pub family_diseases_text: String,
    pub answers: QuestionnaireAnswers,
}

/// Map a point total to its tier and five-year risk band.
pub fn risk_tier(total: u32) -> (RiskLevel, &'static str) {
    if total >= HIGH_RISK_THRESHOLD {
        (RiskLevel::High, "20-50%")
    } else if total >= MODERATE_RISK_THRESHOLD {
        (RiskLevel::Moderate, "5-20%")
    } else {
        (RiskLevel::Low, "<5%")
    }
}

/// Urgent-warning predicate, independent of the risk tier.
///
/// Fires on a very high total, long-standing type 1 diabetes, a heavy
/// symptom load, or pain on its own.
pub fn urgency(
    total_score: u32,
    diabetes: Diabetes,
    duration: u32,
    symptom_count: usize,
    has_pain: bool,
) -> bool {
    total_score >= URGENT_SCORE_THRESHOLD
        || (diabetes == Diabetes::Type1 && duration >= URGENT_TYPE1_DURATION)
        || symptom_count >= URGENT_SYMPTOM_COUNT
        || has_pain
}

/// Score a validated questionnaire.
///
/// Deterministic: the same answers always produce the same result.
/// The factor list always has exactly ten entries in a fixed order;
/// the total equals the sum of the factor points.
pub fn score(answers: &QuestionnaireAnswers) -> RiskResult {
    let symptom_count = answers.symptoms.len();
    let has_pain = answers.symptoms.contains(&Symptom::Pain);
    let family_diseases_text = family_diseases_text(&answers.family_diseases);

    let factors = vec![
        age_factor(answers.age),
        race_factor(answers.race),
        hypertension_factor(answers.hypertension),
        diabetes_factor(answers.diabetes),
        duration_factor(answers.diabetes, answers.duration),
        family_history_factor(answers.family_history, &family_diseases_text),
        bmi_factor(answers.bmi),
        smoking_factor(answers.smoking),
        cardiovascular_factor(answers.cardiovascular),
        symptom_factor(symptom_count),
    ];

    let total_score: u32 = factors.iter().map(|factor| factor.points).sum();
    let (risk_level, band) = risk_tier(total_score);
    let urgent_warning = urgency(
        total_score,
        answers.diabetes,
        answers.duration,
        symptom_count,
        has_pain,
    );

    RiskResult {
        total_score,
        risk_level,
        risk_percentage: band.to_string(),
        factors,
        urgent_warning,
        symptom_count,
        has_pain,
        family_diseases_text,
        answers: answers.clone(),
    }
}

fn age_factor(age: u32) -> ScoreFactor {
    let category = FactorCategory::Demographics;
    if age >= 60 {
        ScoreFactor::new("Age (60+)", 3, 3, category)
    } else if age >= 50 {
        ScoreFactor::new("Age (50-59)", 2, 3, category)
    } else if age >= 40 {
        ScoreFactor::new("Age (40-49)", 1, 3, category)
    } else {
        ScoreFactor::new("Age (<40)", 0, 3, category)
    }
}

fn race_factor(race: Race) -> ScoreFactor {
    let category = FactorCategory::Demographics;
    if race == Race::Black {
        ScoreFactor::new("African American", 1, 1, category)
    } else {
        ScoreFactor::new("Race/ethnicity", 0, 1, category)
    }
}

fn hypertension_factor(hypertension: Hypertension) -> ScoreFactor {
    let category = FactorCategory::MedicalConditions;
    match hypertension {
        Hypertension::Yes => ScoreFactor::new("Hypertension", 2, 2, category),
        Hypertension::Borderline => ScoreFactor::new("Borderline hypertension", 1, 2, category),
        Hypertension::No => ScoreFactor::new("No hypertension", 0, 2, category),
    }
}

fn diabetes_factor(diabetes: Diabetes) -> ScoreFactor {
    let category = FactorCategory::MedicalConditions;
    match diabetes {
        Diabetes::Type1 => ScoreFactor::new("Type 1 Diabetes", 4, 4, category),
        Diabetes::Type2 => ScoreFactor::new("Type 2 Diabetes", 3, 4, category),
        Diabetes::Prediabetes => ScoreFactor::new("Prediabetes", 1, 4, category),
        Diabetes::No => ScoreFactor::new("No diabetes", 0, 4, category),
    }
}

/// Duration only counts for diagnosed diabetics; for everyone else the
/// factor is present but inert.
fn duration_factor(diabetes: Diabetes, duration: u32) -> ScoreFactor {
    let category = FactorCategory::MedicalConditions;
    if !diabetes.is_diabetic() {
        return ScoreFactor::new("Diabetes duration (not applicable)", 0, 2, category);
    }
    if duration >= 10 {
        ScoreFactor::new("Diabetes duration (10+ yrs)", 2, 2, category)
    } else if duration >= 5 {
        ScoreFactor::new("Diabetes duration (5-9 yrs)", 1, 2, category)
    } else {
        ScoreFactor::new("Diabetes duration (<5 yrs)", 0, 2, category)
    }
}

fn family_history_factor(history: FamilyHistory, diseases_text: &str) -> ScoreFactor {
    let points = match history {
        FamilyHistory::Both => 2,
        FamilyHistory::Parents | FamilyHistory::Siblings => 1,
        FamilyHistory::No => 0,
    };
    let factor = ScoreFactor::new("Family history", points, 2, FactorCategory::FamilyHistory);
    if diseases_text.is_empty() {
        factor
    } else {
        factor.with_note(format!("({diseases_text})"))
    }
}

fn bmi_factor(bmi: f64) -> ScoreFactor {
    let category = FactorCategory::Lifestyle;
    if bmi >= 30.0 {
        ScoreFactor::new("Obesity (BMI ≥30)", 1, 1, category)
    } else if bmi >= 25.0 {
        ScoreFactor::new("Overweight (BMI 25-29.9)", 0, 1, category)
    } else {
        ScoreFactor::new("Normal weight", 0, 1, category)
    }
}

fn smoking_factor(smoking: Smoking) -> ScoreFactor {
    let category = FactorCategory::Lifestyle;
    match smoking {
        Smoking::Current => ScoreFactor::new("Current smoker", 1, 1, category),
        Smoking::Former => ScoreFactor::new("Former smoker", 0, 1, category),
        Smoking::Never => ScoreFactor::new("Never smoked", 0, 1, category),
    }
}

fn cardiovascular_factor(present: bool) -> ScoreFactor {
    let category = FactorCategory::MedicalConditions;
    if present {
        ScoreFactor::new("Cardiovascular disease", 1, 1, category)
    } else {
        ScoreFactor::new("No cardiovascular disease", 0, 1, category)
    }
}

fn symptom_factor(count: usize) -> ScoreFactor {
    let category = FactorCategory::Symptoms;
    if count >= 3 {
        ScoreFactor::new("Multiple symptoms", 2, 2, category)
    } else if count >= 1 {
        ScoreFactor::new("Some symptoms", 1, 2, category)
    } else {
        ScoreFactor::new("No symptoms", 0, 2, category)
    }
}

fn family_diseases_text(diseases: &[FamilyDisease]) -> String {
    diseases
        .iter()
        .map(|disease| disease.display_name())
        .collect::<Vec<_>>()
        .join(", ")
}
