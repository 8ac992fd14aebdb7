//! Tailored guidance derived from a scored assessment.
//!
//! Blocks are emitted in a fixed order: age-related first (60 and
//! over), then diabetes management (any diabetes status), then a
//! lifestyle block that is always present. Within the lifestyle block
//! the smoking-cessation item comes first, then weight management,
//! then the general items.

use serde::{Deserialize, Serialize};

use crate::questionnaire::{Diabetes, Smoking};
use crate::scorer::RiskResult;

/// Years of diabetes at which six-monthly kidney checks are advised.
const FREQUENT_MONITORING_YEARS: u32 = 5;
/// BMI at which the weight-management item is added.
const OVERWEIGHT_BMI: f64 = 25.0;
/// Age at which the age-related block is added.
const SENIOR_AGE: u32 = 60;

/// One titled block of recommendations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationBlock {
    pub title: String,
    /// Optional lead-in line printed before the items.
    pub intro: Option<String>,
    pub items: Vec<String>,
}

/// Build the recommendation blocks for a scored assessment.
pub fn build_recommendations(result: &RiskResult) -> Vec<RecommendationBlock> {
    let answers = &result.answers;
    let mut blocks = Vec::new();

    if answers.age >= SENIOR_AGE {
        blocks.push(RecommendationBlock {
            title: "Age-Related Recommendations".to_string(),
            intro: Some("Since you're over 60, we recommend:".to_string()),
            items: vec![
                "Annual kidney function tests even without symptoms".to_string(),
                "More frequent monitoring of blood pressure".to_string(),
                "Regular check-ups with your primary care physician".to_string(),
                "Hydration monitoring, especially in hot weather".to_string(),
            ],
        });
    }

    if answers.diabetes.is_diabetic() {
        blocks.push(diabetes_block(answers.diabetes, answers.duration));
    }

    blocks.push(lifestyle_block(answers.smoking, answers.bmi));

    blocks
}

fn diabetes_block(diabetes: Diabetes, duration: u32) -> RecommendationBlock {
    let intro = match diabetes {
        Diabetes::Type1 => "As you have Type 1 diabetes:",
        Diabetes::Type2 => "As you have Type 2 diabetes:",
        _ => "As you have prediabetes:",
    };

    let items = match diabetes {
        Diabetes::Type1 | Diabetes::Type2 => {
            let mut items = vec![
                "Annual urine albumin test is crucial for early kidney damage detection"
                    .to_string(),
                "Maintain A1C below 7% (individualized target based on your health status)"
                    .to_string(),
                "Monitor blood sugar levels regularly".to_string(),
            ];
            if duration >= FREQUENT_MONITORING_YEARS {
                items.push(format!(
                    "Since you've had diabetes for {duration} years, consider kidney function tests every 6 months"
                ));
            }
            items.push(
                "Consult with an endocrinologist for optimal diabetes management".to_string(),
            );
            items.push("Foot care and regular eye exams to prevent complications".to_string());
            items
        }
        _ => vec![
            "Lifestyle changes can help prevent progression to diabetes".to_string(),
            "Healthy diet with controlled carbohydrates".to_string(),
            "Regular physical activity (150 minutes per week)".to_string(),
            "Annual screening for diabetes development".to_string(),
        ],
    };

    RecommendationBlock {
        title: "Diabetes Management".to_string(),
        intro: Some(intro.to_string()),
        items,
    }
}

fn lifestyle_block(smoking: Smoking, bmi: f64) -> RecommendationBlock {
    let mut items = Vec::new();

    if smoking == Smoking::Current {
        items.push(
            "Smoking cessation is strongly recommended - consider nicotine replacement therapy or medications"
                .to_string(),
        );
    }

    if bmi >= OVERWEIGHT_BMI {
        items.push(format!(
            "Weight management (current BMI {bmi:.1}): balanced diet with portion control, regular physical activity, behavioral modifications, and consider consultation with a dietitian"
        ));
    }

    items.extend([
        "Regular physical activity (150 mins/week moderate exercise): walking, swimming, cycling; strength training 2x/week; consult doctor before starting a new exercise program"
            .to_string(),
        "Nutrition: plant-based diet with lean proteins; limit processed foods; moderate protein intake (0.8g/kg body weight); increase fruits and vegetables"
            .to_string(),
        "Other: stay hydrated with water; limit NSAID pain medication use; moderate alcohol consumption; stress reduction techniques"
            .to_string(),
    ]);

    RecommendationBlock {
        title: "Lifestyle Recommendations".to_string(),
        intro: None,
        items,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::questionnaire::{
        FamilyHistory, Hypertension, QuestionnaireAnswers, Race, Sex,
    };
    use crate::scorer::score;

    fn result_for(mutate: impl FnOnce(&mut QuestionnaireAnswers)) -> RiskResult {
        let mut answers = QuestionnaireAnswers {
            age: 30,
            sex: Sex::Female,
            race: Race::White,
            hypertension: Hypertension::No,
            diabetes: Diabetes::No,
            duration: 0,
            family_history: FamilyHistory::No,
            family_diseases: vec![],
            bmi: 22.0,
            smoking: Smoking::Never,
            cardiovascular: false,
            symptoms: vec![],
        };
        mutate(&mut answers);
        score(&answers)
    }

    #[test]
    fn test_low_risk_gets_only_lifestyle_block() {
        let blocks = build_recommendations(&result_for(|_| {}));
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].title, "Lifestyle Recommendations");
        assert_eq!(blocks[0].items.len(), 3);
    }

    #[test]
    fn test_senior_gets_age_block_first() {
        let blocks = build_recommendations(&result_for(|a| a.age = 65));
        assert_eq!(blocks[0].title, "Age-Related Recommendations");
        assert_eq!(blocks[0].items.len(), 4);
        assert_eq!(
            blocks[0].intro.as_deref(),
            Some("Since you're over 60, we recommend:")
        );
    }

    #[test]
    fn test_under_sixty_gets_no_age_block() {
        let blocks = build_recommendations(&result_for(|a| a.age = 59));
        assert!(blocks.iter().all(|b| b.title != "Age-Related Recommendations"));
    }

    #[test]
    fn test_type2_block_mentions_duration_monitoring() {
        let blocks = build_recommendations(&result_for(|a| {
            a.diabetes = Diabetes::Type2;
            a.duration = 12;
        }));
        let diabetes = blocks
            .iter()
            .find(|b| b.title == "Diabetes Management")
            .unwrap();
        assert_eq!(diabetes.intro.as_deref(), Some("As you have Type 2 diabetes:"));
        assert!(diabetes
            .items
            .iter()
            .any(|item| item.contains("12 years") && item.contains("every 6 months")));
    }

    #[test]
    fn test_short_duration_skips_six_month_item() {
        let blocks = build_recommendations(&result_for(|a| {
            a.diabetes = Diabetes::Type1;
            a.duration = 4;
        }));
        let diabetes = blocks
            .iter()
            .find(|b| b.title == "Diabetes Management")
            .unwrap();
        assert_eq!(diabetes.intro.as_deref(), Some("As you have Type 1 diabetes:"));
        assert!(!diabetes.items.iter().any(|item| item.contains("every 6 months")));
        assert_eq!(diabetes.items.len(), 5);
    }

    #[test]
    fn test_prediabetes_gets_prevention_items() {
        let blocks = build_recommendations(&result_for(|a| a.diabetes = Diabetes::Prediabetes));
        let diabetes = blocks
            .iter()
            .find(|b| b.title == "Diabetes Management")
            .unwrap();
        assert_eq!(diabetes.items.len(), 4);
        assert!(diabetes.items[0].contains("prevent progression"));
        assert!(!diabetes.items.iter().any(|item| item.contains("albumin")));
    }

    #[test]
    fn test_lifestyle_prepends_smoking_then_weight() {
        let blocks = build_recommendations(&result_for(|a| {
            a.smoking = Smoking::Current;
            a.bmi = 27.0;
        }));
        let lifestyle = blocks.last().unwrap();
        assert!(lifestyle.items[0].starts_with("Smoking cessation"));
        assert!(lifestyle.items[1].starts_with("Weight management (current BMI 27.0)"));
        assert!(lifestyle.items[2].starts_with("Regular physical activity"));
        assert_eq!(lifestyle.items.len(), 5);
    }

    #[test]
    fn test_lifestyle_weight_item_only_when_overweight() {
        let blocks = build_recommendations(&result_for(|a| a.bmi = 24.9));
        assert!(!blocks
            .last()
            .unwrap()
            .items
            .iter()
            .any(|item| item.starts_with("Weight management")));

        let blocks = build_recommendations(&result_for(|a| a.bmi = 25.0));
        assert!(blocks
            .last()
            .unwrap()
            .items
            .iter()
            .any(|item| item.starts_with("Weight management")));
    }

    #[test]
    fn test_lifestyle_block_is_always_last() {
        let blocks = build_recommendations(&result_for(|a| {
            a.age = 70;
            a.diabetes = Diabetes::Type2;
        }));
        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks.last().unwrap().title, "Lifestyle Recommendations");
    }
}
