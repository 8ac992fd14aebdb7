//! Rule-based chronic kidney disease risk engine.
//!
//! Takes a validated questionnaire, awards points per clinical factor,
//! tiers the total into a risk level, derives tailored recommendations
//! and renders the whole assessment as a printable plain-text report.
//! Everything in this crate is a pure transform; the HTTP layer lives
//! in `nephra-web`.

pub mod questionnaire;
pub mod recommendations;
pub mod report;
pub mod scorer;

pub use questionnaire::{AssessmentSubmission, QuestionnaireAnswers, ValidationError};
pub use recommendations::{build_recommendations, RecommendationBlock};
pub use report::{render_report, Assessment, ReportDocument};
pub use scorer::{score, RiskResult, ScoreFactor};
