//! Risk tier shared by the questionnaire engine and the model ensemble.

use serde::{Deserialize, Serialize};

/// Coarse risk classification derived from a numeric score.
///
/// Both engines produce one of these, each from its own thresholds:
/// the questionnaire from a 0..=20 point total, the ensemble from a
/// blended probability. `Display` renders the uppercase form used in
/// printable reports; serde uses the lowercase wire form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl RiskLevel {
    /// Patient-facing one-liner for each tier.
    pub fn description(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low risk - routine screening is sufficient",
            RiskLevel::Moderate => "Moderate risk - follow-up with your physician is recommended",
            RiskLevel::High => "High risk - clinical evaluation is strongly recommended",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Moderate => "MODERATE",
            RiskLevel::High => "HIGH",
        };
        write!(f, "{label}")
    }
}
