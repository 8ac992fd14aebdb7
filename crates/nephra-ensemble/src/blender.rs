//! Weighted blending of the three ensemble members.
//!
//! Members are queried concurrently with a per-call timeout. One
//! failure fails the whole prediction; a partial blend would silently
//! shift the weighting the models were validated with.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use nephra_common::RiskLevel;

use crate::error::{EnsembleError, Result};
use crate::features::FeatureVector;
use crate::model::ModelScorer;

/// Blend weight of the gradient-boosted member.
pub const LIGHTGBM_WEIGHT: f64 = 0.4;
/// Blend weight of the categorical-boosting member.
pub const CATBOOST_WEIGHT: f64 = 0.3;
/// Blend weight of the neural member.
pub const MLP_WEIGHT: f64 = 0.3;

/// Blended probability at or above which the prediction is high risk.
pub const HIGH_RISK_CUTOFF: f64 = 0.7;
/// Blended probability at or above which the prediction is moderate risk.
pub const MODERATE_RISK_CUTOFF: f64 = 0.4;

/// Per-model blend weights. Must sum to 1 with every weight in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnsembleWeights {
    pub lightgbm: f64,
    pub catboost: f64,
    pub mlp: f64,
}

impl Default for EnsembleWeights {
    fn default() -> Self {
        EnsembleWeights {
            lightgbm: LIGHTGBM_WEIGHT,
            catboost: CATBOOST_WEIGHT,
            mlp: MLP_WEIGHT,
        }
    }
}

impl EnsembleWeights {
    /// Check the weights form a convex combination.
    pub fn validate(&self) -> bool {
        let weights = [self.lightgbm, self.catboost, self.mlp];
        weights.iter().all(|w| (0.0..=1.0).contains(w))
            && (weights.iter().sum::<f64>() - 1.0).abs() < 1e-9
    }
}

/// One member's probability as it entered the blend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelContribution {
    pub model_name: String,
    pub probability: f64,
}

/// Blended prediction in the shape the predict endpoint returns.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnsemblePrediction {
    /// Blended probability scaled to 0..=100 and floored.
    pub risk_score: u32,
    pub risk_level: RiskLevel,
    /// `risk_score` formatted for display, e.g. "53%".
    pub risk_percentage: String,
    pub model_contributions: Vec<ModelContribution>,
}

/// Map a blended probability to its risk tier.
pub fn risk_tier(probability: f64) -> RiskLevel {
    if probability >= HIGH_RISK_CUTOFF {
        RiskLevel::High
    } else if probability >= MODERATE_RISK_CUTOFF {
        RiskLevel::Moderate
    } else {
        RiskLevel::Low
    }
}

/// Queries the three members and blends their probabilities.
#[derive(Clone)]
pub struct EnsembleBlender {
    lightgbm: Arc<dyn ModelScorer>,
    catboost: Arc<dyn ModelScorer>,
    mlp: Arc<dyn ModelScorer>,
    weights: EnsembleWeights,
    timeout: Duration,
}

impl EnsembleBlender {
    pub fn new(
        lightgbm: Arc<dyn ModelScorer>,
        catboost: Arc<dyn ModelScorer>,
        mlp: Arc<dyn ModelScorer>,
        weights: EnsembleWeights,
        timeout: Duration,
    ) -> Self {
        EnsembleBlender {
            lightgbm,
            catboost,
            mlp,
            weights,
            timeout,
        }
    }

    /// Member names in blend order.
    pub fn model_names(&self) -> [&str; 3] {
        [
            self.lightgbm.name(),
            self.catboost.name(),
            self.mlp.name(),
        ]
    }

    /// Run one prediction: query all members concurrently, fail if any
    /// member fails, blend the rest deterministically.
    pub async fn blend(&self, features: &FeatureVector) -> Result<EnsemblePrediction> {
        let (lightgbm, catboost, mlp) = tokio::try_join!(
            self.query(&*self.lightgbm, features),
            self.query(&*self.catboost, features),
            self.query(&*self.mlp, features),
        )?;

        let hybrid = self.weights.lightgbm * lightgbm
            + self.weights.catboost * catboost
            + self.weights.mlp * mlp;
        let risk_score = (hybrid * 100.0).floor() as u32;
        let risk_level = risk_tier(hybrid);

        Ok(EnsemblePrediction {
            risk_score,
            risk_level,
            risk_percentage: format!("{risk_score}%"),
            model_contributions: vec![
                ModelContribution {
                    model_name: self.lightgbm.name().to_string(),
                    probability: lightgbm,
                },
                ModelContribution {
                    model_name: self.catboost.name().to_string(),
                    probability: catboost,
                },
                ModelContribution {
                    model_name: self.mlp.name().to_string(),
                    probability: mlp,
                },
            ],
        })
    }

    async fn query(&self, model: &dyn ModelScorer, features: &FeatureVector) -> Result<f64> {
        let probability = tokio::time::timeout(self.timeout, model.predict(features))
            .await
            .map_err(|_| EnsembleError::Timeout {
                model: model.name().to_string(),
                timeout_ms: self.timeout.as_millis() as u64,
            })??;
        if !(0.0..=1.0).contains(&probability) {
            return Err(EnsembleError::InvalidProbability {
                model: model.name().to_string(),
                value: probability,
            });
        }
        Ok(probability)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MockScorer;
    use std::time::Instant;

    fn blender(lightgbm: MockScorer, catboost: MockScorer, mlp: MockScorer) -> EnsembleBlender {
        EnsembleBlender::new(
            Arc::new(lightgbm),
            Arc::new(catboost),
            Arc::new(mlp),
            EnsembleWeights::default(),
            Duration::from_millis(500),
        )
    }

    fn features() -> FeatureVector {
        FeatureVector::new(65.0, 1.0, 32.0, 1.0)
    }

    #[tokio::test]
    async fn test_weighted_blend_floors_to_integer_score() {
        let blender = blender(
            MockScorer::new("lightgbm", 0.8),
            MockScorer::new("catboost", 0.5),
            MockScorer::new("mlp", 0.2),
        );
        let prediction = blender.blend(&features()).await.unwrap();

        // 0.4*0.8 + 0.3*0.5 + 0.3*0.2 = 0.53
        assert_eq!(prediction.risk_score, 53);
        assert_eq!(prediction.risk_level, RiskLevel::Moderate);
        assert_eq!(prediction.risk_percentage, "53%");
        assert_eq!(prediction.model_contributions.len(), 3);
        assert_eq!(prediction.model_contributions[0].model_name, "lightgbm");
        assert!((prediction.model_contributions[0].probability - 0.8).abs() < 1e-12);
        assert_eq!(prediction.model_contributions[2].model_name, "mlp");
    }

    #[tokio::test]
    async fn test_blend_extremes() {
        let certain = blender(
            MockScorer::new("lightgbm", 1.0),
            MockScorer::new("catboost", 1.0),
            MockScorer::new("mlp", 1.0),
        );
        let prediction = certain.blend(&features()).await.unwrap();
        assert_eq!(prediction.risk_score, 100);
        assert_eq!(prediction.risk_level, RiskLevel::High);

        let zero = blender(
            MockScorer::new("lightgbm", 0.0),
            MockScorer::new("catboost", 0.0),
            MockScorer::new("mlp", 0.0),
        );
        let prediction = zero.blend(&features()).await.unwrap();
        assert_eq!(prediction.risk_score, 0);
        assert_eq!(prediction.risk_level, RiskLevel::Low);
    }

    #[test]
    fn test_tier_cutoffs() {
        assert_eq!(risk_tier(0.0), RiskLevel::Low);
        assert_eq!(risk_tier(0.399), RiskLevel::Low);
        assert_eq!(risk_tier(0.4), RiskLevel::Moderate);
        assert_eq!(risk_tier(0.699), RiskLevel::Moderate);
        assert_eq!(risk_tier(0.7), RiskLevel::High);
        assert_eq!(risk_tier(1.0), RiskLevel::High);
    }

    #[test]
    fn test_default_weights_are_convex() {
        assert!(EnsembleWeights::default().validate());
        assert!(!EnsembleWeights { lightgbm: 0.5, catboost: 0.5, mlp: 0.5 }.validate());
        assert!(!EnsembleWeights { lightgbm: 1.2, catboost: -0.1, mlp: -0.1 }.validate());
    }

    #[tokio::test]
    async fn test_one_failing_member_fails_the_blend() {
        let blender = blender(
            MockScorer::new("lightgbm", 0.8),
            MockScorer::failing("catboost"),
            MockScorer::new("mlp", 0.2),
        );
        let err = blender.blend(&features()).await.unwrap_err();
        assert!(matches!(err, EnsembleError::ModelUnavailable { .. }));
        assert!(err.to_string().contains("catboost"));
    }

    #[tokio::test]
    async fn test_slow_member_times_out() {
        let blender = EnsembleBlender::new(
            Arc::new(MockScorer::new("lightgbm", 0.8)),
            Arc::new(MockScorer::new("catboost", 0.5).with_delay(Duration::from_millis(200))),
            Arc::new(MockScorer::new("mlp", 0.2)),
            EnsembleWeights::default(),
            Duration::from_millis(20),
        );
        let err = blender.blend(&features()).await.unwrap_err();
        assert!(matches!(err, EnsembleError::Timeout { .. }));
        assert_eq!(err.to_string(), "model 'catboost' timed out after 20 ms");
    }

    #[tokio::test]
    async fn test_out_of_range_probability_rejected() {
        let blender = blender(
            MockScorer::new("lightgbm", 1.5),
            MockScorer::new("catboost", 0.5),
            MockScorer::new("mlp", 0.2),
        );
        let err = blender.blend(&features()).await.unwrap_err();
        assert!(matches!(err, EnsembleError::InvalidProbability { .. }));
        assert!(err.to_string().contains("lightgbm"));
    }

    #[tokio::test]
    async fn test_members_are_queried_concurrently() {
        let delay = Duration::from_millis(100);
        let blender = EnsembleBlender::new(
            Arc::new(MockScorer::new("lightgbm", 0.8).with_delay(delay)),
            Arc::new(MockScorer::new("catboost", 0.5).with_delay(delay)),
            Arc::new(MockScorer::new("mlp", 0.2).with_delay(delay)),
            EnsembleWeights::default(),
            Duration::from_millis(500),
        );
        let started = Instant::now();
        blender.blend(&features()).await.unwrap();
        // Sequential queries would take at least 300ms.
        assert!(started.elapsed() < Duration::from_millis(250));
    }

    #[test]
    fn test_prediction_serialises_camel_case() {
        let prediction = EnsemblePrediction {
            risk_score: 53,
            risk_level: RiskLevel::Moderate,
            risk_percentage: "53%".to_string(),
            model_contributions: vec![ModelContribution {
                model_name: "lightgbm".to_string(),
                probability: 0.8,
            }],
        };
        let json = serde_json::to_value(&prediction).unwrap();
        assert_eq!(json["riskScore"], 53);
        assert_eq!(json["riskLevel"], "moderate");
        assert_eq!(json["riskPercentage"], "53%");
        assert_eq!(json["modelContributions"][0]["modelName"], "lightgbm");
    }
}
