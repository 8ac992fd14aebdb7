//! Model-ensemble risk prediction.
//!
//! Projects raw request fields onto the fixed feature vector the
//! pretrained models expect, queries three independent scorers
//! concurrently and blends their probabilities into a single risk
//! score with fixed weights. Model artifacts are external; this crate
//! only defines the scorer seam and a portable logistic artifact
//! format for it.

pub mod blender;
pub mod error;
pub mod features;
pub mod model;

pub use blender::{EnsembleBlender, EnsemblePrediction, EnsembleWeights, ModelContribution};
pub use error::{EnsembleError, Result};
pub use features::{FeatureVector, PredictRequest, FEATURE_CONTRACT, FEATURE_COUNT, FEATURE_NAMES};
pub use model::{ArtifactSpec, LogisticArtifact, MockScorer, ModelScorer};
