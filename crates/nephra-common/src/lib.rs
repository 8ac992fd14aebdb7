//! Shared types for the Nephra service crates.
//!
//! Everything here is domain-neutral plumbing used by both the
//! questionnaire engine and the model ensemble: the risk tier enum and
//! the error taxonomy exposed at the HTTP boundary.

pub mod error;
pub mod risk;

pub use error::ApiError;
pub use risk::RiskLevel;
