//! nephra-web: HTTP surface of the kidney disease risk service.
//!
//! Routes:
//!   - POST /calculate       questionnaire scoring with recommendations
//!   - POST /download-report plain-text report rendering
//!   - POST /predict         three-model ensemble prediction
//!   - GET  /health          liveness and loaded model roster

pub mod config;
pub mod handlers;
pub mod router;
pub mod state;
