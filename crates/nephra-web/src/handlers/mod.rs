//! HTTP handlers for all service routes.

pub mod assessment;
pub mod predict;
pub mod system;
