//! cvrisk-core
//!
//! Pure domain types for cardiovascular risk scoring: the predictor set,
//! risk regions, cholesterol units and the advisories raised while
//! validating input. No coefficient data lives here; this is the shared
//! vocabulary of the cvrisk workspace.

pub mod error;
pub mod models;
