//! cvrisk-score
//!
//! Cardiovascular risk scoring for people aged 70 and over. Continuous
//! predictors are discretized into bins, the bins select one cell, and the
//! cell's coefficient for the chosen risk region is the score. The bin
//! boundaries and the coefficients are reference data in
//! `data/coefficients.json`, validated once at load.
//!
//! The bundled dataset is a placeholder: one cell matches the published
//! chart and the rest only respect its ordering. Check
//! [`CoefficientTable::provenance`] before relying on a score, and load the
//! published table through `ScoringConfig::coefficients_path` or by
//! replacing the data file.

pub mod axis;
pub mod cell;
pub mod config;
pub mod engine;
pub mod error;
pub mod report;
pub mod table;

pub use engine::{BatchScore, ScoreEngine, ScoredRecord, ScoringOptions};
pub use table::{CoefficientTable, Provenance};
